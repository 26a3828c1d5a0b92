use cspace_image::ImageError;

use crate::colorspace::ColorSpace;

/// An error type for colorspace tagging, routing and highlighting.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CspaceError {
    /// The tag and the channel count of the buffer disagree.
    #[error("Colorspace {colorspace} needs {expected} channel(s) but the buffer has {found}")]
    ColorspaceMismatch {
        /// The colorspace the buffer was checked against.
        colorspace: ColorSpace,
        /// Channel count required by the colorspace.
        expected: usize,
        /// Channel count of the buffer.
        found: usize,
    },

    /// There is no routing rule between the two colorspaces.
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion {
        /// Colorspace of the source image.
        from: ColorSpace,
        /// Requested colorspace.
        to: ColorSpace,
    },

    /// The number of masks does not fit in the hue resolution.
    #[error("Cannot highlight {0} masks, expected between 1 and 255")]
    CapacityExceeded(usize),

    /// Error raised by the underlying image buffer or conversion primitive.
    #[error(transparent)]
    Image(#[from] ImageError),
}
