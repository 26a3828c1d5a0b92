#![deny(missing_docs)]
//! Colorspace tagged images.
//!
//! A [`TaggedImage`] pairs an 8-bit pixel buffer with the [`ColorSpace`] it represents and
//! keeps the two consistent. The [`router`] converts tagged images between colorspaces, going
//! through BGR when no direct conversion exists, and [`highlight`] paints masks over a
//! background, one hue per mask.
//!
//! ```
//! use cspace_color::{ColorSpace, TaggedImage};
//! use cspace_image::{Image, ImageSize};
//!
//! let size = ImageSize { width: 4, height: 4 };
//! let hsv = Image::from_size_val(size, 3, 90u8).unwrap();
//! let image = TaggedImage::from_parts(hsv, ColorSpace::Hsv).unwrap();
//!
//! let gray = image.to_gray().unwrap();
//! assert_eq!(gray.tag(), ColorSpace::Gray);
//! assert_eq!(gray.num_channels(), 1);
//! ```

/// The closed set of colorspaces.
pub mod colorspace;

/// Error types for the colorspace module.
pub mod error;

pub mod highlight;

pub mod router;

/// Images paired with their colorspace.
pub mod tagged;

pub use crate::colorspace::ColorSpace;
pub use crate::error::CspaceError;
pub use crate::highlight::{
    highlight_one_over_bg, highlight_over_bg, highlight_over_bg_with, HighlightConfig,
};
pub use crate::router::{convert, to_3channel_gray, to_bgr, to_gray, to_hsv, Route};
pub use crate::tagged::TaggedImage;
