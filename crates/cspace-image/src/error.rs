/// An error type for the image buffer.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when an image is requested with no channels.
    #[error("Invalid channel count ({0}), an image needs at least one channel")]
    InvalidChannelCount(usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size. Got: {0}x{1}, Expected: {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel count of an image does not match the expected one.
    #[error("Channel count mismatch. Got: {0}, Expected: {1}")]
    ChannelCountMismatch(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a region does not fit inside the image.
    #[error("Region {0} does not fit inside an image of {1}x{2}")]
    InvalidRegion(crate::view::Rect, usize, usize),
}
