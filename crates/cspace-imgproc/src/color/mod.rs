mod convert;
mod gray;
mod hsv;

pub use convert::{cvt_color, ColorConversion};
pub use gray::{bgr_from_gray, bgr_from_rgb, gray_from_bgr_u8, gray_from_rgb_u8};
pub use hsv::{bgr_from_hsv_u8, hsv_from_bgr_u8, hsv_from_rgb_u8, rgb_from_hsv_u8};

use cspace_image::{Image, ImageError};

/// Check that `src` and `dst` have the same size and the expected channel counts.
pub(crate) fn check_shapes<T1, T2>(
    src: &Image<T1>,
    dst: &Image<T2>,
    src_channels: usize,
    dst_channels: usize,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.num_channels() != src_channels {
        return Err(ImageError::ChannelCountMismatch(
            src.num_channels(),
            src_channels,
        ));
    }

    if dst.num_channels() != dst_channels {
        return Err(ImageError::ChannelCountMismatch(
            dst.num_channels(),
            dst_channels,
        ));
    }

    Ok(())
}
