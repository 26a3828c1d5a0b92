use cspace_image::{Image, ImageError};

/// A primitive colorspace conversion between two concrete 8-bit pixel encodings.
///
/// Each variant is one direct edge: a single pass over the pixels with no intermediate
/// colorspace. Multi-step routes are composed by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorConversion {
    /// BGR (3 channels) to grayscale (1 channel).
    BgrToGray,
    /// RGB (3 channels) to grayscale (1 channel).
    RgbToGray,
    /// BGR to full range 8-bit HSV.
    BgrToHsv,
    /// RGB to full range 8-bit HSV.
    RgbToHsv,
    /// Full range 8-bit HSV to BGR.
    HsvToBgr,
    /// RGB to BGR.
    RgbToBgr,
    /// Grayscale (1 channel) to BGR (3 channels) by replication.
    GrayToBgr,
}

impl ColorConversion {
    /// Channel count the source image must have.
    pub const fn src_channels(self) -> usize {
        match self {
            ColorConversion::GrayToBgr => 1,
            _ => 3,
        }
    }

    /// Channel count of the produced image.
    pub const fn dst_channels(self) -> usize {
        match self {
            ColorConversion::BgrToGray | ColorConversion::RgbToGray => 1,
            _ => 3,
        }
    }

    /// Run the conversion from `src` into a pre-allocated `dst`.
    pub fn apply(self, src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
        match self {
            ColorConversion::BgrToGray => super::gray_from_bgr_u8(src, dst),
            ColorConversion::RgbToGray => super::gray_from_rgb_u8(src, dst),
            ColorConversion::BgrToHsv => super::hsv_from_bgr_u8(src, dst),
            ColorConversion::RgbToHsv => super::hsv_from_rgb_u8(src, dst),
            ColorConversion::HsvToBgr => super::bgr_from_hsv_u8(src, dst),
            ColorConversion::RgbToBgr => super::bgr_from_rgb(src, dst),
            ColorConversion::GrayToBgr => super::bgr_from_gray(src, dst),
        }
    }
}

/// Convert `src` with the given primitive conversion into a newly allocated image.
///
/// The source is never modified.
///
/// # Errors
///
/// Returns [`ImageError::ChannelCountMismatch`] if `src` does not have the channel count
/// the conversion expects.
///
/// # Example
///
/// ```
/// use cspace_image::{Image, ImageSize};
/// use cspace_imgproc::color::{cvt_color, ColorConversion};
///
/// let bgr = Image::new(ImageSize { width: 1, height: 1 }, 3, vec![10u8, 20, 30]).unwrap();
/// let rgb = cvt_color(&bgr, ColorConversion::RgbToBgr).unwrap();
///
/// assert_eq!(rgb.as_slice(), &[30, 20, 10]);
/// ```
pub fn cvt_color(src: &Image<u8>, conversion: ColorConversion) -> Result<Image<u8>, ImageError> {
    if src.num_channels() != conversion.src_channels() {
        return Err(ImageError::ChannelCountMismatch(
            src.num_channels(),
            conversion.src_channels(),
        ));
    }

    let mut dst = Image::from_size_val(src.size(), conversion.dst_channels(), 0u8)?;
    conversion.apply(src, &mut dst)?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspace_image::ImageSize;

    #[test]
    fn cvt_color_allocates_output() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let gray = Image::new(size, 1, vec![5u8, 250])?;

        let bgr = cvt_color(&gray, ColorConversion::GrayToBgr)?;
        assert_eq!(bgr.num_channels(), 3);
        assert_eq!(bgr.as_slice(), &[5, 5, 5, 250, 250, 250]);

        let back = cvt_color(&bgr, ColorConversion::BgrToGray)?;
        assert_eq!(back, gray);
        assert!(!back.shares_storage_with(&gray));

        Ok(())
    }

    #[test]
    fn cvt_color_rejects_wrong_channels() -> Result<(), ImageError> {
        let gray = Image::from_size_val([2, 2].into(), 1, 0u8)?;
        assert_eq!(
            cvt_color(&gray, ColorConversion::BgrToHsv),
            Err(ImageError::ChannelCountMismatch(1, 3))
        );
        Ok(())
    }

    #[test]
    fn channel_counts() {
        assert_eq!(ColorConversion::GrayToBgr.src_channels(), 1);
        assert_eq!(ColorConversion::GrayToBgr.dst_channels(), 3);
        assert_eq!(ColorConversion::RgbToGray.src_channels(), 3);
        assert_eq!(ColorConversion::RgbToGray.dst_channels(), 1);
        assert_eq!(ColorConversion::HsvToBgr.dst_channels(), 3);
    }

    #[test]
    fn empty_images_convert_to_empty_images() -> Result<(), ImageError> {
        let empty = Image::from_size_val([0, 0].into(), 3, 0u8)?;
        let gray = cvt_color(&empty, ColorConversion::BgrToGray)?;
        assert!(gray.is_empty());
        assert_eq!(gray.num_channels(), 1);
        Ok(())
    }
}
