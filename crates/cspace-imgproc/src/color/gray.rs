use super::check_shapes;
use crate::parallel;
use cspace_image::{Image, ImageError};

/// Fixed point weights of the luma transform, scaled by 256.
const RW: u16 = 77;
const GW: u16 = 150;
const BW: u16 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 * RW + g as u16 * GW + b as u16 * BW) >> 8) as u8
}

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = (77 * R + 150 * G + 29 * B) >> 8
///
/// The weights sum to 256, so a pixel with R = G = B maps to exactly that value.
///
/// # Arguments
///
/// * `src` - The input RGB8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input image must have 3 channels.
/// Precondition: the output image must have 1 channel.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use cspace_image::{Image, ImageSize};
/// use cspace_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::new(ImageSize { width: 1, height: 2 }, 3, vec![0u8, 128, 255, 128, 0, 128]).unwrap();
/// let mut gray = Image::from_size_val(image.size(), 1, 0u8).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[103, 53]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
    check_shapes(src, dst, 3, 1)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luma(src_pixel[0], src_pixel[1], src_pixel[2]);
    });

    Ok(())
}

/// Convert a BGR8 image to grayscale with the same weights as [`gray_from_rgb_u8`].
///
/// Precondition: the input image must have 3 channels in the order B, G, R.
/// Precondition: the output image must have 1 channel.
/// Precondition: the input and output images must have the same size.
pub fn gray_from_bgr_u8(src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
    check_shapes(src, dst, 3, 1)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luma(src_pixel[2], src_pixel[1], src_pixel[0]);
    });

    Ok(())
}

/// Convert a grayscale image to a 3 channel image by replicating the grayscale value across
/// all three channels.
///
/// The result is valid both as BGR and as RGB since every channel holds the same value.
///
/// Precondition: the input image must have 1 channel.
/// Precondition: the output image must have 3 channels.
/// Precondition: the input and output images must have the same size.
pub fn bgr_from_gray<T>(src: &Image<T>, dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_shapes(src, dst, 1, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}

/// Convert an RGB image to BGR by swapping the red and blue channels.
///
/// The swap is its own inverse, so the same function converts BGR to RGB.
///
/// Precondition: the input and output images must have 3 channels and the same size.
pub fn bgr_from_rgb<T>(src: &Image<T>, dst: &mut Image<T>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_shapes(src, dst, 3, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel
            .iter_mut()
            .zip(src_pixel.iter().rev())
            .for_each(|(d, s)| {
                *d = *s;
            });
    });

    Ok(())
}
