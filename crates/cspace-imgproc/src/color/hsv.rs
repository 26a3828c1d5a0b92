use super::check_shapes;
use crate::parallel;
use cspace_image::{Image, ImageError};

#[inline]
fn to_u8(x: f32) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Compute the 8-bit HSV triple of a single RGB pixel.
fn hsv_from_rgb_pixel(r: u8, g: u8, b: u8) -> [u8; 3] {
    // Normalize the input to the range [0, 1]
    let r = r as f32 / 255.;
    let g = g as f32 / 255.;
    let b = b as f32 / 255.;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    // Ensure h is in the range [0, 360)
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    [to_u8((h / 360.0) * 255.0), to_u8(s * 255.0), to_u8(max * 255.0)]
}

/// Compute the RGB triple of a single 8-bit HSV pixel.
fn rgb_from_hsv_pixel(h: u8, s: u8, v: u8) -> [u8; 3] {
    // h spans the full byte, 255 is a full turn
    let h = (h as f32 / 255.0) * 360.0;
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;

    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match sector as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        to_u8((r + m) * 255.0),
        to_u8((g + m) * 255.0),
        to_u8((b + m) * 255.0),
    ]
}

/// Convert an RGB8 image to an 8-bit HSV image.
///
/// The input image is assumed to have 3 channels in the order R, G, B.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 255] (0-360 degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Pixels with R = G = B have H = 0, S = 0 and V equal to the common value.
///
/// Precondition: the input and output images must have 3 channels and the same size.
///
/// # Example
///
/// ```
/// use cspace_image::{Image, ImageSize};
/// use cspace_imgproc::color::hsv_from_rgb_u8;
///
/// let image = Image::new(ImageSize { width: 1, height: 1 }, 3, vec![255u8, 0, 0]).unwrap();
/// let mut hsv = Image::from_size_val(image.size(), 3, 0u8).unwrap();
///
/// hsv_from_rgb_u8(&image, &mut hsv).unwrap();
/// assert_eq!(hsv.as_slice(), &[0, 255, 255]);
/// ```
pub fn hsv_from_rgb_u8(src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
    check_shapes(src, dst, 3, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&hsv_from_rgb_pixel(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    Ok(())
}

/// Convert a BGR8 image to an 8-bit HSV image.
///
/// Same channel layout and ranges as [`hsv_from_rgb_u8`], reading the input as B, G, R.
pub fn hsv_from_bgr_u8(src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
    check_shapes(src, dst, 3, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&hsv_from_rgb_pixel(src_pixel[2], src_pixel[1], src_pixel[0]));
    });

    Ok(())
}

/// Convert an 8-bit HSV image back to RGB8.
///
/// Inverse of [`hsv_from_rgb_u8`] up to rounding.
pub fn rgb_from_hsv_u8(src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
    check_shapes(src, dst, 3, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.copy_from_slice(&rgb_from_hsv_pixel(src_pixel[0], src_pixel[1], src_pixel[2]));
    });

    Ok(())
}

/// Convert an 8-bit HSV image back to BGR8.
///
/// The hue channel is read with the full byte range, so both 0 and 255 denote red.
///
/// Precondition: the input and output images must have 3 channels and the same size.
pub fn bgr_from_hsv_u8(src: &Image<u8>, dst: &mut Image<u8>) -> Result<(), ImageError> {
    check_shapes(src, dst, 3, 3)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let [r, g, b] = rgb_from_hsv_pixel(src_pixel[0], src_pixel[1], src_pixel[2]);
        dst_pixel[0] = b;
        dst_pixel[1] = g;
        dst_pixel[2] = r;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use cspace_image::{Image, ImageError, ImageSize};

    #[test]
    fn hsv_from_rgb_u8() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            vec![
                0u8, 128, 255, 255, 128, 0,
                128, 255, 0, 255, 0, 128,
            ],
        )?;

        // full range hue: 148.67, 21.33, 63.67, 233.67
        #[rustfmt::skip]
        let expected = [
            149u8, 255, 255, 21, 255, 255,
            64, 255, 255, 234, 255, 255,
        ];

        let mut hsv = Image::from_size_val(image.size(), 3, 0u8)?;

        super::hsv_from_rgb_u8(&image, &mut hsv)?;

        assert_eq!(hsv.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn hsv_from_bgr_u8_reads_reversed_channels() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let bgr = Image::new(size, 3, vec![0u8, 0, 255])?;
        let mut hsv = Image::from_size_val(size, 3, 0u8)?;

        super::hsv_from_bgr_u8(&bgr, &mut hsv)?;

        assert_eq!(hsv.as_slice(), &[0, 255, 255]);
        Ok(())
    }

    #[test]
    fn neutral_pixels_have_no_hue() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let gray = Image::new(size, 3, vec![0u8, 0, 0, 90, 90, 90, 255, 255, 255])?;
        let mut hsv = Image::from_size_val(size, 3, 1u8)?;

        super::hsv_from_bgr_u8(&gray, &mut hsv)?;

        assert_eq!(hsv.as_slice(), &[0, 0, 0, 0, 0, 90, 0, 0, 255]);
        Ok(())
    }

    #[test]
    fn bgr_from_hsv_u8_primaries() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 1,
        };
        // red at both ends of the hue range, a neutral gray and a desaturated black
        #[rustfmt::skip]
        let hsv = Image::new(size, 3, vec![
            0u8, 255, 255,
            255, 255, 255,
            40, 0, 77,
            200, 255, 0,
        ])?;
        let mut bgr = Image::from_size_val(size, 3, 0u8)?;

        super::bgr_from_hsv_u8(&hsv, &mut bgr)?;

        #[rustfmt::skip]
        let expected = [
            0u8, 0, 255,
            0, 0, 255,
            77, 77, 77,
            0, 0, 0,
        ];
        assert_eq!(bgr.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn rgb_from_hsv_u8_is_reversed_bgr() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let hsv = Image::new(size, 3, vec![85u8, 255, 255, 21, 200, 180])?;
        let mut rgb = Image::from_size_val(size, 3, 0u8)?;
        let mut bgr = Image::from_size_val(size, 3, 0u8)?;

        super::rgb_from_hsv_u8(&hsv, &mut rgb)?;
        super::bgr_from_hsv_u8(&hsv, &mut bgr)?;

        assert_eq!(rgb.pixel(0, 0), Some(&[0u8, 255, 0][..]));
        for (r, b) in rgb.pixels().zip(bgr.pixels()) {
            assert_eq!(r, [b[2], b[1], b[0]]);
        }
        Ok(())
    }

    #[test]
    fn hsv_round_trip_is_close() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 1,
        };
        #[rustfmt::skip]
        let bgr = Image::new(size, 3, vec![
            10u8, 20, 30,
            200, 100, 50,
            0, 255, 0,
            33, 33, 33,
        ])?;
        let mut hsv = Image::from_size_val(size, 3, 0u8)?;
        let mut back = Image::from_size_val(size, 3, 0u8)?;

        super::hsv_from_bgr_u8(&bgr, &mut hsv)?;
        super::bgr_from_hsv_u8(&hsv, &mut back)?;

        for (a, b) in bgr.as_slice().iter().zip(back.as_slice()) {
            assert!((*a as i16 - *b as i16).abs() <= 3, "{a} vs {b}");
        }
        Ok(())
    }
}
