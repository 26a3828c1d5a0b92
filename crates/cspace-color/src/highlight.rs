//! Highlighting of masks over a background image.
//!
//! Every mask is painted with its own fully saturated hue over the luminance of the
//! background. Masks are applied in order, so on overlapping pixels the last mask wins.

use cspace_image::{Image, ImageError};
use cspace_imgproc::parallel;

use crate::colorspace::ColorSpace;
use crate::error::CspaceError;
use crate::router;
use crate::tagged::TaggedImage;

/// Maximum number of masks that can be highlighted in one pass.
///
/// Hue is stored in a single byte and hue 0 is left to the background.
pub const MAX_MASKS: usize = 255;

/// Parameters of the highlight compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightConfig {
    /// Mask pixels strictly above this value are painted.
    pub threshold: u8,
    /// Saturation of painted pixels.
    pub saturation: u8,
    /// Value (brightness) of painted pixels.
    pub value: u8,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            threshold: 127,
            saturation: 255,
            value: 255,
        }
    }
}

/// The hue assigned to each of `n` masks.
///
/// Hues are spaced by `255 / n` starting one step above zero, so they are strictly increasing
/// and never zero.
///
/// # Errors
///
/// Returns [`CspaceError::CapacityExceeded`] unless `1 <= n <= 255`.
///
/// # Example
///
/// ```
/// use cspace_color::highlight::hue_map;
///
/// assert_eq!(hue_map(3).unwrap(), vec![85, 170, 255]);
/// assert!(hue_map(0).is_err());
/// ```
pub fn hue_map(n: usize) -> Result<Vec<u8>, CspaceError> {
    if n == 0 || n > MAX_MASKS {
        return Err(CspaceError::CapacityExceeded(n));
    }

    let step = MAX_MASKS / n;
    Ok((1..=n).map(|i| (i * step) as u8).collect())
}

fn check_mask(background: &TaggedImage, mask: &TaggedImage) -> Result<(), CspaceError> {
    if mask.num_channels() != 1 {
        return Err(CspaceError::ColorspaceMismatch {
            colorspace: ColorSpace::Gray,
            expected: 1,
            found: mask.num_channels(),
        });
    }

    if mask.size() != background.size() {
        return Err(ImageError::InvalidImageSize(
            mask.size().width,
            mask.size().height,
            background.size().width,
            background.size().height,
        )
        .into());
    }

    Ok(())
}

/// Paint every pixel of `mask` above the threshold with `hue` in the working HSV buffer.
fn paint_mask(work: &mut Image<u8>, mask: &Image<u8>, hue: u8, config: &HighlightConfig) {
    let paint = [hue, config.saturation, config.value];
    parallel::par_iter_rows(mask, work, |mask_pixel, hsv_pixel| {
        if mask_pixel[0] > config.threshold {
            hsv_pixel.copy_from_slice(&paint);
        }
    });
}

/// Highlight `masks` over `background` with the given parameters.
///
/// The background is reduced to its luminance and every mask is painted over it in order.
/// The result is a new `Bgr` image; neither the background nor the masks are modified.
///
/// # Errors
///
/// * [`CspaceError::CapacityExceeded`] if there are no masks or more than [`MAX_MASKS`].
/// * [`CspaceError::ColorspaceMismatch`] if a mask has more than one channel.
/// * [`CspaceError::Image`] with [`ImageError::InvalidImageSize`] if a mask and the
///   background differ in size.
/// * [`CspaceError::UnsupportedConversion`] if the background is tagged `Unknown`.
///
/// All masks are checked before any pixel is painted.
pub fn highlight_over_bg_with<'a, I>(
    background: &TaggedImage,
    masks: I,
    config: &HighlightConfig,
) -> Result<TaggedImage, CspaceError>
where
    I: IntoIterator<Item = &'a TaggedImage>,
    I::IntoIter: ExactSizeIterator,
{
    let masks = masks.into_iter();
    let hues = hue_map(masks.len())?;

    let masks: Vec<&TaggedImage> = masks.collect();
    for mask in &masks {
        check_mask(background, mask)?;
    }

    log::debug!(
        "highlighting {} mask(s) over a {} background, hue step {}",
        masks.len(),
        background.tag(),
        hues[0]
    );

    let mut work = router::to_3channel_gray(background, ColorSpace::Hsv)?.into_buffer();

    for (mask, &hue) in masks.iter().zip(&hues) {
        paint_mask(&mut work, mask.buffer(), hue, config);
    }

    let composite = TaggedImage::from_parts(work, ColorSpace::Hsv)?;
    router::to_bgr(&composite)
}

/// Highlight an ordered collection of masks over `background` with the default parameters.
///
/// Accepts any collection iterable by reference with a known length: slices, `Vec`,
/// `VecDeque`, `LinkedList` and so on all behave identically.
///
/// # Example
///
/// ```
/// use cspace_color::{highlight, ColorSpace, TaggedImage};
/// use cspace_image::{Image, ImageSize};
///
/// let size = ImageSize { width: 2, height: 2 };
/// let background =
///     TaggedImage::from_parts(Image::from_size_val(size, 3, 128u8).unwrap(), ColorSpace::Bgr)
///         .unwrap();
/// let mask = TaggedImage::from_buffer(Image::from_size_val(size, 1, 200u8).unwrap());
///
/// let out = highlight::highlight_over_bg(&background, &[mask]).unwrap();
/// assert_eq!(out.tag(), ColorSpace::Bgr);
/// assert_eq!(out.buffer().pixel(0, 0), Some(&[0u8, 0, 255][..]));
/// ```
pub fn highlight_over_bg<'a, I>(
    background: &TaggedImage,
    masks: I,
) -> Result<TaggedImage, CspaceError>
where
    I: IntoIterator<Item = &'a TaggedImage>,
    I::IntoIter: ExactSizeIterator,
{
    highlight_over_bg_with(background, masks, &HighlightConfig::default())
}

/// Highlight a single mask over `background` with the default parameters.
pub fn highlight_one_over_bg(
    background: &TaggedImage,
    mask: &TaggedImage,
) -> Result<TaggedImage, CspaceError> {
    highlight_over_bg(background, std::iter::once(mask))
}
