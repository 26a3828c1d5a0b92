//! Routing between colorspaces.
//!
//! Conversions are described by a single table of rules. Each rule maps a source and a
//! target colorspace to the primitive conversions that take one to the other:
//!
//! * an empty step list re-tags the image without touching its pixels,
//! * a single step is a direct conversion,
//! * two steps go through [`PROXY`] when no direct primitive exists (`HSV -> Gray` and
//!   `Gray -> HSV`).
//!
//! Adding a colorspace means adding its rules here, nothing else.

use cspace_image::Image;
use cspace_imgproc::color::{cvt_color, ColorConversion};

use crate::colorspace::ColorSpace;
use crate::error::CspaceError;
use crate::tagged::TaggedImage;

/// The colorspace used as an intermediate hop when no direct primitive exists.
pub const PROXY: ColorSpace = ColorSpace::Bgr;

/// The primitive conversions that take an image from one colorspace to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    /// Source colorspace.
    pub from: ColorSpace,
    /// Target colorspace.
    pub to: ColorSpace,
    /// Primitive conversions applied in order. Empty for a pure re-tag.
    pub steps: &'static [ColorConversion],
}

impl Route {
    const fn new(from: ColorSpace, to: ColorSpace, steps: &'static [ColorConversion]) -> Self {
        Self { from, to, steps }
    }

    /// Whether the route only changes the tag.
    pub fn is_retag(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the route hops through [`PROXY`].
    pub fn is_proxied(&self) -> bool {
        self.steps.len() > 1
    }
}

use ColorConversion::*;
use ColorSpace::{Bgr, Gray, Hsv, Rgb, WhiteOnBlack};

const ROUTES: &[Route] = &[
    // to Gray
    Route::new(Gray, Gray, &[]),
    Route::new(WhiteOnBlack, Gray, &[]),
    Route::new(Hsv, Gray, &[HsvToBgr, BgrToGray]),
    Route::new(Bgr, Gray, &[BgrToGray]),
    Route::new(Rgb, Gray, &[RgbToGray]),
    // to HSV
    Route::new(Hsv, Hsv, &[]),
    Route::new(Bgr, Hsv, &[BgrToHsv]),
    Route::new(Rgb, Hsv, &[RgbToHsv]),
    Route::new(Gray, Hsv, &[GrayToBgr, BgrToHsv]),
    Route::new(WhiteOnBlack, Hsv, &[GrayToBgr, BgrToHsv]),
    // to BGR
    Route::new(Bgr, Bgr, &[]),
    Route::new(Hsv, Bgr, &[HsvToBgr]),
    Route::new(Rgb, Bgr, &[RgbToBgr]),
    Route::new(Gray, Bgr, &[GrayToBgr]),
    Route::new(WhiteOnBlack, Bgr, &[GrayToBgr]),
];

/// Look up the route from `from` to `to`.
///
/// # Errors
///
/// Returns [`CspaceError::UnsupportedConversion`] if the table has no rule for the pair,
/// which includes every request with `Unknown` at either end.
///
/// # Example
///
/// ```
/// use cspace_color::{router, ColorSpace};
///
/// let route = router::route(ColorSpace::Hsv, ColorSpace::Gray).unwrap();
/// assert!(route.is_proxied());
/// assert!(router::route(ColorSpace::Unknown, ColorSpace::Gray).is_err());
/// ```
pub fn route(from: ColorSpace, to: ColorSpace) -> Result<Route, CspaceError> {
    ROUTES
        .iter()
        .find(|route| route.from == from && route.to == to)
        .copied()
        .ok_or(CspaceError::UnsupportedConversion { from, to })
}

/// Convert `image` to the `target` colorspace, returning a new tagged image.
///
/// The source is never mutated. Re-tag routes share the source storage; every other route
/// allocates a new buffer. An empty source produces an empty image in the target layout.
///
/// # Errors
///
/// Returns [`CspaceError::UnsupportedConversion`] if there is no route.
pub fn convert(image: &TaggedImage, target: ColorSpace) -> Result<TaggedImage, CspaceError> {
    let route = route(image.tag(), target)?;

    log::debug!(
        "converting {}x{} image from {} to {} via {:?}",
        image.size().width,
        image.size().height,
        route.from,
        route.to,
        route.steps
    );

    let buffer = if image.is_empty() {
        let channels = target
            .channels()
            .ok_or(CspaceError::UnsupportedConversion {
                from: image.tag(),
                to: target,
            })?;
        Image::from_size_val(image.size(), channels, 0u8)?
    } else {
        route
            .steps
            .iter()
            .try_fold(image.buffer().clone(), |buffer, &step| {
                cvt_color(&buffer, step)
            })?
    };

    let mut out = TaggedImage::with_tag(target);
    out.assign_buffer(buffer)?;

    Ok(out)
}

/// Convert `image` to single channel grayscale.
///
/// `Gray` and `WhiteOnBlack` sources are re-tagged without touching their pixels; `HSV`
/// goes through BGR.
pub fn to_gray(image: &TaggedImage) -> Result<TaggedImage, CspaceError> {
    convert(image, ColorSpace::Gray)
}

/// Convert `image` to HSV. Single channel sources go through BGR.
pub fn to_hsv(image: &TaggedImage) -> Result<TaggedImage, CspaceError> {
    convert(image, ColorSpace::Hsv)
}

/// Convert `image` to BGR.
pub fn to_bgr(image: &TaggedImage) -> Result<TaggedImage, CspaceError> {
    convert(image, ColorSpace::Bgr)
}

/// Produce a visually gray image in a three channel colorspace.
///
/// The image is first reduced to grayscale, then expanded to `target`. For `Bgr` and `Rgb`
/// the three channels of every pixel are equal; for `Hsv` hue and saturation are zero and the
/// value channel carries the luminance.
///
/// # Errors
///
/// Returns [`CspaceError::UnsupportedConversion`] if `target` is not `Bgr`, `Rgb` or `Hsv`,
/// or if the source cannot be converted to grayscale.
///
/// # Example
///
/// ```
/// use cspace_color::{router, ColorSpace, TaggedImage};
/// use cspace_image::{Image, ImageSize};
///
/// let bgr = Image::new(ImageSize { width: 1, height: 1 }, 3, vec![0u8, 0, 255]).unwrap();
/// let image = TaggedImage::from_parts(bgr, ColorSpace::Bgr).unwrap();
///
/// let gray = router::to_3channel_gray(&image, ColorSpace::Rgb).unwrap();
/// assert_eq!(gray.tag(), ColorSpace::Rgb);
/// assert_eq!(gray.buffer().as_slice(), &[76, 76, 76]);
/// ```
pub fn to_3channel_gray(
    image: &TaggedImage,
    target: ColorSpace,
) -> Result<TaggedImage, CspaceError> {
    if !target.is_triple_channel() {
        return Err(CspaceError::UnsupportedConversion {
            from: image.tag(),
            to: target,
        });
    }

    let gray = to_gray(image)?;

    // R = G = B after replication, so BGR and RGB share the same expansion
    let expanded = match target {
        ColorSpace::Hsv => to_hsv(&gray)?,
        _ => to_bgr(&gray)?,
    };

    let mut out = TaggedImage::with_tag(target);
    out.assign_buffer(expanded.into_buffer())?;

    Ok(out)
}

impl TaggedImage {
    /// Convert to the given colorspace. See [`convert`].
    pub fn convert_to(&self, target: ColorSpace) -> Result<TaggedImage, CspaceError> {
        convert(self, target)
    }

    /// Convert to grayscale. See [`to_gray`].
    pub fn to_gray(&self) -> Result<TaggedImage, CspaceError> {
        to_gray(self)
    }

    /// Convert to HSV. See [`to_hsv`].
    pub fn to_hsv(&self) -> Result<TaggedImage, CspaceError> {
        to_hsv(self)
    }

    /// Convert to BGR. See [`to_bgr`].
    pub fn to_bgr(&self) -> Result<TaggedImage, CspaceError> {
        to_bgr(self)
    }

    /// Convert to a visually gray three channel image. See [`to_3channel_gray`].
    pub fn to_3channel_gray(&self, target: ColorSpace) -> Result<TaggedImage, CspaceError> {
        to_3channel_gray(self, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspace_image::ImageSize;

    const SIZE: ImageSize = ImageSize {
        width: 2,
        height: 2,
    };

    fn tagged(tag: ColorSpace, pixel: &[u8]) -> Result<TaggedImage, CspaceError> {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(SIZE.width * SIZE.height * pixel.len())
            .collect();
        TaggedImage::from_parts(Image::new(SIZE, pixel.len(), data)?, tag)
    }

    #[test]
    fn every_known_source_reaches_every_target() {
        let sources = [
            ColorSpace::Bgr,
            ColorSpace::Rgb,
            ColorSpace::Hsv,
            ColorSpace::Gray,
            ColorSpace::WhiteOnBlack,
        ];
        for from in sources {
            assert!(route(from, ColorSpace::Gray).is_ok(), "{from} -> Gray");
            assert!(route(from, ColorSpace::Hsv).is_ok(), "{from} -> HSV");
            assert!(route(from, ColorSpace::Bgr).is_ok(), "{from} -> BGR");
        }
    }

    #[test]
    fn unknown_endpoints_are_unsupported() {
        for other in ColorSpace::ALL {
            assert_eq!(
                route(ColorSpace::Unknown, other),
                Err(CspaceError::UnsupportedConversion {
                    from: ColorSpace::Unknown,
                    to: other,
                })
            );
            assert!(route(other, ColorSpace::Unknown).is_err());
        }
    }

    #[test]
    fn proxies_go_through_bgr() -> Result<(), CspaceError> {
        let hsv_to_gray = route(ColorSpace::Hsv, ColorSpace::Gray)?;
        assert_eq!(hsv_to_gray.steps, &[HsvToBgr, BgrToGray]);

        let gray_to_hsv = route(ColorSpace::WhiteOnBlack, ColorSpace::Hsv)?;
        assert_eq!(gray_to_hsv.steps, &[GrayToBgr, BgrToHsv]);

        for route in ROUTES.iter().filter(|r| r.is_proxied()) {
            assert_eq!(route.steps[0].dst_channels(), PROXY.channels().unwrap());
        }
        Ok(())
    }

    #[test]
    fn retag_routes_share_storage() -> Result<(), CspaceError> {
        let mask = tagged(ColorSpace::WhiteOnBlack, &[255])?;
        let gray = to_gray(&mask)?;

        assert_eq!(gray.tag(), ColorSpace::Gray);
        assert_eq!(mask.tag(), ColorSpace::WhiteOnBlack);
        assert!(gray.buffer().shares_storage_with(mask.buffer()));
        Ok(())
    }

    #[test]
    fn bgr_to_gray() -> Result<(), CspaceError> {
        let bgr = tagged(ColorSpace::Bgr, &[0, 0, 255])?;
        let gray = bgr.to_gray()?;

        assert_eq!(gray.tag(), ColorSpace::Gray);
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.buffer().as_slice(), &[76; 4]);
        Ok(())
    }

    #[test]
    fn rgb_to_bgr_swaps() -> Result<(), CspaceError> {
        let rgb = tagged(ColorSpace::Rgb, &[1, 2, 3])?;
        let bgr = rgb.to_bgr()?;

        assert_eq!(bgr.tag(), ColorSpace::Bgr);
        assert_eq!(bgr.buffer().pixel(1, 1), Some(&[3u8, 2, 1][..]));
        assert_eq!(rgb.buffer().pixel(1, 1), Some(&[1u8, 2, 3][..]));
        Ok(())
    }

    #[test]
    fn hsv_to_gray_matches_the_bgr_path() -> Result<(), CspaceError> {
        let hsv = tagged(ColorSpace::Hsv, &[88, 72, 200])?;

        let direct = hsv.to_gray()?;
        let via_bgr = hsv.to_bgr()?.to_gray()?;

        assert_eq!(direct.tag(), ColorSpace::Gray);
        assert_eq!(direct, via_bgr);
        Ok(())
    }

    #[test]
    fn gray_to_hsv_has_no_hue() -> Result<(), CspaceError> {
        let gray = tagged(ColorSpace::Gray, &[90])?;
        let hsv = gray.to_hsv()?;

        assert_eq!(hsv.tag(), ColorSpace::Hsv);
        assert!(hsv.buffer().pixels().all(|p| p == [0, 0, 90]));
        Ok(())
    }

    #[test]
    fn empty_source_converts_to_empty_target() -> Result<(), CspaceError> {
        let empty = TaggedImage::with_tag(ColorSpace::Hsv);
        let bgr = empty.to_bgr()?;
        assert!(bgr.is_empty());
        assert_eq!(bgr.tag(), ColorSpace::Bgr);
        assert_eq!(bgr.num_channels(), 3);

        let gray = empty.to_gray()?;
        assert_eq!(gray.tag(), ColorSpace::Gray);
        assert_eq!(gray.num_channels(), 1);
        Ok(())
    }

    #[test]
    fn to_3channel_gray_rejects_single_channel_targets() -> Result<(), CspaceError> {
        let bgr = tagged(ColorSpace::Bgr, &[1, 2, 3])?;
        for target in [
            ColorSpace::Unknown,
            ColorSpace::Gray,
            ColorSpace::WhiteOnBlack,
        ] {
            assert_eq!(
                bgr.to_3channel_gray(target),
                Err(CspaceError::UnsupportedConversion {
                    from: ColorSpace::Bgr,
                    to: target,
                })
            );
        }
        Ok(())
    }

    #[test]
    fn to_3channel_gray_of_unknown_source_fails() {
        let unknown = TaggedImage::new();
        assert!(matches!(
            unknown.to_3channel_gray(ColorSpace::Bgr),
            Err(CspaceError::UnsupportedConversion { .. })
        ));
    }

    #[test]
    fn to_3channel_gray_equal_channels() -> Result<(), CspaceError> {
        let bgr = tagged(ColorSpace::Bgr, &[10, 200, 30])?;
        for target in [ColorSpace::Bgr, ColorSpace::Rgb] {
            let gray = bgr.to_3channel_gray(target)?;
            assert_eq!(gray.tag(), target);
            assert_eq!(gray.num_channels(), 3);
            assert!(gray.buffer().pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
        }

        let hsv = bgr.to_3channel_gray(ColorSpace::Hsv)?;
        assert_eq!(hsv.tag(), ColorSpace::Hsv);
        assert!(hsv.buffer().pixels().all(|p| p[0] == 0 && p[1] == 0));
        Ok(())
    }
}
