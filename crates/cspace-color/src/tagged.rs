use cspace_image::{Image, ImageSize};

use crate::colorspace::ColorSpace;
use crate::error::CspaceError;

/// An 8-bit pixel buffer together with the colorspace it represents.
///
/// The tag can only change through [`TaggedImage::set_tag`] and
/// [`TaggedImage::assign_buffer`], which both check it against the channel count of a
/// non-empty buffer. Outside of those two entry points the tag and the buffer cannot drift
/// apart.
///
/// The buffer is a shared handle: cloning a `TaggedImage`, or assigning the same
/// [`Image`] to several of them, shares the pixel storage. Writes through
/// [`TaggedImage::as_slice_mut`] detach the written handle first.
///
/// # Examples
///
/// ```
/// use cspace_color::{ColorSpace, TaggedImage};
/// use cspace_image::{Image, ImageSize};
///
/// let mut image = TaggedImage::with_tag(ColorSpace::Rgb);
/// let pixels = Image::from_size_val(ImageSize { width: 2, height: 2 }, 3, 0u8).unwrap();
///
/// image.assign_buffer(pixels).unwrap();
/// assert_eq!(image.tag(), ColorSpace::Rgb);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaggedImage {
    buffer: Image<u8>,
    tag: ColorSpace,
}

/// Check that a buffer may carry the given tag.
///
/// Empty buffers carry no pixels and are never rejected.
fn check_colorspace_match(buffer: &Image<u8>, tag: ColorSpace) -> Result<(), CspaceError> {
    if buffer.is_empty() || tag.accepts(buffer.num_channels()) {
        return Ok(());
    }

    Err(CspaceError::ColorspaceMismatch {
        colorspace: tag,
        expected: tag.channels().unwrap_or_default(),
        found: buffer.num_channels(),
    })
}

/// The tag a buffer with `channels` channels takes when assigned to an image tagged `current`.
///
/// A single channel is unambiguous. Three channels could be BGR, RGB or HSV, so the tag only
/// moves off `Gray`, to the conventional BGR.
fn infer_tag(current: ColorSpace, channels: usize) -> ColorSpace {
    match channels {
        1 => ColorSpace::Gray,
        3 if current == ColorSpace::Gray => ColorSpace::Bgr,
        _ => current,
    }
}

impl TaggedImage {
    /// An empty image tagged `Unknown`.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty image that already carries a tag.
    ///
    /// Empty buffers accept any tag, so this never fails. The tag is checked once a buffer
    /// is assigned.
    pub fn with_tag(tag: ColorSpace) -> Self {
        Self {
            buffer: Image::empty(),
            tag,
        }
    }

    /// Wrap a buffer, inferring the tag from its channel count.
    ///
    /// Single channel buffers are tagged `Gray`; anything else is `Unknown`.
    pub fn from_buffer(buffer: Image<u8>) -> Self {
        let tag = infer_tag(ColorSpace::Unknown, buffer.num_channels());
        Self { buffer, tag }
    }

    /// Wrap a buffer and tag it explicitly.
    ///
    /// Equivalent to [`TaggedImage::from_buffer`] followed by [`TaggedImage::set_tag`].
    pub fn from_parts(buffer: Image<u8>, tag: ColorSpace) -> Result<Self, CspaceError> {
        let mut image = Self::from_buffer(buffer);
        image.set_tag(tag)?;
        Ok(image)
    }

    /// The colorspace this image represents.
    pub fn tag(&self) -> ColorSpace {
        self.tag
    }

    /// Set the colorspace tag.
    ///
    /// # Errors
    ///
    /// Returns [`CspaceError::ColorspaceMismatch`] if the buffer is not empty and its channel
    /// count differs from the one `tag` requires. The tag is left unchanged in that case.
    pub fn set_tag(&mut self, tag: ColorSpace) -> Result<(), CspaceError> {
        check_colorspace_match(&self.buffer, tag)?;
        self.tag = tag;
        Ok(())
    }

    /// Replace the pixel buffer with `buffer`, sharing its storage.
    ///
    /// The incoming buffer is first checked against the current tag. On success the tag is
    /// updated: single channel buffers become `Gray`, three channel buffers replacing a
    /// `Gray` tag become `Bgr`, and any other tag is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CspaceError::ColorspaceMismatch`] if the current tag requires a channel
    /// count the non-empty `buffer` does not have. Nothing is modified in that case.
    pub fn assign_buffer(&mut self, buffer: Image<u8>) -> Result<(), CspaceError> {
        check_colorspace_match(&buffer, self.tag)?;

        let tag = infer_tag(self.tag, buffer.num_channels());
        if tag != self.tag {
            log::trace!("assigned buffer retags image from {} to {}", self.tag, tag);
        }

        self.tag = tag;
        self.buffer = buffer;
        Ok(())
    }

    /// The pixel buffer.
    pub fn buffer(&self) -> &Image<u8> {
        &self.buffer
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_buffer(self) -> Image<u8> {
        self.buffer
    }

    /// Mutable access to the pixel data, detaching shared storage first.
    ///
    /// The channel count cannot change through a slice, so the tag stays valid.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        self.buffer.as_slice_mut()
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.buffer.size()
    }

    /// The number of channels of the buffer.
    pub fn num_channels(&self) -> usize {
        self.buffer.num_channels()
    }

    /// Whether the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// A copy of this image with its own pixel storage.
    pub fn deep_copy(&self) -> Self {
        Self {
            buffer: self.buffer.deep_copy(),
            tag: self.tag,
        }
    }
}

impl From<TaggedImage> for Image<u8> {
    fn from(image: TaggedImage) -> Self {
        image.buffer
    }
}
