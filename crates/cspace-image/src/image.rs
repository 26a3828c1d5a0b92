use std::sync::Arc;

use crate::error::ImageError;
use crate::view::{ImageView, Rect};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use cspace_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with interleaved pixel data.
///
/// The pixels are stored row-major with shape (H, W, C), where the channel count `C` is only
/// known at runtime. The storage is reference counted: cloning an image hands out another
/// handle to the same pixels instead of copying them.
///
/// Mutable access is copy-on-write. When the storage is shared, [`Image::as_slice_mut`]
/// detaches this handle first, so writes are never observed through other handles. Use
/// [`Image::deep_copy`] to get an isolated buffer up front.
#[derive(Clone)]
pub struct Image<T> {
    data: Arc<Vec<T>>,
    size: ImageSize,
    channels: usize,
}

impl<T> Default for Image<T> {
    /// An empty single channel image of size 0x0.
    fn default() -> Self {
        Self {
            data: Arc::new(Vec::new()),
            size: ImageSize::default(),
            channels: 1,
        }
    }
}

impl<T> std::fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("size", &self.size)
            .field("channels", &self.channels)
            .field("shared", &self.is_shared())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Image<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.channels == other.channels && self.data == other.data
    }
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of interleaved channels per pixel.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or the channel count is
    /// zero, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cspace_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///    ImageSize {
    ///       width: 10,
    ///      height: 20,
    ///  },
    /// 3,
    /// vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<T>) -> Result<Self, ImageError> {
        if channels == 0 {
            return Err(ImageError::InvalidChannelCount(channels));
        }

        // check if the data length matches the image size
        let expected = size.width * size.height * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            data: Arc::new(data),
            size,
            channels,
        })
    }

    /// Create a new image with the given size and every element set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cspace_image::{Image, ImageSize};
    ///
    /// let image = Image::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///    height: 20,
    /// }, 3, 0u8).unwrap();
    ///
    /// assert_eq!(image.num_channels(), 3);
    /// assert!(image.as_slice().iter().all(|&v| v == 0));
    /// ```
    pub fn from_size_val(size: ImageSize, channels: usize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * channels];
        Image::new(size, channels, data)
    }

    /// An empty single channel image of size 0x0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Whether the image holds no pixels, i.e. it has zero rows or zero columns.
    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Get the pixel data of the image as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Get the pixel data of the image as a mutable flat slice.
    ///
    /// If the storage is shared with other handles it is copied first.
    pub fn as_slice_mut(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Whether other handles currently share this image's storage.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.data) > 1
    }

    /// Whether `self` and `other` point at the same storage.
    pub fn shares_storage_with(&self, other: &Image<T>) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Copy the pixel data into freshly allocated storage.
    pub fn deep_copy(&self) -> Self
    where
        T: Clone,
    {
        Self {
            data: Arc::new(self.data.as_ref().clone()),
            size: self.size,
            channels: self.channels,
        }
    }

    /// Consume the image and return its pixel data, copying only if the storage is shared.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| shared.as_ref().clone())
    }

    /// Get a single element of the image.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the pixel.
    /// * `y` - The y-coordinate of the pixel.
    /// * `ch` - The channel index of the pixel.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.channels));
        }

        Ok(self.data[(y * self.width() + x) * self.channels + ch])
    }

    /// Get all channels of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y * self.width() + x) * self.channels;
        self.data.get(offset..offset + self.channels)
    }

    /// Iterate over the pixels in row-major order, one slice of `num_channels` per pixel.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.channels)
    }

    /// Iterate mutably over the pixels in row-major order.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, T>
    where
        T: Clone,
    {
        let channels = self.channels;
        self.as_slice_mut().chunks_exact_mut(channels)
    }

    /// Get a channel of the image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T>, ImageError>
    where
        T: Copy,
    {
        if channel >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, self.channels));
        }

        let channel_data = self.pixels().map(|pixel| pixel[channel]).collect();

        Image::new(self.size, 1, channel_data)
    }

    /// Borrow a rectangular region of the image without copying.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidRegion`] if the region does not fit inside the image.
    ///
    /// # Examples
    ///
    /// ```
    /// use cspace_image::{Image, ImageSize, Rect};
    ///
    /// let image = Image::new(ImageSize { width: 3, height: 2 }, 1, vec![0u8, 1, 2, 3, 4, 5]).unwrap();
    /// let view = image.view(Rect::new(1, 0, 2, 2)).unwrap();
    ///
    /// assert_eq!(view.to_image().unwrap().as_slice(), &[1, 2, 4, 5]);
    /// ```
    pub fn view(&self, region: Rect) -> Result<ImageView<'_, T>, ImageError> {
        if !region.fits_in(self.size) {
            return Err(ImageError::InvalidRegion(
                region,
                self.width(),
                self.height(),
            ));
        }
        Ok(ImageView::new(self, region))
    }
}
