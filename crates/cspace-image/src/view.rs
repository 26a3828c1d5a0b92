use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// An axis aligned rectangle in pixel coordinates, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    /// Column of the top-left corner.
    pub x: usize,
    /// Row of the top-left corner.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The size of the rectangle.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the rectangle lies completely inside an image of the given size.
    pub fn fits_in(&self, size: ImageSize) -> bool {
        self.x
            .checked_add(self.width)
            .is_some_and(|right| right <= size.width)
            && self
                .y
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= size.height)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rect {{ x: {}, y: {}, width: {}, height: {} }}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// A borrowed, non-owning view into a rectangular region of an [`Image`].
///
/// Coordinates passed to the view are relative to the region origin.
pub struct ImageView<'a, T> {
    image: &'a Image<T>,
    region: Rect,
}

impl<'a, T> ImageView<'a, T> {
    pub(crate) fn new(image: &'a Image<T>, region: Rect) -> Self {
        Self { image, region }
    }

    /// The region of the parent image covered by this view.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// The size of the view in pixels.
    pub fn size(&self) -> ImageSize {
        self.region.size()
    }

    /// Number of channels of the parent image.
    pub fn num_channels(&self) -> usize {
        self.image.num_channels()
    }

    /// The pixels of row `y` of the view, or `None` if the row is outside the view.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.region.height {
            return None;
        }
        let channels = self.image.num_channels();
        let start = ((self.region.y + y) * self.image.width() + self.region.x) * channels;
        self.image
            .as_slice()
            .get(start..start + self.region.width * channels)
    }

    /// Iterate over the rows of the view.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.region.height).filter_map(move |y| self.row(y))
    }

    /// All channels of the pixel at `(x, y)` relative to the view origin.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [T]> {
        if x >= self.region.width || y >= self.region.height {
            return None;
        }
        self.image.pixel(self.region.x + x, self.region.y + y)
    }

    /// Borrow a region of this view, relative to the view origin.
    pub fn subview(&self, region: Rect) -> Result<ImageView<'a, T>, ImageError> {
        if !region.fits_in(self.size()) {
            return Err(ImageError::InvalidRegion(
                region,
                self.region.width,
                self.region.height,
            ));
        }
        Ok(ImageView {
            image: self.image,
            region: Rect::new(
                self.region.x + region.x,
                self.region.y + region.y,
                region.width,
                region.height,
            ),
        })
    }

    /// Copy the view into a new, contiguous image.
    pub fn to_image(&self) -> Result<Image<T>, ImageError>
    where
        T: Clone,
    {
        let mut data =
            Vec::with_capacity(self.region.width * self.region.height * self.num_channels());
        self.rows().for_each(|row| data.extend_from_slice(row));
        Image::new(self.size(), self.num_channels(), data)
    }

    /// Copy the view into `dst` with its top-left corner placed at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Fails if the channel counts differ or the view does not fit at that position.
    pub fn copy_into(&self, dst: &mut Image<T>, x: usize, y: usize) -> Result<(), ImageError>
    where
        T: Clone,
    {
        if dst.num_channels() != self.num_channels() {
            return Err(ImageError::ChannelCountMismatch(
                dst.num_channels(),
                self.num_channels(),
            ));
        }

        let target = Rect::new(x, y, self.region.width, self.region.height);
        if !target.fits_in(dst.size()) {
            return Err(ImageError::InvalidRegion(target, dst.width(), dst.height()));
        }

        let channels = dst.num_channels();
        let dst_cols = dst.cols();
        let dst_data = dst.as_slice_mut();
        for (i, src_row) in self.rows().enumerate() {
            let offset = ((y + i) * dst_cols + x) * channels;
            dst_data[offset..offset + src_row.len()].clone_from_slice(src_row);
        }

        Ok(())
    }
}
