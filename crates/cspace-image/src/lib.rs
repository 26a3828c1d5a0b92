#![deny(missing_docs)]
//! Image buffer types with runtime channel counts and reference-counted storage

/// image representation for colorspace aware processing.
pub mod image;

/// Error types for the image module.
pub mod error;

/// rectangular regions and borrowed sub-views of an image.
pub mod view;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::view::{ImageView, Rect};
