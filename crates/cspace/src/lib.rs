//! Colorspace-tagged images with routed conversions and mask highlighting.
//!
//! This crate re-exports the workspace crates under short names:
//!
//! * [`image`]: pixel buffers with runtime channel counts.
//! * [`imgproc`]: primitive 8-bit colorspace conversions.
//! * [`color`]: tagged images, the conversion router and the highlight compositor.

#[doc(inline)]
pub use cspace_image as image;

#[doc(inline)]
pub use cspace_imgproc as imgproc;

#[doc(inline)]
pub use cspace_color as color;
