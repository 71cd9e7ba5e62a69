//! Multi-plane pixel buffers.
//!
//! An image is described by a [`LayoutDescriptor`](layout::LayoutDescriptor): its dimensions,
//! its planes, and where every sample of every plane lives in one contiguous buffer. Planar,
//! interleaved, subsampled YUV and Bayer mosaics are all expressed this way, as are custom
//! arrangements with caller-provided strides.
//!
//! # Usage
//!
//! Creating an image is as easy as:
//! 1. Describing the layout with a [`Builder`](layout::Builder)
//! 2. Allocating an [`Image`] of some sample type for it
//! 3. Assigning an expression to a view of the image
//!
//! ```
//! use planebuf::format::PixelFormat;
//! use planebuf::layout::Builder;
//! use planebuf::{expr, Image, Pixel};
//!
//! let layout = Builder::new(32, 32).pixel_format(PixelFormat::Rgb).build()?;
//! let image = Image::<u8>::new(layout);
//!
//! // Every plane gets its own sample of the pixel constant.
//! image.view().assign(Pixel([10u8, 20, 30]));
//! let view = image.view();
//! view.assign(expr::min(&image * 2, 50));
//!
//! assert_eq!(view.at(5, 5, 1), 40);
//! assert_eq!(view.at(5, 5, 2), 50);
//! # Ok::<(), planebuf::layout::LayoutError>(())
//! ```
//!
//! Buffers come from a process-wide, switchable allocator, see [`alloc`]. Views check every
//! access; nothing in this crate reads or writes outside of a buffer.
#![deny(unsafe_code)]

pub mod alloc;
pub mod border;
pub mod convert;
mod descriptor;
pub mod expr;
pub mod format;
pub mod histogram;
mod image;
mod interpolate;
/// The layout computation.
#[path = "layout.rs"]
mod layout_;
mod pixel;
pub mod sample;
mod view;


pub use self::alloc::{
    clear_allocator_cache, use_allocator, use_recycling_allocator, use_standard_allocator,
};
pub use self::descriptor::ImageDescriptor;
pub use self::image::{Image, ImageCow};
pub use self::pixel::Pixel;
pub use self::view::{BayerView, ImageView, OutOfBounds, PixelView, PlaneView};

pub mod layout {
    pub use crate::layout_::{
        align_dimension, align_subsampled, Builder, LayoutDescriptor, LayoutError,
        PlaneDescriptor, Rect, DEFAULT_HEIGHT_ALIGNMENT, DEFAULT_SIZE_ALIGNMENT,
        DEFAULT_WIDTH_ALIGNMENT, MAX_NUM_PLANES,
    };
}
