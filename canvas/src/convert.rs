//! Images derived from existing views.
//!
//! Every function here allocates from the current allocator and copies through expression
//! assignment, so the element type of the result may differ from the source.
use core::marker::PhantomData;

use tracing::debug;

use crate::expr::unary::{Unary, UnaryOperator};
use crate::format::LayoutKind;
use crate::image::{Image, ImageCow};
use crate::layout::{Builder, LayoutError};
use crate::sample::{Element, Sample};
use crate::view::ImageView;

/// A new image with the layout of `view`, without copying any sample.
///
/// Strides are recomputed unless the layout is custom, so a region of interest becomes a
/// compact image of the region's size.
pub fn like<U: Element, T>(view: &ImageView<'_, T>) -> Result<Image<U>, LayoutError> {
    let layout = Builder::from_layout(view.layout()).build()?;
    Ok(Image::new(layout))
}

/// A new image with the layout and samples of `view`, converted to `U`.
pub fn clone<U: Element, T: Sample>(view: &ImageView<'_, T>) -> Result<Image<U>, LayoutError> {
    let image = like(view)?;
    image.copy_from(view);
    Ok(image)
}

/// Copy `view` into a layout of another kind, e.g. planar into interleaved.
///
/// The width alignment is kept unless `width_alignment` is positive.
pub fn convert_layout<T: Element>(
    view: &ImageView<'_, T>,
    kind: LayoutKind,
    width_alignment: i32,
) -> Result<Image<T>, LayoutError> {
    let mut builder = Builder::from_layout(view.layout()).layout_kind(kind);
    if width_alignment > 0 {
        builder = builder.width_alignment(width_alignment);
    }

    let image = Image::new(builder.build()?);
    image.copy_from(view);
    Ok(image)
}

/// Copy `view` into an image of type `U` with `precision` significant bits, rescaling every
/// sample from the saturation value of the source to the one of the result.
pub fn convert_pixel_precision<U: Element, T: Element>(
    view: &ImageView<'_, T>,
    precision: i32,
) -> Result<Image<U>, LayoutError> {
    let layout = Builder::from_layout(view.layout())
        .pixel_precision(precision)
        .build()?;
    let image = Image::<U>::new(layout);

    let rescale = Rescale::<U>::new(
        view.saturation_value().to_f64(),
        layout.saturation_value::<U>().to_f64(),
    );
    image.view().assign(Unary::new(*view, rescale));
    Ok(image)
}

/// Reinterpret or copy `view` with other alignments.
///
/// Only positive alignments replace those of the view. If the required buffer size does not
/// change and no copy is forced, the result borrows the buffer of `view`.
pub fn convert_alignment<'a, T: Element>(
    view: &ImageView<'a, T>,
    width_alignment: i32,
    height_alignment: i32,
    size_alignment: i32,
    force_copy: bool,
) -> Result<ImageCow<'a, T>, LayoutError> {
    let mut builder = Builder::from_layout(view.layout());
    if width_alignment > 0 {
        builder = builder.width_alignment(width_alignment);
    }
    if height_alignment > 0 {
        builder = builder.height_alignment(height_alignment);
    }
    if size_alignment > 0 {
        builder = builder.size_alignment(size_alignment);
    }

    let layout = builder.build()?;
    let size = layout.required_buffer_size();

    if size == view.layout().required_buffer_size() && !force_copy {
        debug!(size, "alignment leaves the buffer size unchanged, borrowing");
        return Ok(ImageCow::Borrowed(ImageView::new(layout, view.buffer())?));
    }

    let image = Image::new(layout);
    image.copy_from(view);
    Ok(ImageCow::Owned(image))
}

/// Maps a sample from one saturation value to another.
struct Rescale<U> {
    /// Set when both types are integers and the target saturation is a multiple of the source.
    ratio: Option<i64>,
    scale: f64,
    target: PhantomData<fn() -> U>,
}

impl<U: Sample> Rescale<U> {
    fn new(from: f64, to: f64) -> Self {
        let (from_int, to_int) = (from as i64, to as i64);
        let ratio = (!U::IS_FLOAT && from.fract() == 0.0 && from_int > 0 && to_int % from_int == 0)
            .then(|| to_int / from_int);

        Rescale {
            ratio,
            scale: to / from,
            target: PhantomData,
        }
    }
}

impl<T: Sample, U: Sample> UnaryOperator<T> for Rescale<U> {
    type Output = U;

    fn apply(&self, value: T) -> U {
        match self.ratio {
            Some(ratio) if !T::IS_FLOAT => U::from_i64(value.to_i64() * ratio),
            _ if U::IS_FLOAT => U::from_f64(value.to_f64() * self.scale),
            _ => U::from_f64(libm::round(value.to_f64() * self.scale)),
        }
    }
}
