use core::cell::Cell;
use core::fmt;

use crate::layout::{LayoutDescriptor, LayoutError};
use crate::sample::Sample;

/// A layout together with the buffer it describes.
///
/// The buffer is checked to hold every sample the layout addresses, border included, so views
/// created from a descriptor never need to re-validate it.
pub struct ImageDescriptor<'a, T> {
    layout: LayoutDescriptor,
    buffer: &'a [Cell<T>],
}

impl<'a, T> ImageDescriptor<'a, T> {
    pub fn new(layout: LayoutDescriptor, buffer: &'a [Cell<T>]) -> Result<Self, LayoutError> {
        let required = layout.buffer_extent();
        if buffer.len() < required {
            return Err(LayoutError::buffer_too_small(required, buffer.len()));
        }

        Ok(ImageDescriptor { layout, buffer })
    }

    /// Pair a layout with a buffer already known to cover it.
    pub(crate) fn from_parts(layout: LayoutDescriptor, buffer: &'a [Cell<T>]) -> Self {
        ImageDescriptor { layout, buffer }
    }

    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    pub fn buffer(&self) -> &'a [Cell<T>] {
        self.buffer
    }

    /// The largest value of the pixel precision, in `T`.
    pub fn saturation_value(&self) -> T
    where
        T: Sample,
    {
        self.layout.saturation_value()
    }
}

impl<T> Clone for ImageDescriptor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageDescriptor<'_, T> {}

impl<T> fmt::Debug for ImageDescriptor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageDescriptor")
            .field("layout", &self.layout)
            .field("len", &self.buffer.len())
            .finish()
    }
}
