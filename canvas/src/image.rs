//! Images that own their buffer.
use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use std::sync::Arc;

use crate::alloc::{Allocation, Allocator, AllocatorManager};
use crate::descriptor::ImageDescriptor;
use crate::expr::{Expression, Extent, Xyn};
use crate::layout::{LayoutDescriptor, LayoutError};
use crate::sample::{Element, Sample};
use crate::view::ImageView;

/// An image together with the buffer holding its samples.
///
/// The buffer comes from the allocator selected at construction, or the one given explicitly,
/// and goes back to that same allocator when the image is dropped. A fresh buffer from the
/// standard allocator is zeroed; a recycled one keeps the content of its previous owner.
pub struct Image<T: Element> {
    layout: LayoutDescriptor,
    allocation: Option<Allocation>,
    element: PhantomData<T>,
}

/// A view that either borrows an existing buffer or owns a new one.
pub enum ImageCow<'a, T: Element> {
    Borrowed(ImageView<'a, T>),
    Owned(Image<T>),
}

impl<T: Element> Image<T> {
    /// Allocate an image of `layout` from the current allocator.
    pub fn new(layout: LayoutDescriptor) -> Self {
        Self::with_allocator(layout, AllocatorManager::current())
    }

    /// Allocate an image of `layout` from `allocator`.
    pub fn with_allocator(layout: LayoutDescriptor, allocator: Arc<dyn Allocator>) -> Self {
        let mut image = Image::unallocated(layout);
        image.allocation = Some(Allocation::new(Self::byte_len(&layout), allocator));
        image
    }

    /// Allocate an image and copy `samples` into it, in buffer order.
    pub fn from_slice(layout: LayoutDescriptor, samples: &[T]) -> Result<Self, LayoutError> {
        let required = Self::sample_len(&layout);
        let samples = samples
            .get(..required)
            .ok_or_else(|| LayoutError::buffer_too_small(required, samples.len()))?;

        let mut image = Image::new(layout);
        image.as_mut_slice()[..required].copy_from_slice(samples);
        Ok(image)
    }

    /// Allocate an image and assign `expr` to it.
    pub fn from_expr<E>(layout: LayoutDescriptor, expr: E) -> Self
    where
        E: Expression<Xyn>,
        E::Output: Sample,
    {
        let image = Image::new(layout);
        image.view().assign(expr);
        image
    }

    /// An image without a buffer. Every sample access fails until it is allocated.
    pub fn unallocated(layout: LayoutDescriptor) -> Self {
        Image {
            layout,
            allocation: None,
            element: PhantomData,
        }
    }

    /// Allocate the buffer from the current allocator, if there is none yet.
    pub fn allocate(&mut self) {
        if self.allocation.is_none() && self.layout != LayoutDescriptor::EMPTY {
            self.allocation = Some(Allocation::current(Self::byte_len(&self.layout)));
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.allocation.is_some()
    }

    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    /// Change the pixel precision, without touching any sample.
    pub fn set_pixel_precision(&mut self, precision: i32) {
        self.layout.set_pixel_precision(precision);
    }

    pub fn descriptor(&self) -> ImageDescriptor<'_, T> {
        ImageDescriptor::from_parts(self.layout, self.cells())
    }

    /// A view of all planes, through which the samples can also be written.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView::from_descriptor(self.descriptor())
    }

    /// The whole buffer as shared cells, empty if unallocated.
    pub fn as_cells(&self) -> &[Cell<T>] {
        self.cells()
    }

    /// A copy of the whole buffer.
    pub fn to_vec(&self) -> Vec<T> {
        self.cells().iter().map(Cell::get).collect()
    }

    /// The whole buffer, empty if unallocated.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.allocation {
            Some(allocation) => allocation.block_mut().as_mut_slice(T::texel()),
            None => &mut [],
        }
    }

    /// The allocator the buffer will be returned to.
    pub fn allocator(&self) -> Option<&Arc<dyn Allocator>> {
        self.allocation.as_ref().map(Allocation::allocator)
    }

    /// Assign the samples of `view`, converting them to `T`.
    ///
    /// The view is evaluated plane by plane at the coordinates of this image.
    pub fn copy_from<S: Sample>(&self, view: &ImageView<'_, S>) {
        self.view().assign(*view);
    }

    /// A new image with the same layout and samples, independent of this one.
    pub fn clone_image(&self) -> Self {
        let image = Image::new(self.layout);
        image.copy_from(&self.view());
        image
    }

    fn cells(&self) -> &[Cell<T>] {
        match &self.allocation {
            Some(allocation) => allocation.block().as_cells(T::texel()),
            None => &[],
        }
    }

    /// Samples to allocate: everything the layout addresses, and at least its required size.
    fn sample_len(layout: &LayoutDescriptor) -> usize {
        layout.required_buffer_size().max(layout.buffer_extent())
    }

    fn byte_len(layout: &LayoutDescriptor) -> usize {
        Self::sample_len(layout) * mem::size_of::<T>()
    }
}

impl<T: Element> Expression<Xyn> for Image<T> {
    type Output = T;

    fn evaluate(&self, at: Xyn) -> T {
        self.view().evaluate(at)
    }
}

impl<T: Element> Extent for Image<T> {
    fn width(&self) -> i32 {
        self.layout.width()
    }

    fn height(&self) -> i32 {
        self.layout.height()
    }
}

impl<T: Element> fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("layout", &self.layout)
            .field("allocation", &self.allocation)
            .finish()
    }
}

impl<'a, T: Element> ImageCow<'a, T> {
    pub fn view(&self) -> ImageView<'_, T> {
        match self {
            ImageCow::Borrowed(view) => *view,
            ImageCow::Owned(image) => image.view(),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, ImageCow::Borrowed(_))
    }

    /// Take ownership, copying a borrowed buffer into a new image.
    pub fn into_owned(self) -> Image<T> {
        match self {
            ImageCow::Borrowed(view) => {
                let image = Image::new(*view.layout());
                image.copy_from(&view);
                image
            }
            ImageCow::Owned(image) => image,
        }
    }
}

impl<T: Element> fmt::Debug for ImageCow<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageCow::Borrowed(view) => f.debug_tuple("Borrowed").field(view).finish(),
            ImageCow::Owned(image) => f.debug_tuple("Owned").field(image).finish(),
        }
    }
}
