//! Borrowed, bounds-checked views into image buffers.
//!
//! Views share their buffer through [`Cell`]s: any number of views may read and write the same
//! samples, and assigning an expression that reads the view it writes to is well defined. The
//! traversal order of every assignment is plane by plane, row by row, column by column.
//!
//! Every access is checked against the bordered extent of its plane and against the buffer.
//! Accessors named `try_*` report an [`OutOfBounds`] error; the others, and evaluation inside an
//! expression, panic with it.
mod bayer;
mod pixel;
mod plane;

use core::cell::Cell;
use core::fmt;
use core::ops::Range;

use crate::descriptor::ImageDescriptor;
use crate::expr::binary::{self, Binary};
use crate::expr::{Expression, Extent, Xy, Xyn};
use crate::format::{BayerColor, LayoutKind, PixelFormat};
use crate::layout::{Builder, LayoutDescriptor, LayoutError, Rect};
use crate::layout_::round_up;
use crate::sample::Sample;

pub use self::bayer::BayerView;
pub use self::pixel::PixelView;
pub use self::plane::PlaneView;

/// A view of all planes of an image.
pub struct ImageView<'a, T> {
    layout: LayoutDescriptor,
    buffer: &'a [Cell<T>],
}

/// A coordinate outside of the addressable samples of a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutOfBounds {
    pub x: i32,
    pub y: i32,
    pub plane: usize,
}

/// Generates the compound assignments on top of an `assign` evaluating at `$at`.
macro_rules! compound_assign {
    ($at:ty, $bound:path) => {
        /// Add the value of `expr` to every sample.
        pub fn assign_add<E>(&self, expr: E)
        where
            Binary<Self, E, binary::Add>: Expression<$at, Output: $bound>,
        {
            self.assign(Binary::new(*self, expr, binary::Add))
        }

        pub fn assign_sub<E>(&self, expr: E)
        where
            Binary<Self, E, binary::Sub>: Expression<$at, Output: $bound>,
        {
            self.assign(Binary::new(*self, expr, binary::Sub))
        }

        pub fn assign_mul<E>(&self, expr: E)
        where
            Binary<Self, E, binary::Mul>: Expression<$at, Output: $bound>,
        {
            self.assign(Binary::new(*self, expr, binary::Mul))
        }

        pub fn assign_div<E>(&self, expr: E)
        where
            Binary<Self, E, binary::Div>: Expression<$at, Output: $bound>,
        {
            self.assign(Binary::new(*self, expr, binary::Div))
        }
    };
}

pub(crate) use compound_assign;

impl<'a, T> ImageView<'a, T> {
    /// View `buffer` through `layout`.
    ///
    /// Fails if the buffer does not hold every sample the layout addresses.
    pub fn new(layout: LayoutDescriptor, buffer: &'a [Cell<T>]) -> Result<Self, LayoutError> {
        ImageDescriptor::new(layout, buffer).map(Self::from_descriptor)
    }

    /// View an exclusively borrowed buffer, which stays borrowed for the life of the view.
    pub fn from_slice_mut(
        layout: LayoutDescriptor,
        buffer: &'a mut [T],
    ) -> Result<Self, LayoutError> {
        ImageView::new(layout, Cell::from_mut(buffer).as_slice_of_cells())
    }

    pub fn from_descriptor(descriptor: ImageDescriptor<'a, T>) -> Self {
        ImageView {
            layout: *descriptor.layout(),
            buffer: descriptor.buffer(),
        }
    }

    /// A one-plane view of a single plane.
    pub fn from_plane(plane: PlaneView<'a, T>) -> Self {
        plane.into_view()
    }

    pub fn descriptor(&self) -> ImageDescriptor<'a, T> {
        ImageDescriptor::from_parts(self.layout, self.buffer)
    }

    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    pub fn width(&self) -> i32 {
        self.layout.width()
    }

    pub fn height(&self) -> i32 {
        self.layout.height()
    }

    pub fn num_planes(&self) -> usize {
        self.layout.num_planes()
    }

    pub fn layout_kind(&self) -> LayoutKind {
        self.layout.layout_kind()
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.layout.pixel_format()
    }

    pub fn pixel_precision(&self) -> i32 {
        self.layout.pixel_precision()
    }

    /// Change the precision this view reports, without touching any sample.
    pub fn set_pixel_precision(&mut self, precision: i32) {
        self.layout.set_pixel_precision(precision);
    }

    /// The whole underlying buffer, for bulk transfers.
    pub fn buffer(&self) -> &'a [Cell<T>] {
        self.buffer
    }

    pub fn plane(&self, index: usize) -> Option<PlaneView<'a, T>> {
        let layout = self.layout.single_plane(index).ok()?;
        Some(PlaneView::new(
            ImageView {
                layout,
                buffer: self.buffer,
            },
            index,
        ))
    }

    pub fn planes(&self) -> impl Iterator<Item = PlaneView<'a, T>> + 'a {
        let view = *self;
        (0..view.num_planes()).filter_map(move |index| view.plane(index))
    }

    /// A view of a region of this image, sharing the buffer.
    ///
    /// The region keeps the strides of the image; it may reach into the border.
    pub fn roi(&self, roi: Rect) -> Result<Self, LayoutError> {
        Ok(ImageView {
            layout: self.layout.roi(roi)?,
            buffer: self.buffer,
        })
    }

    /// The buffer index of a sample, if it is addressable.
    pub fn index(&self, x: i32, y: i32, plane: usize) -> Result<usize, OutOfBounds> {
        let err = OutOfBounds { x, y, plane };
        let descriptor = self.layout.plane(plane).ok_or(err)?;
        let subsample = descriptor.subsample;
        let b = self.layout.border() >> subsample;

        let columns = -b..self.layout.plane_width(subsample) + b;
        let rows = -b..self.layout.plane_height(subsample) + b;
        if !columns.contains(&x) || !rows.contains(&y) {
            return Err(err);
        }

        usize::try_from(descriptor.sample_index(x, y))
            .ok()
            .filter(|&index| index < self.buffer.len())
            .ok_or(err)
    }

    /// The samples of row `y` of a plane, from its first to its last column.
    ///
    /// With a pixel stride above one the slice also contains the samples of other planes.
    pub fn row(&self, plane: usize, y: i32) -> Option<&'a [Cell<T>]> {
        let subsample = self.layout.plane(plane)?.subsample;
        let last = self.layout.plane_width(subsample) - 1;
        let range = span(self.index(0, y, plane).ok()?, self.index(last, y, plane).ok()?);
        self.buffer.get(range)
    }

    /// Visit the coordinates of every sample, plane by plane and row by row.
    pub fn for_each(&self, mut f: impl FnMut(i32, i32, usize)) {
        for plane in self.layout.planes() {
            let width = self.layout.plane_width(plane.subsample);
            let height = self.layout.plane_height(plane.subsample);
            for y in 0..height {
                for x in 0..width {
                    f(x, y, plane.index);
                }
            }
        }
    }

    /// Reinterpret the buffer with the width rounded up to a multiple of `alignment`.
    ///
    /// Fails unless the required buffer size stays the same.
    pub fn align_width(&self, alignment: i32) -> Result<Self, LayoutError> {
        let width = round_up(i64::from(self.width()), i64::from(alignment)) as i32;
        let layout = Builder::from_layout(&self.layout).width(width).build()?;
        self.reshape("align_width", layout)
    }

    /// Reinterpret the buffer with the height rounded up to a multiple of `alignment`.
    pub fn align_height(&self, alignment: i32) -> Result<Self, LayoutError> {
        let height = round_up(i64::from(self.height()), i64::from(alignment)) as i32;
        let layout = Builder::from_layout(&self.layout).height(height).build()?;
        self.reshape("align_height", layout)
    }

    /// Reinterpret the whole buffer as one grayscale row.
    ///
    /// The row covers the samples of all planes, including padding, rounded up to
    /// `size_alignment`.
    pub fn flatten(&self, size_alignment: i32) -> Result<Self, LayoutError> {
        let flattened = Builder::from_layout(&self.layout)
            .size_alignment(1)
            .build()?
            .required_buffer_size();
        let width = round_up(flattened as i64, i64::from(size_alignment));

        let layout = Builder::new(width as i32, 1)
            .pixel_format(PixelFormat::Grayscale)
            .pixel_precision(self.pixel_precision())
            .width_alignment(1)
            .height_alignment(1)
            .size_alignment(self.layout.size_alignment())
            .build()?;
        self.reshape("flatten", layout)
    }

    /// Reinterpret a planar image as one grayscale row per plane.
    pub fn flatten_planes(&self) -> Result<Self, LayoutError> {
        if self.layout_kind() != LayoutKind::Planar {
            return Err(LayoutError::not_planar(self.layout_kind()));
        }

        let plane_size = Builder::from_layout(&self.layout)
            .pixel_format(PixelFormat::Grayscale)
            .height_alignment(1)
            .size_alignment(1)
            .build()?
            .required_buffer_size() as i64;
        let plane_stride = Builder::from_layout(&self.layout)
            .pixel_format(PixelFormat::Grayscale)
            .size_alignment(1)
            .build()?
            .required_buffer_size() as i64;

        // One row per plane, each row starting where the plane did.
        let layout = Builder::new(plane_size as i32, self.num_planes() as i32)
            .pixel_format(PixelFormat::Grayscale)
            .pixel_precision(self.pixel_precision())
            .width_alignment(1)
            .height_alignment(1)
            .size_alignment(self.layout.size_alignment())
            .plane_strides(0, plane_stride, 1)
            .build()?;
        self.reshape("flatten_planes", layout)
    }

    /// Group the planes into pixels of `N` samples.
    ///
    /// The image must have exactly `N` planes, none of them subsampled.
    pub fn pixel_view<const N: usize>(&self) -> Result<PixelView<'a, T, N>, LayoutError> {
        if self.num_planes() != N {
            return Err(LayoutError::plane_count(N, self.num_planes()));
        }

        if let Some(plane) = self.layout.planes().iter().find(|p| p.subsample != 0) {
            return Err(LayoutError::subsampled(plane.index));
        }

        Ok(PixelView::new(*self))
    }

    /// The samples of one color of a Bayer mosaic.
    pub fn bayer(&self, color: BayerColor) -> Result<BayerView<'a, T>, LayoutError> {
        let layout = self.layout.bayer_plane(color)?;
        let plane = PlaneView::new(ImageView::new(layout, self.buffer)?, 0);
        Ok(BayerView::new(plane, color))
    }

    /// All colors of a Bayer mosaic as the planes of 4-sample pixels, in [`BayerColor::ALL`]
    /// order.
    pub fn bayer_planar(&self) -> Result<PixelView<'a, T, 4>, LayoutError> {
        let layout = self.layout.bayer_planes()?;
        Ok(PixelView::new(ImageView::new(layout, self.buffer)?))
    }

    fn reshape(&self, what: &'static str, layout: LayoutDescriptor) -> Result<Self, LayoutError> {
        let (expected, actual) = (
            self.layout.required_buffer_size(),
            layout.required_buffer_size(),
        );
        if expected != actual {
            return Err(LayoutError::size_changed(what, expected, actual));
        }

        ImageView::new(layout, self.buffer)
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// The sample at `(x, y)` of a plane.
    ///
    /// # Panics
    ///
    /// If the coordinate is not addressable.
    pub fn at(&self, x: i32, y: i32, plane: usize) -> T {
        match self.try_at(x, y, plane) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_at(&self, x: i32, y: i32, plane: usize) -> Result<T, OutOfBounds> {
        let index = self.index(x, y, plane)?;
        Ok(self.buffer[index].get())
    }

    pub fn get(&self, x: i32, y: i32, plane: usize) -> Option<T> {
        self.try_at(x, y, plane).ok()
    }

    /// Overwrite the sample at `(x, y)` of a plane.
    ///
    /// # Panics
    ///
    /// If the coordinate is not addressable.
    pub fn set(&self, x: i32, y: i32, plane: usize, value: T) {
        if let Err(err) = self.try_set(x, y, plane, value) {
            panic!("{err}");
        }
    }

    pub fn try_set(&self, x: i32, y: i32, plane: usize, value: T) -> Result<(), OutOfBounds> {
        let index = self.index(x, y, plane)?;
        self.buffer[index].set(value);
        Ok(())
    }
}

impl<T: Sample> ImageView<'_, T> {
    /// The largest value of the pixel precision.
    pub fn saturation_value(&self) -> T {
        self.layout.saturation_value()
    }

    /// Evaluate `expr` for every sample and store the result, converted to `T`.
    pub fn assign<E>(&self, expr: E)
    where
        E: Expression<Xyn>,
        E::Output: Sample,
    {
        self.for_each(|x, y, n| self.set(x, y, n, expr.evaluate(Xyn { x, y, n }).cast()));
    }

    compound_assign!(Xyn, Sample);

    /// The smallest sample of all planes.
    pub fn minimum(&self) -> T {
        self.planes()
            .map(|plane| plane.minimum())
            .fold(T::MAX, |acc, v| if v < acc { v } else { acc })
    }

    /// The largest sample of all planes.
    pub fn maximum(&self) -> T {
        self.planes()
            .map(|plane| plane.maximum())
            .fold(T::MIN, |acc, v| if v > acc { v } else { acc })
    }
}

/// Evaluated per plane, a single-plane view yields its only plane for every plane index.
impl<T: Copy> Expression<Xyn> for ImageView<'_, T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, at: Xyn) -> T {
        let plane = if self.num_planes() > 1 { at.n } else { 0 };
        self.at(at.x, at.y, plane)
    }
}

/// Only single-plane views can be evaluated without a plane index.
impl<T: Copy> Expression<Xy> for ImageView<'_, T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, at: Xy) -> T {
        assert_eq!(
            self.num_planes(),
            1,
            "a multi-plane view needs a plane index, use a pixel view"
        );
        self.at(at.x, at.y, 0)
    }
}

impl<T> Extent for ImageView<'_, T> {
    fn width(&self) -> i32 {
        self.layout.width()
    }

    fn height(&self) -> i32 {
        self.layout.height()
    }
}

impl<T> Clone for ImageView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageView<'_, T> {}

impl<T> fmt::Debug for ImageView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageView")
            .field("layout", &self.layout)
            .field("len", &self.buffer.len())
            .finish()
    }
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coordinate ({}, {}) of plane {} is out of bounds",
            self.x, self.y, self.plane
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// The index range from one sample to another, inclusive, in either order.
fn span(a: usize, b: usize) -> Range<usize> {
    a.min(b)..a.max(b) + 1
}
