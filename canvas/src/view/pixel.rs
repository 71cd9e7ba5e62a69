use core::fmt;

use crate::expr::binary::{self, Binary};
use crate::expr::{Expression, Extent, Xy, Xyn};
use crate::pixel::Pixel;
use crate::sample::{IntoPixel, Sample};

use super::{compound_assign, ImageView};

/// A view of `N` full resolution planes as one image of `N`-sample pixels.
///
/// Assigning to a pixel view evaluates the expression once per coordinate and writes all `N`
/// planes from that one value. Scalar results are written to every plane.
pub struct PixelView<'a, T, const N: usize> {
    view: ImageView<'a, T>,
}

impl<'a, T, const N: usize> PixelView<'a, T, N> {
    /// Wrap a view already checked to have `N` planes.
    pub(crate) fn new(view: ImageView<'a, T>) -> Self {
        debug_assert_eq!(view.num_planes(), N);
        PixelView { view }
    }

    pub fn width(&self) -> i32 {
        self.view.width()
    }

    pub fn height(&self) -> i32 {
        self.view.height()
    }

    /// The underlying multi-plane view.
    pub fn view(&self) -> ImageView<'a, T> {
        self.view
    }

    /// Visit every coordinate, row by row.
    pub fn for_each(&self, mut f: impl FnMut(i32, i32)) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                f(x, y);
            }
        }
    }
}

impl<T: Copy, const N: usize> PixelView<'_, T, N> {
    /// The samples of all planes at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If the coordinate is not addressable.
    pub fn at(&self, x: i32, y: i32) -> Pixel<T, N> {
        Pixel(core::array::from_fn(|n| self.view.at(x, y, n)))
    }

    /// # Panics
    ///
    /// If the coordinate is not addressable.
    pub fn set(&self, x: i32, y: i32, pixel: Pixel<T, N>) {
        for (n, &value) in pixel.0.iter().enumerate() {
            self.view.set(x, y, n, value);
        }
    }
}

impl<T: Sample, const N: usize> PixelView<'_, T, N> {
    /// Evaluate `expr` once per coordinate and store the pixel, converted to `T`.
    pub fn assign<E>(&self, expr: E)
    where
        E: Expression<Xy>,
        E::Output: IntoPixel<T, N>,
    {
        self.for_each(|x, y| self.set(x, y, expr.evaluate(Xy { x, y }).into_pixel()));
    }

    compound_assign!(Xy, IntoPixel<T, N>);
}

impl<T: Copy, const N: usize> Expression<Xy> for PixelView<'_, T, N> {
    type Output = Pixel<T, N>;

    #[inline]
    fn evaluate(&self, at: Xy) -> Pixel<T, N> {
        self.at(at.x, at.y)
    }
}

impl<T: Copy, const N: usize> Expression<Xyn> for PixelView<'_, T, N> {
    type Output = T;

    #[inline]
    fn evaluate(&self, at: Xyn) -> T {
        self.view.at(at.x, at.y, at.n)
    }
}

impl<T, const N: usize> Extent for PixelView<'_, T, N> {
    fn width(&self) -> i32 {
        self.view.width()
    }

    fn height(&self) -> i32 {
        self.view.height()
    }
}

impl<T, const N: usize> Clone for PixelView<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for PixelView<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for PixelView<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PixelView").field(&self.view).finish()
    }
}
