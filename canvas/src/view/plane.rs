use core::cell::Cell;
use core::fmt;

use crate::expr::binary::{self, Binary};
use crate::expr::{Expression, Extent, Position, Xy};
use crate::histogram::{Histogram, RegularAxis};
use crate::layout::LayoutDescriptor;
use crate::sample::Sample;

use super::{compound_assign, ImageView, OutOfBounds};

/// A view of a single plane, at the plane's own resolution.
///
/// Coordinates of a subsampled plane are in subsampled pixels and its border is the image
/// border divided accordingly.
pub struct PlaneView<'a, T> {
    view: ImageView<'a, T>,
    index: usize,
}

impl<'a, T> PlaneView<'a, T> {
    /// Wrap a one-plane view of plane `index` of some image.
    pub(crate) fn new(view: ImageView<'a, T>, index: usize) -> Self {
        debug_assert_eq!(view.num_planes(), 1);
        PlaneView { view, index }
    }

    /// The position of this plane in the image it was taken from.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> i32 {
        self.view.width()
    }

    pub fn height(&self) -> i32 {
        self.view.height()
    }

    /// The padding around this plane, in its own pixels.
    pub fn border(&self) -> i32 {
        self.view.layout().border()
    }

    /// A one-plane layout addressing this plane.
    pub fn layout(&self) -> &LayoutDescriptor {
        self.view.layout()
    }

    pub fn into_view(self) -> ImageView<'a, T> {
        self.view
    }

    /// The samples of row `y`, from the first to the last column.
    pub fn row(&self, y: i32) -> Option<&'a [Cell<T>]> {
        self.view.row(0, y)
    }

    /// Visit every coordinate, row by row.
    pub fn for_each(&self, mut f: impl FnMut(i32, i32)) {
        self.view.for_each(|x, y, _| f(x, y));
    }
}

impl<T: Copy> PlaneView<'_, T> {
    /// The sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If the coordinate is not addressable.
    pub fn at(&self, x: i32, y: i32) -> T {
        match self.try_at(x, y) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_at(&self, x: i32, y: i32) -> Result<T, OutOfBounds> {
        self.view.try_at(x, y, 0).map_err(|err| self.relabel(err))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        self.view.get(x, y, 0)
    }

    /// # Panics
    ///
    /// If the coordinate is not addressable.
    pub fn set(&self, x: i32, y: i32, value: T) {
        if let Err(err) = self.try_set(x, y, value) {
            panic!("{err}");
        }
    }

    pub fn try_set(&self, x: i32, y: i32, value: T) -> Result<(), OutOfBounds> {
        self.view
            .try_set(x, y, 0, value)
            .map_err(|err| self.relabel(err))
    }

    fn relabel(&self, err: OutOfBounds) -> OutOfBounds {
        OutOfBounds {
            plane: self.index,
            ..err
        }
    }
}

impl<T: Sample> PlaneView<'_, T> {
    pub fn saturation_value(&self) -> T {
        self.view.saturation_value()
    }

    /// Evaluate `expr` at every coordinate and store the result, converted to `T`.
    pub fn assign<E>(&self, expr: E)
    where
        E: Expression<Xy>,
        E::Output: Sample,
    {
        self.for_each(|x, y| self.set(x, y, expr.evaluate(Xy { x, y }).cast()));
    }

    compound_assign!(Xy, Sample);

    pub fn minimum(&self) -> T {
        let mut min = T::MAX;
        self.for_each(|x, y| {
            let v = self.at(x, y);
            if v < min {
                min = v;
            }
        });
        min
    }

    pub fn maximum(&self) -> T {
        let mut max = T::MIN;
        self.for_each(|x, y| {
            let v = self.at(x, y);
            if v > max {
                max = v;
            }
        });
        max
    }

    /// The average of all samples.
    pub fn mean(&self) -> f32 {
        let (mut sum, mut count) = (0.0f64, 0u64);
        self.for_each(|x, y| {
            sum += self.at(x, y).to_f64();
            count += 1;
        });

        if count == 0 {
            return 0.0;
        }

        (sum / count as f64) as f32
    }

    /// A histogram with one bin per value in `[0, saturation]`.
    pub fn histogram(&self) -> Histogram<T> {
        let saturation = self.saturation_value();
        let bins = usize::try_from(saturation.to_i64()).map_or(1, |max| max + 1);
        self.histogram_with(bins, T::ZERO, saturation)
    }

    /// A histogram with `bins` regular bins over `[from, to]`.
    pub fn histogram_with(&self, bins: usize, from: T, to: T) -> Histogram<T> {
        let mut histogram = Histogram::new(RegularAxis::new(bins, from, to));
        self.for_each(|x, y| histogram.fill(self.at(x, y)));
        histogram
    }
}

impl<P: Position, T: Copy> Expression<P> for PlaneView<'_, T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, at: P) -> T {
        self.at(at.x(), at.y())
    }
}

impl<T> Extent for PlaneView<'_, T> {
    fn width(&self) -> i32 {
        self.view.width()
    }

    fn height(&self) -> i32 {
        self.view.height()
    }
}

impl<T> Clone for PlaneView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PlaneView<'_, T> {}

impl<T> fmt::Debug for PlaneView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaneView")
            .field("index", &self.index)
            .field("view", &self.view)
            .finish()
    }
}
