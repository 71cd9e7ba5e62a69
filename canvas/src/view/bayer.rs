use core::fmt;
use core::ops::Deref;

use crate::expr::{Expression, Extent, Position};
use crate::format::BayerColor;

use super::PlaneView;

/// The samples of one color of a Bayer mosaic, as a plane of half the mosaic's size.
///
/// Coordinate `(x, y)` addresses the sample at `(2x + dx, 2y + dy)` of the mosaic, where
/// `(dx, dy)` is the position of the color within the 2×2 tile of the pixel format.
pub struct BayerView<'a, T> {
    plane: PlaneView<'a, T>,
    color: BayerColor,
}

impl<'a, T> BayerView<'a, T> {
    pub(crate) fn new(plane: PlaneView<'a, T>, color: BayerColor) -> Self {
        BayerView { plane, color }
    }

    pub fn color(&self) -> BayerColor {
        self.color
    }

    pub fn plane(&self) -> PlaneView<'a, T> {
        self.plane
    }
}

impl<'a, T> Deref for BayerView<'a, T> {
    type Target = PlaneView<'a, T>;

    fn deref(&self) -> &PlaneView<'a, T> {
        &self.plane
    }
}

impl<P: Position, T: Copy> Expression<P> for BayerView<'_, T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, at: P) -> T {
        self.plane.at(at.x(), at.y())
    }
}

impl<T> Extent for BayerView<'_, T> {
    fn width(&self) -> i32 {
        self.plane.width()
    }

    fn height(&self) -> i32 {
        self.plane.height()
    }
}

impl<T> Clone for BayerView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BayerView<'_, T> {}

impl<T> fmt::Debug for BayerView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BayerView")
            .field("color", &self.color)
            .field("plane", &self.plane)
            .finish()
    }
}
