use crate::border::BorderMode;
use crate::expr::{Expression, Extent, Position};
use crate::sample::{Lanes, Sample};

/// Extends an expression beyond its extent.
///
/// Coordinates inside `[0, width) × [0, height)` pass through. Outside, the [`BorderMode`]
/// decides which coordinate is evaluated instead, or yields zero for a constant border.
#[derive(Clone, Copy, Debug)]
pub struct Border<E> {
    expr: E,
    mode: BorderMode,
}

impl<E> Border<E> {
    pub fn new(expr: E, mode: BorderMode) -> Self {
        Border { expr, mode }
    }

    pub fn mode(&self) -> BorderMode {
        self.mode
    }
}

impl<P, E> Expression<P> for Border<E>
where
    P: Position,
    E: Expression<P> + Extent,
    E::Output: Lanes,
{
    type Output = E::Output;

    #[inline]
    fn evaluate(&self, at: P) -> E::Output {
        let (width, height) = (self.expr.width(), self.expr.height());
        let (x, y) = (at.x(), at.y());

        if (0..width).contains(&x) && (0..height).contains(&y) {
            return self.expr.evaluate(at);
        }

        match (self.mode.remap(x, width), self.mode.remap(y, height)) {
            (Some(x), Some(y)) => self.expr.evaluate(at.moved(x, y)),
            _ => <E::Output as Lanes>::splat(<<E::Output as Lanes>::Elem as Sample>::ZERO),
        }
    }
}

impl<E: Extent> Extent for Border<E> {
    fn width(&self) -> i32 {
        self.expr.width()
    }

    fn height(&self) -> i32 {
        self.expr.height()
    }
}
