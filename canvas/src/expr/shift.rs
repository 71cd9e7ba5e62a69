use crate::expr::{Expression, Extent, Position};

/// Evaluates an expression at translated coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Shift<E> {
    expr: E,
    dx: i32,
    dy: i32,
}

impl<E> Shift<E> {
    pub fn new(expr: E, dx: i32, dy: i32) -> Self {
        Shift { expr, dx, dy }
    }
}

impl<P: Position, E: Expression<P>> Expression<P> for Shift<E> {
    type Output = E::Output;

    #[inline]
    fn evaluate(&self, at: P) -> E::Output {
        self.expr
            .evaluate(at.moved(at.x() + self.dx, at.y() + self.dy))
    }
}

impl<E: Extent> Extent for Shift<E> {
    fn width(&self) -> i32 {
        self.expr.width()
    }

    fn height(&self) -> i32 {
        self.expr.height()
    }
}
