use crate::expr::{Expression, Extent, Position};
use crate::sample::{Promote, Sample};

/// Chooses between two expressions per pixel.
#[derive(Clone, Copy, Debug)]
pub struct Select<C, A, B> {
    cond: C,
    then: A,
    otherwise: B,
}

impl<C, A, B> Select<C, A, B> {
    pub fn new(cond: C, then: A, otherwise: B) -> Self {
        Select {
            cond,
            then,
            otherwise,
        }
    }
}

impl<P, C, A, B> Expression<P> for Select<C, A, B>
where
    P: Position,
    C: Expression<P>,
    C::Output: Sample,
    A: Expression<P>,
    B: Expression<P>,
    A::Output: Promote<B::Output>,
{
    type Output = <A::Output as Promote<B::Output>>::Output;

    #[inline]
    fn evaluate(&self, at: P) -> Self::Output {
        if self.cond.evaluate(at).truth() {
            <A::Output as Promote<B::Output>>::lhs(self.then.evaluate(at))
        } else {
            <A::Output as Promote<B::Output>>::rhs(self.otherwise.evaluate(at))
        }
    }
}

impl<C: Extent, A, B> Extent for Select<C, A, B> {
    fn width(&self) -> i32 {
        self.cond.width()
    }

    fn height(&self) -> i32 {
        self.cond.height()
    }
}
