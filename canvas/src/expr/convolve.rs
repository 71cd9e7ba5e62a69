use crate::expr::{Expression, Extent, Position};
use crate::sample::{Arith, Lanes, Promote, Sample};

/// The axis along which a one-dimensional kernel is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// A one-dimensional convolution with an odd-sized kernel.
///
/// The value at a coordinate is `Σ kernel[i] · expr(c + i − (N − 1) / 2)` along the direction,
/// accumulated in the common type of kernel and expression.
#[derive(Clone, Copy, Debug)]
pub struct Convolve<E, K, const N: usize> {
    expr: E,
    kernel: [K; N],
    direction: Direction,
}

impl<E, K, const N: usize> Convolve<E, K, N> {
    pub fn new(expr: E, kernel: [K; N], direction: Direction) -> Self {
        const { assert!(N % 2 == 1, "convolution kernels have an odd size") };
        Convolve {
            expr,
            kernel,
            direction,
        }
    }
}

impl<P, E, K, const N: usize> Expression<P> for Convolve<E, K, N>
where
    P: Position,
    E: Expression<P>,
    K: Copy,
    E::Output: Promote<K>,
    <<E::Output as Promote<K>>::Output as Lanes>::Elem: Arith,
{
    type Output = <E::Output as Promote<K>>::Output;

    fn evaluate(&self, at: P) -> Self::Output {
        let half = (N as i32 - 1) / 2;
        let zero = <<Self::Output as Lanes>::Elem as Sample>::ZERO;

        self.kernel
            .iter()
            .enumerate()
            .fold(<Self::Output as Lanes>::splat(zero), |acc, (i, &weight)| {
                let d = i as i32 - half;
                let tap = match self.direction {
                    Direction::Horizontal => at.moved(at.x() + d, at.y()),
                    Direction::Vertical => at.moved(at.x(), at.y() + d),
                };

                let value = <E::Output as Promote<K>>::lhs(self.expr.evaluate(tap));
                let weight = <E::Output as Promote<K>>::rhs(weight);
                acc.combine(value.combine(weight, Arith::mul), Arith::add)
            })
    }
}

impl<E: Extent, K, const N: usize> Extent for Convolve<E, K, N> {
    fn width(&self) -> i32 {
        self.expr.width()
    }

    fn height(&self) -> i32 {
        self.expr.height()
    }
}
