//! Unary operators.
use core::marker::PhantomData;

use crate::expr::{Expression, Extent, Position};
use crate::sample::{Arith, Lanes, Promote, Sample};

/// Transforms the values of an expression.
#[derive(Clone, Copy, Debug)]
pub struct Unary<E, Op> {
    expr: E,
    op: Op,
}

/// An operation on one evaluated value.
pub trait UnaryOperator<A> {
    type Output;

    fn apply(&self, value: A) -> Self::Output;
}

impl<E, Op> Unary<E, Op> {
    pub fn new(expr: E, op: Op) -> Self {
        Unary { expr, op }
    }
}

impl<P, E, Op> Expression<P> for Unary<E, Op>
where
    P: Position,
    E: Expression<P>,
    Op: UnaryOperator<E::Output>,
{
    type Output = Op::Output;

    #[inline]
    fn evaluate(&self, at: P) -> Op::Output {
        self.op.apply(self.expr.evaluate(at))
    }
}

impl<E: Extent, Op> Extent for Unary<E, Op> {
    fn width(&self) -> i32 {
        self.expr.width()
    }

    fn height(&self) -> i32 {
        self.expr.height()
    }
}

/// Absolute value, computed in the widened type.
#[derive(Clone, Copy, Debug, Default)]
pub struct Abs;

impl<A> UnaryOperator<A> for Abs
where
    A: Promote<A>,
    <A::Output as Lanes>::Elem: Arith,
{
    type Output = A::Output;

    fn apply(&self, value: A) -> A::Output {
        A::lhs(value).apply(Arith::abs)
    }
}

/// Conversion into `U`.
pub struct Cast<U>(PhantomData<fn() -> U>);

impl<U> Cast<U> {
    pub fn new() -> Self {
        Cast(PhantomData)
    }
}

impl<U> Default for Cast<U> {
    fn default() -> Self {
        Cast::new()
    }
}

impl<U> Clone for Cast<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Cast<U> {}

impl<U> core::fmt::Debug for Cast<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Cast")
    }
}

impl<A: Lanes, U: Sample> UnaryOperator<A> for Cast<U> {
    type Output = A::Map<U>;

    fn apply(&self, value: A) -> A::Map<U> {
        value.map(Sample::cast::<U>)
    }
}

/// Reciprocal, in `f32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inv;

impl<A: Lanes> UnaryOperator<A> for Inv {
    type Output = A::Map<f32>;

    fn apply(&self, value: A) -> A::Map<f32> {
        value.map(|v| 1.0 / v.to_f32())
    }
}

/// Table lookup, indexed by the integral value.
#[derive(Debug)]
pub struct Lut<'t, U> {
    table: &'t [U],
}

impl<'t, U> Lut<'t, U> {
    pub fn new(table: &'t [U]) -> Self {
        Lut { table }
    }
}

impl<U> Clone for Lut<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Lut<'_, U> {}

impl<A: Lanes, U: Sample> UnaryOperator<A> for Lut<'_, U> {
    type Output = A::Map<U>;

    fn apply(&self, value: A) -> A::Map<U> {
        value.map(|v| {
            let index = v.to_i64();
            match usize::try_from(index).ok().and_then(|i| self.table.get(i)) {
                Some(entry) => *entry,
                None => panic!(
                    "lookup index {index} out of range for a table of {} entries",
                    self.table.len()
                ),
            }
        })
    }
}

/// Rounding to the nearest `i32`, halfway cases away from zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lround;

impl<A: Lanes> UnaryOperator<A> for Lround {
    type Output = A::Map<i32>;

    fn apply(&self, value: A) -> A::Map<i32> {
        value.map(|v| libm::roundf(v.to_f32()) as i32)
    }
}

/// Clamping into a closed range, in the type of the value.
#[derive(Clone, Copy, Debug)]
pub struct Saturate<S> {
    min: S,
    max: S,
}

impl<S> Saturate<S> {
    pub fn new(min: S, max: S) -> Self {
        Saturate { min, max }
    }
}

impl<A: Lanes, S: Sample> UnaryOperator<A> for Saturate<S> {
    type Output = A;

    fn apply(&self, value: A) -> A {
        let min = self.min.cast::<A::Elem>();
        let max = self.max.cast::<A::Elem>();
        value.apply(|v| {
            if v < min {
                min
            } else if max < v {
                max
            } else {
                v
            }
        })
    }
}

/// The sign, as `-1`, `0` or `1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sign;

impl<A: Lanes> UnaryOperator<A> for Sign {
    type Output = A::Map<i32>;

    fn apply(&self, value: A) -> A::Map<i32> {
        value.map(|v| {
            let zero = <A::Elem as Sample>::ZERO;
            i32::from(zero < v) - i32::from(v < zero)
        })
    }
}

/// Square root, in `f32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sqrt;

impl<A: Lanes> UnaryOperator<A> for Sqrt {
    type Output = A::Map<f32>;

    fn apply(&self, value: A) -> A::Map<f32> {
        value.map(|v| libm::sqrtf(v.to_f32()))
    }
}

/// Square, in `f32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Square;

impl<A: Lanes> UnaryOperator<A> for Square {
    type Output = A::Map<f32>;

    fn apply(&self, value: A) -> A::Map<f32> {
        value.map(|v| {
            let v = v.to_f32();
            v * v
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn abs_widens() {
        let a: i32 = Abs.apply(-128i8);
        assert_eq!(a, 128);
        assert_eq!(Abs.apply(-0.5f32), 0.5);
    }

    #[test]
    fn rounding_and_sign() {
        assert_eq!(Lround.apply(2.5f32), 3);
        assert_eq!(Lround.apply(-2.5f64), -3);
        assert_eq!(Sign.apply(Pixel([-3i16, 0, 7])), Pixel([-1, 0, 1]));
    }

    #[test]
    fn saturate_keeps_type() {
        let op = Saturate::new(10, 200);
        let v: u8 = op.apply(250u8);
        assert_eq!(v, 200);
        assert_eq!(op.apply(Pixel([0.0f32, 50.0])), Pixel([10.0, 50.0]));
    }

    #[test]
    fn lut_lookup() {
        let table = [0u16, 10, 20, 30];
        assert_eq!(Lut::new(&table).apply(Pixel([3u8, 1])), Pixel([30, 10]));
    }

    #[test]
    #[should_panic(expected = "lookup index 4 out of range")]
    fn lut_out_of_range() {
        let table = [0u16, 10, 20, 30];
        let _ = Lut::new(&table).apply(4u8);
    }

    #[test]
    fn real_valued() {
        assert_eq!(Inv.apply(4u8), 0.25);
        assert_eq!(Sqrt.apply(9i32), 3.0);
        assert_eq!(Square.apply(Pixel([3u8, 4])), Pixel([9.0, 16.0]));
        let c: i16 = Cast::<i16>::new().apply(-1.75f32);
        assert_eq!(c, -1);
    }
}
