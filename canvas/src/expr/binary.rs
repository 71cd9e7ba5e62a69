//! Binary operators.
//!
//! Both operands are brought to their common type first, see [`Promote`]. Arithmetic keeps that
//! type, comparisons and logical operators produce `bool`.
use crate::expr::{Expression, Extent, Position};
use crate::sample::{Arith, Bits, Lanes, Promote, Sample};

/// Combines the values of two expressions.
#[derive(Clone, Copy, Debug)]
pub struct Binary<L, R, Op> {
    lhs: L,
    rhs: R,
    op: Op,
}

/// An operation on two evaluated values.
pub trait BinaryOperator<A, B> {
    type Output;

    fn apply(&self, lhs: A, rhs: B) -> Self::Output;
}

impl<L, R, Op> Binary<L, R, Op> {
    pub fn new(lhs: L, rhs: R, op: Op) -> Self {
        Binary { lhs, rhs, op }
    }
}

impl<P, L, R, Op> Expression<P> for Binary<L, R, Op>
where
    P: Position,
    L: Expression<P>,
    R: Expression<P>,
    Op: BinaryOperator<L::Output, R::Output>,
{
    type Output = Op::Output;

    #[inline]
    fn evaluate(&self, at: P) -> Op::Output {
        self.op.apply(self.lhs.evaluate(at), self.rhs.evaluate(at))
    }
}

/// The extent of the left operand.
impl<L: Extent, R, Op> Extent for Binary<L, R, Op> {
    fn width(&self) -> i32 {
        self.lhs.width()
    }

    fn height(&self) -> i32 {
        self.lhs.height()
    }
}

type Promoted<A, B> = <A as Promote<B>>::Output;
type Elem<A, B> = <Promoted<A, B> as Lanes>::Elem;
type Mapped<A, B, U> = <Promoted<A, B> as Lanes>::Map<U>;

macro_rules! arith_op {
    ($($(#[$attr:meta])* $name:ident => $bound:ident::$method:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            impl<A, B> BinaryOperator<A, B> for $name
            where
                A: Promote<B>,
                Elem<A, B>: $bound,
            {
                type Output = Promoted<A, B>;

                #[inline]
                fn apply(&self, lhs: A, rhs: B) -> Self::Output {
                    A::lhs(lhs).combine(A::rhs(rhs), $bound::$method)
                }
            }
        )*
    };
}

macro_rules! compare_op {
    ($($(#[$attr:meta])* $name:ident => |$a:ident, $b:ident| $cmp:expr),* $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            impl<A, B> BinaryOperator<A, B> for $name
            where
                A: Promote<B>,
            {
                type Output = Mapped<A, B, bool>;

                #[inline]
                fn apply(&self, lhs: A, rhs: B) -> Self::Output {
                    A::lhs(lhs).zip(A::rhs(rhs), |$a, $b| $cmp)
                }
            }
        )*
    };
}

arith_op! {
    Add => Arith::add,
    Sub => Arith::sub,
    Mul => Arith::mul,
    /// Integer division truncates and panics on a zero divisor.
    Div => Arith::div,
    Min => Arith::min,
    Max => Arith::max,
    /// Shift left, integers only.
    Shl => Bits::shl,
    /// Shift right, arithmetic for signed integers.
    Shr => Bits::shr,
}

compare_op! {
    Eq => |a, b| a == b,
    Lt => |a, b| a < b,
    Le => |a, b| a <= b,
    Gt => |a, b| a > b,
    Ge => |a, b| a >= b,
    And => |a, b| a.truth() && b.truth(),
    Or => |a, b| a.truth() || b.truth(),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Pow;

impl<A, B> BinaryOperator<A, B> for Pow
where
    A: Promote<B>,
    Elem<A, B>: Arith,
{
    type Output = Mapped<A, B, <Elem<A, B> as Arith>::Real>;

    #[inline]
    fn apply(&self, lhs: A, rhs: B) -> Self::Output {
        A::lhs(lhs).zip(A::rhs(rhs), Arith::pow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn promotes_small_integers() {
        let sum: i32 = Add.apply(200u8, 100u8);
        assert_eq!(sum, 300);
        let diff: i32 = Sub.apply(1i8, 3u16);
        assert_eq!(diff, -2);
    }

    #[test]
    fn promotes_to_unsigned_and_float() {
        let wrapped: u32 = Sub.apply(1i32, 2u32);
        assert_eq!(wrapped, u32::MAX);
        let half: f32 = Div.apply(1u8, 2.0f32);
        assert_eq!(half, 0.5);
        let wide: f64 = Mul.apply(0.5f32, 4.0f64);
        assert_eq!(wide, 2.0);
    }

    #[test]
    fn comparisons_yield_bool() {
        assert!(Lt.apply(1u8, 2i16));
        assert!(!Ge.apply(-1i32, 0u8));
        assert!(And.apply(3u8, 0.5f32));
        assert!(!Or.apply(0u8, false));
    }

    #[test]
    fn pixel_and_scalar() {
        let sum: Pixel<i32, 2> = Add.apply(Pixel([1u8, 2]), 10i16);
        assert_eq!(sum, Pixel([11, 12]));
        let max: Pixel<f32, 3> = Max.apply(0.5f32, Pixel([0u16, 1, 2]));
        assert_eq!(max, Pixel([0.5, 1.0, 2.0]));
    }

    #[test]
    fn integer_pow_in_double() {
        let p: f64 = Pow.apply(2u8, 10i32);
        assert_eq!(p, 1024.0);
    }

    #[test]
    fn shifts() {
        let s: i32 = Shl.apply(1u8, 4u8);
        assert_eq!(s, 16);
        let s: i32 = Shr.apply(-16i32, 2i32);
        assert_eq!(s, -4);
    }
}
