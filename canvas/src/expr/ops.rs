//! Operator sugar: `+ - * / << >>` on expression nodes and views build [`Binary`] nodes.
//!
//! Any operand goes on the right. On the left, only nodes, views, references to images, and the
//! scalar types are supported.
use core::ops;

use crate::expr::binary::{self, Binary};
use crate::expr::{Border, Convolve, Resize, Select, Shift, Unary};
use crate::image::Image;
use crate::sample::Element;
use crate::view::{BayerView, ImageView, PixelView, PlaneView};

/// Implements one operator with the node on the left, then for every scalar on the left.
macro_rules! binary_op {
    ([$($gen:tt)*] $ty:ty; $op:ident $method:ident) => {
        impl<$($gen)*, Rhs> ops::$op<Rhs> for $ty {
            type Output = Binary<Self, Rhs, binary::$op>;

            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                Binary::new(self, rhs, binary::$op)
            }
        }

        scalar_lhs!([$($gen)*] $ty; $op $method; i8, u8, i16, u16, i32, u32, f32, f64);
    };
}

macro_rules! scalar_lhs {
    ([$($gen:tt)*] $ty:ty; $op:ident $method:ident;) => {};
    ([$($gen:tt)*] $ty:ty; $op:ident $method:ident; $scalar:ty $(, $rest:ty)*) => {
        impl<$($gen)*> ops::$op<$ty> for $scalar {
            type Output = Binary<$scalar, $ty, binary::$op>;

            #[inline]
            fn $method(self, rhs: $ty) -> Self::Output {
                Binary::new(self, rhs, binary::$op)
            }
        }

        scalar_lhs!([$($gen)*] $ty; $op $method; $($rest),*);
    };
}

macro_rules! operators {
    ($([$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            binary_op!([$($gen)*] $ty; Add add);
            binary_op!([$($gen)*] $ty; Sub sub);
            binary_op!([$($gen)*] $ty; Mul mul);
            binary_op!([$($gen)*] $ty; Div div);
            binary_op!([$($gen)*] $ty; Shl shl);
            binary_op!([$($gen)*] $ty; Shr shr);
        )*
    };
}

operators! {
    [L, R, Op] Binary<L, R, Op>,
    [E, Op] Unary<E, Op>,
    [E] Border<E>,
    [E, K, const N: usize] Convolve<E, K, N>,
    [C, A, B] Select<C, A, B>,
    [E, I] Resize<E, I>,
    [E] Shift<E>,
    ['a, T] ImageView<'a, T>,
    ['a, T] PlaneView<'a, T>,
    ['a, T, const N: usize] PixelView<'a, T, N>,
    ['a, T] BayerView<'a, T>,
    ['a, T: Element] &'a Image<T>,
}
