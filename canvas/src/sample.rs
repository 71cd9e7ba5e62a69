//! Sample types and the arithmetic the expression engine performs on them.
//!
//! Arithmetic on mixed operands follows the usual integer promotion: 8- and 16-bit integers and
//! `bool` compute as `i32`, an unsigned 32-bit operand makes the computation unsigned, and a float
//! operand makes it float. [`Promote`] performs this on scalars and on [`Pixel`] values alike.
use core::fmt;

use planebuf_texel::AsTexel;

use crate::pixel::Pixel;

/// A scalar value that can be stored in, or computed from, an image.
pub trait Sample: Copy + PartialOrd + Default + fmt::Debug + 'static {
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;
    const IS_FLOAT: bool;
    /// Width of the type in bits.
    const BITS: u32;

    /// Integral value, wrapping for integers and truncating for floats.
    fn to_i64(self) -> i64;
    /// Convert from an integer, wrapping like an `as` conversion.
    fn from_i64(v: i64) -> Self;
    fn to_f64(self) -> f64;
    /// Convert from a float, truncating and saturating like an `as` conversion.
    fn from_f64(v: f64) -> Self;

    fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Convert into another sample type.
    fn cast<U: Sample>(self) -> U {
        if Self::IS_FLOAT {
            U::from_f64(self.to_f64())
        } else {
            U::from_i64(self.to_i64())
        }
    }

    /// Whether this value counts as `true` in a condition.
    fn truth(self) -> bool {
        self != Self::ZERO
    }
}

/// A sample type with closed arithmetic, the target of promotion.
pub trait Arith: Sample {
    /// The type used for operations that leave the integers, such as `pow`.
    type Real: Sample;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn div(self, rhs: Self) -> Self;
    fn abs(self) -> Self;
    fn to_real(self) -> Self::Real;
    fn pow(self, rhs: Self) -> Self::Real;

    fn min(self, rhs: Self) -> Self {
        if rhs < self {
            rhs
        } else {
            self
        }
    }

    fn max(self, rhs: Self) -> Self {
        if self < rhs {
            rhs
        } else {
            self
        }
    }
}

/// Integer types that can be shifted.
pub trait Bits: Arith {
    fn shl(self, rhs: Self) -> Self;
    fn shr(self, rhs: Self) -> Self;
}

/// A sample type that can be the element of an image buffer.
pub trait Element: Sample + AsTexel + bytemuck::Pod {}

macro_rules! int_sample {
    ($($ty:ty),*) => {
        $(impl Sample for $ty {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const IS_FLOAT: bool = false;
            const BITS: u32 = <$ty>::BITS;

            fn to_i64(self) -> i64 {
                self as i64
            }

            fn from_i64(v: i64) -> Self {
                v as $ty
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(v: f64) -> Self {
                v as $ty
            }
        }

        impl Element for $ty {})*
    };
}

macro_rules! float_sample {
    ($($ty:ty),*) => {
        $(impl Sample for $ty {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
            const IS_FLOAT: bool = true;
            const BITS: u32 = 8 * core::mem::size_of::<$ty>() as u32;

            fn to_i64(self) -> i64 {
                self as i64
            }

            fn from_i64(v: i64) -> Self {
                v as $ty
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(v: f64) -> Self {
                v as $ty
            }
        }

        impl Element for $ty {})*
    };
}

int_sample!(i8, u8, i16, u16, i32, u32);
float_sample!(f32, f64);

impl Sample for bool {
    const ZERO: Self = false;
    const ONE: Self = true;
    const MIN: Self = false;
    const MAX: Self = true;
    const IS_FLOAT: bool = false;
    const BITS: u32 = 1;

    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    fn from_i64(v: i64) -> Self {
        v != 0
    }

    fn to_f64(self) -> f64 {
        f64::from(u8::from(self))
    }

    fn from_f64(v: f64) -> Self {
        v != 0.0
    }
}

macro_rules! int_arith {
    ($($ty:ty),*) => {
        $(impl Arith for $ty {
            type Real = f64;

            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }

            #[allow(unused_comparisons)]
            fn abs(self) -> Self {
                if self < 0 {
                    self.wrapping_neg()
                } else {
                    self
                }
            }

            fn to_real(self) -> f64 {
                self as f64
            }

            fn pow(self, rhs: Self) -> f64 {
                libm::pow(self as f64, rhs as f64)
            }
        }

        impl Bits for $ty {
            fn shl(self, rhs: Self) -> Self {
                self.wrapping_shl(rhs as u32)
            }

            fn shr(self, rhs: Self) -> Self {
                self.wrapping_shr(rhs as u32)
            }
        })*
    };
}

int_arith!(i32, u32);

impl Arith for f32 {
    type Real = f32;

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn div(self, rhs: Self) -> Self {
        self / rhs
    }

    fn abs(self) -> Self {
        libm::fabsf(self)
    }

    fn to_real(self) -> f32 {
        self
    }

    fn pow(self, rhs: Self) -> f32 {
        libm::powf(self, rhs)
    }
}

impl Arith for f64 {
    type Real = f64;

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn div(self, rhs: Self) -> Self {
        self / rhs
    }

    fn abs(self) -> Self {
        libm::fabs(self)
    }

    fn to_real(self) -> f64 {
        self
    }

    fn pow(self, rhs: Self) -> f64 {
        libm::pow(self, rhs)
    }
}

/// The type a scalar is widened to before computing with it.
pub trait Widen: Sample {
    type Arith: Arith;
}

macro_rules! widen {
    ($($ty:ty => $arith:ty),*) => {
        $(impl Widen for $ty {
            type Arith = $arith;
        })*
    };
}

widen! {
    bool => i32,
    i8 => i32,
    u8 => i32,
    i16 => i32,
    u16 => i32,
    i32 => i32,
    u32 => u32,
    f32 => f32,
    f64 => f64
}

/// The common type of two widened scalar types.
pub trait Common<Rhs: Arith>: Arith {
    type Output: Arith;
}

macro_rules! common {
    ($($lhs:ty, $rhs:ty => $out:ty);* $(;)?) => {
        $(impl Common<$rhs> for $lhs {
            type Output = $out;
        })*
    };
}

common! {
    i32, i32 => i32;
    i32, u32 => u32;
    i32, f32 => f32;
    i32, f64 => f64;
    u32, i32 => u32;
    u32, u32 => u32;
    u32, f32 => f32;
    u32, f64 => f64;
    f32, i32 => f32;
    f32, u32 => f32;
    f32, f32 => f32;
    f32, f64 => f64;
    f64, i32 => f64;
    f64, u32 => f64;
    f64, f32 => f64;
    f64, f64 => f64;
}

/// A value with one or more sample lanes: a scalar, or a [`Pixel`].
pub trait Lanes: Copy {
    type Elem: Sample;
    /// The same shape with another lane type.
    type Map<U: Sample>: Lanes<Elem = U>;

    fn splat(value: Self::Elem) -> Self;
    fn map<U: Sample>(self, f: impl FnMut(Self::Elem) -> U) -> Self::Map<U>;
    fn zip<U: Sample>(self, other: Self, f: impl FnMut(Self::Elem, Self::Elem) -> U)
        -> Self::Map<U>;
    /// Combine lane-wise without changing the type.
    fn combine(self, other: Self, f: impl FnMut(Self::Elem, Self::Elem) -> Self::Elem) -> Self;
    /// Transform lane-wise without changing the type.
    fn apply(self, f: impl FnMut(Self::Elem) -> Self::Elem) -> Self;
}

impl<T: Sample> Lanes for T {
    type Elem = T;
    type Map<U: Sample> = U;

    fn splat(value: T) -> Self {
        value
    }

    fn map<U: Sample>(self, mut f: impl FnMut(T) -> U) -> U {
        f(self)
    }

    fn zip<U: Sample>(self, other: Self, mut f: impl FnMut(T, T) -> U) -> U {
        f(self, other)
    }

    fn combine(self, other: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        f(self, other)
    }

    fn apply(self, mut f: impl FnMut(T) -> T) -> Self {
        f(self)
    }
}

impl<T: Sample, const N: usize> Lanes for Pixel<T, N> {
    type Elem = T;
    type Map<U: Sample> = Pixel<U, N>;

    fn splat(value: T) -> Self {
        Pixel([value; N])
    }

    fn map<U: Sample>(self, f: impl FnMut(T) -> U) -> Pixel<U, N> {
        Pixel(self.0.map(f))
    }

    fn zip<U: Sample>(self, other: Self, mut f: impl FnMut(T, T) -> U) -> Pixel<U, N> {
        Pixel(core::array::from_fn(|i| f(self.0[i], other.0[i])))
    }

    fn combine(self, other: Self, f: impl FnMut(T, T) -> T) -> Self {
        self.zip(other, f)
    }

    fn apply(self, f: impl FnMut(T) -> T) -> Self {
        self.map(f)
    }
}

/// Bring two operands to their common type.
pub trait Promote<Rhs>: Sized {
    type Output: Lanes;

    fn lhs(self) -> Self::Output;
    fn rhs(rhs: Rhs) -> Self::Output;
}

type CommonOf<A, B> = <<A as Widen>::Arith as Common<<B as Widen>::Arith>>::Output;

impl<A: Widen, B: Widen> Promote<B> for A
where
    A::Arith: Common<B::Arith>,
{
    type Output = CommonOf<A, B>;

    fn lhs(self) -> Self::Output {
        self.cast()
    }

    fn rhs(rhs: B) -> Self::Output {
        rhs.cast()
    }
}

impl<A: Widen, B: Widen, const N: usize> Promote<B> for Pixel<A, N>
where
    A::Arith: Common<B::Arith>,
{
    type Output = Pixel<CommonOf<A, B>, N>;

    fn lhs(self) -> Self::Output {
        self.cast()
    }

    fn rhs(rhs: B) -> Self::Output {
        Pixel::splat(rhs.cast())
    }
}

impl<A: Widen, B: Widen, const N: usize> Promote<Pixel<B, N>> for A
where
    A::Arith: Common<B::Arith>,
{
    type Output = Pixel<CommonOf<A, B>, N>;

    fn lhs(self) -> Self::Output {
        Pixel::splat(self.cast())
    }

    fn rhs(rhs: Pixel<B, N>) -> Self::Output {
        rhs.cast()
    }
}

impl<A: Widen, B: Widen, const N: usize> Promote<Pixel<B, N>> for Pixel<A, N>
where
    A::Arith: Common<B::Arith>,
{
    type Output = Pixel<CommonOf<A, B>, N>;

    fn lhs(self) -> Self::Output {
        self.cast()
    }

    fn rhs(rhs: Pixel<B, N>) -> Self::Output {
        rhs.cast()
    }
}

/// Convert an evaluated value into a pixel of `N` lanes, broadcasting scalars.
pub trait IntoPixel<T: Sample, const N: usize> {
    fn into_pixel(self) -> Pixel<T, N>;
}

impl<S: Sample, T: Sample, const N: usize> IntoPixel<T, N> for S {
    fn into_pixel(self) -> Pixel<T, N> {
        Pixel::splat(self.cast())
    }
}

impl<S: Sample, T: Sample, const N: usize> IntoPixel<T, N> for Pixel<S, N> {
    fn into_pixel(self) -> Pixel<T, N> {
        self.cast()
    }
}
