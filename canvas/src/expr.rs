//! Lazily evaluated per-pixel expressions.
//!
//! Views, scalars and [`Pixel`] constants are the leaves of an expression; the nodes in this
//! module combine them. Building an expression does not touch any sample. It is only evaluated
//! when assigned into a view, which visits every coordinate of the view and evaluates the
//! expression there.
//!
//! ```
//! use planebuf::expr::{self, BorderMode};
//! use planebuf::format::PixelFormat;
//! use planebuf::layout::Builder;
//! use planebuf::Image;
//!
//! let layout = Builder::new(4, 4).pixel_format(PixelFormat::Grayscale).build()?;
//! let image = Image::<u8>::new(layout);
//! let view = image.view();
//!
//! view.assign(3);
//! view.assign(expr::max(view * 2 - 1, 0));
//! assert_eq!(view.at(0, 0, 0), 5);
//!
//! let blurred = Image::<f32>::from_expr(
//!     layout,
//!     expr::convolve_x(expr::border(view, BorderMode::Mirror), [0.25f32, 0.5, 0.25]),
//! );
//! assert_eq!(blurred.view().at(3, 3, 0), 5.0);
//! # Ok::<(), planebuf::layout::LayoutError>(())
//! ```
pub mod binary;
mod border;
mod convolve;
mod ops;
mod resize;
mod select;
mod shift;
pub mod unary;

use crate::pixel::Pixel;

pub use self::binary::{Binary, BinaryOperator};
pub use self::border::Border;
pub use self::convolve::{Convolve, Direction};
pub use self::resize::{CropRect, Resize, ResizeAlignment};
pub use self::select::Select;
pub use self::shift::Shift;
pub use self::unary::{Unary, UnaryOperator};
pub use crate::border::BorderMode;
pub use crate::interpolate::{Bicubic, Bilinear, Interpolator, Nearest};

/// A coordinate at which an expression can be evaluated.
pub trait Position: Copy {
    fn x(self) -> i32;
    fn y(self) -> i32;
    /// The same position, moved to another column and row.
    fn moved(self, x: i32, y: i32) -> Self;
}

/// A column and row. Evaluating a multi-plane leaf here yields a whole [`Pixel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Xy {
    pub x: i32,
    pub y: i32,
}

/// A column, row and plane. Every leaf yields a single sample here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Xyn {
    pub x: i32,
    pub y: i32,
    pub n: usize,
}

/// Something that can be evaluated per pixel.
pub trait Expression<P: Position> {
    type Output;

    fn evaluate(&self, at: P) -> Self::Output;
}

/// The dimensions of an expression, for nodes that address coordinates relative to them.
pub trait Extent {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

impl Position for Xy {
    fn x(self) -> i32 {
        self.x
    }

    fn y(self) -> i32 {
        self.y
    }

    fn moved(self, x: i32, y: i32) -> Self {
        Xy { x, y }
    }
}

impl Position for Xyn {
    fn x(self) -> i32 {
        self.x
    }

    fn y(self) -> i32 {
        self.y
    }

    fn moved(self, x: i32, y: i32) -> Self {
        Xyn { x, y, ..self }
    }
}

impl<P: Position, E: Expression<P> + ?Sized> Expression<P> for &'_ E {
    type Output = E::Output;

    fn evaluate(&self, at: P) -> E::Output {
        (**self).evaluate(at)
    }
}

impl<E: Extent + ?Sized> Extent for &'_ E {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }
}

macro_rules! scalar_leaf {
    ($($ty:ty),*) => {
        $(impl<P: Position> Expression<P> for $ty {
            type Output = $ty;

            fn evaluate(&self, _: P) -> $ty {
                *self
            }
        })*
    };
}

scalar_leaf!(bool, i8, u8, i16, u16, i32, u32, f32, f64);

/// A pixel constant is the same at every column and row.
impl<T: Copy, const N: usize> Expression<Xy> for Pixel<T, N> {
    type Output = Pixel<T, N>;

    fn evaluate(&self, _: Xy) -> Self {
        *self
    }
}

/// Evaluated per plane, a pixel constant yields the sample of that plane.
impl<T: Copy, const N: usize> Expression<Xyn> for Pixel<T, N> {
    type Output = T;

    fn evaluate(&self, at: Xyn) -> T {
        self.0[at.n]
    }
}

/// Apply `op` to the values of `lhs` and `rhs`.
pub fn binary<L, R, Op>(lhs: L, rhs: R, op: Op) -> Binary<L, R, Op> {
    Binary::new(lhs, rhs, op)
}

/// Apply `op` to the values of `expr`.
pub fn unary<E, Op>(expr: E, op: Op) -> Unary<E, Op> {
    Unary::new(expr, op)
}

/// One, where `lhs == rhs`, zero elsewhere.
pub fn eq<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Eq> {
    Binary::new(lhs, rhs, binary::Eq)
}

pub fn lt<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Lt> {
    Binary::new(lhs, rhs, binary::Lt)
}

pub fn le<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Le> {
    Binary::new(lhs, rhs, binary::Le)
}

pub fn gt<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Gt> {
    Binary::new(lhs, rhs, binary::Gt)
}

pub fn ge<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Ge> {
    Binary::new(lhs, rhs, binary::Ge)
}

/// Logical conjunction of the truth of both operands.
pub fn and<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::And> {
    Binary::new(lhs, rhs, binary::And)
}

/// Logical disjunction of the truth of both operands.
pub fn or<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Or> {
    Binary::new(lhs, rhs, binary::Or)
}

pub fn min<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Min> {
    Binary::new(lhs, rhs, binary::Min)
}

pub fn max<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Max> {
    Binary::new(lhs, rhs, binary::Max)
}

/// `lhs` to the power of `rhs`. Integer operands compute in `f64`.
pub fn pow<L, R>(lhs: L, rhs: R) -> Binary<L, R, binary::Pow> {
    Binary::new(lhs, rhs, binary::Pow)
}

pub fn abs<E>(expr: E) -> Unary<E, unary::Abs> {
    Unary::new(expr, unary::Abs)
}

/// Convert every value to `U`, truncating like an `as` conversion.
pub fn cast<U, E>(expr: E) -> Unary<E, unary::Cast<U>> {
    Unary::new(expr, unary::Cast::new())
}

/// The `f32` reciprocal of every value.
pub fn inv<E>(expr: E) -> Unary<E, unary::Inv> {
    Unary::new(expr, unary::Inv)
}

/// Look every value up in `table`.
///
/// Evaluating a value that is not an index of the table panics.
pub fn lut<E, U>(expr: E, table: &[U]) -> Unary<E, unary::Lut<'_, U>> {
    Unary::new(expr, unary::Lut::new(table))
}

/// Round every value to the nearest `i32`, halfway cases away from zero.
pub fn lround<E>(expr: E) -> Unary<E, unary::Lround> {
    Unary::new(expr, unary::Lround)
}

/// Clamp every value into `[min, max]`, keeping its type.
pub fn saturate<E, S>(expr: E, min: S, max: S) -> Unary<E, unary::Saturate<S>> {
    Unary::new(expr, unary::Saturate::new(min, max))
}

/// The `i32` sign of every value.
pub fn sign<E>(expr: E) -> Unary<E, unary::Sign> {
    Unary::new(expr, unary::Sign)
}

pub fn sqrt<E>(expr: E) -> Unary<E, unary::Sqrt> {
    Unary::new(expr, unary::Sqrt)
}

pub fn square<E>(expr: E) -> Unary<E, unary::Square> {
    Unary::new(expr, unary::Square)
}

/// Extend `expr` beyond its extent.
pub fn border<E>(expr: E, mode: BorderMode) -> Border<E> {
    Border::new(expr, mode)
}

/// Convolve along rows with an odd-sized kernel centered on each column.
pub fn convolve_x<E, K, const N: usize>(expr: E, kernel: [K; N]) -> Convolve<E, K, N> {
    Convolve::new(expr, kernel, Direction::Horizontal)
}

/// Convolve along columns with an odd-sized kernel centered on each row.
pub fn convolve_y<E, K, const N: usize>(expr: E, kernel: [K; N]) -> Convolve<E, K, N> {
    Convolve::new(expr, kernel, Direction::Vertical)
}

/// Evaluate `then` where `cond` is true, `otherwise` elsewhere.
///
/// Only the chosen branch is evaluated.
pub fn select<C, A, B>(cond: C, then: A, otherwise: B) -> Select<C, A, B> {
    Select::new(cond, then, otherwise)
}

/// Resample `expr` to `width` by `height` with bilinear interpolation.
pub fn resize<E: Extent>(
    expr: E,
    width: i32,
    height: i32,
    alignment: ResizeAlignment,
) -> Resize<E, Bilinear> {
    Resize::aligned(expr, Bilinear, width, height, alignment)
}

/// Resample `expr` to `width` by `height` with the given interpolator.
pub fn resize_with<E: Extent, I>(
    expr: E,
    interpolator: I,
    width: i32,
    height: i32,
    alignment: ResizeAlignment,
) -> Resize<E, I> {
    Resize::aligned(expr, interpolator, width, height, alignment)
}

/// Resample the `crop` region of `expr`, given in normalized coordinates, to `width` by `height`.
pub fn resize_crop<E: Extent, I>(
    expr: E,
    interpolator: I,
    width: i32,
    height: i32,
    crop: CropRect,
) -> Resize<E, I> {
    Resize::new(expr, interpolator, width, height, crop)
}

/// Evaluate `expr` at `(x + dx, y + dy)`.
pub fn shift<E>(expr: E, dx: i32, dy: i32) -> Shift<E> {
    Shift::new(expr, dx, dy)
}
