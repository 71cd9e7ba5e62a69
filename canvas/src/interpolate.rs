//! Sampling an expression at fractional coordinates.
//!
//! Interpolators are handed coordinates that already lie within the extent of the expression, so
//! every neighbour they read is clamped to the last row and column rather than bordered.
use crate::expr::{Expression, Extent, Position};
use crate::sample::{Lanes, Sample};

/// Produces a value of `E` between its integer coordinates.
pub trait Interpolator<P: Position, E: Expression<P>> {
    type Output;

    /// Sample `expr` at `(x, y)`, with `at` carrying any plane index.
    fn interpolate(&self, expr: &E, at: P, x: f32, y: f32) -> Self::Output;
}

/// Takes the closest sample, keeping the sample type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Nearest;

/// Linear in both directions, computing in `f32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bilinear;

/// Catmull-Rom splines over a 4×4 neighbourhood, computing in `f32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bicubic;

type Real<E, P> = <<E as Expression<P>>::Output as Lanes>::Map<f32>;

impl<P: Position, E: Expression<P> + Extent> Interpolator<P, E> for Nearest {
    type Output = E::Output;

    fn interpolate(&self, expr: &E, at: P, x: f32, y: f32) -> E::Output {
        let x = (libm::roundf(x) as i32).min(expr.width() - 1);
        let y = (libm::roundf(y) as i32).min(expr.height() - 1);
        expr.evaluate(at.moved(x, y))
    }
}

impl<P, E> Interpolator<P, E> for Bilinear
where
    P: Position,
    E: Expression<P> + Extent,
    E::Output: Lanes,
{
    type Output = Real<E, P>;

    fn interpolate(&self, expr: &E, at: P, x: f32, y: f32) -> Self::Output {
        let (x1, y1) = (x as i32, y as i32);
        let x2 = (x1 + 1).min(expr.width() - 1);
        let y2 = (y1 + 1).min(expr.height() - 1);
        let (tx, ty) = (x - x1 as f32, y - y1 as f32);

        let sample = |x, y| expr.evaluate(at.moved(x, y)).map(Sample::to_f32);
        let top = lerp(sample(x1, y1), sample(x2, y1), tx);
        let bottom = lerp(sample(x1, y2), sample(x2, y2), tx);
        lerp(top, bottom, ty)
    }
}

impl<P, E> Interpolator<P, E> for Bicubic
where
    P: Position,
    E: Expression<P> + Extent,
    E::Output: Lanes,
{
    type Output = Real<E, P>;

    fn interpolate(&self, expr: &E, at: P, x: f32, y: f32) -> Self::Output {
        let (x1, y1) = (x as i32, y as i32);
        let (tx, ty) = (x - x1 as f32, y - y1 as f32);
        let (width, height) = (expr.width(), expr.height());

        let columns: [i32; 4] = core::array::from_fn(|i| (x1 + i as i32 - 1).clamp(0, width - 1));
        let rows: [i32; 4] = core::array::from_fn(|j| (y1 + j as i32 - 1).clamp(0, height - 1));

        let rows = rows.map(|y| {
            let taps = columns.map(|x| expr.evaluate(at.moved(x, y)).map(Sample::to_f32));
            catmull_rom(taps, tx)
        });

        catmull_rom(rows, ty)
    }
}

fn lerp<L: Lanes<Elem = f32>>(a: L, b: L, t: f32) -> L {
    a.combine(b, |a, b| a + t * (b - a))
}

/// The spline through `p[1]` and `p[2]`, evaluated at `t` in `[0, 1]`.
fn catmull_rom<L: Lanes<Elem = f32>>(p: [L; 4], t: f32) -> L {
    let (t2, t3) = (t * t, t * t * t);
    let weights = [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2) + 1.0,
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ];

    p.iter()
        .zip(weights)
        .fold(L::splat(0.0), |acc, (&p, w)| acc.combine(p, |acc, p| acc + w * p))
}
