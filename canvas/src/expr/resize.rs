use crate::expr::{Expression, Extent, Position};
use crate::interpolate::Interpolator;

/// How the corners of source and destination relate when resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeAlignment {
    /// The centers of the corner pixels coincide.
    #[default]
    Corners,
    /// The outer edges of the corner pixels coincide.
    Centers,
}

/// A region of the source in normalized coordinates, where `1.0` spans the distance between the
/// first and last column or row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Resamples an expression to new dimensions.
///
/// A destination coordinate `d` maps to `offset + d · scale` in the source, saturated to the
/// source extent, where the interpolator samples it.
#[derive(Clone, Copy, Debug)]
pub struct Resize<E, I> {
    expr: E,
    interpolator: I,
    width: i32,
    height: i32,
    offset_x: f32,
    offset_y: f32,
    scale_x: f32,
    scale_y: f32,
}

impl CropRect {
    /// The whole source.
    pub const FULL: CropRect = CropRect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        CropRect {
            x,
            y,
            width,
            height,
        }
    }

    /// The crop that maps destination pixel centers onto source pixel centers.
    fn centered(src: (i32, i32), dst: (i32, i32)) -> Self {
        let axis = |src: i32, dst: i32| {
            let pitch = if src > 1 { 1.0 / f64::from(src - 1) } else { 0.0 };
            let scale = f64::from(src) / f64::from(dst);
            let start = 0.5 * pitch * (scale - 1.0);
            let extent = f64::from(dst - 1) * pitch * scale;
            (start, extent)
        };

        let (x, width) = axis(src.0, dst.0);
        let (y, height) = axis(src.1, dst.1);
        CropRect::new(x, y, width, height)
    }
}

impl Default for CropRect {
    fn default() -> Self {
        CropRect::FULL
    }
}

impl<E: Extent, I> Resize<E, I> {
    pub fn new(expr: E, interpolator: I, width: i32, height: i32, crop: CropRect) -> Self {
        let (src_w, src_h) = (expr.width(), expr.height());
        let axis = |src: i32, dst: i32, start: f64, extent: f64| {
            let span = f64::from(src - 1);
            let scale = if dst > 1 {
                extent * span / f64::from(dst - 1)
            } else {
                0.0
            };
            ((start * span) as f32, scale as f32)
        };

        let (offset_x, scale_x) = axis(src_w, width, crop.x, crop.width);
        let (offset_y, scale_y) = axis(src_h, height, crop.y, crop.height);

        Resize {
            expr,
            interpolator,
            width,
            height,
            offset_x,
            offset_y,
            scale_x,
            scale_y,
        }
    }

    pub fn aligned(
        expr: E,
        interpolator: I,
        width: i32,
        height: i32,
        alignment: ResizeAlignment,
    ) -> Self {
        let crop = match alignment {
            ResizeAlignment::Corners => CropRect::FULL,
            ResizeAlignment::Centers => {
                CropRect::centered((expr.width(), expr.height()), (width, height))
            }
        };

        Resize::new(expr, interpolator, width, height, crop)
    }
}

impl<P, E, I> Expression<P> for Resize<E, I>
where
    P: Position,
    E: Expression<P> + Extent,
    I: Interpolator<P, E>,
{
    type Output = I::Output;

    #[inline]
    fn evaluate(&self, at: P) -> I::Output {
        let max_x = (self.expr.width() - 1) as f32;
        let max_y = (self.expr.height() - 1) as f32;
        let x = (self.offset_x + at.x() as f32 * self.scale_x).min(max_x).max(0.0);
        let y = (self.offset_y + at.y() as f32 * self.scale_y).min(max_y).max(0.0);
        self.interpolator.interpolate(&self.expr, at, x, y)
    }
}

impl<E, I> Extent for Resize<E, I> {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }
}
