//! Border policies and materialized borders.
//!
//! The same [`BorderMode`] decides what lies beyond the edge of an image, whether evaluated lazily
//! by [`expr::border`](crate::expr::border) or written into the padding of a layout by
//! [`update_borders`].
use core::{fmt, str::FromStr};

use crate::format::ParseFormatError;
use crate::image::Image;
use crate::layout::{Builder, LayoutError};
use crate::sample::Element;
use crate::view::{ImageView, PlaneView};

/// What an image holds beyond its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// Zero everywhere outside.
    #[default]
    Constant,
    /// The closest edge sample.
    Nearest,
    /// Reflected about the edge sample, which is not repeated: `c b | a b c | b a`.
    Mirror,
    /// Reflected about the edge itself, repeating the edge sample: `b a | a b c | c b`.
    Reflect,
}

impl BorderMode {
    /// The index in `[0, n)` whose value index `i` takes, or `None` if it is zero.
    ///
    /// Indices are folded once; anything still outside after that is clamped.
    pub fn remap(self, i: i32, n: i32) -> Option<i32> {
        if (0..n).contains(&i) {
            return Some(i);
        }

        let folded = match self {
            BorderMode::Constant => return None,
            BorderMode::Nearest => i,
            BorderMode::Mirror if i < 0 => -i,
            BorderMode::Mirror => 2 * n - i - 2,
            BorderMode::Reflect if i < 0 => -i - 1,
            BorderMode::Reflect => 2 * n - i - 1,
        };

        Some(folded.min(n - 1).max(0))
    }

    pub fn name(self) -> &'static str {
        match self {
            BorderMode::Constant => "constant",
            BorderMode::Nearest => "nearest",
            BorderMode::Mirror => "mirror",
            BorderMode::Reflect => "reflect",
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BorderMode {
    type Err = ParseFormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [
            BorderMode::Constant,
            BorderMode::Nearest,
            BorderMode::Mirror,
            BorderMode::Reflect,
        ]
        .into_iter()
        .find(|mode| mode.name() == name)
        .ok_or_else(|| ParseFormatError::new(name))
    }
}

/// Copy `view` into a new image with a border of `border` pixels and fill that border.
pub fn make_borders<T: Element>(
    view: &ImageView<'_, T>,
    border: i32,
    mode: BorderMode,
) -> Result<Image<T>, LayoutError> {
    let layout = Builder::from_layout(view.layout()).border(border).build()?;
    let image = Image::new(layout);
    let target = image.view();
    target.assign(*view);
    update_borders(&target, mode);
    Ok(image)
}

/// Rewrite the border of every plane from the samples inside it.
///
/// Each plane has `border >> subsample` pixels of padding on all four sides. The sides are filled
/// before the corners.
pub fn update_borders<T: Element>(view: &ImageView<'_, T>, mode: BorderMode) {
    for plane in view.planes() {
        update_plane_border(&plane, plane.border(), mode);
    }
}

fn update_plane_border<T: Element>(plane: &PlaneView<'_, T>, b: i32, mode: BorderMode) {
    if b <= 0 {
        return;
    }

    let (w, h) = (plane.width(), plane.height());
    // Columns and rows of each region, as half-open ranges.
    let regions = [
        ((-b, 0), (0, h)),
        ((w, w + b), (0, h)),
        ((0, w), (-b, 0)),
        ((0, w), (h, h + b)),
        ((-b, 0), (-b, 0)),
        ((w, w + b), (-b, 0)),
        ((-b, 0), (h, h + b)),
        ((w, w + b), (h, h + b)),
    ];

    for ((x0, x1), (y0, y1)) in regions {
        for y in y0..y1 {
            for x in x0..x1 {
                let value = match (mode.remap(x, w), mode.remap(y, h)) {
                    (Some(sx), Some(sy)) => plane.at(sx, sy),
                    _ => T::ZERO,
                };
                plane.set(x, y, value);
            }
        }
    }
}
