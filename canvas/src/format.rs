//! Layout kinds and pixel formats.
use core::{fmt, str::FromStr};

/// How the planes of an image are packed into its buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LayoutKind {
    /// Planes, strides and offsets are supplied by the caller.
    Custom,
    /// Each plane is stored one after another, at full resolution.
    #[default]
    Planar,
    /// All planes share one row, samples of a pixel are adjacent.
    Interleaved,
    /// A full-resolution luma plane followed by two half-resolution chroma planes.
    Yuv420,
    /// A full-resolution luma plane followed by one interleaved half-resolution chroma plane.
    Nv12,
}

/// The semantics of the samples of a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    #[default]
    Custom,
    Grayscale,
    GrayAlpha,
    Rgb,
    Rgba,
    Yuv,
    /// `R G` over `G B`.
    BayerRggb,
    /// `B G` over `G R`.
    BayerBggr,
    /// `G R` over `B G`.
    BayerGrbg,
    /// `G B` over `R G`.
    BayerGbrg,
    QuadBayerRggb,
    QuadBayerBggr,
    QuadBayerGrbg,
    QuadBayerGbrg,
}

/// One of the four sample sites of a Bayer mosaic tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BayerColor {
    Red,
    /// The green sample on the red row.
    GreenRed,
    /// The green sample on the blue row.
    GreenBlue,
    Blue,
}

impl BayerColor {
    /// All colors, in the plane order of a planar Bayer view.
    pub const ALL: [BayerColor; 4] = [
        BayerColor::Red,
        BayerColor::GreenRed,
        BayerColor::GreenBlue,
        BayerColor::Blue,
    ];
}

/// The error returned when parsing a layout kind or pixel format from an unknown name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFormatError {
    name: String,
}

impl LayoutKind {
    pub fn is_yuv(self) -> bool {
        matches!(self, LayoutKind::Yuv420 | LayoutKind::Nv12)
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Custom => "custom",
            LayoutKind::Planar => "planar",
            LayoutKind::Interleaved => "interleaved",
            LayoutKind::Yuv420 => "yuv_420",
            LayoutKind::Nv12 => "nv12",
        }
    }
}

impl PixelFormat {
    /// The number of planes this format prescribes, or `0` when unconstrained.
    pub fn num_planes(self) -> i32 {
        use PixelFormat::*;
        match self {
            Custom => 0,
            Grayscale => 1,
            GrayAlpha => 2,
            Rgb | Yuv => 3,
            Rgba => 4,
            BayerRggb | BayerBggr | BayerGrbg | BayerGbrg => 1,
            QuadBayerRggb | QuadBayerBggr | QuadBayerGrbg | QuadBayerGbrg => 1,
        }
    }

    pub fn is_bayer(self) -> bool {
        use PixelFormat::*;
        matches!(self, BayerRggb | BayerBggr | BayerGrbg | BayerGbrg)
    }

    pub fn is_quad_bayer(self) -> bool {
        use PixelFormat::*;
        matches!(
            self,
            QuadBayerRggb | QuadBayerBggr | QuadBayerGrbg | QuadBayerGbrg
        )
    }

    /// The position of `color` within the 2×2 tile, if this is a Bayer format.
    pub fn bayer_offset(self, color: BayerColor) -> Option<(i32, i32)> {
        use BayerColor::*;
        use PixelFormat::*;
        let (red_left, red_top) = match self {
            BayerRggb => (true, true),
            BayerBggr => (false, false),
            BayerGrbg => (false, true),
            BayerGbrg => (true, false),
            _ => return None,
        };
        // Red shares its column with green-blue, and its row with green-red.
        let x = match color {
            Red | GreenBlue => i32::from(!red_left),
            GreenRed | Blue => i32::from(red_left),
        };
        let y = match color {
            Red | GreenRed => i32::from(!red_top),
            GreenBlue | Blue => i32::from(red_top),
        };
        Some((x, y))
    }

    pub fn name(self) -> &'static str {
        use PixelFormat::*;
        match self {
            Custom => "custom",
            Grayscale => "grayscale",
            GrayAlpha => "gray_alpha",
            Rgb => "rgb",
            Rgba => "rgba",
            Yuv => "yuv",
            BayerRggb => "bayer_rggb",
            BayerBggr => "bayer_bggr",
            BayerGrbg => "bayer_grbg",
            BayerGbrg => "bayer_gbrg",
            QuadBayerRggb => "quadbayer_rggb",
            QuadBayerBggr => "quadbayer_bggr",
            QuadBayerGrbg => "quadbayer_grbg",
            QuadBayerGbrg => "quadbayer_gbrg",
        }
    }

    const ALL: [PixelFormat; 14] = {
        use PixelFormat::*;
        [
            Custom,
            Grayscale,
            GrayAlpha,
            Rgb,
            Rgba,
            Yuv,
            BayerRggb,
            BayerBggr,
            BayerGrbg,
            BayerGbrg,
            QuadBayerRggb,
            QuadBayerBggr,
            QuadBayerGrbg,
            QuadBayerGbrg,
        ]
    };
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = ParseFormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [
            LayoutKind::Custom,
            LayoutKind::Planar,
            LayoutKind::Interleaved,
            LayoutKind::Yuv420,
            LayoutKind::Nv12,
        ]
        .into_iter()
        .find(|kind| kind.name() == name)
        .ok_or_else(|| ParseFormatError::new(name))
    }
}

impl FromStr for PixelFormat {
    type Err = ParseFormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| ParseFormatError::new(name))
    }
}

impl ParseFormatError {
    pub(crate) fn new(name: &str) -> Self {
        ParseFormatError { name: name.into() }
    }
}

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown format name `{}`", self.name)
    }
}

impl std::error::Error for ParseFormatError {}
