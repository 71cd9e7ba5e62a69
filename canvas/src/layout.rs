//! Computes the memory layout of multi-plane images.
//!
//! A [`LayoutDescriptor`] is fully resolved: it knows, for each plane, how far into the buffer
//! the first sample is and how far apart neighbouring samples are. It is produced by a
//! [`Builder`] which validates a declarative request and derives all of these values.
use core::fmt;

use crate::format::{BayerColor, LayoutKind, PixelFormat};
use crate::sample::Sample;

/// The maximum number of planes of an image.
pub const MAX_NUM_PLANES: usize = 4;
/// Alignment of the row length, in samples, unless requested otherwise.
pub const DEFAULT_WIDTH_ALIGNMENT: i32 = 1;
/// Alignment of the number of rows, unless requested otherwise.
pub const DEFAULT_HEIGHT_ALIGNMENT: i32 = 1;
/// Alignment of the total buffer length, in samples, unless requested otherwise.
pub const DEFAULT_SIZE_ALIGNMENT: i32 = 1;

/// Where the samples of one plane live in the buffer.
///
/// All distances are counted in samples, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaneDescriptor {
    /// Position of the plane in its image.
    pub index: usize,
    /// Power of two by which the plane is smaller than the image, in both directions.
    pub subsample: i32,
    /// Position of the sample at coordinate `(0, 0)`.
    pub offset: i64,
    /// Distance between vertically adjacent samples.
    pub row_stride: i64,
    /// Distance between horizontally adjacent samples.
    pub pixel_stride: i64,
}

/// The resolved layout of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutDescriptor {
    kind: LayoutKind,
    format: PixelFormat,
    precision: i32,
    width: i32,
    height: i32,
    num_planes: i32,
    width_alignment: i32,
    height_alignment: i32,
    size_alignment: i32,
    border: i32,
    planes: [PlaneDescriptor; MAX_NUM_PLANES],
}

/// Declarative construction of a [`LayoutDescriptor`].
///
/// ```
/// use planebuf::format::{LayoutKind, PixelFormat};
/// use planebuf::layout::Builder;
///
/// let layout = Builder::new(16, 32)
///     .layout_kind(LayoutKind::Nv12)
///     .width_alignment(8)
///     .build()?;
///
/// assert_eq!(layout.pixel_format(), PixelFormat::Yuv);
/// assert_eq!(layout.required_buffer_size(), 768);
/// # Ok::<(), planebuf::layout::LayoutError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    layout: LayoutDescriptor,
    explicit_offsets: [bool; MAX_NUM_PLANES],
    bad_plane: Option<usize>,
}

/// A rectangle in image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// An error when constructing or reinterpreting a layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutError {
    kind: LayoutErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum LayoutErrorKind {
    Dimensions {
        width: i32,
        height: i32,
        num_planes: i32,
    },
    Border(i32),
    Alignment(&'static str, i32),
    TooManyPlanes(i32),
    YuvPlanes(i32),
    PlaneIndex(usize),
    SizeChanged {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    NotPlanar(LayoutKind),
    Roi(Rect),
    BufferTooSmall {
        required: usize,
        len: usize,
    },
    NotBayer(PixelFormat),
    PlaneCount {
        expected: usize,
        actual: usize,
    },
    Subsampled(usize),
}

impl PlaneDescriptor {
    const UNSET: Self = PlaneDescriptor {
        index: 0,
        subsample: 0,
        offset: 0,
        row_stride: 0,
        pixel_stride: 1,
    };

    /// Index of the sample at `(x, y)`, relative to the start of the buffer.
    pub fn sample_index(&self, x: i32, y: i32) -> i64 {
        self.offset + i64::from(y) * self.row_stride + i64::from(x) * self.pixel_stride
    }
}

impl Default for PlaneDescriptor {
    fn default() -> Self {
        PlaneDescriptor::UNSET
    }
}

impl LayoutDescriptor {
    /// The layout of an image without any samples.
    pub const EMPTY: Self = LayoutDescriptor {
        kind: LayoutKind::Planar,
        format: PixelFormat::Custom,
        precision: 0,
        width: 0,
        height: 0,
        num_planes: 0,
        width_alignment: DEFAULT_WIDTH_ALIGNMENT,
        height_alignment: DEFAULT_HEIGHT_ALIGNMENT,
        size_alignment: DEFAULT_SIZE_ALIGNMENT,
        border: 0,
        planes: [PlaneDescriptor::UNSET; MAX_NUM_PLANES],
    };

    pub fn layout_kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// Number of significant bits per sample, `0` for the full range of the element type.
    pub fn pixel_precision(&self) -> i32 {
        self.precision
    }

    /// Change the precision, without touching any sample.
    pub fn set_pixel_precision(&mut self, precision: i32) {
        self.precision = precision;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn num_planes(&self) -> usize {
        self.num_planes.max(0) as usize
    }

    pub fn width_alignment(&self) -> i32 {
        self.width_alignment
    }

    pub fn height_alignment(&self) -> i32 {
        self.height_alignment
    }

    pub fn size_alignment(&self) -> i32 {
        self.size_alignment
    }

    pub fn border(&self) -> i32 {
        self.border
    }

    /// The descriptors of all planes of the image.
    pub fn planes(&self) -> &[PlaneDescriptor] {
        &self.planes[..self.num_planes()]
    }

    pub fn plane(&self, index: usize) -> Option<&PlaneDescriptor> {
        self.planes().get(index)
    }

    /// The largest subsample of any plane.
    pub fn max_subsample(&self) -> i32 {
        self.planes().iter().map(|p| p.subsample).max().unwrap_or(0)
    }

    /// Width of a plane with the given subsample, rounded up.
    pub fn plane_width(&self, subsample: i32) -> i32 {
        (self.width + (1 << subsample) - 1) >> subsample
    }

    /// Height of a plane with the given subsample, rounded up.
    pub fn plane_height(&self, subsample: i32) -> i32 {
        (self.height + (1 << subsample) - 1) >> subsample
    }

    /// The largest value representable with the pixel precision in `T`.
    ///
    /// Floating point images are assumed to be normalized, their saturation is always one.
    pub fn saturation_value<T: Sample>(&self) -> T {
        if T::IS_FLOAT {
            return T::ONE;
        }

        if self.precision <= 0 || self.precision as u32 > T::BITS {
            return T::MAX;
        }

        T::from_i64((1i64 << self.precision) - 1)
    }

    /// The number of samples a buffer needs to store an image of this layout.
    pub fn required_buffer_size(&self) -> usize {
        let total_width = i64::from(self.width) + 2 * i64::from(self.border);
        let total_height = i64::from(self.height) + 2 * i64::from(self.border);
        let (wa, ha) = (
            i64::from(self.width_alignment),
            i64::from(self.height_alignment),
        );
        let num_planes = i64::from(self.num_planes);

        let size = match self.kind {
            LayoutKind::Planar => {
                num_planes * align_dimension(total_width, wa) * align_dimension(total_height, ha)
            }
            LayoutKind::Interleaved => {
                align_dimension(num_planes * total_width, wa) * align_dimension(total_height, ha)
            }
            LayoutKind::Yuv420 => {
                let luma = align_subsampled(total_width, wa, 0, 1);
                let chroma = align_subsampled(total_width, wa, 1, 1);
                (luma + chroma) * align_subsampled(total_height, ha, 0, 1)
            }
            LayoutKind::Nv12 => {
                let width = align_subsampled(total_width, wa, 0, 1);
                (width + (width >> 1)) * align_subsampled(total_height, ha, 0, 1)
            }
            LayoutKind::Custom => {
                let max_subsample = self.max_subsample();
                self.planes()
                    .iter()
                    .map(|plane| {
                        align_subsampled(total_width, wa, plane.subsample, max_subsample)
                            * align_subsampled(total_height, ha, plane.subsample, max_subsample)
                    })
                    .sum()
            }
        };

        align_dimension(size, i64::from(self.size_alignment)).max(0) as usize
    }

    /// One past the largest sample index any plane addresses, border included.
    ///
    /// This is at most the required buffer size for a layout fresh from a [`Builder`], but custom
    /// strides or a region of interest may address differently.
    pub fn buffer_extent(&self) -> usize {
        let border = self.border;
        self.planes()
            .iter()
            .map(|plane| {
                let b = border >> plane.subsample;
                let last_x = self.plane_width(plane.subsample) + b - 1;
                let last_y = self.plane_height(plane.subsample) + b - 1;
                let corners = [(-b, -b), (last_x, -b), (-b, last_y), (last_x, last_y)];
                corners
                    .iter()
                    .map(|&(x, y)| plane.sample_index(x, y) + 1)
                    .max()
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0)
            .max(0) as usize
    }

    /// The layout of a region of this image, sharing its buffer.
    ///
    /// The region may extend into the border but not beyond it.
    pub fn roi(&self, roi: Rect) -> Result<Self, LayoutError> {
        let b = self.border;
        if roi.width <= 0
            || roi.height <= 0
            || roi.x < -b
            || roi.y < -b
            || roi.x + roi.width > self.width + b
            || roi.y + roi.height > self.height + b
        {
            return Err(LayoutError::new(LayoutErrorKind::Roi(roi)));
        }

        let mut layout = *self;
        layout.width = roi.width;
        layout.height = roi.height;
        let num_planes = self.num_planes();
        for plane in &mut layout.planes[..num_planes] {
            let x = roi.x >> plane.subsample;
            let y = roi.y >> plane.subsample;
            plane.offset = plane.sample_index(x, y);
        }

        Ok(layout)
    }

    /// A one-plane custom layout addressing a single plane of this image.
    pub(crate) fn single_plane(&self, index: usize) -> Result<Self, LayoutError> {
        let plane = *self
            .plane(index)
            .ok_or(LayoutError::new(LayoutErrorKind::PlaneIndex(index)))?;

        Builder::new(
            self.plane_width(plane.subsample),
            self.plane_height(plane.subsample),
        )
        .pixel_format(PixelFormat::Grayscale)
        .layout_kind(LayoutKind::Custom)
        .pixel_precision(self.precision)
        .border(self.border >> plane.subsample)
        .plane_strides(0, plane.row_stride, plane.pixel_stride)
        .plane_offset(0, plane.offset)
        .build()
    }

    /// The layout of one color of a Bayer mosaic, as a plane of half the width and height.
    pub(crate) fn bayer_plane(&self, color: BayerColor) -> Result<Self, LayoutError> {
        let (x, y) = self
            .format
            .bayer_offset(color)
            .ok_or(LayoutError::not_bayer(self.format))?;
        let mosaic = self.planes[0];

        Builder::new(self.width / 2, self.height / 2)
            .pixel_format(PixelFormat::Grayscale)
            .layout_kind(LayoutKind::Custom)
            .pixel_precision(self.precision)
            .border(self.border / 2)
            .plane_strides(0, 2 * mosaic.row_stride, 2 * mosaic.pixel_stride)
            .plane_offset(0, mosaic.sample_index(x, y))
            .build()
    }

    /// All four colors of a Bayer mosaic as the planes of one layout, in [`BayerColor::ALL`] order.
    pub(crate) fn bayer_planes(&self) -> Result<Self, LayoutError> {
        let mut planes = [PlaneDescriptor::UNSET; MAX_NUM_PLANES];
        let mut layout = Self::EMPTY;
        for (plane, color) in planes.iter_mut().zip(BayerColor::ALL) {
            layout = self.bayer_plane(color)?;
            *plane = layout.planes[0];
        }

        layout.format = PixelFormat::Custom;
        Ok(layout.with_planes(&planes))
    }

    /// Replace the descriptors of the first planes, for views over parts of a plane.
    pub(crate) fn with_planes(&self, planes: &[PlaneDescriptor]) -> Self {
        let mut layout = *self;
        let count = planes.len().min(MAX_NUM_PLANES);
        layout.planes[..count].copy_from_slice(&planes[..count]);
        for (index, plane) in layout.planes[..count].iter_mut().enumerate() {
            plane.index = index;
        }
        layout.num_planes = count as i32;
        layout
    }

    fn resolve_planes(&mut self, explicit: &[bool; MAX_NUM_PLANES]) -> Result<(), LayoutError> {
        for (index, plane) in self.planes.iter_mut().enumerate() {
            plane.index = index;
        }

        match self.kind {
            LayoutKind::Planar | LayoutKind::Interleaved => {
                self.planes.iter_mut().for_each(|p| p.subsample = 0);
            }
            LayoutKind::Yuv420 | LayoutKind::Nv12 => {
                if self.num_planes != 3 {
                    return Err(LayoutError::new(LayoutErrorKind::YuvPlanes(
                        self.num_planes,
                    )));
                }

                self.planes[0].subsample = 0;
                self.planes[1].subsample = 1;
                self.planes[2].subsample = 1;
            }
            // Keep the caller's values.
            LayoutKind::Custom => {}
        }

        // Strides set by the caller stay untouched.
        if self.planes[0].row_stride == 0 {
            self.compute_strides();
        }

        self.compute_offsets(explicit);
        Ok(())
    }

    fn compute_strides(&mut self) {
        let total_width = i64::from(self.width) + 2 * i64::from(self.border);
        let wa = i64::from(self.width_alignment);
        let num_planes = i64::from(self.num_planes);

        match self.kind {
            LayoutKind::Planar => {
                let row_stride = align_dimension(total_width, wa);
                for plane in &mut self.planes {
                    plane.row_stride = row_stride;
                    plane.pixel_stride = 1;
                }
            }
            LayoutKind::Interleaved => {
                let row_stride = align_dimension(num_planes * total_width, wa);
                for plane in &mut self.planes {
                    plane.row_stride = row_stride;
                    plane.pixel_stride = num_planes;
                }
            }
            LayoutKind::Yuv420 => {
                let luma = align_subsampled(total_width, wa, 0, 1);
                let chroma = align_subsampled(total_width, wa, 1, 1);
                self.planes[0].row_stride = luma;
                self.planes[1].row_stride = chroma;
                self.planes[2].row_stride = chroma;
                self.planes[..3].iter_mut().for_each(|p| p.pixel_stride = 1);
            }
            LayoutKind::Nv12 => {
                let row_stride = align_subsampled(total_width, wa, 0, 1);
                self.planes[..3].iter_mut().for_each(|p| p.row_stride = row_stride);
                self.planes[0].pixel_stride = 1;
                self.planes[1].pixel_stride = 2;
                self.planes[2].pixel_stride = 2;
            }
            LayoutKind::Custom => {
                let max_subsample = self.max_subsample();
                let num_planes = self.num_planes();
                for plane in &mut self.planes[..num_planes] {
                    plane.row_stride =
                        align_subsampled(total_width, wa, plane.subsample, max_subsample);
                    plane.pixel_stride = 1;
                }
            }
        }
    }

    fn compute_offsets(&mut self, explicit: &[bool; MAX_NUM_PLANES]) {
        let requested = self.planes;
        let total_height = i64::from(self.height) + 2 * i64::from(self.border);
        let ha = i64::from(self.height_alignment);
        let num_planes = self.num_planes();

        match self.kind {
            LayoutKind::Planar => {
                let rows = align_dimension(total_height, ha);
                for plane in &mut self.planes[..num_planes] {
                    plane.offset = plane.index as i64 * plane.row_stride * rows;
                }
            }
            LayoutKind::Interleaved => {
                for plane in &mut self.planes[..num_planes] {
                    plane.offset = plane.index as i64;
                }
            }
            LayoutKind::Yuv420 => {
                // Both chroma planes share the rows budgeted for the luma plane.
                let luma_rows = align_subsampled(total_height, ha, 0, 1);
                self.planes[0].offset = 0;
                self.planes[1].offset = self.planes[0].row_stride * luma_rows;
                self.planes[2].offset =
                    self.planes[1].offset + self.planes[1].row_stride * (luma_rows >> 1);
            }
            LayoutKind::Nv12 => {
                let luma_rows = align_subsampled(total_height, ha, 0, 1);
                let luma_size = self.planes[0].row_stride * luma_rows;
                self.planes[0].offset = 0;
                self.planes[1].offset = luma_size;
                self.planes[2].offset = luma_size + 1;
            }
            LayoutKind::Custom => {
                let max_subsample = self.max_subsample();
                let mut offset = 0;
                for plane in &mut self.planes[..num_planes] {
                    plane.offset = offset;
                    offset += plane.row_stride
                        * align_subsampled(total_height, ha, plane.subsample, max_subsample);
                }
            }
        }

        let border = self.border;
        for plane in &mut self.planes[..num_planes] {
            let b = i64::from(border >> plane.subsample);
            plane.offset += b * plane.row_stride + b * plane.pixel_stride;
        }

        // Offsets set by the caller stay untouched in custom layouts.
        let custom = self.kind == LayoutKind::Custom;
        for ((plane, request), &given) in self.planes.iter_mut().zip(requested).zip(explicit) {
            if custom && given {
                plane.offset = request.offset;
            }
        }
    }
}

impl Builder {
    /// Start a layout for an image of the given dimensions.
    ///
    /// The layout is planar with a custom pixel format and no planes until configured.
    pub fn new(width: i32, height: i32) -> Self {
        let mut layout = LayoutDescriptor::EMPTY;
        layout.width = width;
        layout.height = height;
        Builder {
            layout,
            explicit_offsets: [false; MAX_NUM_PLANES],
            bad_plane: None,
        }
    }

    /// Start from an existing layout.
    ///
    /// Strides are recomputed on build, unless the layout is custom.
    pub fn from_layout(layout: &LayoutDescriptor) -> Self {
        let mut builder = Builder {
            layout: *layout,
            explicit_offsets: [false; MAX_NUM_PLANES],
            bad_plane: None,
        };

        if layout.kind != LayoutKind::Custom {
            builder.invalidate_strides();
        }

        builder
    }

    /// Set the layout kind. YUV layouts force the YUV pixel format.
    pub fn layout_kind(mut self, kind: LayoutKind) -> Self {
        self.layout.kind = kind;
        if kind.is_yuv() {
            self = self.pixel_format(PixelFormat::Yuv);
        }
        self
    }

    /// Set the pixel format, which may force the number of planes and the layout kind.
    pub fn pixel_format(mut self, format: PixelFormat) -> Self {
        self.layout.format = format;

        let num_planes = format.num_planes();
        if num_planes > 0 {
            self.layout.num_planes = num_planes;
        }

        if format == PixelFormat::Grayscale || format.is_bayer() || format.is_quad_bayer() {
            self.layout.kind = LayoutKind::Planar;
        }

        self
    }

    pub fn pixel_precision(mut self, precision: i32) -> Self {
        self.layout.precision = precision;
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.layout.width = width;
        self.invalidate_strides();
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.layout.height = height;
        self
    }

    pub fn num_planes(mut self, num_planes: i32) -> Self {
        self.layout.num_planes = num_planes;
        self
    }

    pub fn width_alignment(mut self, alignment: i32) -> Self {
        self.layout.width_alignment = alignment;
        self
    }

    pub fn height_alignment(mut self, alignment: i32) -> Self {
        self.layout.height_alignment = alignment;
        self
    }

    pub fn size_alignment(mut self, alignment: i32) -> Self {
        self.layout.size_alignment = alignment;
        self
    }

    pub fn border(mut self, border: i32) -> Self {
        self.layout.border = border;
        self
    }

    /// Set the subsample of one plane, for custom layouts.
    pub fn plane_subsample(mut self, index: usize, subsample: i32) -> Self {
        match self.layout.planes.get_mut(index) {
            Some(plane) => plane.subsample = subsample,
            None => self.bad_plane = Some(index),
        }
        self
    }

    /// Set the strides of one plane, for custom layouts.
    pub fn plane_strides(mut self, index: usize, row_stride: i64, pixel_stride: i64) -> Self {
        match self.layout.planes.get_mut(index) {
            Some(plane) => {
                plane.row_stride = row_stride;
                plane.pixel_stride = pixel_stride;
            }
            None => self.bad_plane = Some(index),
        }
        self
    }

    /// Place the sample `(0, 0)` of one plane at `offset`, for custom layouts.
    ///
    /// The offset is taken as is, border included. Planes without one are still placed one
    /// after the other, as if no offset was given.
    pub fn plane_offset(mut self, index: usize, offset: i64) -> Self {
        match self.layout.planes.get_mut(index) {
            Some(plane) => {
                plane.offset = offset;
                self.explicit_offsets[index] = true;
            }
            None => self.bad_plane = Some(index),
        }
        self
    }

    /// Validate the request and resolve all planes.
    pub fn build(self) -> Result<LayoutDescriptor, LayoutError> {
        let mut layout = self.layout;

        if let Some(index) = self.bad_plane {
            return Err(LayoutError::new(LayoutErrorKind::PlaneIndex(index)));
        }

        if layout.width <= 0 || layout.height <= 0 || layout.num_planes <= 0 {
            return Err(LayoutError::new(LayoutErrorKind::Dimensions {
                width: layout.width,
                height: layout.height,
                num_planes: layout.num_planes,
            }));
        }

        if layout.border < 0 {
            return Err(LayoutError::new(LayoutErrorKind::Border(layout.border)));
        }

        for (name, alignment) in [
            ("width", layout.width_alignment),
            ("height", layout.height_alignment),
            ("size", layout.size_alignment),
        ] {
            if !is_power_of_two(alignment) {
                return Err(LayoutError::new(LayoutErrorKind::Alignment(name, alignment)));
            }
        }

        if layout.num_planes > MAX_NUM_PLANES as i32 {
            return Err(LayoutError::new(LayoutErrorKind::TooManyPlanes(
                layout.num_planes,
            )));
        }

        layout.resolve_planes(&self.explicit_offsets)?;
        Ok(layout)
    }

    fn invalidate_strides(&mut self) {
        for plane in &mut self.layout.planes {
            plane.row_stride = 0;
            plane.pixel_stride = 1;
        }
    }
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Round `size` up to a multiple of the power of two `alignment`.
pub fn align_dimension(size: i64, alignment: i64) -> i64 {
    round_up(size, alignment)
}

/// Align a dimension of a subsampled plane.
///
/// The full-resolution `size` is first made divisible by the coarsest subsample of the image so
/// that every plane covers the same area.
pub fn align_subsampled(size: i64, alignment: i64, subsample: i32, max_subsample: i32) -> i64 {
    round_up(round_up(size, 1 << max_subsample) >> subsample, alignment)
}

pub(crate) fn round_up(n: i64, multiple: i64) -> i64 {
    (n + multiple - 1) & -multiple
}

fn is_power_of_two(n: i32) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

impl LayoutError {
    fn new(kind: LayoutErrorKind) -> Self {
        LayoutError { kind }
    }

    pub(crate) fn size_changed(what: &'static str, expected: usize, actual: usize) -> Self {
        LayoutError::new(LayoutErrorKind::SizeChanged {
            what,
            expected,
            actual,
        })
    }

    pub(crate) fn not_planar(kind: LayoutKind) -> Self {
        LayoutError::new(LayoutErrorKind::NotPlanar(kind))
    }

    pub(crate) fn buffer_too_small(required: usize, len: usize) -> Self {
        LayoutError::new(LayoutErrorKind::BufferTooSmall { required, len })
    }

    pub(crate) fn not_bayer(format: PixelFormat) -> Self {
        LayoutError::new(LayoutErrorKind::NotBayer(format))
    }

    pub(crate) fn plane_count(expected: usize, actual: usize) -> Self {
        LayoutError::new(LayoutErrorKind::PlaneCount { expected, actual })
    }

    pub(crate) fn subsampled(plane: usize) -> Self {
        LayoutError::new(LayoutErrorKind::Subsampled(plane))
    }

    pub(crate) fn plane_index(index: usize) -> Self {
        LayoutError::new(LayoutErrorKind::PlaneIndex(index))
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LayoutErrorKind::Dimensions {
                width,
                height,
                num_planes,
            } => write!(
                f,
                "image dimensions (width={width}, height={height}, planes={num_planes}) must be strictly positive"
            ),
            LayoutErrorKind::Border(border) => {
                write!(f, "border ({border}) must not be negative")
            }
            LayoutErrorKind::Alignment(name, value) => {
                write!(f, "{name} alignment ({value}) must be a power of two")
            }
            LayoutErrorKind::TooManyPlanes(num) => {
                write!(f, "number of planes ({num}) exceeds {MAX_NUM_PLANES}")
            }
            LayoutErrorKind::YuvPlanes(num) => {
                write!(f, "yuv layouts need 3 planes, not {num}")
            }
            LayoutErrorKind::PlaneIndex(index) => {
                write!(f, "plane index {index} out of range")
            }
            LayoutErrorKind::SizeChanged {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{what} would change the buffer size from {expected} to {actual}"
            ),
            LayoutErrorKind::NotPlanar(kind) => {
                write!(f, "operation needs a planar layout, not {kind}")
            }
            LayoutErrorKind::Roi(roi) => write!(
                f,
                "region {}x{} at ({}, {}) is outside of the image",
                roi.width, roi.height, roi.x, roi.y
            ),
            LayoutErrorKind::BufferTooSmall { required, len } => {
                write!(f, "buffer of {len} samples is shorter than the {required} required")
            }
            LayoutErrorKind::NotBayer(format) => {
                write!(f, "pixel format {format} is not a bayer mosaic")
            }
            LayoutErrorKind::PlaneCount { expected, actual } => {
                write!(f, "expected {expected} planes, the layout has {actual}")
            }
            LayoutErrorKind::Subsampled(plane) => {
                write!(f, "plane {plane} is subsampled")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
