//! Histograms of sample values.
use crate::sample::Sample;

/// `size` bins of equal width covering `[from, to]`.
///
/// For integer samples the range is widened by one so that `to` gets a bin of the same width as
/// every other value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegularAxis<T> {
    size: usize,
    from: T,
    to: T,
    delta: f64,
}

/// Counts of samples per bin of a [`RegularAxis`], with bins for values below and above it.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram<T> {
    axis: RegularAxis<T>,
    underflow: u64,
    bins: Vec<u64>,
    overflow: u64,
}

impl<T: Sample> RegularAxis<T> {
    pub fn new(size: usize, from: T, to: T) -> Self {
        let eps = if T::IS_FLOAT { 0.0 } else { 1.0 };
        RegularAxis {
            size,
            from,
            to,
            delta: to.to_f64() - from.to_f64() + eps,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }

    /// The bin of `value`: `-1` below the axis, `size` above it.
    pub fn index(&self, value: T) -> isize {
        let size = self.size as isize;
        if value < self.from {
            return -1;
        }

        if value == self.to {
            return size - 1;
        }

        if value > self.to {
            return size;
        }

        let t = (value.to_f64() - self.from.to_f64()) / self.delta;
        ((t * self.size as f64) as isize).min(size - 1)
    }

    /// The lower edge of bin `index`.
    pub fn lower(&self, index: usize) -> f64 {
        self.from.to_f64() + index as f64 * self.delta / self.size as f64
    }

    /// The upper edge of bin `index`.
    pub fn upper(&self, index: usize) -> f64 {
        self.lower(index + 1)
    }

    pub fn center(&self, index: usize) -> f64 {
        0.5 * (self.lower(index) + self.upper(index))
    }
}

impl<T: Sample> Histogram<T> {
    pub fn new(axis: RegularAxis<T>) -> Self {
        Histogram {
            axis,
            underflow: 0,
            bins: vec![0; axis.size],
            overflow: 0,
        }
    }

    pub fn axis(&self) -> &RegularAxis<T> {
        &self.axis
    }

    /// Count one sample.
    pub fn fill(&mut self, value: T) {
        match usize::try_from(self.axis.index(value)) {
            Err(_) => self.underflow += 1,
            Ok(index) => match self.bins.get_mut(index) {
                Some(count) => *count += 1,
                None => self.overflow += 1,
            },
        }
    }

    /// The count of bin `index`, zero for indices off the axis.
    pub fn count(&self, index: usize) -> u64 {
        self.bins.get(index).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u64] {
        &self.bins
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// All counted samples, including those off the axis.
    pub fn total_count(&self) -> u64 {
        self.underflow + self.bins.iter().sum::<u64>() + self.overflow
    }

    /// The mean of the samples on the axis, each taken at the center of its bin.
    pub fn mean(&self) -> f64 {
        let (sum, count) = self
            .bins
            .iter()
            .enumerate()
            .fold((0.0, 0u64), |(sum, count), (index, &n)| {
                (sum + self.axis.center(index) * n as f64, count + n)
            });

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}
