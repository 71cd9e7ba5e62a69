use core::ops::{Index, IndexMut};

use crate::sample::Sample;

/// A fixed number of co-located samples, one per plane.
///
/// Pixels are the values of [`PixelView`](crate::PixelView) expressions, and constants that
/// broadcast one sample per plane into whole-image expressions.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Pixel<T, const N: usize>(pub [T; N]);

impl<T: Sample, const N: usize> Pixel<T, N> {
    /// A pixel with every sample set to `value`.
    pub fn splat(value: T) -> Self {
        Pixel([value; N])
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Pixel<U, N> {
        Pixel(self.0.map(f))
    }

    pub fn cast<U: Sample>(self) -> Pixel<U, N> {
        self.map(T::cast)
    }

    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

impl<T: Sample, const N: usize> Default for Pixel<T, N> {
    fn default() -> Self {
        Pixel([T::ZERO; N])
    }
}

impl<T, const N: usize> From<[T; N]> for Pixel<T, N> {
    fn from(samples: [T; N]) -> Self {
        Pixel(samples)
    }
}

impl<T, const N: usize> Index<usize> for Pixel<T, N> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.0[idx]
    }
}

impl<T, const N: usize> IndexMut<usize> for Pixel<T, N> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.0[idx]
    }
}
