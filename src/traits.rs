//! Core traits for streaming accumulators
//!
//! Every accumulator implements the base [`Accumulator`] trait. Windowed
//! accumulators are generic over a [`Sample`] domain; the quartile
//! estimators pull their input from an upstream [`DensityHistogram`] or
//! [`CumulativeHistogram`].

use core::cmp::Ordering;
use core::fmt::Debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Numeric domain of a sample
///
/// Provides the domain extremes used as empty-window sentinels and a total
/// order, so windows keep working when floats carry NaN or signed zeros.
pub trait Sample: Copy + PartialOrd + Debug {
    /// Smallest representable value (`-MAX` for floats)
    const MIN_VALUE: Self;
    /// Largest representable value
    const MAX_VALUE: Self;

    /// Total ordering over the domain
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_sample_int {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;

                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

macro_rules! impl_sample_float {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const MIN_VALUE: Self = <$t>::MIN;
                const MAX_VALUE: Self = <$t>::MAX;

                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }
            }
        )*
    };
}

impl_sample_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_sample_float!(f32, f64);

/// Core trait for all accumulators
///
/// Accumulators are fed by a single writer; there is no merge operation.
pub trait Accumulator: Clone + Debug {
    /// The type of sample this accumulator consumes
    type Sample;

    /// Feed one sample
    fn observe(&mut self, sample: Self::Sample);

    /// Reset to the freshly constructed state, keeping configuration
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of samples observed
    fn count(&self) -> u64;

    /// Check if no sample has been observed
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// One histogram bin: a position on the sample axis and a frequency
///
/// For a density histogram `weight` is the relative frequency of the bin;
/// for a cumulative histogram it is the fraction of samples at or below
/// `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bin {
    pub position: f64,
    pub weight: f64,
}

impl Bin {
    pub fn new(position: f64, weight: f64) -> Self {
        Self { position, weight }
    }
}

/// Source of a density histogram
pub trait DensityHistogram {
    /// Total number of samples behind the histogram
    fn count(&self) -> u64;

    /// Bins ordered by position, relative frequencies summing to 1
    ///
    /// Empty while the source cannot produce a histogram yet.
    fn density(&self) -> Vec<Bin>;
}

/// Source of a cumulative-distribution histogram
pub trait CumulativeHistogram {
    /// Bins ordered by position, cumulative fractions non-decreasing and
    /// reaching 1 at the last bin
    ///
    /// Empty while the source cannot produce a histogram yet.
    fn cumulative_distribution(&self) -> Vec<Bin>;
}

impl<H: DensityHistogram + ?Sized> DensityHistogram for &H {
    fn count(&self) -> u64 {
        (**self).count()
    }

    fn density(&self) -> Vec<Bin> {
        (**self).density()
    }
}

impl<H: CumulativeHistogram + ?Sized> CumulativeHistogram for &H {
    fn cumulative_distribution(&self) -> Vec<Bin> {
        (**self).cumulative_distribution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_extremes() {
        assert_eq!(<i32 as Sample>::MIN_VALUE, i32::MIN);
        assert_eq!(<u8 as Sample>::MAX_VALUE, u8::MAX);
        assert_eq!(<f64 as Sample>::MIN_VALUE, -f64::MAX);
        assert_eq!(<f32 as Sample>::MAX_VALUE, f32::MAX);
    }

    #[test]
    fn test_float_total_order() {
        assert_eq!(Sample::total_cmp(&-0.0_f64, &0.0), Ordering::Less);
        assert_eq!(Sample::total_cmp(&1.0_f64, &f64::NAN), Ordering::Less);
        assert_eq!(Sample::total_cmp(&3_i64, &3), Ordering::Equal);
    }
}
