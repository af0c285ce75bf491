//! Histogram density estimator
//!
//! The first `cache_size` samples are cached. Once the cache is full,
//! `num_bins` equal-width bins are laid out between the smallest and the
//! largest cached sample, framed by an underflow and an overflow bin, and
//! the cached samples are counted into them. Every later sample lands in the
//! bin whose lower bound is the greatest one not exceeding it.

use crate::error::{InvalidState, Result};
use crate::traits::{Accumulator, Bin, DensityHistogram};

#[cfg(feature = "std")]
use std::{format, vec::Vec};

#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

/// Density estimate as a histogram of relative frequencies
///
/// # Example
///
/// ```
/// use rollstats::histogram::DensityEstimator;
/// use rollstats::traits::{Accumulator, DensityHistogram};
///
/// let mut density = DensityEstimator::new(4, 2).unwrap();
/// for value in [0.0, 1.0, 2.0, 4.0] {
///     density.observe(value);
/// }
///
/// let bins = density.density();
/// assert_eq!(bins.len(), 4);
/// let total: f64 = bins.iter().map(|b| b.weight).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct DensityEstimator {
    cache_size: usize,
    num_bins: usize,
    /// First `cache_size` samples, used to lay out the bins
    cache: Vec<f64>,
    /// Lower bound of each bin, `num_bins + 2` entries once laid out
    bin_positions: Vec<f64>,
    /// Samples counted per bin
    samples_in_bin: Vec<u64>,
    count: u64,
}

impl DensityEstimator {
    /// Create an estimator caching `cache_size` samples before laying out
    /// `num_bins` regular bins
    pub fn new(cache_size: usize, num_bins: usize) -> Result<Self> {
        if cache_size == 0 {
            return Err(InvalidState::InvalidParameter {
                name: "cache_size",
                value: format!("{}", cache_size),
            });
        }
        if num_bins == 0 {
            return Err(InvalidState::InvalidParameter {
                name: "num_bins",
                value: format!("{}", num_bins),
            });
        }
        Ok(Self {
            cache_size,
            num_bins,
            cache: Vec::with_capacity(cache_size),
            bin_positions: Vec::new(),
            samples_in_bin: Vec::new(),
            count: 0,
        })
    }

    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Check if the bins have been laid out
    pub fn is_ready(&self) -> bool {
        !self.bin_positions.is_empty()
    }

    /// Add a sample
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        if self.is_ready() {
            let bin = self.bin_of(value);
            self.samples_in_bin[bin] += 1;
            return;
        }

        self.cache.push(value);
        if self.cache.len() == self.cache_size {
            self.lay_out_bins();
        }
    }

    /// Bin index for `value`: underflow, overflow, or the regular bin whose
    /// lower bound is the last one not above `value`
    fn bin_of(&self, value: f64) -> usize {
        let overflow = self.num_bins + 1;
        if value < self.bin_positions[1] {
            0
        } else if value >= self.bin_positions[overflow] {
            overflow
        } else {
            // NaN compares false everywhere and falls to the underflow bin
            self.bin_positions
                .partition_point(|&p| p <= value)
                .saturating_sub(1)
        }
    }

    fn lay_out_bins(&mut self) {
        let (minimum, maximum) = self
            .cache
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let bin_size = (maximum - minimum) / self.num_bins as f64;

        self.bin_positions = (0..self.num_bins + 2)
            .map(|i| minimum + (i as f64 - 1.0) * bin_size)
            .collect();
        self.samples_in_bin.clear();
        self.samples_in_bin.resize(self.num_bins + 2, 0);

        for i in 0..self.cache.len() {
            let bin = self.bin_of(self.cache[i]);
            self.samples_in_bin[bin] += 1;
        }

        tracing::debug!(
            minimum,
            maximum,
            bin_size,
            num_bins = self.num_bins,
            "density bins laid out"
        );
    }
}

impl DensityHistogram for DensityEstimator {
    fn count(&self) -> u64 {
        self.count
    }

    fn density(&self) -> Vec<Bin> {
        if !self.is_ready() {
            return Vec::new();
        }
        let count = self.count as f64;
        self.bin_positions
            .iter()
            .zip(&self.samples_in_bin)
            .map(|(&position, &n)| Bin::new(position, n as f64 / count))
            .collect()
    }
}

impl Accumulator for DensityEstimator {
    type Sample = f64;

    fn observe(&mut self, sample: f64) {
        self.add(sample);
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.bin_positions.clear();
        self.samples_in_bin.clear();
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + (self.cache.capacity() + self.bin_positions.capacity()) * core::mem::size_of::<f64>()
            + self.samples_in_bin.capacity() * core::mem::size_of::<u64>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
