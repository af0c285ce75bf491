//! P² single-quantile estimator
//!
//! Jain & Chlamtac's P² algorithm: five markers track the minimum, the
//! quantiles p/2, p, (1+p)/2 and the maximum. Memory is constant and every
//! sample costs O(1).

use crate::error::{InvalidState, Result};
use crate::histogram::adjust_marker;
use crate::math;
use crate::traits::Accumulator;

#[cfg(feature = "std")]
use std::format;

#[cfg(not(feature = "std"))]
use alloc::format;

const MARKERS: usize = 5;

/// Online estimate of the `p`-quantile
///
/// # Example
///
/// ```
/// use rollstats::quantiles::PSquareQuantile;
/// use rollstats::traits::Accumulator;
///
/// let mut q1 = PSquareQuantile::new(0.25).unwrap();
/// for i in 1..=1000 {
///     q1.observe(i as f64);
/// }
///
/// let estimate = q1.value().unwrap();
/// assert!((estimate - 250.0).abs() < 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct PSquareQuantile {
    probability: f64,
    heights: [f64; MARKERS],
    actual_positions: [f64; MARKERS],
    desired_positions: [f64; MARKERS],
    positions_increments: [f64; MARKERS],
    count: u64,
}

impl PSquareQuantile {
    /// Create an estimator for the quantile at `probability`, strictly
    /// between 0 and 1
    pub fn new(probability: f64) -> Result<Self> {
        if !(probability > 0.0 && probability < 1.0) {
            return Err(InvalidState::InvalidParameter {
                name: "probability",
                value: format!("{}", probability),
            });
        }
        let p = probability;
        Ok(Self {
            probability,
            heights: [0.0; MARKERS],
            actual_positions: [1.0, 2.0, 3.0, 4.0, 5.0],
            desired_positions: Self::initial_desired(p),
            positions_increments: [0.0, p / 2.0, p, (1.0 + p) / 2.0, 1.0],
            count: 0,
        })
    }

    fn initial_desired(p: f64) -> [f64; MARKERS] {
        [1.0, 1.0 + 2.0 * p, 1.0 + 4.0 * p, 3.0 + 2.0 * p, 5.0]
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Add a sample
    pub fn add(&mut self, value: f64) {
        self.count += 1;

        if self.count <= MARKERS as u64 {
            self.heights[self.count as usize - 1] = value;
            if self.count == MARKERS as u64 {
                self.heights.sort_by(|a, b| a.total_cmp(b));
                tracing::debug!(p = self.probability, "p-square quantile markers initialised");
            }
            return;
        }

        let last = MARKERS - 1;
        let sample_cell = if value < self.heights[0] {
            self.heights[0] = value;
            1
        } else if self.heights[last] <= value {
            self.heights[last] = value;
            last
        } else {
            self.heights.partition_point(|&h| h <= value).max(1)
        };

        for position in &mut self.actual_positions[sample_cell..] {
            *position += 1.0;
        }
        for (desired, increment) in self
            .desired_positions
            .iter_mut()
            .zip(&self.positions_increments)
        {
            *desired += increment;
        }
        for i in 1..last {
            adjust_marker(
                &mut self.heights,
                &mut self.actual_positions,
                self.desired_positions[i],
                i,
            );
        }
    }

    /// Current estimate
    ///
    /// `None` before the first sample. While fewer than five samples have
    /// been seen the estimate interpolates between the sorted samples.
    pub fn value(&self) -> Option<f64> {
        let n = self.count as usize;
        if n == 0 {
            return None;
        }
        if n >= MARKERS {
            return Some(self.heights[2]);
        }

        let mut sorted = [0.0; MARKERS];
        sorted[..n].copy_from_slice(&self.heights[..n]);
        sorted[..n].sort_by(|a, b| a.total_cmp(b));

        let rank = self.probability * (n - 1) as f64;
        let lo = math::floor(rank) as usize;
        if lo + 1 >= n {
            return Some(sorted[lo]);
        }
        let frac = rank - lo as f64;
        Some(sorted[lo] + frac * (sorted[lo + 1] - sorted[lo]))
    }
}

impl Accumulator for PSquareQuantile {
    type Sample = f64;

    fn observe(&mut self, sample: f64) {
        self.add(sample);
    }

    fn clear(&mut self) {
        self.heights = [0.0; MARKERS];
        self.actual_positions = [1.0, 2.0, 3.0, 4.0, 5.0];
        self.desired_positions = Self::initial_desired(self.probability);
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
