//! Quartile estimate from a density histogram
//!
//! The bins are scanned in position order, accumulating
//! `weight * count` until the running sum reaches half the stream. The result
//! interpolates between the last accumulated bin and its successor by the
//! overshoot of the sum.

use crate::error::{InvalidState, Result};
use crate::traits::DensityHistogram;

const TARGET: f64 = 0.5;

/// Memoized quartile over a [`DensityHistogram`]
///
/// The estimate is recomputed on the first [`value`](Self::value) after an
/// observation and cached until the next one.
///
/// # Example
///
/// ```
/// use rollstats::histogram::DensityEstimator;
/// use rollstats::quantiles::DensityQuartile;
/// use rollstats::traits::Accumulator;
///
/// let mut density = DensityEstimator::new(8, 4).unwrap();
/// let mut quartile = DensityQuartile::new();
/// for i in 0..100 {
///     let x = (i % 10) as f64;
///     density.observe(x);
///     quartile.observe(x);
/// }
///
/// let estimate = quartile.value(&density).unwrap();
/// assert!(estimate.is_finite());
/// ```
#[derive(Clone, Debug)]
pub struct DensityQuartile {
    /// Initial value of the running sum
    seed: f64,
    dirty: bool,
    cached: f64,
}

impl DensityQuartile {
    /// Create an estimator whose running sum starts at zero
    pub fn new() -> Self {
        Self::seeded(0.0)
    }

    /// Create an estimator whose running sum starts at `sample`
    ///
    /// Reproduces estimators constructed alongside their first sample.
    pub fn seeded(sample: f64) -> Self {
        Self {
            seed: sample / 1.0,
            dirty: true,
            cached: 0.0,
        }
    }

    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Check if the next [`value`](Self::value) recomputes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Invalidate the cached estimate
    pub fn observe(&mut self, _sample: f64) {
        self.dirty = true;
    }

    /// Forget the cached estimate, keeping the seed
    pub fn clear(&mut self) {
        self.dirty = true;
        self.cached = 0.0;
    }

    /// Current estimate, recomputed from `histogram` when dirty
    ///
    /// A failed computation caches nothing and the estimator stays dirty.
    pub fn value<H: DensityHistogram>(&mut self, histogram: &H) -> Result<f64> {
        if !self.dirty {
            return Ok(self.cached);
        }
        let result = self.interpolate(histogram)?;
        tracing::trace!(result, "density quartile recomputed");
        self.cached = result;
        self.dirty = false;
        Ok(result)
    }

    fn interpolate<H: DensityHistogram>(&self, histogram: &H) -> Result<f64> {
        let count = histogram.count();
        if count == 0 {
            return Err(InvalidState::EmptyStream);
        }
        let bins = histogram.density();
        if bins.len() < 2 {
            return Err(InvalidState::TooFewBins {
                required: 2,
                found: bins.len(),
            });
        }

        let count = count as f64;
        let target = TARGET * count;
        let mut sum = self.seed;
        let mut last = None;
        for (i, bin) in bins.iter().enumerate() {
            if sum >= target {
                break;
            }
            sum += bin.weight * count;
            last = Some(i);
        }

        let i = last.ok_or(InvalidState::NoPrecedingBin { sum, target })?;
        if sum < target {
            return Err(InvalidState::TargetNotReached { target });
        }
        let next = bins
            .get(i + 1)
            .ok_or(InvalidState::MissingSuccessor { index: i })?;

        let over = (sum - target) / (bins[i].weight * count);
        Ok(bins[i].position * over + next.position * (1.0 - over))
    }
}

impl Default for DensityQuartile {
    fn default() -> Self {
        Self::new()
    }
}
