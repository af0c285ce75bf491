//! Quartile estimate from a cumulative-distribution histogram
//!
//! Finds the first bin whose cumulative fraction reaches one half and
//! interpolates between that bin and its successor by how far the fraction
//! overshoots, relative to the step from the previous bin.

use crate::error::{InvalidState, Result};
use crate::traits::CumulativeHistogram;

const TARGET: f64 = 0.5;

/// Memoized quartile over a [`CumulativeHistogram`]
///
/// # Example
///
/// ```
/// use rollstats::histogram::PSquareCumulative;
/// use rollstats::quantiles::CumulativeQuartile;
/// use rollstats::traits::Accumulator;
///
/// let mut cdf = PSquareCumulative::new(10).unwrap();
/// let mut quartile = CumulativeQuartile::new();
/// for i in 0..1000 {
///     let x = ((i * 37) % 100) as f64;
///     cdf.observe(x);
///     quartile.observe(x);
/// }
///
/// let estimate = quartile.value(&cdf).unwrap();
/// assert!(estimate > 0.0 && estimate < 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct CumulativeQuartile {
    dirty: bool,
    cached: f64,
}

impl CumulativeQuartile {
    pub fn new() -> Self {
        Self {
            dirty: true,
            cached: 0.0,
        }
    }

    /// Check if the next [`value`](Self::value) recomputes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Invalidate the cached estimate
    pub fn observe(&mut self, _sample: f64) {
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Current estimate, recomputed from `histogram` when dirty
    ///
    /// A failed computation caches nothing and the estimator stays dirty.
    pub fn value<H: CumulativeHistogram>(&mut self, histogram: &H) -> Result<f64> {
        if !self.dirty {
            return Ok(self.cached);
        }
        let result = Self::interpolate(histogram)?;
        tracing::trace!(result, "cumulative quartile recomputed");
        self.cached = result;
        self.dirty = false;
        Ok(result)
    }

    fn interpolate<H: CumulativeHistogram>(histogram: &H) -> Result<f64> {
        let bins = histogram.cumulative_distribution();
        if bins.len() < 2 {
            return Err(InvalidState::TooFewBins {
                required: 2,
                found: bins.len(),
            });
        }

        let mut crossing = None;
        for (i, bin) in bins.iter().enumerate() {
            if i > 0 && bin.weight < bins[i - 1].weight {
                return Err(InvalidState::NonMonotonic { index: i });
            }
            if bin.weight >= TARGET {
                crossing = Some(i);
                break;
            }
        }

        let it = crossing.ok_or(InvalidState::TargetNotReached { target: TARGET })?;
        if it == 0 {
            return Err(InvalidState::MissingPredecessor { index: it });
        }
        let next = bins
            .get(it + 1)
            .ok_or(InvalidState::MissingSuccessor { index: it })?;

        let (prev, at) = (&bins[it - 1], &bins[it]);
        let over = (at.weight - TARGET) / (at.weight - prev.weight);
        Ok(at.position * over + next.position * (1.0 - over))
    }
}

impl Default for CumulativeQuartile {
    fn default() -> Self {
        Self::new()
    }
}
