//! P² cumulative distribution estimator
//!
//! Tracks `num_cells + 1` markers whose heights approximate the quantiles
//! `i / num_cells` of the stream without storing samples (Jain & Chlamtac's
//! P² algorithm extended to many markers). Marker heights are moved with a
//! piecewise-parabolic prediction, or linearly when the parabola would leave
//! the bracket formed by the neighbouring markers.

use crate::error::{InvalidState, Result};
use crate::math;
use crate::traits::{Accumulator, Bin, CumulativeHistogram};

#[cfg(feature = "std")]
use std::{format, vec::Vec};

#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

/// Cumulative distribution estimate as `(height, fraction)` bins
///
/// The histogram is available once `num_cells + 1` samples have been
/// observed.
///
/// # Example
///
/// ```
/// use rollstats::histogram::PSquareCumulative;
/// use rollstats::traits::{Accumulator, CumulativeHistogram};
///
/// let mut cdf = PSquareCumulative::new(4).unwrap();
/// for value in [5.0, 1.0, 4.0, 2.0, 3.0] {
///     cdf.observe(value);
/// }
///
/// let bins = cdf.cumulative_distribution();
/// assert_eq!(bins.first().unwrap().position, 1.0);
/// assert_eq!(bins.last().unwrap().weight, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct PSquareCumulative {
    num_cells: usize,
    /// Marker heights, sorted once initialised
    heights: Vec<f64>,
    /// Marker positions in the sample ranking
    actual_positions: Vec<f64>,
    desired_positions: Vec<f64>,
    /// Per-sample drift of the desired positions
    positions_increments: Vec<f64>,
    count: u64,
}

impl PSquareCumulative {
    /// Create an estimator splitting the distribution into `num_cells` cells
    pub fn new(num_cells: usize) -> Result<Self> {
        if num_cells == 0 {
            return Err(InvalidState::InvalidParameter {
                name: "num_cells",
                value: format!("{}", num_cells),
            });
        }
        let markers = num_cells + 1;
        let b = num_cells as f64;
        Ok(Self {
            num_cells,
            heights: Vec::with_capacity(markers),
            actual_positions: (0..markers).map(|i| i as f64 + 1.0).collect(),
            desired_positions: (0..markers).map(|i| i as f64 + 1.0).collect(),
            positions_increments: (0..markers).map(|i| i as f64 / b).collect(),
            count: 0,
        })
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Check if every marker has a height
    pub fn is_ready(&self) -> bool {
        self.heights.len() == self.num_cells + 1
    }

    /// Add a sample
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        let b = self.num_cells;

        if !self.is_ready() {
            self.heights.push(value);
            if self.is_ready() {
                self.heights.sort_by(|x, y| x.total_cmp(y));
                tracing::debug!(markers = b + 1, "p-square cumulative markers initialised");
            }
            return;
        }

        // Find the cell holding the sample, stretching the extreme markers
        let sample_cell = if value < self.heights[0] {
            self.heights[0] = value;
            1
        } else if self.heights[b] <= value {
            self.heights[b] = value;
            b
        } else {
            self.heights.partition_point(|&h| h <= value).max(1)
        };

        for position in &mut self.actual_positions[sample_cell..] {
            *position += 1.0;
        }

        // The first marker always stays at position 1
        for i in 1..=b {
            self.desired_positions[i] += self.positions_increments[i];
        }

        for i in 1..b {
            adjust_marker(
                &mut self.heights,
                &mut self.actual_positions,
                self.desired_positions[i],
                i,
            );
        }
    }
}

/// Move interior P² marker `i` one step towards its desired position
///
/// Shared by the cumulative estimator and the single-quantile estimator.
pub(crate) fn adjust_marker(heights: &mut [f64], positions: &mut [f64], desired: f64, i: usize) {
    let n = &*positions;
    let h = &*heights;

    let d = desired - n[i];
    let dp = n[i + 1] - n[i];
    let dm = n[i - 1] - n[i];

    if !((d >= 1.0 && dp > 1.0) || (d <= -1.0 && dm < -1.0)) {
        return;
    }

    let hp = (h[i + 1] - h[i]) / dp;
    let hm = (h[i - 1] - h[i]) / dm;
    let sign = math::signum(d);

    let parabolic = h[i] + sign / (dp - dm) * ((sign - dm) * hp + (dp - sign) * hm);
    let height = if h[i - 1] < parabolic && parabolic < h[i + 1] {
        parabolic
    } else if d > 0.0 {
        h[i] + hp
    } else {
        h[i] - hm
    };

    heights[i] = height;
    positions[i] += sign;
}

impl CumulativeHistogram for PSquareCumulative {
    fn cumulative_distribution(&self) -> Vec<Bin> {
        if !self.is_ready() {
            return Vec::new();
        }
        let count = self.count as f64;
        self.heights
            .iter()
            .zip(&self.actual_positions)
            .map(|(&height, &position)| Bin::new(height, position / count))
            .collect()
    }
}

impl Accumulator for PSquareCumulative {
    type Sample = f64;

    fn observe(&mut self, sample: f64) {
        self.add(sample);
    }

    fn clear(&mut self) {
        self.heights.clear();
        let positions = self
            .actual_positions
            .iter_mut()
            .zip(self.desired_positions.iter_mut());
        for (i, (actual, desired)) in positions.enumerate() {
            *actual = i as f64 + 1.0;
            *desired = i as f64 + 1.0;
        }
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + (self.heights.capacity()
                + self.actual_positions.capacity()
                + self.desired_positions.capacity()
                + self.positions_increments.capacity())
                * core::mem::size_of::<f64>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
