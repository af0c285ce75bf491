//! Quartile accumulator wiring an estimator to its upstream histogram
//!
//! [`QuartileAccumulator`] owns the histogram chosen by [`QuartileMethod`]
//! together with the estimator reading it, so callers feed one accumulator
//! and pull one value.

use crate::error::{InvalidState, Result};
use crate::histogram::{DensityEstimator, PSquareCumulative};
use crate::quantiles::{CumulativeQuartile, DensityQuartile, PSquareQuantile};
use crate::traits::Accumulator;

/// Which quartile to estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quartile {
    #[default]
    First,
    Third,
}

impl Quartile {
    /// Cumulative probability of the quartile
    pub fn probability(self) -> f64 {
        match self {
            Quartile::First => 0.25,
            Quartile::Third => 0.75,
        }
    }
}

/// How the quartile is estimated
///
/// The histogram methods search for the fixed one-half target in the
/// histogram they read, whichever [`Quartile`] is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuartileMethod {
    /// Five-marker P² estimate at the quartile's probability
    #[default]
    PSquare,
    /// Interpolation in a [`DensityEstimator`] histogram
    Density { cache_size: usize, num_bins: usize },
    /// Interpolation in a [`PSquareCumulative`] distribution
    CumulativeDistribution { num_cells: usize },
}

#[derive(Clone, Debug)]
enum Pipeline {
    PSquare(PSquareQuantile),
    Density {
        histogram: DensityEstimator,
        estimator: DensityQuartile,
    },
    Cumulative {
        histogram: PSquareCumulative,
        estimator: CumulativeQuartile,
    },
}

/// Streaming quartile estimate
///
/// # Example
///
/// ```
/// use rollstats::quantiles::{Quartile, QuartileAccumulator, QuartileMethod};
/// use rollstats::traits::Accumulator;
///
/// let method = QuartileMethod::Density { cache_size: 100, num_bins: 5 };
/// let mut q = QuartileAccumulator::new(Quartile::First, method).unwrap();
/// for i in 0..1000 {
///     q.observe((i % 100) as f64);
/// }
///
/// println!("estimate: {}", q.value().unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct QuartileAccumulator {
    quartile: Quartile,
    method: QuartileMethod,
    pipeline: Pipeline,
    count: u64,
}

impl QuartileAccumulator {
    /// Build the histogram and estimator for `method`
    pub fn new(quartile: Quartile, method: QuartileMethod) -> Result<Self> {
        Self::seeded(quartile, method, 0.0)
    }

    /// Like [`new`](Self::new), starting the density method's running sum
    /// at `sample`
    ///
    /// The seed has no effect on the other methods.
    pub fn seeded(quartile: Quartile, method: QuartileMethod, sample: f64) -> Result<Self> {
        let pipeline = match method {
            QuartileMethod::PSquare => {
                Pipeline::PSquare(PSquareQuantile::new(quartile.probability())?)
            }
            QuartileMethod::Density {
                cache_size,
                num_bins,
            } => Pipeline::Density {
                histogram: DensityEstimator::new(cache_size, num_bins)?,
                estimator: DensityQuartile::seeded(sample),
            },
            QuartileMethod::CumulativeDistribution { num_cells } => Pipeline::Cumulative {
                histogram: PSquareCumulative::new(num_cells)?,
                estimator: CumulativeQuartile::new(),
            },
        };
        tracing::debug!(?quartile, ?method, "quartile accumulator built");
        Ok(Self {
            quartile,
            method,
            pipeline,
            count: 0,
        })
    }

    pub fn quartile(&self) -> Quartile {
        self.quartile
    }

    pub fn method(&self) -> QuartileMethod {
        self.method
    }

    /// Current estimate
    ///
    /// Fails with [`InvalidState::EmptyStream`] before the first sample, or
    /// with the estimator's error while its histogram cannot be read.
    pub fn value(&mut self) -> Result<f64> {
        match &mut self.pipeline {
            Pipeline::PSquare(p2) => p2.value().ok_or(InvalidState::EmptyStream),
            Pipeline::Density {
                histogram,
                estimator,
            } => estimator.value(&*histogram),
            Pipeline::Cumulative {
                histogram,
                estimator,
            } => estimator.value(&*histogram),
        }
    }
}

impl Accumulator for QuartileAccumulator {
    type Sample = f64;

    fn observe(&mut self, sample: f64) {
        self.count += 1;
        match &mut self.pipeline {
            Pipeline::PSquare(p2) => p2.add(sample),
            Pipeline::Density {
                histogram,
                estimator,
            } => {
                histogram.add(sample);
                estimator.observe(sample);
            }
            Pipeline::Cumulative {
                histogram,
                estimator,
            } => {
                histogram.add(sample);
                estimator.observe(sample);
            }
        }
    }

    fn clear(&mut self) {
        match &mut self.pipeline {
            Pipeline::PSquare(p2) => p2.clear(),
            Pipeline::Density {
                histogram,
                estimator,
            } => {
                histogram.clear();
                estimator.clear();
            }
            Pipeline::Cumulative {
                histogram,
                estimator,
            } => {
                histogram.clear();
                estimator.clear();
            }
        }
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        let upstream = match &self.pipeline {
            Pipeline::PSquare(_) => 0,
            Pipeline::Density { histogram, .. } => {
                histogram.size_bytes() - core::mem::size_of::<DensityEstimator>()
            }
            Pipeline::Cumulative { histogram, .. } => {
                histogram.size_bytes() - core::mem::size_of::<PSquareCumulative>()
            }
        };
        core::mem::size_of::<Self>() + upstream
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_probability() {
        assert_eq!(Quartile::First.probability(), 0.25);
        assert_eq!(Quartile::Third.probability(), 0.75);
        assert_eq!(Quartile::default(), Quartile::First);
        assert_eq!(QuartileMethod::default(), QuartileMethod::PSquare);
    }

    #[test]
    fn test_psquare_method() {
        let mut first = QuartileAccumulator::new(Quartile::First, QuartileMethod::PSquare).unwrap();
        let mut third = QuartileAccumulator::new(Quartile::Third, QuartileMethod::PSquare).unwrap();
        assert_eq!(first.value(), Err(InvalidState::EmptyStream));

        for i in 0..10_000u64 {
            let v = ((i * 7_919) % 10_000) as f64;
            first.observe(v);
            third.observe(v);
        }
        assert!((first.value().unwrap() - 2_500.0).abs() < 150.0);
        assert!((third.value().unwrap() - 7_500.0).abs() < 150.0);
        assert_eq!(first.count(), 10_000);
    }

    #[test]
    fn test_density_method_matches_manual_wiring() {
        let method = QuartileMethod::Density {
            cache_size: 4,
            num_bins: 2,
        };
        let mut q = QuartileAccumulator::new(Quartile::First, method).unwrap();
        let mut histogram = DensityEstimator::new(4, 2).unwrap();
        let mut estimator = DensityQuartile::new();

        for v in [0.0, 1.0, 2.0, 4.0, 3.0, -1.0, 2.5] {
            q.observe(v);
            histogram.observe(v);
            estimator.observe(v);
        }
        let expected = estimator.value(&histogram).unwrap();
        assert_eq!(q.value().unwrap(), expected);
    }

    #[test]
    fn test_density_method_seed() {
        let method = QuartileMethod::Density {
            cache_size: 4,
            num_bins: 2,
        };
        let mut plain = QuartileAccumulator::new(Quartile::Third, method).unwrap();
        let mut seeded = QuartileAccumulator::seeded(Quartile::Third, method, 0.0).unwrap();
        for v in [0.0, 1.0, 2.0, 4.0] {
            plain.observe(v);
            seeded.observe(v);
        }
        // bins [(-2, 0), (0, .5), (2, .25), (4, .25)], target 2
        assert!(close(plain.value().unwrap(), 2.0));
        assert_eq!(plain.value(), seeded.value());

        let mut shifted = QuartileAccumulator::seeded(Quartile::Third, method, 1.0).unwrap();
        for v in [0.0, 1.0, 2.0, 4.0] {
            shifted.observe(v);
        }
        // 1 + 0 + 2 = 3 at bin 1, over = 1 / 2
        assert!(close(shifted.value().unwrap(), 1.0));
    }

    #[test]
    fn test_density_method_not_ready() {
        let method = QuartileMethod::Density {
            cache_size: 10,
            num_bins: 4,
        };
        let mut q = QuartileAccumulator::new(Quartile::First, method).unwrap();
        q.observe(1.0);
        assert_eq!(
            q.value(),
            Err(InvalidState::TooFewBins {
                required: 2,
                found: 0
            })
        );
    }

    #[test]
    fn test_cumulative_method() {
        let method = QuartileMethod::CumulativeDistribution { num_cells: 4 };
        let mut q = QuartileAccumulator::new(Quartile::First, method).unwrap();
        assert!(q.value().is_err());
        for v in [5.0, 1.0, 4.0, 2.0, 3.0] {
            q.observe(v);
        }
        assert!(close(q.value().unwrap(), 3.5));
        // Memoized between observations
        assert!(close(q.value().unwrap(), 3.5));
    }

    #[test]
    fn test_invalid_configuration() {
        let bad = [
            QuartileMethod::Density {
                cache_size: 0,
                num_bins: 2,
            },
            QuartileMethod::Density {
                cache_size: 2,
                num_bins: 0,
            },
            QuartileMethod::CumulativeDistribution { num_cells: 0 },
        ];
        for method in bad {
            assert!(matches!(
                QuartileAccumulator::new(Quartile::First, method),
                Err(InvalidState::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_clear() {
        let method = QuartileMethod::CumulativeDistribution { num_cells: 4 };
        let mut q = QuartileAccumulator::new(Quartile::Third, method).unwrap();
        for v in [5.0, 1.0, 4.0, 2.0, 3.0] {
            q.observe(v);
        }
        assert!(q.value().is_ok());

        q.clear();
        assert!(q.is_empty());
        assert!(q.value().is_err());
        assert_eq!(q.quartile(), Quartile::Third);
        assert_eq!(q.method(), method);
    }
}
