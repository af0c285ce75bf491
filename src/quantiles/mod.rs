//! Quantile and quartile estimators
//!
//! # Algorithms
//!
//! - [`PSquareQuantile`]: five-marker P² estimate of a single quantile
//! - [`DensityQuartile`]: interpolation in a density histogram
//! - [`CumulativeQuartile`]: interpolation in a cumulative distribution
//!
//! The histogram-based estimators are memoized: a value is computed on the
//! first read after an observation and returned unchanged until the next
//! one. [`QuartileAccumulator`] builds the upstream histogram a method needs
//! and feeds it alongside the estimator.
//!
//! # Example
//!
//! ```
//! use rollstats::quantiles::{Quartile, QuartileAccumulator, QuartileMethod};
//! use rollstats::traits::Accumulator;
//!
//! let method = QuartileMethod::CumulativeDistribution { num_cells: 20 };
//! let mut q3 = QuartileAccumulator::new(Quartile::Third, method).unwrap();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0] {
//!     q3.observe(value);
//! }
//! // Not enough samples for 21 markers yet
//! assert!(q3.value().is_err());
//! ```

mod cumulative_quartile;
mod density_quartile;
mod psquare;
mod quartile;

pub use cumulative_quartile::CumulativeQuartile;
pub use density_quartile::DensityQuartile;
pub use psquare::PSquareQuantile;
pub use quartile::{Quartile, QuartileAccumulator, QuartileMethod};
