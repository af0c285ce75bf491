//! Histogram estimators
//!
//! Upstream accumulators whose histograms feed the quartile estimators in
//! [`quantiles`](crate::quantiles).
//!
//! # Algorithms
//!
//! - [`DensityEstimator`]: relative frequencies over equal-width bins laid
//!   out from a cache of the first samples
//! - [`PSquareCumulative`]: P² estimate of the cumulative distribution
//!
//! # Example
//!
//! ```
//! use rollstats::histogram::PSquareCumulative;
//! use rollstats::traits::{Accumulator, CumulativeHistogram};
//!
//! let mut cdf = PSquareCumulative::new(10).unwrap();
//! for i in 0..1000 {
//!     cdf.observe((i % 100) as f64);
//! }
//!
//! for bin in cdf.cumulative_distribution() {
//!     println!("P(X <= {:.1}) ~ {:.2}", bin.position, bin.weight);
//! }
//! ```

mod cumulative;
mod density;

pub use cumulative::PSquareCumulative;
pub(crate) use cumulative::adjust_marker;
pub use density::DensityEstimator;
