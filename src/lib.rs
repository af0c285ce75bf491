//! # Rollstats
//!
//! Streaming statistics accumulators for Rust.
//!
//! Rollstats provides incremental accumulators that are fed one sample at a
//! time and queried at any point: order statistics over a sliding window and
//! quartile estimates over an unbounded stream.
//!
//! ## Features
//!
//! - **Sorted Rolling Window**: the last N samples in ascending order
//! - **Rolling Extremes**: max and min of the last N samples, computed lazily
//!   on read or maintained on every sample
//! - **Histograms**: density histogram and P² cumulative distribution
//! - **Quartiles**: P², density-based and distribution-based estimates
//!
//! ## Quick Start
//!
//! ```rust
//! use rollstats::prelude::*;
//!
//! let mut max = RollingMax::new(3, Strategy::Immediate).unwrap();
//! for value in [1.0, 3.0, 5.0, 7.0, 6.0, 7.0, 1.0] {
//!     max.observe(value);
//! }
//! assert_eq!(max.value(), 7.0);
//!
//! let mut q1 = QuartileAccumulator::new(Quartile::First, QuartileMethod::PSquare).unwrap();
//! for i in 0..1000 {
//!     q1.observe(i as f64);
//! }
//! println!("first quartile: ~{}", q1.value().unwrap());
//! ```
//!
//! ## Composition
//!
//! The histogram-based estimators read an upstream histogram that the
//! caller owns and feeds. [`QuartileAccumulator`](quantiles::QuartileAccumulator)
//! does the wiring; it can also be done by hand:
//!
//! ```rust
//! use rollstats::histogram::DensityEstimator;
//! use rollstats::quantiles::DensityQuartile;
//! use rollstats::traits::Accumulator;
//!
//! let mut density = DensityEstimator::new(20, 5).unwrap();
//! let mut quartile = DensityQuartile::new();
//!
//! for i in 0..100 {
//!     let x = (i % 20) as f64;
//!     density.observe(x);
//!     quartile.observe(x);
//! }
//!
//! let estimate = quartile.value(&density).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! Accumulator families:
//! - `windows` (default): sorted rolling window, rolling max and min
//! - `quantiles` (default): histograms and quartile estimators
//! - `full`: Enable all accumulator families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits and errors always available
pub mod error;
pub mod traits;

#[cfg(feature = "quantiles")]
mod math;

#[cfg(feature = "windows")]
#[cfg_attr(docsrs, doc(cfg(feature = "windows")))]
pub mod window;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub mod histogram;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub mod quantiles;

pub mod prelude {
    pub use crate::error::{InvalidState, Result};
    pub use crate::traits::*;

    #[cfg(feature = "windows")]
    pub use crate::window::{RollingMax, RollingMin, SortedRollingWindow, Strategy};

    #[cfg(feature = "quantiles")]
    pub use crate::histogram::{DensityEstimator, PSquareCumulative};

    #[cfg(feature = "quantiles")]
    pub use crate::quantiles::{
        CumulativeQuartile, DensityQuartile, PSquareQuantile, Quartile, QuartileAccumulator,
        QuartileMethod,
    };
}

pub use error::InvalidState;

#[cfg(feature = "windows")]
pub use window::{RollingMax, RollingMin, SortedRollingWindow};

#[cfg(feature = "quantiles")]
pub use quantiles::QuartileAccumulator;
