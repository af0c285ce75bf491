//! Rolling-window accumulators
//!
//! This module provides accumulators over the last N samples of a stream.
//!
//! # Types
//!
//! - [`RollingBuffer`]: the last N samples in insertion order
//! - [`SortedRollingWindow`]: the last N samples in ascending order
//! - [`RollingMax`] / [`RollingMin`]: extremum of the last N samples, lazy or
//!   immediate (see [`Strategy`])
//!
//! # Example
//!
//! ```
//! use rollstats::window::{RollingMin, SortedRollingWindow};
//!
//! let mut window = SortedRollingWindow::new(3).unwrap();
//! let mut min = RollingMin::lazy(3).unwrap();
//!
//! for value in [1, 3, 5, 7, 6, 7, 1] {
//!     window.insert(value);
//!     min.observe(value);
//! }
//!
//! assert_eq!(window.snapshot().to_vec(), vec![1, 6, 7]);
//! assert_eq!(min.value(), 1);
//! ```

mod buffer;
mod extremum;
mod sorted;

pub use buffer::RollingBuffer;
pub use extremum::{Direction, Max, Min, RollingExtremum, RollingMax, RollingMin, Strategy};
pub use sorted::{Snapshot, SortedRollingWindow};
