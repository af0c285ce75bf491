//! Rolling maximum and minimum
//!
//! Two interchangeable strategies, picked at construction:
//!
//! - [`Strategy::Lazy`]: keep a plain [`RollingBuffer`] and scan it on every
//!   query, O(1) insert and O(N) query.
//! - [`Strategy::Immediate`]: keep a [`SortedRollingWindow`] and read its
//!   first or last element, O(log N) insert and O(log N) query.
//!
//! An empty window is not an error: the rolling max reports the smallest
//! value of the sample domain and the rolling min the largest.

use super::buffer::RollingBuffer;
use super::sorted::{Snapshot, SortedRollingWindow};
use crate::error::Result;
use crate::traits::{Accumulator, Sample};
use core::cmp::Ordering;
use core::marker::PhantomData;

/// How a rolling extremum is maintained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Scan the unsorted window when queried
    #[default]
    Lazy,
    /// Keep the window sorted on insertion
    Immediate,
}

/// Which end of the window an extremum reads
pub trait Direction: Clone + Copy + core::fmt::Debug + sealed::Sealed {
    /// Ordering a candidate must have against the current best to replace it
    const BETTER: Ordering;

    /// Value reported for an empty window
    fn sentinel<T: Sample>() -> T;

    /// Extremum of a sorted view
    fn pick<T: Sample>(snapshot: &Snapshot<'_, T>) -> Option<T>;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Max {}
    impl Sealed for super::Min {}
}

/// Marker for [`RollingMax`]
#[derive(Clone, Copy, Debug)]
pub struct Max;

/// Marker for [`RollingMin`]
#[derive(Clone, Copy, Debug)]
pub struct Min;

impl Direction for Max {
    const BETTER: Ordering = Ordering::Greater;

    #[inline]
    fn sentinel<T: Sample>() -> T {
        T::MIN_VALUE
    }

    #[inline]
    fn pick<T: Sample>(snapshot: &Snapshot<'_, T>) -> Option<T> {
        snapshot.last()
    }
}

impl Direction for Min {
    const BETTER: Ordering = Ordering::Less;

    #[inline]
    fn sentinel<T: Sample>() -> T {
        T::MAX_VALUE
    }

    #[inline]
    fn pick<T: Sample>(snapshot: &Snapshot<'_, T>) -> Option<T> {
        snapshot.first()
    }
}

#[derive(Clone, Debug)]
enum Store<T> {
    Lazy(RollingBuffer<T>),
    Immediate(SortedRollingWindow<T>),
}

/// Extremum of the last N samples
///
/// Use the [`RollingMax`] and [`RollingMin`] aliases.
///
/// # Example
///
/// ```
/// use rollstats::window::{RollingMax, Strategy};
///
/// let mut max = RollingMax::<i32>::new(3, Strategy::Immediate).unwrap();
/// assert_eq!(max.value(), i32::MIN);
///
/// for v in [1, 3, 5, 7, 6, 1] {
///     max.observe(v);
/// }
/// assert_eq!(max.value(), 7);
///
/// max.observe(3);
/// assert_eq!(max.value(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct RollingExtremum<T, D> {
    store: Store<T>,
    direction: PhantomData<D>,
}

/// Maximum of the last N samples
pub type RollingMax<T> = RollingExtremum<T, Max>;

/// Minimum of the last N samples
pub type RollingMin<T> = RollingExtremum<T, Min>;

impl<T: Sample, D: Direction> RollingExtremum<T, D> {
    /// Create an extremum over the last `window_size` samples
    ///
    /// Fails with [`InvalidState::ZeroWindow`](crate::InvalidState::ZeroWindow)
    /// when `window_size` is zero.
    pub fn new(window_size: usize, strategy: Strategy) -> Result<Self> {
        let store = match strategy {
            Strategy::Lazy => Store::Lazy(RollingBuffer::new(window_size)?),
            Strategy::Immediate => Store::Immediate(SortedRollingWindow::new(window_size)?),
        };
        Ok(Self {
            store,
            direction: PhantomData,
        })
    }

    /// Shorthand for [`Strategy::Lazy`]
    pub fn lazy(window_size: usize) -> Result<Self> {
        Self::new(window_size, Strategy::Lazy)
    }

    /// Shorthand for [`Strategy::Immediate`]
    pub fn immediate(window_size: usize) -> Result<Self> {
        Self::new(window_size, Strategy::Immediate)
    }

    /// Feed one sample
    pub fn observe(&mut self, sample: T) {
        match &mut self.store {
            Store::Lazy(buffer) => {
                buffer.push(sample);
            }
            Store::Immediate(window) => window.insert(sample),
        }
    }

    /// Current extremum, or the domain sentinel for an empty window
    pub fn value(&self) -> T {
        let best = match &self.store {
            Store::Lazy(buffer) => buffer.iter().reduce(|best, sample| {
                if sample.total_cmp(&best) == D::BETTER {
                    sample
                } else {
                    best
                }
            }),
            Store::Immediate(window) => D::pick(&window.snapshot()),
        };
        best.unwrap_or_else(D::sentinel::<T>)
    }

    pub fn strategy(&self) -> Strategy {
        match self.store {
            Store::Lazy(_) => Strategy::Lazy,
            Store::Immediate(_) => Strategy::Immediate,
        }
    }

    pub fn window_size(&self) -> usize {
        match &self.store {
            Store::Lazy(buffer) => buffer.capacity(),
            Store::Immediate(window) => window.window_size(),
        }
    }

    /// Number of samples currently in the window
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Lazy(buffer) => buffer.len(),
            Store::Immediate(window) => window.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Sample, D: Direction> Accumulator for RollingExtremum<T, D> {
    type Sample = T;

    fn observe(&mut self, sample: T) {
        RollingExtremum::observe(self, sample);
    }

    fn clear(&mut self) {
        match &mut self.store {
            Store::Lazy(buffer) => buffer.clear(),
            Store::Immediate(window) => window.clear(),
        }
    }

    fn size_bytes(&self) -> usize {
        let inner = match &self.store {
            Store::Lazy(buffer) => buffer.size_bytes(),
            Store::Immediate(window) => window.size_bytes(),
        };
        inner + core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        match &self.store {
            Store::Lazy(buffer) => buffer.count(),
            Store::Immediate(window) => window.count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [Strategy; 2] = [Strategy::Lazy, Strategy::Immediate];

    fn run<D: Direction>(strategy: Strategy, window: usize, samples: &[i32]) -> Vec<i32> {
        let mut acc = RollingExtremum::<i32, D>::new(window, strategy).unwrap();
        samples
            .iter()
            .map(|&v| {
                acc.observe(v);
                acc.value()
            })
            .collect()
    }

    #[test]
    fn test_rolling_max_window_three() {
        for strategy in STRATEGIES {
            assert_eq!(
                run::<Max>(strategy, 3, &[1, 3, 5, 7, 6, 1, 3, 2]),
                vec![1, 3, 5, 7, 7, 7, 6, 3],
                "{:?}",
                strategy
            );
        }
    }

    #[test]
    fn test_rolling_min_window_three() {
        for strategy in STRATEGIES {
            assert_eq!(
                run::<Min>(strategy, 3, &[1, 3, 5, 7, 6, 7, 1]),
                vec![1, 1, 1, 3, 5, 6, 1],
                "{:?}",
                strategy
            );
        }
    }

    #[test]
    fn test_empty_sentinels() {
        for strategy in STRATEGIES {
            assert_eq!(RollingMax::<i32>::new(3, strategy).unwrap().value(), i32::MIN);
            assert_eq!(RollingMin::<i32>::new(3, strategy).unwrap().value(), i32::MAX);
            assert_eq!(RollingMax::<u16>::new(3, strategy).unwrap().value(), 0);
            assert_eq!(RollingMax::<f64>::new(3, strategy).unwrap().value(), -f64::MAX);
            assert_eq!(RollingMin::<f64>::new(3, strategy).unwrap().value(), f64::MAX);
        }
    }

    #[test]
    fn test_sentinel_after_clear() {
        let mut max = RollingMax::immediate(2).unwrap();
        max.observe(5_i64);
        max.clear();
        assert_eq!(max.value(), i64::MIN);
        assert!(max.is_empty());
    }

    #[test]
    fn test_default_strategy_is_lazy() {
        assert_eq!(Strategy::default(), Strategy::Lazy);
        let min = RollingMin::<f32>::lazy(4).unwrap();
        assert_eq!(min.strategy(), Strategy::Lazy);
        assert_eq!(min.window_size(), 4);
        assert_eq!(min.len(), 0);
    }

    #[test]
    fn test_window_of_one_tracks_last_sample() {
        for strategy in STRATEGIES {
            let mut max = RollingMax::new(1, strategy).unwrap();
            let mut min = RollingMin::new(1, strategy).unwrap();
            for v in [4.0, -2.0, 9.5, 9.5, 0.0] {
                max.observe(v);
                min.observe(v);
                assert_eq!(max.value(), v);
                assert_eq!(min.value(), v);
            }
        }
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(RollingMax::<i32>::lazy(0).is_err());
        assert!(RollingMin::<i32>::immediate(0).is_err());
    }
}
