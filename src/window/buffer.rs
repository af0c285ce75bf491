//! Plain rolling buffer over the last N samples
//!
//! Samples stay in insertion order; pushing into a full buffer evicts the
//! oldest one.

use crate::error::{InvalidState, Result};
use crate::traits::{Accumulator, Sample};

#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;

/// Fixed-capacity FIFO of the most recent samples
///
/// # Example
///
/// ```
/// use rollstats::window::RollingBuffer;
///
/// let mut buffer = RollingBuffer::new(3).unwrap();
/// for v in [1, 2, 3] {
///     assert_eq!(buffer.push(v), None);
/// }
///
/// // Full: the oldest sample slides out
/// assert_eq!(buffer.push(4), Some(1));
/// assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![2, 3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct RollingBuffer<T> {
    samples: VecDeque<T>,
    capacity: usize,
    /// Samples pushed since construction or the last clear
    seen: u64,
}

impl<T: Sample> RollingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` samples
    ///
    /// Fails with [`InvalidState::ZeroWindow`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(InvalidState::ZeroWindow);
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            seen: 0,
        })
    }

    /// Push a sample, returning the evicted oldest sample if the buffer was full
    pub fn push(&mut self, sample: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        self.seen += 1;
        evicted
    }

    /// Oldest sample in the window, the next one to be evicted
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.samples.front().copied()
    }

    /// Newest sample in the window
    #[inline]
    pub fn back(&self) -> Option<T> {
        self.samples.back().copied()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if the next push will evict
    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Sample> Accumulator for RollingBuffer<T> {
    type Sample = T;

    fn observe(&mut self, sample: T) {
        self.push(sample);
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.seen = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.samples.capacity() * core::mem::size_of::<T>()
    }

    fn count(&self) -> u64 {
        self.seen
    }
}

#[cfg(feature = "serde")]
impl<T: Sample + serde::Serialize> serde::Serialize for RollingBuffer<T> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("RollingBuffer", 3)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("seen", &self.seen)?;
        state.serialize_field("samples", &self.samples)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_then_evict() {
        let mut buffer = RollingBuffer::new(3).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.front(), None);

        assert_eq!(buffer.push(1), None);
        assert_eq!(buffer.push(2), None);
        assert!(!buffer.is_full());
        assert_eq!(buffer.push(3), None);
        assert!(buffer.is_full());

        assert_eq!(buffer.front(), Some(1));
        assert_eq!(buffer.push(4), Some(1));
        assert_eq!(buffer.push(5), Some(2));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.front(), Some(3));
        assert_eq!(buffer.back(), Some(5));
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(buffer.count(), 5);
    }

    #[test]
    fn test_capacity_one() {
        let mut buffer = RollingBuffer::new(1).unwrap();
        assert_eq!(buffer.push(7.5), None);
        assert_eq!(buffer.push(-1.0), Some(7.5));
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![-1.0]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RollingBuffer::<i32>::new(0).unwrap_err();
        assert_eq!(err, InvalidState::ZeroWindow);
    }

    #[test]
    fn test_clear() {
        let mut buffer = RollingBuffer::new(2).unwrap();
        buffer.observe(1u8);
        buffer.observe(2u8);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(Accumulator::count(&buffer), 0);
        assert_eq!(buffer.capacity(), 2);
    }
}
