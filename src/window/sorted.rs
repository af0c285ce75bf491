//! Sorted rolling window
//!
//! Keeps the same samples as a [`RollingBuffer`] of the same size, but in
//! ascending order. The sorted side is an ordered map from value to
//! multiplicity, so both the insertion of a new sample and the removal of
//! the sample sliding out of the window are O(log N).

use super::buffer::RollingBuffer;
use crate::error::Result;
use crate::traits::{Accumulator, Sample};
use core::cmp::Ordering;

#[cfg(feature = "std")]
use std::{
    collections::{btree_map::Entry, BTreeMap},
    vec::Vec,
};

#[cfg(not(feature = "std"))]
use alloc::{
    collections::{btree_map::Entry, BTreeMap},
    vec::Vec,
};

/// Map key ordering samples by [`Sample::total_cmp`]
#[derive(Clone, Copy, Debug)]
struct Key<T>(T);

impl<T: Sample> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl<T: Sample> Eq for Key<T> {}

impl<T: Sample> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Sample> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The last N samples, sorted ascending
///
/// Duplicates are kept. Once N samples have been seen, every insert first
/// removes one occurrence of the sample leaving the window, so the window
/// never holds more than N samples.
///
/// # Example
///
/// ```
/// use rollstats::window::SortedRollingWindow;
///
/// let mut window = SortedRollingWindow::new(3).unwrap();
/// for v in [1, 3, 5, 7, 6] {
///     window.insert(v);
/// }
///
/// assert_eq!(window.snapshot().to_vec(), vec![5, 6, 7]);
/// ```
#[derive(Clone, Debug)]
pub struct SortedRollingWindow<T> {
    /// Insertion order, tells which sample slides out next
    buffer: RollingBuffer<T>,
    /// Value -> multiplicity
    sorted: BTreeMap<Key<T>, usize>,
}

impl<T: Sample> SortedRollingWindow<T> {
    /// Create an empty window over the last `window_size` samples
    ///
    /// Fails with [`InvalidState::ZeroWindow`](crate::InvalidState::ZeroWindow)
    /// when `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        Ok(Self {
            buffer: RollingBuffer::new(window_size)?,
            sorted: BTreeMap::new(),
        })
    }

    /// Insert a sample, evicting the oldest one if the window is full
    pub fn insert(&mut self, sample: T) {
        if let Some(evicted) = self.buffer.push(sample) {
            self.remove_one(evicted);
        }
        *self.sorted.entry(Key(sample)).or_insert(0) += 1;
    }

    /// Remove a single occurrence of `sample`, leaving other duplicates in place
    fn remove_one(&mut self, sample: T) {
        // The buffer and the map hold the same multiset, so the entry exists
        if let Entry::Occupied(mut slot) = self.sorted.entry(Key(sample)) {
            if *slot.get() > 1 {
                *slot.get_mut() -= 1;
            } else {
                slot.remove();
            }
        }
        tracing::trace!(evicted = ?sample, "sorted window eviction");
    }

    /// Ascending view over the current contents
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            sorted: &self.sorted,
            len: self.buffer.len(),
        }
    }

    /// Number of samples currently in the window
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.buffer.capacity()
    }

    /// The same samples in insertion order
    pub fn unsorted(&self) -> &RollingBuffer<T> {
        &self.buffer
    }
}

impl<T: Sample> Accumulator for SortedRollingWindow<T> {
    type Sample = T;

    fn observe(&mut self, sample: T) {
        self.insert(sample);
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.sorted.clear();
    }

    fn size_bytes(&self) -> usize {
        // BTreeMap nodes are not exposed; count the entries
        self.buffer.size_bytes()
            + self.sorted.len() * (core::mem::size_of::<T>() + core::mem::size_of::<usize>())
    }

    fn count(&self) -> u64 {
        self.buffer.count()
    }
}

/// Read-only ascending view of a [`SortedRollingWindow`]
///
/// Borrows the window, so it cannot outlive the next insert.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a, T> {
    sorted: &'a BTreeMap<Key<T>, usize>,
    len: usize,
}

impl<'a, T: Sample> Snapshot<'a, T> {
    /// Iterate in ascending order, duplicates repeated
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.sorted
            .iter()
            .flat_map(|(key, &n)| core::iter::repeat(key.0).take(n))
    }

    /// Smallest sample in the window
    pub fn first(&self) -> Option<T> {
        self.sorted.keys().next().map(|key| key.0)
    }

    /// Largest sample in the window
    pub fn last(&self) -> Option<T> {
        self.sorted.keys().next_back().map(|key| key.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.iter());
        out
    }
}

#[cfg(feature = "serde")]
impl<T: Sample + serde::Serialize> serde::Serialize for SortedRollingWindow<T> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SortedRollingWindow", 2)?;
        state.serialize_field("window_size", &self.window_size())?;
        state.serialize_field("sorted", &self.snapshot().to_vec())?;
        state.end()
    }
}
