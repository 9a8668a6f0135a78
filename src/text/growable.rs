//! Growable buffer with an explicit capacity/length pair.
//!
//! Shared by the deletion-run payload and the decoration overlay. Capacity
//! doubles until it covers the request, capped at the largest array the
//! platform can address for `T`.

use std::collections::TryReserveError;

const GROWTH_FACTOR: usize = 2;

/// Largest element count a `Vec<T>` can hold on this platform.
#[must_use]
pub const fn max_len<T>() -> usize {
    let size = std::mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

/// A dense buffer whose capacity grows geometrically and is never released
/// implicitly.
#[derive(Clone, Debug, Default)]
pub struct GrowableBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    /// Create an empty buffer without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }

    /// Create an empty buffer with at least `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(max_len::<T>());
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no live elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Tracked capacity (always a doubling of the initial capacity, or the cap).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Element at `idx`, if live.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<T> {
        self.items.get(idx).copied()
    }

    /// Grow capacity geometrically until it covers `min_capacity`.
    ///
    /// Returns the new capacity, or the allocation error if the platform
    /// refuses the reservation.
    pub fn reserve_for(&mut self, min_capacity: usize) -> Result<usize, TryReserveError> {
        if min_capacity <= self.capacity {
            return Ok(self.capacity);
        }
        let cap_limit = max_len::<T>();
        let mut next = self.capacity.max(1);
        while next < min_capacity {
            next = next.saturating_mul(GROWTH_FACTOR).min(cap_limit);
            if next == cap_limit {
                break;
            }
        }
        let next = next.max(min_capacity.min(cap_limit));
        self.items.try_reserve_exact(next - self.items.len())?;
        tracing::trace!(from = self.capacity, to = next, "growable buffer grew");
        self.capacity = next;
        Ok(next)
    }

    /// Extend with default values (or truncate) so that `len() == new_len`.
    pub fn resize(&mut self, new_len: usize) -> Result<(), TryReserveError> {
        self.reserve_for(new_len)?;
        self.items.resize(new_len, T::default());
        Ok(())
    }

    /// Append elements at the end.
    pub fn extend_back(&mut self, values: &[T]) -> Result<(), TryReserveError> {
        self.reserve_for(self.items.len() + values.len())?;
        self.items.extend_from_slice(values);
        Ok(())
    }

    /// Insert elements at the front, keeping existing order after them.
    pub fn extend_front(&mut self, values: &[T]) -> Result<(), TryReserveError> {
        self.reserve_for(self.items.len() + values.len())?;
        self.items.splice(0..0, values.iter().copied());
        Ok(())
    }

    /// Overwrite `range` with `value`. The range must lie within `len()`.
    pub fn fill(&mut self, range: std::ops::Range<usize>, value: T) {
        let end = range.end.min(self.items.len());
        let start = range.start.min(end);
        self.items[start..end].fill(value);
    }

    /// Drop all live elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_doubles() {
        let mut buf: GrowableBuffer<u8> = GrowableBuffer::with_capacity(4);
        assert_eq!(buf.capacity(), 4);
        buf.extend_back(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buf.capacity(), 8);
        buf.resize(17).unwrap();
        assert_eq!(buf.capacity(), 32);
        assert_eq!(buf.len(), 17);
        assert_eq!(buf.get(16), Some(0));
    }

    #[test]
    fn test_starts_from_one_when_unallocated() {
        let mut buf: GrowableBuffer<char> = GrowableBuffer::new();
        assert_eq!(buf.capacity(), 0);
        buf.extend_back(&['a', 'b', 'c']).unwrap();
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn test_front_and_back_keep_order() {
        let mut buf: GrowableBuffer<char> = GrowableBuffer::new();
        buf.extend_back(&['c']).unwrap();
        buf.extend_front(&['b']).unwrap();
        buf.extend_front(&['a']).unwrap();
        buf.extend_back(&['d']).unwrap();
        assert_eq!(buf.as_slice(), &['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_refused_reservation_keeps_state() {
        let mut buf: GrowableBuffer<char> = GrowableBuffer::with_capacity(4);
        buf.extend_back(&['a', 'b']).unwrap();
        assert!(buf.reserve_for(max_len::<char>()).is_err());
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_slice(), &['a', 'b']);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buf: GrowableBuffer<u8> = GrowableBuffer::with_capacity(16);
        buf.resize(10).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn test_fill_clamps_to_len() {
        let mut buf: GrowableBuffer<u8> = GrowableBuffer::new();
        buf.resize(4).unwrap();
        buf.fill(2..10, 7);
        assert_eq!(buf.as_slice(), &[0, 0, 7, 7]);
    }

    #[test]
    fn test_max_len_is_platform_bound() {
        assert_eq!(max_len::<u8>(), isize::MAX as usize);
        assert_eq!(max_len::<u32>(), isize::MAX as usize / 4);
    }
}
