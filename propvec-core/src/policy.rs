//! Capacity growth and shrink policy
//!
//! Pure sizing math shared by every column buffer of a container. The policy
//! is per-container configuration, never global state: capacity grows in
//! multiples of a configurable granularity, and shrinks only once the slack
//! between capacity and size reaches a configurable threshold, so repeated
//! resizes near a granularity boundary cannot thrash the allocator.

/// Capacity policy for a property container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthPolicy {
    /// Capacity quantum; allocated capacity is a multiple of this (or 0)
    pub granularity: usize,
    /// Minimum capacity slack before any reallocation downward happens
    pub shrink_threshold: usize,
}

impl GrowthPolicy {
    /// Create the default policy: exact-fit capacity, shrink on every reduction
    pub const fn new() -> Self {
        GrowthPolicy {
            granularity: 1,
            shrink_threshold: 0,
        }
    }

    /// Set the capacity quantum
    pub const fn with_granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the minimum slack required before shrinking
    pub const fn with_shrink_threshold(mut self, shrink_threshold: usize) -> Self {
        self.shrink_threshold = shrink_threshold;
        self
    }

    /// Smallest capacity this policy allows for `size` live rows
    ///
    /// Deterministic and monotonic in `size`; the result is never below
    /// `size`, even at the integer boundary where no larger multiple of the
    /// granularity exists.
    pub const fn capacity_for(&self, size: usize) -> usize {
        if self.granularity <= 1 {
            return size;
        }
        match size.checked_next_multiple_of(self.granularity) {
            Some(capacity) => capacity,
            None => size,
        }
    }

    /// Whether a container at `size`/`capacity` should reallocate downward
    ///
    /// True only when the slack has reached the shrink threshold AND a
    /// strictly smaller capacity is actually permitted for `size`.
    pub const fn should_shrink(&self, size: usize, capacity: usize) -> bool {
        capacity.saturating_sub(size) >= self.shrink_threshold
            && self.capacity_for(size) < capacity
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new()
    }
}
