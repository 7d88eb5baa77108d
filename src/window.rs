//! Sliding window of the most recent samples.
//!
//! Newest samples sit at the front and the oldest are evicted from the back,
//! so iteration runs newest to oldest, which is the order the canvas plots
//! them from right to left. Key properties:
//!
//! - **Bounded**: `len() <= capacity()` holds after every operation
//! - **O(1) push**: one `pop_back` plus one `push_front` at most
//! - **Eager shrink**: lowering the capacity drops the oldest excess at once
//!
//! # Example
//!
//! ```
//! use realplot::window::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(3);
//! for v in 1..=5 {
//!     window.push(v);
//! }
//! assert_eq!(window.iter().collect::<Vec<_>>(), vec![5, 4, 3]);
//! ```

use std::collections::VecDeque;

/// A bounded FIFO of integer samples, newest first.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindow {
    /// Samples, newest at the front.
    data: VecDeque<i64>,
    /// Maximum number of retained samples.
    capacity: usize,
}

impl SlidingWindow {
    /// Creates an empty window holding at most `capacity` samples.
    ///
    /// A capacity of zero is valid (zero-width terminal): every push is
    /// discarded until the window is resized.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a sample, evicting the oldest one when the window is full.
    pub fn push(&mut self, value: i64) {
        if self.capacity == 0 {
            return;
        }
        if self.data.len() >= self.capacity {
            self.data.pop_back();
        }
        self.data.push_front(value);
    }

    /// Changes the capacity.
    ///
    /// Shrinking evicts the oldest samples beyond the new capacity
    /// immediately. Growing keeps every buffered sample.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.data.truncate(capacity);
        if capacity > self.data.capacity() {
            self.data.reserve(capacity - self.data.len());
        }
    }

    /// Iterates samples from newest to oldest.
    ///
    /// The iterator borrows the window, so it can be recreated any number of
    /// times over the same snapshot.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.data.iter().copied()
    }

    /// Returns the most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<i64> {
        self.data.front().copied()
    }

    /// Returns the oldest retained sample, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<i64> {
        self.data.back().copied()
    }

    /// Returns the current number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no samples are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the next push will evict a sample.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Returns the maximum number of retained samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ============================================================================
// Tests
// ============================================================================
