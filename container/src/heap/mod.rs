mod less;
mod ordered;
mod sift;

use crate::ContainerError;
pub use less::{Less, MaxFirst, MinFirst};
use ordered::OrderedContainer;
use sift::{heapify, sift_down, sift_up};
use std::fmt;

/// Binary-heap priority queue over an arbitrary [`Less`] ordering.
///
/// The element for which `less` holds against every other sits on top.
/// Not synchronized; share it behind a lock if several threads need it.
pub struct PriorityQueue<T, L> {
    container: OrderedContainer<T, L>,
}

impl<T, L: Less<T>> PriorityQueue<T, L> {
    pub fn new(less: L) -> Self {
        Self::with_capacity(0, less)
    }

    pub fn with_capacity(capacity: usize, less: L) -> Self {
        Self {
            container: OrderedContainer::with_capacity(capacity, less),
        }
    }

    /// Builds a queue from arbitrary elements in O(n).
    pub fn from_vec(elements: Vec<T>, less: L) -> Self {
        let mut container = OrderedContainer::from_vec(elements, less);
        heapify(&mut container);
        Self { container }
    }

    pub fn push(&mut self, value: T) {
        self.container.push(value);
        let last = self.container.len() - 1;
        sift_up(&mut self.container, last);
    }

    /// Removes the top element, or returns `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.container.len();
        if len == 0 {
            return None;
        }
        self.container.swap(0, len - 1);
        let value = self.container.pop_last();
        sift_down(&mut self.container, 0);
        value
    }

    pub fn top(&self) -> Option<&T> {
        self.container.get(0)
    }

    pub fn try_pop(&mut self) -> Result<T, ContainerError> {
        self.pop().ok_or(ContainerError::Empty)
    }

    pub fn try_top(&self) -> Result<&T, ContainerError> {
        self.top().ok_or(ContainerError::Empty)
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.container.capacity()
    }

    pub fn clear(&mut self) {
        self.container.clear();
    }

    /// Iterates in storage order, which is not pop order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.container.elements().iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.container.into_vec()
    }

    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Same as [`PriorityQueue::new`], but lets the closure's argument
    /// types be inferred from later use.
    pub fn from_fn(less: F) -> Self {
        Self::new(less)
    }
}

impl<T: Ord> PriorityQueue<T, MinFirst> {
    pub fn min_first() -> Self {
        Self::new(MinFirst)
    }
}

impl<T: Ord> PriorityQueue<T, MaxFirst> {
    pub fn max_first() -> Self {
        Self::new(MaxFirst)
    }
}

impl<T: Ord> Default for PriorityQueue<T, MinFirst> {
    fn default() -> Self {
        Self::min_first()
    }
}

impl<T, L: Less<T>> Extend<T> for PriorityQueue<T, L> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug, L: Less<T>> fmt::Debug for PriorityQueue<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("elements", &self.container.elements())
            .finish()
    }
}
