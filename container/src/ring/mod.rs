
use crate::ContainerError;
use std::collections::VecDeque;

/// Circular sequence of slots with a movable current position.
///
/// The front of `slots` is always the current slot, so rotating is a
/// rotation of the deque and splicing happens right behind the front.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    slots: VecDeque<Option<T>>,
}

impl<T> Ring<T> {
    pub fn with_len(len: usize) -> Result<Self, ContainerError> {
        if len == 0 {
            return Err(ContainerError::ZeroLength);
        }
        let slots = std::iter::repeat_with(|| None).take(len).collect();
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Value of the current slot, `None` if it was never set.
    pub fn value(&self) -> Option<&T> {
        self.slots.front().and_then(Option::as_ref)
    }

    pub fn set(&mut self, value: T) {
        if let Some(slot) = self.slots.front_mut() {
            *slot = Some(value);
        }
    }

    pub fn take(&mut self) -> Option<T> {
        self.slots.front_mut().and_then(Option::take)
    }

    pub fn next(&mut self) -> &mut Self {
        self.slots.rotate_left(1);
        self
    }

    pub fn prev(&mut self) -> &mut Self {
        self.slots.rotate_right(1);
        self
    }

    /// Moves `n` slots forward, or backward for negative `n`.
    pub fn move_by(&mut self, n: isize) -> &mut Self {
        let steps = n.rem_euclid(self.len() as isize) as usize;
        self.slots.rotate_left(steps);
        self
    }

    /// Splices `other` in after the current slot. Walking forward from the
    /// current slot then visits all of `other`, starting at its current
    /// slot, before reaching what used to follow.
    pub fn link(&mut self, mut other: Ring<T>) {
        log::trace!("linking {} slots into ring of {}", other.len(), self.len());
        let mut tail = self.slots.split_off(1);
        self.slots.append(&mut other.slots);
        self.slots.append(&mut tail);
    }

    /// Detaches `n % len` slots following the current one and returns them
    /// as a ring positioned at the first detached slot.
    pub fn unlink(&mut self, n: usize) -> Option<Ring<T>> {
        let count = n % self.len();
        if count == 0 {
            return None;
        }
        log::trace!("unlinking {} slots from ring of {}", count, self.len());
        let mut detached = self.slots.split_off(1);
        let mut tail = detached.split_off(count);
        self.slots.append(&mut tail);
        Some(Ring { slots: detached })
    }

    /// Calls `f` on every set value, walking forward from the current slot.
    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            slots: self.slots.iter(),
        }
    }
}

pub struct RingIter<'a, T> {
    slots: std::collections::vec_deque::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Option::as_ref)
    }
}
