use super::Less;

pub fn parent(node: usize) -> Option<usize> {
    node.checked_sub(1).map(|above| above / 2)
}

// Index-addressed storage for the implicit binary tree. Keeps no ordering
// invariant of its own; the sift routines are responsible for heap order.
pub struct OrderedContainer<T, L> {
    elements: Vec<T>,
    less: L,
}

impl<T, L: Less<T>> OrderedContainer<T, L> {
    pub fn with_capacity(capacity: usize, less: L) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            less,
        }
    }

    pub fn from_vec(elements: Vec<T>, less: L) -> Self {
        Self { elements, less }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    // assumes both indices are in bounds
    pub fn less(&self, i: usize, j: usize) -> bool {
        self.less.less(&self.elements[i], &self.elements[j])
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.elements.swap(i, j);
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.elements.pop()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    // (left, right); the right child only exists when the left one does
    pub fn children(&self, node: usize) -> (Option<usize>, Option<usize>) {
        let left = 2 * node + 1;
        let len = self.elements.len();
        ((left < len).then_some(left), (left + 1 < len).then_some(left + 1))
    }
}
