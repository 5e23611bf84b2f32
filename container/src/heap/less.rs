/// Ordering used by a [`PriorityQueue`](super::PriorityQueue).
///
/// `less(a, b)` means `a` belongs closer to the root than `b`. It must be a
/// strict weak ordering; a queue built on anything else stays memory safe but
/// pops in unspecified order.
pub trait Less<T> {
    fn less(&self, a: &T, b: &T) -> bool;
}

impl<T, F> Less<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Smallest element on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFirst;

impl<T: Ord> Less<T> for MinFirst {
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Largest element on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFirst;

impl<T: Ord> Less<T> for MaxFirst {
    fn less(&self, a: &T, b: &T) -> bool {
        a > b
    }
}
