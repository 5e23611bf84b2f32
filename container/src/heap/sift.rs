use super::ordered::parent;
use super::{Less, OrderedContainer};

pub fn sift_up<T, L: Less<T>>(container: &mut OrderedContainer<T, L>, mut node: usize) {
    while let Some(above) = parent(node) {
        if !container.less(node, above) {
            break;
        }
        container.swap(node, above);
        node = above;
    }
}

pub fn sift_down<T, L: Less<T>>(container: &mut OrderedContainer<T, L>, mut node: usize) {
    loop {
        let child = match container.children(node) {
            (Some(left), Some(right)) => {
                // left wins ties
                if container.less(right, left) {
                    right
                } else {
                    left
                }
            }
            (Some(left), None) => left,
            _ => break,
        };
        if !container.less(child, node) {
            break;
        }
        container.swap(node, child);
        node = child;
    }
}

pub fn heapify<T, L: Less<T>>(container: &mut OrderedContainer<T, L>) {
    let len = container.len();
    if len < 2 {
        return;
    }
    // every node past the last parent is a leaf
    let last_parent = (len - 2) / 2;
    for node in (0..=last_parent).rev() {
        sift_down(container, node);
    }
}
