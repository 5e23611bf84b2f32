mod error;
mod heap;
mod ring;

pub use error::ContainerError;
pub use heap::{Less, MaxFirst, MinFirst, PriorityQueue};
pub use ring::{Ring, RingIter};
