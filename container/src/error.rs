use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("container is empty")]
    Empty,
    #[error("a ring must have at least one slot")]
    ZeroLength,
}
