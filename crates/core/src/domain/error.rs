// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("queue capacity must be at least 1")]
    InvalidCapacity,

    #[error("max_concurrency must be at least 1")]
    InvalidConcurrency,
}

pub type Result<T> = std::result::Result<T, DomainError>;
