use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccessError {
    #[error("malformed entitlement slug: {0}")]
    MalformedSlug(String),

    #[error("malformed access requirement: {0}")]
    MalformedRequirement(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Poisoned lock error: {0}")]
    PoisonedLock(String),
}

impl From<serde_json::Error> for AccessError {
    fn from(err: serde_json::Error) -> Self {
        AccessError::InvalidFormat(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AccessError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        AccessError::PoisonedLock(err.to_string())
    }
}
