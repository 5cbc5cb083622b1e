//! Error type shared by all operators.

use log::warn;
use thiserror::Error;

/// Errors raised by the genetic operators.
///
/// Every operator validates its inputs before drawing any randomness or
/// allocating output, so an error never comes with a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenopsError {
    /// A parameter or input shape violates an operator precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GenopsError {
    /// Builds an [`InvalidArgument`](Self::InvalidArgument) and logs it.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        warn!("{msg}");
        GenopsError::InvalidArgument(msg)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenopsError>;
