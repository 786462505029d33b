//! Scenario bodies and their shared error type.

use crate::client::ApiError;
use thiserror::Error;

pub mod compat;
#[cfg(test)]
pub(crate) mod fake;
pub mod keypairs;

/// Why a scenario invocation failed.
///
/// Remote failures and post-condition violations are distinct variants but
/// surface identically to the harness: the invocation is over, and the
/// harness decides what happens next. No retry happens at this layer.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A logical post-condition did not hold even though all calls
    /// succeeded.
    #[error("post-condition failed: {0}")]
    Check(String),
    /// The harness did not supply an argument the scenario declares.
    #[error("missing required argument: {0}")]
    MissingArg(&'static str),
}

pub(crate) fn ensure(cond: bool, msg: impl Into<String>) -> Result<(), ScenarioError> {
    if cond {
        Ok(())
    } else {
        Err(ScenarioError::Check(msg.into()))
    }
}
