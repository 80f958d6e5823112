//! Engine-level errors. Any of these ends the run.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the step method for bot {index} <{name}> failed: {detail}")]
    PolicyFailure { index: usize, name: String, detail: String },

    #[error(
        "the step method for bot {index} <{name}> did not return a valid direction; \
         instead, <{value}> was returned"
    )]
    InvalidPolicyResponse { index: usize, name: String, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Index of the bot whose policy caused the error, if any.
    pub fn bot_index(&self) -> Option<usize> {
        match self {
            EngineError::PolicyFailure { index, .. }
            | EngineError::InvalidPolicyResponse { index, .. } => Some(*index),
            EngineError::Config(_) => None,
        }
    }
}
