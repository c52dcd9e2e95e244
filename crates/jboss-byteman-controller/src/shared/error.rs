use jboss_byteman_core::CoreError;
use thiserror::Error;

/// Controller specific errors
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Remote execution failed on {node}: {message}")]
    RemoteExecution { node: String, message: String },
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl ControllerError {
    pub fn remote(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteExecution {
            node: node.into(),
            message: message.into(),
        }
    }
}

pub type ControllerResult<T> = std::result::Result<T, ControllerError>;
