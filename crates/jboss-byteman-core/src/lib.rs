pub mod config;
pub mod keys;
pub mod options;

pub use config::{ClusterConfig, NodeConfig};
pub use options::{JavaOptions, ModuleSystemPackages};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Missing property '{key}' for node {node}")]
    MissingProperty { node: String, key: String },
    #[error("Invalid property '{key}' for node {node}: {reason}")]
    InvalidProperty {
        node: String,
        key: String,
        reason: String,
    },
    #[error("Configuration load error: {0}")]
    ConfigLoad(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
