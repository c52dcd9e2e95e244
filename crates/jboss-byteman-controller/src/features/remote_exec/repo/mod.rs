pub mod ssh;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;

use crate::shared::error::ControllerResult;

/// Sends one shell command line to a node.
///
/// Implementations return once the command has been handed over; they do not
/// wait for anything the command backgrounds on the remote host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    async fn execute(&self, node_id: &str, command: &str) -> ControllerResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRecord {
    pub node_id: String,
    pub command: String,
    pub dispatched_at: DateTime<Utc>,
}

/// Executor that keeps every dispatched command in memory instead of running it.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    dispatched: Arc<RwLock<Vec<DispatchRecord>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<DispatchRecord> {
        self.dispatched.read().await.clone()
    }

    pub async fn commands(&self) -> Vec<String> {
        let dispatched = self.dispatched.read().await;
        dispatched.iter().map(|record| record.command.clone()).collect()
    }

    pub async fn commands_for(&self, node_id: &str) -> Vec<String> {
        let dispatched = self.dispatched.read().await;
        dispatched
            .iter()
            .filter(|record| record.node_id == node_id)
            .map(|record| record.command.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.dispatched.write().await.clear();
    }
}

#[async_trait]
impl RemoteExecutor for RecordingExecutor {
    async fn execute(&self, node_id: &str, command: &str) -> ControllerResult<()> {
        trace!(%node_id, "recording remote command");
        let mut dispatched = self.dispatched.write().await;
        dispatched.push(DispatchRecord {
            node_id: node_id.to_string(),
            command: command.to_string(),
            dispatched_at: Utc::now(),
        });
        Ok(())
    }
}
