use async_trait::async_trait;
use jboss_byteman_core::{keys, ClusterConfig};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

use super::RemoteExecutor;
use crate::shared::error::{ControllerError, ControllerResult};

/// Default time allowed for one ssh invocation.
pub const DEFAULT_SSH_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_SSH_PORT: u16 = 22;

/// Runs commands through the system `ssh` client.
///
/// Connection details come from the node's configuration: `node.ssh.host`
/// (falling back to `node.address`), `node.ssh.port`, `node.ssh.username` and
/// `node.ssh.identity`. Authentication must be non-interactive.
pub struct SshExecutor {
    config: Arc<ClusterConfig>,
    timeout: Duration,
    program: String,
}

impl SshExecutor {
    pub fn new(config: Arc<ClusterConfig>) -> Self {
        Self {
            config,
            timeout: DEFAULT_SSH_TIMEOUT,
            program: "ssh".to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the `ssh` binary, e.g. with a wrapper script.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn ssh_args(&self, node_id: &str, command: &str) -> ControllerResult<Vec<String>> {
        let node = self.config.node(node_id);
        let host = node.require_either(keys::SSH_HOST, keys::NODE_ADDRESS)?;
        let port = node.get_port(keys::SSH_PORT, DEFAULT_SSH_PORT)?;

        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-p".to_string(),
            port.to_string(),
        ];
        if let Some(identity) = node.get(keys::SSH_IDENTITY) {
            args.push("-i".to_string());
            args.push(identity);
        }
        args.push(match node.get(keys::SSH_USERNAME) {
            Some(user) => format!("{user}@{host}"),
            None => host,
        });
        args.push(command.to_string());

        Ok(args)
    }
}

#[async_trait]
impl RemoteExecutor for SshExecutor {
    async fn execute(&self, node_id: &str, command: &str) -> ControllerResult<()> {
        let args = self.ssh_args(node_id, command)?;
        // the remote command itself may carry credentials
        let connection = args.split_last().map(|(_, rest)| rest).unwrap_or_default();
        trace!(%node_id, ?connection, "spawning ssh");

        let child = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ControllerError::remote(node_id, format!("failed to spawn {}: {e}", self.program))
            })?;

        // dropping the timed out future drops the child, which kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                ControllerError::Timeout(format!(
                    "{} to {node_id} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| ControllerError::remote(node_id, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ControllerError::remote(
                node_id,
                format!("{} ({})", output.status, stderr.trim()),
            ));
        }

        debug!(%node_id, "remote command dispatched");
        Ok(())
    }
}
