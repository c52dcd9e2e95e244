pub mod features;
pub mod shared;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

pub use features::agent_options::service::{AgentPropertiesBuilder, BytemanAgentProperties};
pub use features::jboss::controller::{Eap6StandaloneController, JBossController};
pub use features::remote_exec::repo::ssh::SshExecutor;
pub use features::remote_exec::repo::{DispatchRecord, RecordingExecutor, RemoteExecutor};
pub use shared::error::{ControllerError, ControllerResult};
pub use shared::types::{ControllerKind, NodeConfig, StandaloneLayout, StandaloneOptions};

/// Lifecycle operations the orchestration framework drives for one node.
///
/// `start` and `stop` return once the command is handed to the remote host;
/// they do not wait for the server to come up or go down.
#[async_trait]
pub trait NodeController: Send + Sync {
    fn identifier(&self) -> &str;
    fn address(&self) -> ControllerResult<String>;
    async fn start(&self) -> ControllerResult<()>;
    async fn stop(&self) -> ControllerResult<()>;
}

/// Builds the controller for `kind`.
///
/// The EAP5 controller only uses `options.java_options`.
pub fn build_controller(
    kind: ControllerKind,
    config: NodeConfig,
    agent: Arc<dyn AgentPropertiesBuilder>,
    executor: Arc<dyn RemoteExecutor>,
    options: StandaloneOptions,
) -> ControllerResult<Box<dyn NodeController>> {
    match kind {
        ControllerKind::JBoss => {
            if !options.agent_options.is_empty() || !options.module_system_packages.added().is_empty() {
                warn!(
                    node_id = %config.node_id(),
                    "agent options and module system packages are ignored for EAP5 servers"
                );
            }
            Ok(Box::new(
                JBossController::new(config, agent, executor).with_java_options(options.java_options),
            ))
        }
        ControllerKind::Eap6Standalone => Ok(Box::new(Eap6StandaloneController::new(
            config, agent, executor, options,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jboss_byteman_core::{keys, ClusterConfig};

    fn config() -> Arc<ClusterConfig> {
        let config = Arc::new(ClusterConfig::new());
        config.set_global(keys::BYTEMAN_AGENT_JAR, "/opt/byteman.jar");
        config.set_global(keys::JBOSS_HOME, "/opt/jboss");
        config.set_global(keys::JBOSS_SERVER, "default");
        config.set_global(keys::EAP6_HOME, "/opt/eap6");
        config.set_node_property("n1", keys::NODE_ADDRESS, "10.0.0.1");
        config
    }

    #[tokio::test]
    async fn test_build_jboss_controller() {
        let executor = RecordingExecutor::new();
        let controller = build_controller(
            ControllerKind::JBoss,
            config().node("n1"),
            Arc::new(BytemanAgentProperties::new()),
            Arc::new(executor.clone()),
            StandaloneOptions::new().with_java_options("-Xmx1g"),
        )
        .unwrap();

        assert_eq!(controller.identifier(), "n1");
        controller.start().await.unwrap();

        let commands = executor.commands().await;
        assert_eq!(commands.len(), 1);
        assert!(commands[0].contains("/opt/jboss/bin/run.sh -c default -b 10.0.0.1"));
        assert!(commands[0].contains("port=1099 -Xmx1g\""));
    }

    #[tokio::test]
    async fn test_build_standalone_controller() {
        let executor = RecordingExecutor::new();
        let controller = build_controller(
            ControllerKind::Eap6Standalone,
            config().node("n1"),
            Arc::new(BytemanAgentProperties::new()),
            Arc::new(executor.clone()),
            StandaloneOptions::new(),
        )
        .unwrap();

        assert_eq!(controller.address().unwrap(), "10.0.0.1");
        controller.start().await.unwrap();
        controller.stop().await.unwrap();

        let commands = executor.commands().await;
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], "mkdir /opt/eap6/standalone/log; rm -rf /opt/eap6/standalone/log/*");
        assert_eq!(
            commands[2],
            "bash -c \"kill -15 `cat /opt/eap6/standalone/log/jboss.pid`\""
        );
    }

    #[test]
    fn test_build_standalone_controller_reports_config_errors() {
        let result = build_controller(
            ControllerKind::Eap6Standalone,
            config().node("unknown"),
            Arc::new(BytemanAgentProperties::new()),
            Arc::new(RecordingExecutor::new()),
            StandaloneOptions::new(),
        );
        assert!(matches!(result, Err(ControllerError::Config(_))));
    }
}
