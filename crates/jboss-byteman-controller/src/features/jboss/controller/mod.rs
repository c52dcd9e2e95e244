use async_trait::async_trait;
use jboss_byteman_core::{keys, NodeConfig};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::features::agent_options::service::{configured_scripts, AgentPropertiesBuilder};
use crate::features::jboss::service::{
    clean_logs_command, jboss_java_options, jboss_start_command, jboss_stop_command,
    resolve_jboss_address, resolve_standalone_layout, standalone_java_options,
    standalone_start_command, standalone_stop_command,
};
use crate::features::remote_exec::repo::RemoteExecutor;
use crate::shared::error::ControllerResult;
use crate::shared::types::{StandaloneLayout, StandaloneOptions};
use crate::NodeController;

/// Controller for a JBoss EAP5 server started with `run.sh`.
///
/// Reads `node.jboss.home`, `node.jboss.server`, `node.jboss.jmxuser` and
/// `node.jboss.jmxpassword`, plus the optional `node.jboss.address` and
/// `node.byteman.scripts`. Configuration is read again on every call.
pub struct JBossController {
    config: NodeConfig,
    agent: Arc<dyn AgentPropertiesBuilder>,
    executor: Arc<dyn RemoteExecutor>,
    java_options: String,
}

impl JBossController {
    pub fn new(
        config: NodeConfig,
        agent: Arc<dyn AgentPropertiesBuilder>,
        executor: Arc<dyn RemoteExecutor>,
    ) -> Self {
        Self {
            config,
            agent,
            executor,
            java_options: String::new(),
        }
    }

    pub fn with_java_options(mut self, java_options: impl Into<String>) -> Self {
        self.java_options = java_options.into();
        self
    }

    async fn dispatch(&self, kind: &'static str, command: &str) -> ControllerResult<()> {
        trace!(node_id = %self.config.node_id(), kind, "dispatching");
        self.executor.execute(self.config.node_id(), command).await
    }
}

#[async_trait]
impl NodeController for JBossController {
    fn identifier(&self) -> &str {
        self.config.node_id()
    }

    fn address(&self) -> ControllerResult<String> {
        resolve_jboss_address(&self.config)
    }

    async fn start(&self) -> ControllerResult<()> {
        let address = self.address()?;
        let home = self.config.require(keys::JBOSS_HOME)?;
        let server = self.config.require(keys::JBOSS_SERVER)?;

        let scripts = configured_scripts(&self.config);
        let agent_properties = self.agent.agent_properties(&self.config, &scripts)?;
        let java_options = jboss_java_options(&agent_properties, &self.java_options);

        self.dispatch("launch", &jboss_start_command(&home, &server, &address, &java_options))
            .await?;
        debug!(node_id = %self.identifier(), "{} is starting", self.identifier());
        Ok(())
    }

    async fn stop(&self) -> ControllerResult<()> {
        let address = self.address()?;
        let home = self.config.require(keys::JBOSS_HOME)?;
        let jmx_user = self.config.require(keys::JBOSS_JMX_USER)?;
        let jmx_password = self.config.require(keys::JBOSS_JMX_PASSWORD)?;

        self.dispatch("shutdown", &jboss_stop_command(&home, &address, &jmx_user, &jmx_password))
            .await?;
        debug!(node_id = %self.identifier(), "{} is stopping", self.identifier());
        Ok(())
    }
}

/// Controller for a JBoss EAP6 server in standalone mode.
///
/// The server layout is resolved once, when the controller is built, and again
/// on [`Eap6StandaloneController::reload`].
pub struct Eap6StandaloneController {
    config: NodeConfig,
    agent: Arc<dyn AgentPropertiesBuilder>,
    executor: Arc<dyn RemoteExecutor>,
    options: StandaloneOptions,
    layout: StandaloneLayout,
}

impl Eap6StandaloneController {
    pub fn new(
        config: NodeConfig,
        agent: Arc<dyn AgentPropertiesBuilder>,
        executor: Arc<dyn RemoteExecutor>,
        options: StandaloneOptions,
    ) -> ControllerResult<Self> {
        let layout = resolve_standalone_layout(&config)?;
        debug!(node_id = %config.node_id(), ?layout, "standalone layout resolved");

        Ok(Self {
            config,
            agent,
            executor,
            options,
            layout,
        })
    }

    /// Re-reads the server layout from configuration. On error the previous
    /// layout is kept.
    pub fn reload(&mut self) -> ControllerResult<()> {
        self.layout = resolve_standalone_layout(&self.config)?;
        debug!(node_id = %self.config.node_id(), layout = ?self.layout, "standalone layout reloaded");
        Ok(())
    }

    pub fn layout(&self) -> &StandaloneLayout {
        &self.layout
    }

    pub fn log_dir(&self) -> &str {
        &self.layout.log_dir
    }

    pub fn pid_file(&self) -> &str {
        &self.layout.pid_file
    }

    async fn dispatch(&self, kind: &'static str, command: &str) -> ControllerResult<()> {
        trace!(node_id = %self.config.node_id(), kind, "dispatching");
        self.executor.execute(self.config.node_id(), command).await
    }
}

#[async_trait]
impl NodeController for Eap6StandaloneController {
    fn identifier(&self) -> &str {
        self.config.node_id()
    }

    fn address(&self) -> ControllerResult<String> {
        Ok(self.layout.address.clone())
    }

    async fn start(&self) -> ControllerResult<()> {
        let scripts = configured_scripts(&self.config);
        let agent_properties = self.agent.agent_properties(&self.config, &scripts)?;
        let java_options = standalone_java_options(&agent_properties, &self.options);

        if self.options.clean_logs {
            self.dispatch("clean-logs", &clean_logs_command(&self.layout)).await?;
        }
        self.dispatch("launch", &standalone_start_command(&self.layout, &java_options))
            .await?;
        debug!(node_id = %self.identifier(), "{} is starting", self.identifier());
        Ok(())
    }

    async fn stop(&self) -> ControllerResult<()> {
        self.dispatch("shutdown", &standalone_stop_command(&self.layout)).await?;
        debug!(node_id = %self.identifier(), "{} is stopping", self.identifier());
        Ok(())
    }
}
