use jboss_byteman_core::{keys, NodeConfig};

use crate::shared::error::ControllerResult;

/// Prefix of the system properties the in-server framework reads.
pub const FRAMEWORK_PROPERTY_PREFIX: &str = "org.jboss.byteman.jp.co.ntt.oss.jboss.byteman.framework";

pub const DEFAULT_AGENT_PORT: u16 = 9091;
pub const DEFAULT_FRAMEWORK_HOST: &str = "127.0.0.1";
pub const DEFAULT_FRAMEWORK_RMI_PORT: u16 = 1099;

/// Produces the `-javaagent:...` flag that loads the byteman agent.
pub trait AgentPropertiesBuilder: Send + Sync {
    fn agent_properties(&self, config: &NodeConfig, scripts: &[String]) -> ControllerResult<String>;
}

/// Renders the agent flag from the node's byteman settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytemanAgentProperties;

impl BytemanAgentProperties {
    pub fn new() -> Self {
        Self
    }
}

impl AgentPropertiesBuilder for BytemanAgentProperties {
    fn agent_properties(&self, config: &NodeConfig, scripts: &[String]) -> ControllerResult<String> {
        let agent_jar = config.require(keys::BYTEMAN_AGENT_JAR)?;
        let address = config.require_either(keys::BYTEMAN_AGENT_ADDRESS, keys::NODE_ADDRESS)?;
        let port = config.get_port(keys::BYTEMAN_AGENT_PORT, DEFAULT_AGENT_PORT)?;
        let framework_host = config.get_or(keys::FRAMEWORK_HOST, DEFAULT_FRAMEWORK_HOST);
        let framework_port = config.get_port(keys::FRAMEWORK_RMI_PORT, DEFAULT_FRAMEWORK_RMI_PORT)?;

        let mut agent_args = Vec::with_capacity(5 + scripts.len());
        if let Some(framework_jar) = config.get(keys::BYTEMAN_FRAMEWORK_JAR) {
            agent_args.push(format!("sys:{framework_jar}"));
        }
        agent_args.push(format!("address:{address}"));
        agent_args.push(format!("port:{port}"));
        agent_args.push(format!("prop:{FRAMEWORK_PROPERTY_PREFIX}.host={framework_host}"));
        agent_args.push(format!("prop:{FRAMEWORK_PROPERTY_PREFIX}.port={framework_port}"));
        agent_args.extend(scripts.iter().map(|script| format!("script:{script}")));

        Ok(format!("-javaagent:{agent_jar}={}", agent_args.join(",")))
    }
}

/// Rule scripts listed in `node.byteman.scripts`, in configured order.
pub fn configured_scripts(config: &NodeConfig) -> Vec<String> {
    config.get_list(keys::BYTEMAN_SCRIPTS).unwrap_or_default()
}
