//! Property names read from the cluster configuration.

/// Per-node address published by the orchestration framework.
pub const NODE_ADDRESS: &str = "node.address";

pub const BYTEMAN_SCRIPTS: &str = "node.byteman.scripts";
pub const BYTEMAN_AGENT_JAR: &str = "byteman.agent.jar";
pub const BYTEMAN_FRAMEWORK_JAR: &str = "byteman.framework.jar";
pub const BYTEMAN_AGENT_ADDRESS: &str = "node.byteman.address";
pub const BYTEMAN_AGENT_PORT: &str = "node.byteman.port";
pub const FRAMEWORK_HOST: &str = "framework.host";
pub const FRAMEWORK_RMI_PORT: &str = "framework.rmi.port";

pub const JBOSS_HOME: &str = "node.jboss.home";
pub const JBOSS_SERVER: &str = "node.jboss.server";
pub const JBOSS_JMX_USER: &str = "node.jboss.jmxuser";
pub const JBOSS_JMX_PASSWORD: &str = "node.jboss.jmxpassword";
pub const JBOSS_ADDRESS: &str = "node.jboss.address";

pub const EAP6_HOME: &str = "node.jboss.eap6.home";
pub const EAP6_ADDRESS: &str = "node.jboss.eap6.address";
pub const EAP6_BASE_DIR: &str = "node.jboss.eap6.base.dir";
pub const EAP6_PROFILE_CONFIG: &str = "node.jboss.eap6.profile.config";

pub const SSH_HOST: &str = "node.ssh.host";
pub const SSH_USERNAME: &str = "node.ssh.username";
pub const SSH_PORT: &str = "node.ssh.port";
pub const SSH_IDENTITY: &str = "node.ssh.identity";
