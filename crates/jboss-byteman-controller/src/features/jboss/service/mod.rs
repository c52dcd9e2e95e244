//! Shell command lines for starting and stopping JBoss servers.
//!
//! The exact text, spacing included, is what existing remote hosts and
//! verification suites expect.

use jboss_byteman_core::{keys, JavaOptions, NodeConfig};

use crate::shared::error::ControllerResult;
use crate::shared::types::{StandaloneLayout, StandaloneOptions};

pub const DEFAULT_STANDALONE_PROFILE: &str = "standalone.xml";

/// Bind address for an EAP5 server: `node.jboss.address`, else `node.address`.
pub fn resolve_jboss_address(config: &NodeConfig) -> ControllerResult<String> {
    Ok(config.require_either(keys::JBOSS_ADDRESS, keys::NODE_ADDRESS)?)
}

pub fn jboss_java_options(agent_properties: &str, java_options: &str) -> String {
    let mut options = JavaOptions::new(agent_properties);
    options.append_with(" ", java_options);
    options.into_string()
}

pub fn jboss_start_command(home: &str, server: &str, address: &str, java_options: &str) -> String {
    format!(
        "mkdir {home}/server/{server}/log ; \
         export JAVA_OPTS=\"$JAVA_OPTS {java_options}\" ; \
         bash -c \"nohup {home}/bin/run.sh -c {server} -b {address} &> {home}/server/{server}/log/stdout.log &\""
    )
}

pub fn jboss_stop_command(home: &str, address: &str, jmx_user: &str, jmx_password: &str) -> String {
    format!(
        "bash -c \"nohup {home}/bin/shutdown.sh -S -s {address} -u {jmx_user} -p {jmx_password} > /dev/null 2>&1 &\""
    )
}

pub fn resolve_standalone_layout(config: &NodeConfig) -> ControllerResult<StandaloneLayout> {
    let address = config.require_either(keys::EAP6_ADDRESS, keys::NODE_ADDRESS)?;
    let home = config.require(keys::EAP6_HOME)?;
    let base_dir = config.get_or(keys::EAP6_BASE_DIR, format!("{home}/standalone"));
    let log_dir = format!("{base_dir}/log");
    let profile = config.get_or(keys::EAP6_PROFILE_CONFIG, DEFAULT_STANDALONE_PROFILE);
    let pid_file = format!("{log_dir}/jboss.pid");

    Ok(StandaloneLayout {
        address,
        home,
        base_dir,
        log_dir,
        profile,
        pid_file,
    })
}

/// Agent flag, agent sub-options, extra options, then the module system packages.
pub fn standalone_java_options(agent_properties: &str, options: &StandaloneOptions) -> String {
    let mut java_options = JavaOptions::new(agent_properties);
    java_options
        .append_with(",", &options.agent_options)
        .append_with(" ", &options.java_options)
        .append_with(" ", &options.module_system_packages.to_system_property());
    java_options.into_string()
}

pub fn clean_logs_command(layout: &StandaloneLayout) -> String {
    let log_dir = &layout.log_dir;
    format!("mkdir {log_dir}; rm -rf {log_dir}/*")
}

pub fn standalone_start_command(layout: &StandaloneLayout, java_options: &str) -> String {
    let StandaloneLayout {
        address,
        home,
        base_dir,
        log_dir,
        profile,
        pid_file,
    } = layout;

    format!(
        "export LAUNCH_JBOSS_IN_BACKGROUND=true;\
         export JBOSS_PIDFILE={pid_file};\
         export JBOSS_BASE_DIR={base_dir};\
         export JAVA_OPTS=\"$JAVA_OPTS {java_options}\" && \
         bash -c \"nohup {home}/bin/standalone.sh -b {address} -bmanagement={address} -c {profile}&> {log_dir}/stdout.log &\""
    )
}

pub fn standalone_stop_command(layout: &StandaloneLayout) -> String {
    format!("bash -c \"kill -15 `cat {}`\"", layout.pid_file)
}
