pub use jboss_byteman_core::{ModuleSystemPackages, NodeConfig};

/// Launch options for a standalone EAP6 server.
///
/// Built up front and handed to the controller; the controller never changes
/// them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneOptions {
    pub java_options: String,
    pub agent_options: String,
    pub module_system_packages: ModuleSystemPackages,
    pub clean_logs: bool,
}

impl Default for StandaloneOptions {
    fn default() -> Self {
        Self {
            java_options: String::new(),
            agent_options: String::new(),
            module_system_packages: ModuleSystemPackages::new(),
            clean_logs: true,
        }
    }
}

impl StandaloneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text options appended after the agent flag.
    pub fn with_java_options(mut self, java_options: impl Into<String>) -> Self {
        self.java_options = java_options.into();
        self
    }

    /// Extra agent sub-options joined to the agent flag with a comma.
    pub fn with_agent_options(mut self, agent_options: impl Into<String>) -> Self {
        self.agent_options = agent_options.into();
        self
    }

    pub fn with_module_system_package(mut self, package: impl Into<String>) -> Self {
        self.module_system_packages.push(package);
        self
    }

    /// Whether the log directory is emptied before each start. Defaults to `true`.
    pub fn with_clean_logs(mut self, clean_logs: bool) -> Self {
        self.clean_logs = clean_logs;
        self
    }
}

/// Paths and addresses of a standalone server, resolved from node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneLayout {
    pub address: String,
    pub home: String,
    pub base_dir: String,
    pub log_dir: String,
    pub profile: String,
    pub pid_file: String,
}

/// Which JBoss layout a controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// JBoss EAP 5 `run.sh`/`shutdown.sh` layout.
    JBoss,
    /// JBoss EAP 6 `standalone.sh` layout.
    Eap6Standalone,
}

impl std::str::FromStr for ControllerKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jboss" | "eap5" => Ok(Self::JBoss),
            "eap6-standalone" | "eap6" | "standalone" => Ok(Self::Eap6Standalone),
            other => Err(format!("unknown controller kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_options_defaults() {
        let options = StandaloneOptions::new();
        assert!(options.clean_logs);
        assert!(options.java_options.is_empty());
        assert!(options.agent_options.is_empty());
        assert_eq!(options.module_system_packages.iter().count(), 2);
    }

    #[test]
    fn test_standalone_options_builder() {
        let options = StandaloneOptions::new()
            .with_java_options("-Dsun.rmi.transport.tcp.responseTimeout=30000")
            .with_agent_options("agetnOpt:test")
            .with_module_system_package("my.test.package")
            .with_clean_logs(false);

        assert!(!options.clean_logs);
        assert_eq!(options.agent_options, "agetnOpt:test");
        assert_eq!(
            options.module_system_packages.iter().last(),
            Some("my.test.package")
        );
    }

    #[test]
    fn test_controller_kind_from_str() {
        assert_eq!("jboss".parse::<ControllerKind>(), Ok(ControllerKind::JBoss));
        assert_eq!(
            "EAP6-Standalone".parse::<ControllerKind>(),
            Ok(ControllerKind::Eap6Standalone)
        );
        assert!("domain".parse::<ControllerKind>().is_err());
    }
}
