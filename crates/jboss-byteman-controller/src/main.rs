use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jboss_byteman_controller::features::remote_exec::repo::ssh::DEFAULT_SSH_TIMEOUT;
use jboss_byteman_controller::{
    build_controller, BytemanAgentProperties, ControllerError, ControllerKind, RecordingExecutor,
    RemoteExecutor, SshExecutor, StandaloneOptions,
};
use jboss_byteman_core::ClusterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Start,
    Stop,
}

impl Action {
    fn from_arg(arg: Option<&str>) -> Result<Self, ControllerError> {
        match arg {
            Some("start") => Ok(Action::Start),
            Some("stop") => Ok(Action::Stop),
            other => Err(ControllerError::InvalidRequest(format!(
                "usage: jboss-byteman-ctl <start|stop> (got {other:?})"
            ))),
        }
    }
}

/// Everything the binary reads from its environment.
#[derive(Debug)]
struct Settings {
    config_path: String,
    node_id: String,
    kind: ControllerKind,
    ssh_timeout: Duration,
    dry_run: bool,
    options: StandaloneOptions,
}

impl Settings {
    fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ControllerError> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ControllerError::InvalidRequest(format!("{name} is not set")))
        };

        let kind = lookup("BYTEMAN_CONTROLLER")
            .unwrap_or_else(|| "eap6-standalone".to_string())
            .parse::<ControllerKind>()
            .map_err(ControllerError::InvalidRequest)?;
        let ssh_timeout = match lookup("BYTEMAN_SSH_TIMEOUT_SECS") {
            Some(value) => parse_timeout("BYTEMAN_SSH_TIMEOUT_SECS", &value)?,
            None => DEFAULT_SSH_TIMEOUT,
        };

        let mut options = StandaloneOptions::new()
            .with_java_options(lookup("BYTEMAN_JAVA_OPTS").unwrap_or_default())
            .with_agent_options(lookup("BYTEMAN_AGENT_OPTS").unwrap_or_default())
            .with_clean_logs(parse_flag("BYTEMAN_CLEAN_LOGS", lookup("BYTEMAN_CLEAN_LOGS"), true)?);
        if let Some(packages) = lookup("BYTEMAN_MODULE_PKGS") {
            for package in packages.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                options = options.with_module_system_package(package);
            }
        }

        Ok(Self {
            config_path: required("BYTEMAN_CLUSTER_CONFIG")?,
            node_id: required("BYTEMAN_NODE_ID")?,
            kind,
            ssh_timeout,
            dry_run: parse_flag("BYTEMAN_DRY_RUN", lookup("BYTEMAN_DRY_RUN"), false)?,
            options,
        })
    }
}

/// Accepts exactly `true` or `false`.
fn parse_flag(name: &str, value: Option<String>, default: bool) -> Result<bool, ControllerError> {
    match value {
        None => Ok(default),
        Some(value) => value.parse::<bool>().map_err(|_| {
            ControllerError::InvalidRequest(format!("{name} must be true or false, got {value:?}"))
        }),
    }
}

fn parse_timeout(name: &str, value: &str) -> Result<Duration, ControllerError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ControllerError::InvalidRequest(format!(
            "{name} must be a positive number of seconds, got {value:?}"
        ))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jboss_byteman_controller=info,info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let action = Action::from_arg(std::env::args().nth(1).as_deref())?;
    let settings = Settings::from_env()?;
    let Settings {
        config_path,
        node_id,
        kind,
        ssh_timeout,
        dry_run,
        options,
    } = settings;

    let config = Arc::new(ClusterConfig::from_file(&config_path)?);
    info!(%node_id, ?kind, ?action, %config_path, dry_run, "Starting JBoss byteman controller");

    let recorder = RecordingExecutor::new();
    let executor: Arc<dyn RemoteExecutor> = if dry_run {
        Arc::new(recorder.clone())
    } else {
        Arc::new(SshExecutor::new(config.clone()).with_timeout(ssh_timeout))
    };

    let controller = build_controller(
        kind,
        config.node(node_id.clone()),
        Arc::new(BytemanAgentProperties::new()),
        executor,
        options,
    )?;

    match action {
        Action::Start => controller.start().await?,
        Action::Stop => controller.stop().await?,
    }

    if dry_run {
        for record in recorder.records().await {
            println!("{}", serde_json::to_string(&record)?);
        }
    }

    info!(%node_id, "{:?} dispatched", action);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ControllerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("BYTEMAN_CLUSTER_CONFIG", "/etc/byteman/cluster.json"),
        ("BYTEMAN_NODE_ID", "server2"),
    ];

    fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        REQUIRED.iter().chain(extra).copied().collect()
    }

    #[test]
    fn test_action_from_arg() {
        assert_eq!(Action::from_arg(Some("start")).unwrap(), Action::Start);
        assert_eq!(Action::from_arg(Some("stop")).unwrap(), Action::Stop);
        assert!(Action::from_arg(Some("restart")).is_err());
        assert!(Action::from_arg(None).is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&REQUIRED).unwrap();
        assert_eq!(settings.config_path, "/etc/byteman/cluster.json");
        assert_eq!(settings.node_id, "server2");
        assert_eq!(settings.kind, ControllerKind::Eap6Standalone);
        assert_eq!(settings.ssh_timeout, DEFAULT_SSH_TIMEOUT);
        assert!(!settings.dry_run);
        assert!(settings.options.clean_logs);
        assert!(settings.options.java_options.is_empty());
    }

    #[test]
    fn test_missing_required_values() {
        let err = settings(&[("BYTEMAN_NODE_ID", "server2")]).unwrap_err();
        assert!(err.to_string().contains("BYTEMAN_CLUSTER_CONFIG"));

        let err = settings(&[("BYTEMAN_CLUSTER_CONFIG", "/etc/byteman/cluster.json")]).unwrap_err();
        assert!(err.to_string().contains("BYTEMAN_NODE_ID"));
    }

    #[test]
    fn test_explicit_values() {
        let settings = settings(&with_required(&[
            ("BYTEMAN_CONTROLLER", "jboss"),
            ("BYTEMAN_SSH_TIMEOUT_SECS", "5"),
            ("BYTEMAN_DRY_RUN", "true"),
            ("BYTEMAN_CLEAN_LOGS", "false"),
            ("BYTEMAN_JAVA_OPTS", "-Xmx1g"),
            ("BYTEMAN_AGENT_OPTS", "boot:/opt/byteman.jar"),
            ("BYTEMAN_MODULE_PKGS", "my.test.package, ,other.package"),
        ]))
        .unwrap();

        assert_eq!(settings.kind, ControllerKind::JBoss);
        assert_eq!(settings.ssh_timeout, Duration::from_secs(5));
        assert!(settings.dry_run);
        assert!(!settings.options.clean_logs);
        assert_eq!(settings.options.java_options, "-Xmx1g");
        assert_eq!(settings.options.agent_options, "boot:/opt/byteman.jar");
        assert_eq!(
            settings.options.module_system_packages.added(),
            ["my.test.package", "other.package"]
        );
    }

    #[test]
    fn test_flags_reject_anything_but_true_or_false() {
        for value in ["no", "0", "FALSE", "yes", "1", ""] {
            let err = settings(&with_required(&[("BYTEMAN_CLEAN_LOGS", value)])).unwrap_err();
            assert!(matches!(err, ControllerError::InvalidRequest(_)), "{value:?}");
            assert!(err.to_string().contains("BYTEMAN_CLEAN_LOGS"));

            let err = settings(&with_required(&[("BYTEMAN_DRY_RUN", value)])).unwrap_err();
            assert!(matches!(err, ControllerError::InvalidRequest(_)), "{value:?}");
            assert!(err.to_string().contains("BYTEMAN_DRY_RUN"));
        }
    }

    #[test]
    fn test_timeout_rejects_invalid_values() {
        for value in ["abc", "-1", "0", "1.5", ""] {
            let err = settings(&with_required(&[("BYTEMAN_SSH_TIMEOUT_SECS", value)])).unwrap_err();
            assert!(err.to_string().contains("BYTEMAN_SSH_TIMEOUT_SECS"), "{value:?}");
        }
    }

    #[test]
    fn test_unknown_controller_kind() {
        let err = settings(&with_required(&[("BYTEMAN_CONTROLLER", "domain")])).unwrap_err();
        assert!(matches!(err, ControllerError::InvalidRequest(_)));
    }
}
