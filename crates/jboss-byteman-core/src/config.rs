use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::{CoreError, Result};

type Properties = HashMap<String, String>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    global: Properties,
    #[serde(default)]
    nodes: HashMap<String, Properties>,
}

/// Key-value configuration shared by every node controller.
///
/// Properties live either in the global section or in a node section; node
/// values shadow global ones. The store is meant to be wrapped in an `Arc` and
/// handed to each controller through [`ClusterConfig::node`].
#[derive(Debug, Default)]
pub struct ClusterConfig {
    global: RwLock<Properties>,
    nodes: RwLock<HashMap<String, Properties>>,
}

impl ClusterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: ConfigDocument =
            serde_json::from_str(json).map_err(|e| CoreError::ConfigLoad(e.to_string()))?;

        debug!(
            global = document.global.len(),
            nodes = document.nodes.len(),
            "cluster configuration parsed"
        );

        Ok(Self {
            global: RwLock::new(document.global),
            nodes: RwLock::new(document.nodes),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoreError::ConfigLoad(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Returns a view of this store scoped to `node_id`.
    pub fn node(self: &Arc<Self>, node_id: impl Into<String>) -> NodeConfig {
        NodeConfig {
            node_id: node_id.into(),
            store: Arc::clone(self),
        }
    }

    pub fn set_global(&self, key: impl Into<String>, value: impl Into<String>) {
        write(&self.global).insert(key.into(), value.into());
    }

    pub fn set_node_property(
        &self,
        node_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        write(&self.nodes)
            .entry(node_id.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn remove_node_property(&self, node_id: &str, key: &str) -> Option<String> {
        write(&self.nodes)
            .get_mut(node_id)
            .and_then(|properties| properties.remove(key))
    }

    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = read(&self.nodes).keys().cloned().collect();
        ids.sort();
        ids
    }

    fn lookup(&self, node_id: &str, key: &str) -> Option<String> {
        if let Some(value) = read(&self.nodes)
            .get(node_id)
            .and_then(|properties| properties.get(key))
        {
            return Some(value.clone());
        }
        read(&self.global).get(key).cloned()
    }
}

// A panic while holding the lock cannot leave a map half-updated, so a
// poisoned lock is still safe to use.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Configuration of a single node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    node_id: String,
    store: Arc<ClusterConfig>,
}

impl NodeConfig {
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.lookup(&self.node_id, key)
    }

    pub fn get_or(&self, key: &str, default: impl Into<String>) -> String {
        self.get(key).unwrap_or_else(|| default.into())
    }

    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| CoreError::MissingProperty {
            node: self.node_id.clone(),
            key: key.to_string(),
        })
    }

    /// Looks up `key`, falling back to `fallback_key` when it is unset.
    pub fn require_either(&self, key: &str, fallback_key: &str) -> Result<String> {
        match self.get(key) {
            Some(value) => Ok(value),
            None => self.require(fallback_key),
        }
    }

    pub fn get_port(&self, key: &str, default: u16) -> Result<u16> {
        match self.get(key) {
            Some(raw) => raw.trim().parse().map_err(|_| CoreError::InvalidProperty {
                node: self.node_id.clone(),
                key: key.to_string(),
                reason: format!("'{raw}' is not a port number"),
            }),
            None => Ok(default),
        }
    }

    /// Splits a comma separated property into its non-empty, trimmed entries.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToString::to_string)
                .collect()
        })
    }
}
