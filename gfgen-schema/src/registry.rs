//! Named database configuration groups

use std::collections::HashMap;

use crate::ddl::DdlIntrospector;
use crate::error::{Result, SchemaError};
use crate::introspector::SchemaIntrospector;
use crate::link::{ConnectionNode, DriverKind, NodeConfig};
use crate::mysql::MySqlIntrospector;

/// Registry of connection groups, keyed by group name
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    groups: HashMap<String, ConnectionNode>,
    /// Configured groups that failed to resolve, reported again on `connect`
    invalid: HashMap<String, NodeConfig>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the `database` section of a configuration document.
    ///
    /// A group that fails to resolve is logged here and its error is returned
    /// by [`connect`](Self::connect) when a job uses it.
    pub fn from_config(nodes: HashMap<String, NodeConfig>) -> Self {
        let mut registry = Self::new();
        for (group, config) in nodes {
            match config.clone().into_node() {
                Ok(node) => registry.insert(group, node),
                Err(e) => {
                    tracing::warn!("invalid database group \"{}\": {}", group, e);
                    registry.invalid.insert(group, config);
                }
            }
        }
        registry
    }

    pub fn insert(&mut self, group: impl Into<String>, node: ConnectionNode) {
        let group = group.into();
        self.invalid.remove(&group);
        self.groups.insert(group, node);
    }

    pub fn get(&self, group: &str) -> Option<&ConnectionNode> {
        self.groups.get(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Register a one-off link under a fresh group name and return that name.
    ///
    /// The name is derived from the current timestamp in nanoseconds.
    pub fn register_temporary(&mut self, link: &str) -> Result<String> {
        let node = ConnectionNode::parse(link)?;
        let mut stamp = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        while self.groups.contains_key(&stamp.to_string())
            || self.invalid.contains_key(&stamp.to_string())
        {
            stamp += 1;
        }
        let group = stamp.to_string();
        tracing::debug!("registered temporary database group {}", group);
        self.groups.insert(group.clone(), node);
        Ok(group)
    }

    /// Open an introspector for a group.
    ///
    /// A configured group that failed to resolve reports its own error, not
    /// [`SchemaError::UnknownGroup`].
    pub fn connect(&self, group: &str) -> Result<Box<dyn SchemaIntrospector>> {
        let node = match (self.groups.get(group), self.invalid.get(group)) {
            (Some(node), _) => node.clone(),
            (None, Some(config)) => config.clone().into_node()?,
            (None, None) => return Err(SchemaError::UnknownGroup(group.to_string())),
        };
        match node.driver {
            DriverKind::MySql => Ok(Box::new(MySqlIntrospector::connect(&node.link)?)),
            DriverKind::Ddl => Ok(Box::new(DdlIntrospector::from_file(&node.link)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_temporary_is_unique() {
        let mut registry = ConnectionRegistry::new();
        let a = registry.register_temporary("mysql:root@tcp(127.0.0.1:3306)/a").unwrap();
        let b = registry.register_temporary("mysql:root@tcp(127.0.0.1:3306)/b").unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.get(&a).unwrap().link, "root@tcp(127.0.0.1:3306)/a");
        assert_eq!(registry.get(&b).unwrap().link, "root@tcp(127.0.0.1:3306)/b");
    }

    #[test]
    fn test_register_temporary_rejects_bad_link() {
        let mut registry = ConnectionRegistry::new();
        assert!(registry.register_temporary("nonsense").is_err());
    }

    #[test]
    fn test_connect_unknown_group() {
        let registry = ConnectionRegistry::new();
        assert!(matches!(
            registry.connect("default"),
            Err(SchemaError::UnknownGroup(ref g)) if g == "default"
        ));
    }

    #[test]
    fn test_from_config_keeps_invalid_group_errors() {
        let mut nodes = HashMap::new();
        nodes.insert(
            "default".to_string(),
            NodeConfig {
                link: Some("mysql:root@tcp(127.0.0.1:3306)/test".into()),
                ..Default::default()
            },
        );
        nodes.insert(
            "broken".to_string(),
            NodeConfig {
                link: Some("oracle:x".into()),
                ..Default::default()
            },
        );
        let registry = ConnectionRegistry::from_config(nodes);
        assert!(registry.contains("default"));
        assert!(!registry.contains("broken"));
        assert!(matches!(
            registry.connect("broken"),
            Err(SchemaError::UnsupportedDriver(ref d)) if d == "oracle"
        ));
        assert!(matches!(
            registry.connect("missing"),
            Err(SchemaError::UnknownGroup(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_ddl_group() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        std::fs::write(&path, "CREATE TABLE user (id INT PRIMARY KEY, name VARCHAR(20));").unwrap();

        let mut registry = ConnectionRegistry::new();
        let group = registry
            .register_temporary(&format!("sql:{}", path.display()))
            .unwrap();
        let db = registry.connect(&group).unwrap();
        assert_eq!(db.tables().await.unwrap(), vec!["user"]);
        assert_eq!(db.table_fields("user").await.unwrap().len(), 2);
    }
}
