//! Connection links of the form `type:connection-string`

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, SchemaError};

static TYPED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([a-z]+):(.+)$").expect("typed link regex should be valid"));

/// Backend a connection node talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// MySQL protocol (`mysql`, `mariadb`, `tidb`)
    MySql,
    /// DDL schema file (`sql`, `ddl`)
    Ddl,
}

impl DriverKind {
    /// Resolve a driver from the type prefix of a link
    pub fn from_type(kind: &str) -> Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" | "tidb" => Ok(DriverKind::MySql),
            "sql" | "ddl" => Ok(DriverKind::Ddl),
            other => Err(SchemaError::UnsupportedDriver(other.to_string())),
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverKind::MySql => f.write_str("mysql"),
            DriverKind::Ddl => f.write_str("sql"),
        }
    }
}

/// One resolved database configuration node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionNode {
    pub driver: DriverKind,
    /// Driver specific connection string, without the type prefix
    pub link: String,
}

impl ConnectionNode {
    /// Parse a `type:connection-string` link.
    ///
    /// `mysql://` URLs are accepted as they are.
    pub fn parse(link: &str) -> Result<Self> {
        let trimmed = link.trim();
        if trimmed.starts_with("mysql://") {
            return Ok(Self {
                driver: DriverKind::MySql,
                link: trimmed.to_string(),
            });
        }
        let caps = TYPED_LINK
            .captures(trimmed)
            .ok_or_else(|| SchemaError::InvalidLink {
                link: link.to_string(),
                reason: "expected \"type:connection-string\"".into(),
            })?;
        Ok(Self {
            driver: DriverKind::from_type(&caps[1])?,
            link: caps[2].trim().to_string(),
        })
    }
}

/// Configuration node as written under `database.<group>` in a config document.
///
/// Either `link` (optionally typed) or the discrete `host`/`port`/`user`/`pass`/`name`
/// fields may be used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NodeConfig {
    /// Turn the configured fields into a connection node
    pub fn into_node(self) -> Result<ConnectionNode> {
        if let Some(link) = self.link.filter(|l| !l.trim().is_empty()) {
            let link = link.trim();
            return match self.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
                Some(kind) => {
                    let prefix = format!("{kind}:");
                    Ok(ConnectionNode {
                        driver: DriverKind::from_type(kind)?,
                        link: link.strip_prefix(&prefix).unwrap_or(link).trim().to_string(),
                    })
                }
                None => ConnectionNode::parse(link),
            };
        }

        let kind = self.kind.unwrap_or_else(|| "mysql".to_string());
        let driver = DriverKind::from_type(&kind)?;
        let host = self.host.unwrap_or_else(|| "127.0.0.1".to_string());
        let port = self.port.unwrap_or_else(|| "3306".to_string());
        let name = self.name.unwrap_or_default();
        let link = match driver {
            DriverKind::MySql => {
                let credentials = match (self.user, self.pass) {
                    (Some(user), Some(pass)) => format!("{user}:{pass}@"),
                    (Some(user), None) => format!("{user}@"),
                    _ => String::new(),
                };
                format!("{credentials}tcp({host}:{port})/{name}")
            }
            DriverKind::Ddl => name,
        };
        Ok(ConnectionNode { driver, link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goframe_link() {
        let node = ConnectionNode::parse("mysql:root:12345678@tcp(127.0.0.1:3306)/test").unwrap();
        assert_eq!(node.driver, DriverKind::MySql);
        assert_eq!(node.link, "root:12345678@tcp(127.0.0.1:3306)/test");
    }

    #[test]
    fn test_parse_url_link() {
        let node = ConnectionNode::parse("mysql://root@localhost:3306/test").unwrap();
        assert_eq!(node.driver, DriverKind::MySql);
        assert_eq!(node.link, "mysql://root@localhost:3306/test");
    }

    #[test]
    fn test_parse_ddl_link() {
        let node = ConnectionNode::parse("sql:./schema.sql").unwrap();
        assert_eq!(node.driver, DriverKind::Ddl);
        assert_eq!(node.link, "./schema.sql");
    }

    #[test]
    fn test_parse_rejects_unknown_driver() {
        let err = ConnectionNode::parse("oracle:scott/tiger@db").unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedDriver(ref d) if d == "oracle"));
    }

    #[test]
    fn test_parse_rejects_untyped_link() {
        assert!(matches!(
            ConnectionNode::parse("127.0.0.1:3306"),
            Err(SchemaError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_node_config_from_discrete_fields() {
        let node = NodeConfig {
            host: Some("db.local".into()),
            port: Some("3307".into()),
            user: Some("app".into()),
            pass: Some("secret".into()),
            name: Some("shop".into()),
            ..Default::default()
        }
        .into_node()
        .unwrap();
        assert_eq!(node.driver, DriverKind::MySql);
        assert_eq!(node.link, "app:secret@tcp(db.local:3307)/shop");
    }

    #[test]
    fn test_node_config_untyped_link_with_type() {
        let node = NodeConfig {
            kind: Some("mysql".into()),
            link: Some("root:secret@tcp(127.0.0.1:3306)/test".into()),
            ..Default::default()
        }
        .into_node()
        .unwrap();
        assert_eq!(node.driver, DriverKind::MySql);
        assert_eq!(node.link, "root:secret@tcp(127.0.0.1:3306)/test");
    }
}
