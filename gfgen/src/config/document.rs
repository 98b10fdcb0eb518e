//! Configuration document loaded with config-rs (files + environment variables)

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat, Value, ValueKind};
use gfgen_schema::NodeConfig;
use tracing::debug;

use super::defaults;
use super::input::DaoInput;
use crate::error::{GenError, Result};

/// The merged configuration sources of one invocation
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    config: Config,
}

impl ConfigDocument {
    /// A document without any source
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load configuration using config-rs.
    ///
    /// With an explicit file, only that file is read (and must exist).
    /// Otherwise `config.*` and `config/config.*` in the working directory are
    /// tried. `GFGEN__`-prefixed environment variables override both.
    pub fn load(work_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = explicit {
            let path = work_dir.join(path);
            if !path.is_file() {
                return Err(GenError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        } else {
            for name in ["config", "config/config"] {
                let base = work_dir.join(name);
                builder = builder.add_source(File::with_name(&base.to_string_lossy()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX).separator(defaults::ENV_SEPARATOR),
        );

        Ok(Self {
            config: builder.build()?,
        })
    }

    /// Parse a document from a string, mainly for tests and embedding
    pub fn from_str(content: &str, format: FileFormat) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, format))
            .build()?;
        Ok(Self { config })
    }

    /// Elements of the dao configuration node.
    ///
    /// An array yields one input per element, a table yields a single input
    /// and an absent node yields none.
    pub fn dao_elements(&self) -> Result<Vec<DaoInput>> {
        let Ok(node) = self.config.get::<Value>(defaults::DAO_CONFIG_KEY) else {
            return Ok(Vec::new());
        };
        let invalid = |e: config::ConfigError| {
            GenError::Config(format!(
                "invalid configuration of \"{}\": {}",
                defaults::DAO_CONFIG_KEY,
                e
            ))
        };
        match node.kind {
            ValueKind::Array(items) => items
                .into_iter()
                .map(|item| item.try_deserialize::<DaoInput>().map_err(invalid))
                .collect(),
            ValueKind::Table(_) => Ok(vec![node.try_deserialize::<DaoInput>().map_err(invalid)?]),
            ValueKind::Nil => Ok(Vec::new()),
            _ => Err(GenError::Config(format!(
                "\"{}\" must be a table or an array of tables",
                defaults::DAO_CONFIG_KEY
            ))),
        }
    }

    /// Database groups configured under `database.<group>`.
    ///
    /// A group given as an array of nodes uses its first node. A group that
    /// cannot be read is a configuration error naming the group.
    pub fn database_groups(&self) -> Result<HashMap<String, NodeConfig>> {
        let Ok(groups) = self
            .config
            .get::<HashMap<String, Value>>(defaults::DATABASE_CONFIG_KEY)
        else {
            return Ok(HashMap::new());
        };

        let mut nodes = HashMap::new();
        for (group, value) in groups {
            let value = match value.kind {
                ValueKind::Array(items) => match items.into_iter().next() {
                    Some(first) => first,
                    None => continue,
                },
                _ => value,
            };
            let node = value.try_deserialize::<NodeConfig>().map_err(|e| {
                GenError::Config(format!(
                    "invalid configuration of database group \"{group}\": {e}"
                ))
            })?;
            debug!("database group \"{}\" configured", group);
            nodes.insert(group, node);
        }
        Ok(nodes)
    }

    /// Log level from `gfcli.logLevel`
    pub fn log_level(&self) -> Option<String> {
        ["gfcli.logLevel", "gfcli.loglevel"]
            .into_iter()
            .find_map(|key| self.config.get_string(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_of_jobs() {
        let doc = ConfigDocument::from_str(
            r#"
            [[gfcli.gen.dao]]
            link = "mysql:root@tcp(127.0.0.1:3306)/test"
            tables = "order,products"

            [[gfcli.gen.dao]]
            link = "mysql:root@tcp(127.0.0.1:3306)/primary"
            path = "./my-app"
            prefix = "primary_"
            "#,
            FileFormat::Toml,
        )
        .unwrap();
        let jobs = doc.dao_elements().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].tables,
            Some(vec!["order".to_string(), "products".to_string()])
        );
        assert_eq!(jobs[1].path.as_deref(), Some("./my-app"));
        assert_eq!(jobs[1].prefix.as_deref(), Some("primary_"));
    }

    #[test]
    fn test_single_job_table() {
        let doc = ConfigDocument::from_str(
            r#"
            gfcli:
              logLevel: debug
              gen:
                dao:
                  path: app
                  jsonCase: Snake
                  removePrefix: "gf_"
            "#,
            FileFormat::Yaml,
        )
        .unwrap();
        let jobs = doc.dao_elements().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].path.as_deref(), Some("app"));
        assert_eq!(jobs[0].json_case.as_deref(), Some("Snake"));
        assert_eq!(jobs[0].remove_prefix, Some(vec!["gf_".to_string()]));
        assert_eq!(doc.log_level().as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_node() {
        let doc = ConfigDocument::empty();
        assert!(doc.dao_elements().unwrap().is_empty());
        assert!(doc.database_groups().unwrap().is_empty());
        assert!(doc.log_level().is_none());
    }

    #[test]
    fn test_database_groups() {
        let doc = ConfigDocument::from_str(
            r#"
            [database.default]
            link = "mysql:root:secret@tcp(127.0.0.1:3306)/test"

            [[database.user]]
            host = "db.local"
            port = 3307
            user = "app"
            name = "users"
            "#,
            FileFormat::Toml,
        )
        .unwrap();
        let groups = doc.database_groups().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups["default"].link.as_deref(),
            Some("mysql:root:secret@tcp(127.0.0.1:3306)/test")
        );
        assert_eq!(groups["user"].port.as_deref(), Some("3307"));
    }

    #[test]
    fn test_unreadable_database_group_is_config_error() {
        let doc = ConfigDocument::from_str(
            "[database.broken]\nport = [3306, 3307]\n",
            FileFormat::Toml,
        )
        .unwrap();
        let err = doc.database_groups().unwrap_err();
        assert!(matches!(err, GenError::Config(ref msg) if msg.contains("\"broken\"")));
    }

    #[test]
    fn test_load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config").join("config.toml"),
            "[gfcli.gen.dao]\npath = \"internal\"\n",
        )
        .unwrap();
        let doc = ConfigDocument::load(dir.path(), None).unwrap();
        assert_eq!(doc.dao_elements().unwrap().len(), 1);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ConfigDocument::load(dir.path(), Some(Path::new("nope.yaml"))),
            Err(GenError::Config(_))
        ));
    }
}
