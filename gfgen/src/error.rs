//! Error types for gfgen

use std::path::PathBuf;

use gfgen_schema::SchemaError;
use thiserror::Error;

/// Result type alias for gfgen operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GenError {
    /// Missing or invalid options, unknown naming case, unreadable template override
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output path or module information missing from the working directory
    #[error("Environment error: {0}")]
    Environment(String),

    /// Connection or introspection failure
    #[error("{}", database_message(.table.as_deref(), .source))]
    Database {
        table: Option<String>,
        #[source]
        source: SchemaError,
    },

    /// A generated file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template override could not be read
    #[error("Failed to read template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn database_message(table: Option<&str>, source: &SchemaError) -> String {
    match table {
        Some(table) => format!("Database error on table \"{table}\": {source}"),
        None => format!("Database error: {source}"),
    }
}

impl GenError {
    /// Wrap a schema error that is not tied to one table
    pub fn database(source: SchemaError) -> Self {
        GenError::Database {
            table: None,
            source,
        }
    }

    /// Wrap a schema error raised while introspecting `table`
    pub fn table(table: &str, source: SchemaError) -> Self {
        GenError::Database {
            table: Some(table.to_string()),
            source,
        }
    }
}

impl From<SchemaError> for GenError {
    fn from(err: SchemaError) -> Self {
        GenError::database(err)
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_names_table() {
        let err = GenError::table("user", SchemaError::TableNotFound("user".into()));
        assert_eq!(
            err.to_string(),
            "Database error on table \"user\": Table not found: user"
        );
    }

    #[test]
    fn test_write_error_names_path() {
        let err = GenError::Write {
            path: PathBuf::from("internal/dao/user.go"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("internal/dao/user.go"));
    }
}
