//! Error types for gfgen-schema

use thiserror::Error;

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur while connecting to or introspecting a database
#[derive(Error, Debug)]
pub enum SchemaError {
    /// MySQL driver error
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// DDL file could not be parsed
    #[error("Failed to parse SQL schema: {0}")]
    Parse(String),

    /// Connection link could not be understood
    #[error("Invalid database link \"{link}\": {reason}")]
    InvalidLink { link: String, reason: String },

    /// Driver type named in a link is not supported
    #[error("Unsupported database type: {0}")]
    UnsupportedDriver(String),

    /// No connection group with the given name is configured
    #[error("Database configuration group not found: {0}")]
    UnknownGroup(String),

    /// Table does not exist in the schema source
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column missing from an introspection row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Row value could not be decoded
    #[error("Failed to decode row: {0}")]
    RowDecode(String),

    /// IO error while reading a schema file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlparser::parser::ParserError> for SchemaError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        SchemaError::Parse(err.to_string())
    }
}
