//! gfgen-schema - database schema introspection for gfgen
//!
//! Provides the [`SchemaIntrospector`] abstraction the generator consumes, plus
//! two backends:
//!
//! - [`MySqlIntrospector`]: a live MySQL server through `mysql_async`
//! - [`DdlIntrospector`]: `CREATE TABLE` statements read from a schema file
//!
//! Connections are looked up by group name through a [`ConnectionRegistry`],
//! which is an explicit value rather than process-wide state.
//!
//! # Example
//!
//! ```ignore
//! use gfgen_schema::{ConnectionRegistry, SchemaIntrospector};
//!
//! let mut registry = ConnectionRegistry::new();
//! let group = registry.register_temporary("mysql:root:secret@tcp(127.0.0.1:3306)/test")?;
//! let db = registry.connect(&group)?;
//! for table in db.tables().await? {
//!     let fields = db.table_fields(&table).await?;
//!     println!("{table}: {} columns", fields.len());
//! }
//! db.close().await?;
//! ```

pub mod ddl;
pub mod error;
pub mod field;
pub mod introspector;
pub mod link;
pub mod mysql;
pub mod registry;

pub use ddl::DdlIntrospector;
pub use error::{Result, SchemaError};
pub use field::{KeyRole, TableField};
pub use introspector::SchemaIntrospector;
pub use link::{ConnectionNode, DriverKind, NodeConfig};
pub use mysql::MySqlIntrospector;
pub use registry::ConnectionRegistry;
