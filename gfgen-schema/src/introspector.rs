//! Introspector trait consumed by the generator

use std::collections::HashMap;

use crate::error::Result;
use crate::field::TableField;
use async_trait::async_trait;

/// Trait for schema sources.
///
/// This trait abstracts over different backends (a live MySQL server, a DDL
/// file) so that the generator only deals with table names and column metadata.
///
/// Futures returned by these methods can be cancelled by dropping them; no
/// timeout is imposed here. Callers wanting one wrap the call themselves.
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// List all table names of the schema.
    async fn tables(&self) -> Result<Vec<String>>;

    /// Fetch the columns of a table, keyed by column name.
    ///
    /// The map carries no ordering. Use [`TableField::index`] to recover the
    /// declaration order.
    async fn table_fields(&self, table: &str) -> Result<HashMap<String, TableField>>;

    /// Release any held connections.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
