//! Live MySQL schema introspection

mod dsn;
mod row;

use std::collections::HashMap;

use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Pool, Row};

use crate::error::Result;
use crate::field::TableField;
use crate::introspector::SchemaIntrospector;

pub use dsn::{opts_from_link, Dsn, Transport};

/// Introspector backed by a MySQL compatible server.
///
/// Cloning is cheap: the inner pool is `Arc`-backed, so all clones share the
/// same connections.
///
/// # Example
///
/// ```ignore
/// use gfgen_schema::{MySqlIntrospector, SchemaIntrospector};
///
/// let db = MySqlIntrospector::connect("root:secret@tcp(127.0.0.1:3306)/test")?;
/// for table in db.tables().await? {
///     println!("{table}");
/// }
/// db.close().await?;
/// ```
#[derive(Clone)]
pub struct MySqlIntrospector {
    pool: Pool,
}

impl MySqlIntrospector {
    /// Create an introspector from a GoFrame DSN or a `mysql://` URL.
    ///
    /// No connection is opened until the first query.
    pub fn connect(link: &str) -> Result<Self> {
        let opts = opts_from_link(link)?;
        Ok(Self {
            pool: Pool::new(opts),
        })
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[async_trait]
impl SchemaIntrospector for MySqlIntrospector {
    async fn tables(&self) -> Result<Vec<String>> {
        let mut conn = self.pool.get_conn().await?;
        let tables: Vec<String> = conn.query("SHOW TABLES").await?;
        Ok(tables)
    }

    async fn table_fields(&self, table: &str) -> Result<HashMap<String, TableField>> {
        let mut conn = self.pool.get_conn().await?;
        let sql = format!("SHOW FULL COLUMNS FROM {}", quote_ident(table));
        let rows: Vec<Row> = conn.query(sql).await?;

        let mut fields = HashMap::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let field = row::field_from_row(index, row)?;
            fields.insert(field.name.clone(), field);
        }
        tracing::debug!("table {} has {} columns", table, fields.len());
        Ok(fields)
    }

    async fn close(&self) -> Result<()> {
        self.pool.clone().disconnect().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("user"), "`user`");
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_connect_rejects_bad_link() {
        assert!(MySqlIntrospector::connect("garbage").is_err());
    }

    #[tokio::test]
    async fn test_connect_is_lazy() {
        // Building the pool must not touch the network
        let db = MySqlIntrospector::connect("root@tcp(127.0.0.1:1)/none").unwrap();
        drop(db);
    }
}
