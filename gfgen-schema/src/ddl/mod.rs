//! Schema introspection from a DDL file, using sqlparser-rs
//!
//! Lets the generator run against a checked-in `schema.sql` without a live
//! database server. Only `CREATE TABLE` statements are considered.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlparser::ast::{
    ColumnDef, ColumnOption, CreateTable, Expr, IndexColumn, IndexConstraint, ObjectName,
    PrimaryKeyConstraint, Statement, TableConstraint, UniqueConstraint, Value,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use crate::error::{Result, SchemaError};
use crate::field::{KeyRole, TableField};
use crate::introspector::SchemaIntrospector;

/// Introspector over the `CREATE TABLE` statements of a SQL script
#[derive(Debug, Clone, Default)]
pub struct DdlIntrospector {
    tables: Vec<(String, Vec<TableField>)>,
}

impl DdlIntrospector {
    /// Read and parse a schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let sql = std::fs::read_to_string(path.as_ref())?;
        Self::from_sql(&sql)
    }

    /// Parse a schema from a SQL string
    pub fn from_sql(sql: &str) -> Result<Self> {
        let dialect = MySqlDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        let mut tables = Vec::new();
        for stmt in statements {
            if let Statement::CreateTable(create) = stmt {
                tables.push(extract_table(&create));
            }
        }
        tracing::debug!("parsed {} tables from DDL", tables.len());
        Ok(Self { tables })
    }

    /// Table names in declaration order
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|(name, _)| name.clone()).collect()
    }
}

#[async_trait]
impl SchemaIntrospector for DdlIntrospector {
    async fn tables(&self) -> Result<Vec<String>> {
        Ok(self.table_names())
    }

    async fn table_fields(&self, table: &str) -> Result<HashMap<String, TableField>> {
        let (_, fields) = self
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))?;
        Ok(fields
            .iter()
            .map(|f| (f.name.clone(), f.clone()))
            .collect())
    }
}

fn extract_table(create: &CreateTable) -> (String, Vec<TableField>) {
    let name = object_name(&create.name);
    let mut fields: Vec<TableField> = create
        .columns
        .iter()
        .enumerate()
        .map(|(index, col)| extract_column(index, col))
        .collect();

    // Stronger roles win: PRI over UNI over MUL
    let mut assign = |column: &str, role: KeyRole| {
        if let Some(field) = fields.iter_mut().find(|f| f.name == column) {
            let rank = |k: KeyRole| match k {
                KeyRole::Primary => 3,
                KeyRole::Unique => 2,
                KeyRole::Multiple => 1,
                KeyRole::None => 0,
            };
            if rank(role) > rank(field.key) {
                field.key = role;
            }
            if role.is_primary() {
                field.null = false;
            }
        }
    };

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(PrimaryKeyConstraint { columns, .. }) => {
                for col in columns {
                    assign(&index_column(col), KeyRole::Primary);
                }
            }
            TableConstraint::Unique(UniqueConstraint { columns, .. }) => {
                let role = if columns.len() == 1 {
                    KeyRole::Unique
                } else {
                    KeyRole::Multiple
                };
                if let Some(first) = columns.first() {
                    assign(&index_column(first), role);
                }
            }
            TableConstraint::Index(IndexConstraint { columns, .. }) => {
                if let Some(first) = columns.first() {
                    assign(&index_column(first), KeyRole::Multiple);
                }
            }
            _ => {}
        }
    }

    (name, fields)
}

fn extract_column(index: usize, col: &ColumnDef) -> TableField {
    let mut field = TableField::new(index, col.name.value.clone(), col.data_type.to_string());

    for option in &col.options {
        match &option.option {
            ColumnOption::NotNull => field.null = false,
            ColumnOption::Null => field.null = true,
            ColumnOption::Default(expr) => field.default = Some(default_text(expr)),
            ColumnOption::PrimaryKey(_) => {
                field.key = KeyRole::Primary;
                field.null = false;
            }
            ColumnOption::Unique(_) => {
                if !field.key.is_primary() {
                    field.key = KeyRole::Unique;
                }
            }
            ColumnOption::Comment(c) => field.comment = c.clone(),
            ColumnOption::DialectSpecific(tokens) => {
                let text = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                if text.to_ascii_uppercase().contains("AUTO_INCREMENT") {
                    field.extra = "auto_increment".to_string();
                }
            }
            _ => {}
        }
    }
    field
}

/// Render a default expression the way `SHOW COLUMNS` would, without quotes
fn default_text(expr: &Expr) -> String {
    match expr {
        Expr::Value(v) => match &v.value {
            Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => s.clone(),
            Value::Null => "NULL".to_string(),
            other => other.to_string(),
        },
        other => other.to_string(),
    }
}

fn object_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => other.to_string(),
    }
}
