//! Column metadata returned by introspection

use serde::{Deserialize, Serialize};

/// Key role of a column as reported by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyRole {
    /// Part of the primary key (`PRI`)
    Primary,
    /// Covered by a unique index (`UNI`)
    Unique,
    /// First column of a non-unique index (`MUL`)
    Multiple,
    #[default]
    None,
}

impl KeyRole {
    /// Parse MySQL's `Key` column (`PRI`, `UNI`, `MUL`, empty).
    ///
    /// Matching is by case-insensitive substring so that dialects reporting
    /// `primary` or `unique` map the same way.
    pub fn from_mysql_key(key: &str) -> Self {
        let key = key.to_ascii_lowercase();
        if key.contains("pri") {
            KeyRole::Primary
        } else if key.contains("uni") {
            KeyRole::Unique
        } else if key.contains("mul") {
            KeyRole::Multiple
        } else {
            KeyRole::None
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, KeyRole::Primary)
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, KeyRole::Unique)
    }
}

/// Metadata for one table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableField {
    /// Declared position of the column, zero-based. Not guaranteed contiguous.
    pub index: usize,

    /// Raw column name
    pub name: String,

    /// Column type as reported, e.g. `varchar(255)` or `int(10) unsigned`
    pub sql_type: String,

    /// Whether the column accepts NULL
    pub null: bool,

    /// Key role (primary, unique, ...)
    pub key: KeyRole,

    /// Default value expression (if any)
    pub default: Option<String>,

    /// Extra attributes, e.g. `auto_increment`
    pub extra: String,

    /// Column comment, may span several lines
    pub comment: String,
}

impl TableField {
    /// Create a field with the given position, name and type and no other attributes
    pub fn new(index: usize, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            sql_type: sql_type.into(),
            null: true,
            key: KeyRole::None,
            default: None,
            extra: String::new(),
            comment: String::new(),
        }
    }

    pub fn with_key(mut self, key: KeyRole) -> Self {
        self.key = key;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn not_null(mut self) -> Self {
        self.null = false;
        self
    }

    /// Check if this column is auto-increment
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }
}
