//! Decoding of `SHOW FULL COLUMNS` rows

use mysql_async::{Row, Value};

use crate::error::{Result, SchemaError};
use crate::field::{KeyRole, TableField};

/// Read a column of the row as text. SQL NULL becomes `None`.
fn text(row: &Row, column: &str) -> Result<Option<String>> {
    let idx = row
        .columns_ref()
        .iter()
        .position(|c| c.name_str().eq_ignore_ascii_case(column))
        .ok_or_else(|| SchemaError::ColumnNotFound(column.to_string()))?;
    let value = row
        .as_ref(idx)
        .ok_or_else(|| SchemaError::RowDecode(format!("value of {column} was already taken")))?;
    Ok(match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::Int(v) => Some(v.to_string()),
        Value::UInt(v) => Some(v.to_string()),
        other => Some(other.as_sql(true).trim_matches('\'').to_string()),
    })
}

/// Build a [`TableField`] out of one row, `index` being the row position.
pub(crate) fn field_from_row(index: usize, row: &Row) -> Result<TableField> {
    let name = text(row, "Field")?.ok_or_else(|| SchemaError::RowDecode("empty Field".into()))?;
    let sql_type = text(row, "Type")?.unwrap_or_default();
    Ok(TableField {
        index,
        name,
        sql_type,
        null: text(row, "Null")?.is_some_and(|v| v.eq_ignore_ascii_case("yes")),
        key: KeyRole::from_mysql_key(&text(row, "Key")?.unwrap_or_default()),
        default: text(row, "Default")?,
        extra: text(row, "Extra")?.unwrap_or_default(),
        comment: text(row, "Comment")?.unwrap_or_default(),
    })
}
