//! DAO generator - renders the dao index and dao internal files of one table

use std::path::Path;

use gfgen_schema::TableField;

use super::naming::{to_camel, to_camel_lower, to_snake};
use super::struct_generator::{column_definitions, column_names};
use super::template::{
    render, TemplateKind, TemplateValues, Templates, TPL_COLUMN_DEFINE, TPL_COLUMN_NAMES,
    TPL_GROUP_NAME, TPL_IMPORT_PREFIX, TPL_TABLE_NAME, TPL_TABLE_NAME_CAMEL_CASE,
    TPL_TABLE_NAME_CAMEL_LOWER_CASE,
};
use super::writer::{Artifact, ArtifactKind, WritePolicy};

/// One table to generate, with its derived names and ordered fields
#[derive(Debug, Clone, PartialEq)]
pub struct TableJob {
    /// Raw table name in the database
    pub table_name: String,
    /// Table name after prefix removal and addition
    pub target_name: String,
    /// Go file name without extension
    pub file_name: String,
    /// Fields in declaration order
    pub fields: Vec<TableField>,
}

impl TableJob {
    pub fn new(table_name: impl Into<String>, target_name: impl Into<String>, fields: Vec<TableField>) -> Self {
        let target_name = target_name.into();
        Self {
            table_name: table_name.into(),
            file_name: file_name(&target_name),
            target_name,
            fields,
        }
    }

    /// `UserDetail`
    pub fn struct_name(&self) -> String {
        to_camel(&self.target_name)
    }

    /// `userDetail`
    pub fn struct_name_lower(&self) -> String {
        to_camel_lower(&self.target_name)
    }
}

/// Go file name for a target name.
///
/// Go treats `_test.go` files as tests, so such names get a `_table` suffix.
pub fn file_name(target_name: &str) -> String {
    let name = to_snake(target_name)
        .trim_matches(|c| c == '-' || c == '_' || c == '.')
        .to_string();
    if name.ends_with("_test") {
        format!("{name}_table")
    } else {
        name
    }
}

/// The seeded `dao/<file>.go`, kept across runs unless `overwrite` is set
pub fn dao_index(
    table: &TableJob,
    templates: &Templates,
    import_prefix: &str,
    dao_dir: &Path,
    overwrite: bool,
) -> Artifact {
    let values = TemplateValues::new()
        .set(TPL_IMPORT_PREFIX, import_prefix)
        .set(TPL_TABLE_NAME, table.table_name.as_str())
        .set(TPL_TABLE_NAME_CAMEL_CASE, table.struct_name())
        .set(TPL_TABLE_NAME_CAMEL_LOWER_CASE, table.struct_name_lower());
    Artifact {
        kind: ArtifactKind::DaoIndex,
        path: dao_dir.join(format!("{}.go", table.file_name)),
        policy: if overwrite {
            WritePolicy::Overwrite
        } else {
            WritePolicy::KeepExisting
        },
        content: render(templates.get(TemplateKind::DaoIndex), &values),
    }
}

/// The regenerated `dao/internal/<file>.go`
pub fn dao_internal(
    table: &TableJob,
    templates: &Templates,
    import_prefix: &str,
    group: &str,
    dao_dir: &Path,
) -> Artifact {
    let values = TemplateValues::new()
        .set(TPL_IMPORT_PREFIX, import_prefix)
        .set(TPL_TABLE_NAME, table.table_name.as_str())
        .set(TPL_GROUP_NAME, group)
        .set(TPL_TABLE_NAME_CAMEL_CASE, table.struct_name())
        .set(TPL_TABLE_NAME_CAMEL_LOWER_CASE, table.struct_name_lower())
        .set(TPL_COLUMN_DEFINE, column_definitions(&table.fields))
        .set(TPL_COLUMN_NAMES, column_names(&table.fields));
    Artifact {
        kind: ArtifactKind::DaoInternal,
        path: dao_dir
            .join("internal")
            .join(format!("{}.go", table.file_name)),
        policy: WritePolicy::Overwrite,
        content: render(templates.get(TemplateKind::DaoInternal), &values),
    }
}
