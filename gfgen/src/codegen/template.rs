//! Placeholder substitution for `{TplXxx}` tokens

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{GenError, Result};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{Tpl[A-Za-z0-9]*\}").expect("placeholder regex should be valid"));

/// Artifact kinds that are rendered from a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    DaoIndex,
    DaoInternal,
    ModelIndex,
    ModelStruct,
    ModelForDaoIndex,
    ModelForDaoStruct,
}

impl TemplateKind {
    /// Compiled-in template text
    pub fn default_content(&self) -> &'static str {
        match self {
            TemplateKind::DaoIndex => include_str!("templates/dao_index.go.tpl"),
            TemplateKind::DaoInternal => include_str!("templates/dao_internal.go.tpl"),
            TemplateKind::ModelIndex => include_str!("templates/model_index.go.tpl"),
            TemplateKind::ModelStruct => include_str!("templates/model_struct.go.tpl"),
            TemplateKind::ModelForDaoIndex => include_str!("templates/model_for_dao_index.go.tpl"),
            TemplateKind::ModelForDaoStruct => {
                include_str!("templates/model_for_dao_struct.go.tpl")
            }
        }
    }
}

/// Override files for the customizable template kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateOverrides {
    pub dao_index: Option<PathBuf>,
    pub dao_internal: Option<PathBuf>,
    pub model_index: Option<PathBuf>,
    pub model_struct: Option<PathBuf>,
}

/// Template sources resolved for one job
#[derive(Debug, Clone)]
pub struct Templates {
    overrides: HashMap<TemplateKind, String>,
}

impl Templates {
    /// Built-in templates only
    pub fn builtin() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Read every configured override file.
    ///
    /// Fails on the first file that is missing or unreadable, before anything
    /// has been generated.
    pub fn load(overrides: &TemplateOverrides, work_dir: &Path) -> Result<Self> {
        let mut loaded = HashMap::new();
        let configured = [
            (TemplateKind::DaoIndex, &overrides.dao_index),
            (TemplateKind::DaoInternal, &overrides.dao_internal),
            (TemplateKind::ModelIndex, &overrides.model_index),
            (TemplateKind::ModelStruct, &overrides.model_struct),
        ];
        for (kind, path) in configured {
            let Some(path) = path else { continue };
            let path = work_dir.join(path);
            let content = std::fs::read_to_string(&path).map_err(|source| GenError::Template {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("using template {} for {:?}", path.display(), kind);
            loaded.insert(kind, content);
        }
        Ok(Self { overrides: loaded })
    }

    pub fn get(&self, kind: TemplateKind) -> &str {
        self.overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_content())
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Values substituted into a template, keyed by the full token (`{TplTableName}`)
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: HashMap<&'static str, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, token: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(token, value.into());
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }
}

/// Replace every known `{TplXxx}` token in one pass.
///
/// Unknown tokens stay as they are and substituted text is not scanned again.
pub fn render(template: &str, values: &TemplateValues) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let token = &caps[0];
            values.get(token).unwrap_or(token).to_string()
        })
        .into_owned()
}

pub const TPL_IMPORT_PREFIX: &str = "{TplImportPrefix}";
pub const TPL_TABLE_NAME: &str = "{TplTableName}";
pub const TPL_GROUP_NAME: &str = "{TplGroupName}";
pub const TPL_TABLE_NAME_CAMEL_CASE: &str = "{TplTableNameCamelCase}";
pub const TPL_TABLE_NAME_CAMEL_LOWER_CASE: &str = "{TplTableNameCamelLowerCase}";
pub const TPL_COLUMN_DEFINE: &str = "{TplColumnDefine}";
pub const TPL_COLUMN_NAMES: &str = "{TplColumnNames}";
pub const TPL_PACKAGE_IMPORTS: &str = "{TplPackageImports}";
pub const TPL_MODEL_STRUCTS: &str = "{TplModelStructs}";
pub const TPL_STRUCT_DEFINE: &str = "{TplStructDefine}";
