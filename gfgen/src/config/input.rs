//! Options of one dao generation job

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use super::defaults;
use crate::codegen::{NamingCase, RenderOptions, TemplateOverrides, TypeOptions};
use crate::error::{GenError, Result};

/// Raw options of one job, as given on the command line or by one element of
/// the `gfcli.gen.dao` configuration node. Every field is optional so that
/// sources can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoInput {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tables: Option<Vec<String>>,
    #[serde(default, alias = "tablesex", deserialize_with = "string_list")]
    pub tables_ex: Option<Vec<String>>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(
        default,
        alias = "removeprefix",
        alias = "remove-prefix",
        deserialize_with = "string_list"
    )]
    pub remove_prefix: Option<Vec<String>>,
    #[serde(default, alias = "jsoncase")]
    pub json_case: Option<String>,
    #[serde(default, alias = "importprefix")]
    pub import_prefix: Option<String>,
    /// Go module name, skips reading `go.mod`
    #[serde(default, rename = "mod")]
    pub module: Option<String>,
    #[serde(default, alias = "stdtime")]
    pub std_time: Option<bool>,
    #[serde(default, alias = "gjsonsupport")]
    pub g_json_support: Option<bool>,
    #[serde(default, alias = "overwritedao")]
    pub overwrite_dao: Option<bool>,
    #[serde(default, alias = "modelfile")]
    pub model_file: Option<String>,
    #[serde(default, alias = "modelfilefordao")]
    pub model_file_for_dao: Option<String>,
    #[serde(default, alias = "descriptiontag")]
    pub description_tag: Option<bool>,
    #[serde(default, alias = "nojsontag")]
    pub no_json_tag: Option<bool>,
    #[serde(default, alias = "nomodelcomment")]
    pub no_model_comment: Option<bool>,
    #[serde(default, alias = "tpldaoindex")]
    pub tpl_dao_index: Option<String>,
    #[serde(default, alias = "tpldaointernal")]
    pub tpl_dao_internal: Option<String>,
    #[serde(default, alias = "tplmodelindex")]
    pub tpl_model_index: Option<String>,
    #[serde(default, alias = "tplmodelstruct")]
    pub tpl_model_struct: Option<String>,
}

/// Accept either `"a, b"` or `["a", "b"]`
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::One(s) => split_list(&s),
        Raw::Many(items) => items
            .iter()
            .flat_map(|item| split_list(item))
            .collect(),
    }))
}

/// Split a comma separated list, trimming entries and dropping empty ones
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl DaoInput {
    /// True when no option at all is set
    pub fn is_empty(&self) -> bool {
        *self == DaoInput::default()
    }

    /// Field-wise layering: values set on `self` win over `base`
    pub fn merged_over(self, base: &DaoInput) -> DaoInput {
        let base = base.clone();
        DaoInput {
            path: self.path.or(base.path),
            link: self.link.or(base.link),
            tables: self.tables.or(base.tables),
            tables_ex: self.tables_ex.or(base.tables_ex),
            group: self.group.or(base.group),
            prefix: self.prefix.or(base.prefix),
            remove_prefix: self.remove_prefix.or(base.remove_prefix),
            json_case: self.json_case.or(base.json_case),
            import_prefix: self.import_prefix.or(base.import_prefix),
            module: self.module.or(base.module),
            std_time: self.std_time.or(base.std_time),
            g_json_support: self.g_json_support.or(base.g_json_support),
            overwrite_dao: self.overwrite_dao.or(base.overwrite_dao),
            model_file: self.model_file.or(base.model_file),
            model_file_for_dao: self.model_file_for_dao.or(base.model_file_for_dao),
            description_tag: self.description_tag.or(base.description_tag),
            no_json_tag: self.no_json_tag.or(base.no_json_tag),
            no_model_comment: self.no_model_comment.or(base.no_model_comment),
            tpl_dao_index: self.tpl_dao_index.or(base.tpl_dao_index),
            tpl_dao_internal: self.tpl_dao_internal.or(base.tpl_dao_internal),
            tpl_model_index: self.tpl_model_index.or(base.tpl_model_index),
            tpl_model_struct: self.tpl_model_struct.or(base.tpl_model_struct),
        }
    }

    /// Apply built-in defaults and validate
    pub fn resolve(self) -> Result<DaoJob> {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let json_case: NamingCase = non_empty(self.json_case)
            .as_deref()
            .unwrap_or(defaults::JSON_CASE)
            .parse()?;
        let model_file =
            non_empty(self.model_file).unwrap_or_else(|| defaults::MODEL_FILE.to_string());
        let model_file_for_dao = non_empty(self.model_file_for_dao);
        if model_file_for_dao.as_deref() == Some(model_file.as_str()) {
            return Err(GenError::Config(format!(
                "modelFileForDao must differ from modelFile \"{model_file}\""
            )));
        }

        Ok(DaoJob {
            path: PathBuf::from(non_empty(self.path).unwrap_or_else(|| defaults::PATH.to_string())),
            link: non_empty(self.link),
            tables: self.tables.unwrap_or_default(),
            tables_ex: self.tables_ex.unwrap_or_default(),
            group: non_empty(self.group).unwrap_or_else(|| defaults::GROUP.to_string()),
            prefix: self.prefix.unwrap_or_default(),
            remove_prefix: self.remove_prefix.unwrap_or_default(),
            import_prefix: non_empty(self.import_prefix),
            module: non_empty(self.module),
            overwrite_dao: self.overwrite_dao.unwrap_or(false),
            model_file,
            model_file_for_dao,
            render: RenderOptions {
                json_case,
                types: TypeOptions {
                    std_time: self.std_time.unwrap_or(false),
                    g_json_support: self.g_json_support.unwrap_or(false),
                },
                no_json_tag: self.no_json_tag.unwrap_or(false),
                description_tag: self.description_tag.unwrap_or(false),
                no_model_comment: self.no_model_comment.unwrap_or(false),
            },
            templates: TemplateOverrides {
                dao_index: non_empty(self.tpl_dao_index).map(PathBuf::from),
                dao_internal: non_empty(self.tpl_dao_internal).map(PathBuf::from),
                model_index: non_empty(self.tpl_model_index).map(PathBuf::from),
                model_struct: non_empty(self.tpl_model_struct).map(PathBuf::from),
            },
        })
    }
}

/// A fully resolved generation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoJob {
    /// Output directory, relative to the working directory unless absolute
    pub path: PathBuf,
    /// Ad-hoc `type:connection-string` link; takes precedence over `group`
    pub link: Option<String>,
    /// Tables to generate; empty means every table of the schema
    pub tables: Vec<String>,
    pub tables_ex: Vec<String>,
    /// Connection group, also written into the generated DAO
    pub group: String,
    /// Added in front of every target name
    pub prefix: String,
    /// Stripped from table names, first match only
    pub remove_prefix: Vec<String>,
    pub import_prefix: Option<String>,
    pub module: Option<String>,
    pub overwrite_dao: bool,
    pub model_file: String,
    pub model_file_for_dao: Option<String>,
    pub render: RenderOptions,
    pub templates: TemplateOverrides,
}

impl DaoJob {
    /// Name used for generated identifiers and files of a table
    pub fn target_name(&self, table: &str) -> String {
        let stripped = self
            .remove_prefix
            .iter()
            .find_map(|prefix| table.strip_prefix(prefix.as_str()))
            .unwrap_or(table);
        format!("{}{}", self.prefix, stripped)
    }
}

/// Build the job list: one job per configuration element layered over the
/// command line input, or a single job from the command line alone.
pub fn resolve_jobs(cli: &DaoInput, elements: Vec<DaoInput>) -> Result<Vec<DaoJob>> {
    if elements.is_empty() {
        if cli.is_empty() {
            return Err(GenError::Config(
                "command arguments and configurations not found for generating dao files".into(),
            ));
        }
        return Ok(vec![cli.clone().resolve()?]);
    }
    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            element.merged_over(cli).resolve().map_err(|e| match e {
                GenError::Config(msg) => GenError::Config(format!(
                    "invalid configuration of \"{}\" element {}: {}",
                    defaults::DAO_CONFIG_KEY,
                    i,
                    msg
                )),
                other => other,
            })
        })
        .collect()
}
