//! Go module name and import prefix resolution

use std::path::{Component, Path};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GenError, Result};

static MODULE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^module\s+(.+)\s*").expect("module regex should be valid"));

static REPEATED_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("slash regex should be valid"));

/// Extract the module name from the contents of a `go.mod` file
pub fn parse_module_name(go_mod: &str) -> Option<String> {
    MODULE_LINE
        .captures(go_mod)
        .map(|caps| caps[1].trim().trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Read the module name from `go.mod` in the working directory
pub fn read_module_name(work_dir: &Path) -> Result<String> {
    let path = work_dir.join("go.mod");
    if !path.is_file() {
        return Err(GenError::Environment(
            "go.mod does not exist in current working directory".into(),
        ));
    }
    let content = std::fs::read_to_string(&path)?;
    parse_module_name(&content)
        .ok_or_else(|| GenError::Environment("module name not found in go.mod".into()))
}

/// Import prefix of the generated packages: module name joined with the
/// output directory relative to the working directory.
pub fn import_prefix(module: &str, work_dir: &Path, output_dir: &Path) -> String {
    let relative = output_dir.strip_prefix(work_dir).unwrap_or(output_dir);
    let relative: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let joined = format!("{}/{}", module, relative.join("/"));
    REPEATED_SLASH
        .replace_all(joined.trim_matches('/'), "/")
        .trim_matches('/')
        .to_string()
}
