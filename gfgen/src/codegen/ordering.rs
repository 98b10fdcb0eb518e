//! Deterministic column ordering

use std::collections::HashMap;

use gfgen_schema::TableField;

/// Column names in declaration order.
///
/// Sorted by ordinal index; gaps are skipped and columns sharing an index
/// are ordered by name so that no column is dropped.
pub fn order_field_names(fields: &HashMap<String, TableField>) -> Vec<String> {
    let mut keyed: Vec<(usize, &str)> = fields
        .values()
        .map(|f| (f.index, f.name.as_str()))
        .collect();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, name)| name.to_string()).collect()
}

/// Consume the introspected map and return its fields in declaration order
pub fn into_ordered_fields(fields: HashMap<String, TableField>) -> Vec<TableField> {
    let mut ordered: Vec<TableField> = fields.into_values().collect();
    ordered.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
    ordered
}
