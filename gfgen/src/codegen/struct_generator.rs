//! Struct generator - renders Go struct fields and column blocks from table fields

use std::collections::BTreeSet;

use gfgen_schema::TableField;

use super::naming::{to_camel, to_case, NamingCase};
use super::type_resolver::{GoType, TypeOptions, TypeResolver};

/// Per-job switches that shape the rendered struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub json_case: NamingCase,
    pub types: TypeOptions,
    pub no_json_tag: bool,
    pub description_tag: bool,
    pub no_model_comment: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            json_case: NamingCase::CamelLower,
            types: TypeOptions::default(),
            no_json_tag: false,
            description_tag: false,
            no_model_comment: false,
        }
    }
}

/// A struct definition plus the Go packages its field types need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStruct {
    pub definition: String,
    pub imports: BTreeSet<&'static str>,
}

/// Rows of cells laid out as fixed-width columns.
///
/// Every cell except the last one of a row is right-padded to the widest
/// entry of its column, and cells are separated by one space.
#[derive(Debug, Default)]
pub struct AlignedTable {
    rows: Vec<Vec<String>>,
}

impl AlignedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render every row on its own line, prefixed with `indent`
    pub fn render(&self, indent: &str) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for row in &self.rows {
            let mut line = String::from(indent);
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i] - cell.chars().count();
                    line.extend(std::iter::repeat(' ').take(pad + 1));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Collapse a column comment onto one line
pub fn format_comment(comment: &str) -> String {
    comment
        .replace(['\r', '\n'], " ")
        .replace("\\n", " ")
        .trim()
        .to_string()
}

/// Content of the `orm` tag: column name plus key markers
pub fn orm_tag(field: &TableField) -> String {
    let mut tag = field.name.clone();
    if field.key.is_primary() {
        tag.push_str(",primary");
    }
    if field.key.is_unique() {
        tag.push_str(",unique");
    }
    tag
}

fn comment_cell(field: &TableField) -> Option<String> {
    let comment = format_comment(&field.comment);
    (!comment.is_empty()).then(|| format!("// {comment}"))
}

/// Render `type <name> struct { ... }` for the model file
pub fn struct_definition(
    struct_name: &str,
    fields: &[TableField],
    opts: &RenderOptions,
) -> RenderedStruct {
    let mut table = AlignedTable::new();
    let mut imports = BTreeSet::new();

    for field in fields {
        let go_type = TypeResolver::resolve(&field.sql_type, &opts.types);
        if let Some(path) = go_type.import_path() {
            imports.insert(path);
        }

        let mut tags = vec![format!("orm:\"{}\"", orm_tag(field))];
        if !opts.no_json_tag {
            tags.push(format!(
                "json:\"{}\"",
                to_case(&field.name, opts.json_case)
            ));
        }
        if opts.description_tag {
            tags.push(format!(
                "description:\"{}\"",
                format_comment(&field.comment).replace('"', "\\\"")
            ));
        }

        let mut row = vec![
            to_camel(&field.name),
            go_type.to_type_string().to_string(),
            format!("`{}`", tags.join(" ")),
        ];
        if !opts.no_model_comment {
            row.extend(comment_cell(field));
        }
        table.push_row(row);
    }

    RenderedStruct {
        definition: wrap_struct(struct_name, &table),
        imports,
    }
}

/// Render the `<name>ForDao` struct: every field is `interface{}` and only
/// the `orm` tag is kept, so callers can pass partial data to Where/Data.
pub fn struct_definition_for_dao(struct_name: &str, fields: &[TableField]) -> String {
    let mut table = AlignedTable::new();
    for field in fields {
        let mut row = vec![
            to_camel(&field.name),
            GoType::Interface.to_type_string().to_string(),
            format!("`orm:\"{}\"`", orm_tag(field)),
        ];
        row.extend(comment_cell(field));
        table.push_row(row);
    }
    wrap_struct(&format!("{struct_name}ForDao"), &table)
}

fn wrap_struct(struct_name: &str, table: &AlignedTable) -> String {
    format!("type {} struct {{\n{}}}", struct_name, table.render("\t"))
}

/// Column definition block of the DAO columns struct: `Name string // comment`
pub fn column_definitions(fields: &[TableField]) -> String {
    let mut table = AlignedTable::new();
    for field in fields {
        let mut row = vec![to_camel(&field.name), "string".to_string()];
        row.extend(comment_cell(field));
        table.push_row(row);
    }
    table.render("\t").trim().to_string()
}

/// Column name assignment block: `Name: "raw_name",`
pub fn column_names(fields: &[TableField]) -> String {
    let mut table = AlignedTable::new();
    for field in fields {
        table.push_row(vec![
            format!("{}:", to_camel(&field.name)),
            format!("\"{}\",", field.name),
        ]);
    }
    table.render("\t\t").trim().to_string()
}

/// Go import block for a set of package paths; empty when nothing is needed
pub fn import_block<'a>(imports: impl IntoIterator<Item = &'a str>) -> String {
    let lines: Vec<String> = imports
        .into_iter()
        .map(|path| format!("\t\"{path}\""))
        .collect();
    if lines.is_empty() {
        String::new()
    } else {
        format!("import (\n{}\n)", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfgen_schema::KeyRole;

    fn user_detail() -> Vec<TableField> {
        vec![
            TableField::new(0, "id", "int(10) unsigned")
                .with_key(KeyRole::Primary)
                .with_comment("User ID"),
            TableField::new(1, "user_id", "int(10)").with_key(KeyRole::Unique),
            TableField::new(2, "created_at", "datetime").with_comment("Created\r\nTime"),
        ]
    }

    #[test]
    fn test_format_comment() {
        assert_eq!(format_comment("  line one\nline two\r\n"), "line one line two");
        assert_eq!(format_comment("a\\nb"), "a b");
        assert_eq!(format_comment(""), "");
    }

    #[test]
    fn test_orm_tag_markers() {
        let fields = user_detail();
        assert_eq!(orm_tag(&fields[0]), "id,primary");
        assert_eq!(orm_tag(&fields[1]), "user_id,unique");
        assert_eq!(orm_tag(&fields[2]), "created_at");
    }

    #[test]
    fn test_struct_definition_is_aligned() {
        let rendered = struct_definition("Detail", &user_detail(), &RenderOptions::default());
        let expected = "type Detail struct {\n\
            \tId        uint        `orm:\"id,primary\" json:\"id\"`         // User ID\n\
            \tUserId    int         `orm:\"user_id,unique\" json:\"userId\"`\n\
            \tCreatedAt *gtime.Time `orm:\"created_at\" json:\"createdAt\"`  // Created  Time\n\
            }";
        assert_eq!(rendered.definition, expected);
        assert_eq!(
            rendered.imports.into_iter().collect::<Vec<_>>(),
            vec!["github.com/gogf/gf/v2/os/gtime"]
        );
    }

    #[test]
    fn test_struct_definition_flags() {
        let opts = RenderOptions {
            json_case: NamingCase::Snake,
            no_json_tag: false,
            description_tag: true,
            no_model_comment: true,
            types: TypeOptions {
                std_time: true,
                g_json_support: false,
            },
        };
        let fields = vec![TableField::new(0, "createdAt", "timestamp").with_comment("say \"hi\"")];
        let rendered = struct_definition("T", &fields, &opts);
        assert!(rendered.definition.contains("time.Time"));
        assert!(rendered.definition.contains("json:\"created_at\""));
        assert!(rendered.definition.contains("description:\"say \\\"hi\\\"\""));
        assert!(!rendered.definition.contains("//"));
        assert!(rendered.imports.contains("time"));
    }

    #[test]
    fn test_no_json_tag() {
        let opts = RenderOptions {
            no_json_tag: true,
            ..Default::default()
        };
        let rendered = struct_definition("T", &user_detail(), &opts);
        assert!(!rendered.definition.contains("json:"));
        assert!(rendered.definition.contains("orm:\"id,primary\""));
    }

    #[test]
    fn test_for_dao_struct() {
        let text = struct_definition_for_dao("Detail", &user_detail());
        assert!(text.starts_with("type DetailForDao struct {"));
        assert_eq!(text.matches("interface{}").count(), 3);
        assert!(!text.contains("json:"));
        assert!(text.contains("// User ID"));
    }

    #[test]
    fn test_column_blocks() {
        let fields = user_detail();
        assert_eq!(
            column_definitions(&fields),
            "Id        string // User ID\n\tUserId    string\n\tCreatedAt string // Created  Time"
        );
        assert_eq!(
            column_names(&fields),
            "Id:        \"id\",\n\t\tUserId:    \"user_id\",\n\t\tCreatedAt: \"created_at\","
        );
    }

    #[test]
    fn test_import_block() {
        assert_eq!(import_block(Vec::<&str>::new()), "");
        assert_eq!(
            import_block(["time"]),
            "import (\n\t\"time\"\n)"
        );
    }
}
