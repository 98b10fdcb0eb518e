//! Model generator - aggregates one struct per table into the model files

use std::collections::BTreeSet;
use std::path::Path;

use super::dao_generator::TableJob;
use super::struct_generator::{
    import_block, struct_definition, struct_definition_for_dao, RenderOptions,
};
use super::template::{
    render, TemplateKind, TemplateValues, Templates, TPL_MODEL_STRUCTS, TPL_PACKAGE_IMPORTS,
    TPL_STRUCT_DEFINE, TPL_TABLE_NAME, TPL_TABLE_NAME_CAMEL_CASE,
};
use super::writer::{Artifact, ArtifactKind, WritePolicy};

/// Collects model structs across the tables of a job
#[derive(Debug, Default)]
pub struct ModelCollector {
    structs: String,
    imports: BTreeSet<&'static str>,
    for_dao: Option<String>,
}

impl ModelCollector {
    /// `with_for_dao` also collects the `XxxForDao` structs
    pub fn new(with_for_dao: bool) -> Self {
        Self {
            for_dao: with_for_dao.then(String::new),
            ..Default::default()
        }
    }

    pub fn add(&mut self, table: &TableJob, templates: &Templates, opts: &RenderOptions) {
        let struct_name = table.struct_name();
        let rendered = struct_definition(&struct_name, &table.fields, opts);
        self.imports.extend(rendered.imports);

        let values = TemplateValues::new()
            .set(TPL_TABLE_NAME, table.target_name.as_str())
            .set(TPL_TABLE_NAME_CAMEL_CASE, struct_name.as_str())
            .set(TPL_STRUCT_DEFINE, rendered.definition);
        self.structs
            .push_str(&render(templates.get(TemplateKind::ModelStruct), &values));
        self.structs.push('\n');

        if let Some(for_dao) = self.for_dao.as_mut() {
            let values = TemplateValues::new()
                .set(TPL_TABLE_NAME, table.target_name.as_str())
                .set(TPL_TABLE_NAME_CAMEL_CASE, struct_name.as_str())
                .set(
                    TPL_STRUCT_DEFINE,
                    struct_definition_for_dao(&struct_name, &table.fields),
                );
            for_dao.push_str(&render(
                templates.get(TemplateKind::ModelForDaoStruct),
                &values,
            ));
            for_dao.push('\n');
        }
    }

    /// Model file artifacts: `<model_file>` and, when collected, `<for_dao_file>`
    pub fn finish(
        self,
        templates: &Templates,
        model_dir: &Path,
        model_file: &str,
        for_dao_file: Option<&str>,
    ) -> Vec<Artifact> {
        let values = TemplateValues::new()
            .set(TPL_PACKAGE_IMPORTS, import_block(self.imports.iter().copied()))
            .set(TPL_MODEL_STRUCTS, self.structs);
        let mut artifacts = vec![Artifact {
            kind: ArtifactKind::Model,
            path: model_dir.join(model_file),
            policy: WritePolicy::Overwrite,
            content: render(templates.get(TemplateKind::ModelIndex), &values),
        }];

        if let (Some(structs), Some(file)) = (self.for_dao, for_dao_file) {
            let values = TemplateValues::new().set(TPL_MODEL_STRUCTS, structs);
            artifacts.push(Artifact {
                kind: ArtifactKind::ModelForDao,
                path: model_dir.join(file),
                policy: WritePolicy::Overwrite,
                content: render(templates.get(TemplateKind::ModelForDaoIndex), &values),
            });
        }
        artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfgen_schema::TableField;

    fn tables() -> Vec<TableJob> {
        vec![
            TableJob::new(
                "user",
                "user",
                vec![
                    TableField::new(0, "id", "int"),
                    TableField::new(1, "created_at", "datetime"),
                ],
            ),
            TableJob::new(
                "gf_order",
                "order",
                vec![TableField::new(0, "id", "bigint")],
            ),
        ]
    }

    #[test]
    fn test_model_file_collects_every_table() {
        let templates = Templates::builtin();
        let mut collector = ModelCollector::new(false);
        for table in &tables() {
            collector.add(table, &templates, &RenderOptions::default());
        }
        let artifacts = collector.finish(&templates, Path::new("internal/model"), "model.go", None);
        assert_eq!(artifacts.len(), 1);

        let model = &artifacts[0];
        assert_eq!(model.kind, ArtifactKind::Model);
        assert!(model.path.ends_with("model/model.go"));
        assert!(model.content.contains("// User is the golang structure for table user."));
        assert!(model.content.contains("type User struct {"));
        assert!(model.content.contains("// Order is the golang structure for table order."));
        assert!(!model.content.contains("gf_order"));
        assert!(model.content.contains("\"github.com/gogf/gf/v2/os/gtime\""));
        assert!(!model.content.contains("{Tpl"));
    }

    #[test]
    fn test_model_file_without_imports() {
        let templates = Templates::builtin();
        let mut collector = ModelCollector::new(false);
        collector.add(&tables()[1], &templates, &RenderOptions::default());
        let artifacts = collector.finish(&templates, Path::new("model"), "model.go", None);
        assert!(!artifacts[0].content.contains("import"));
    }

    #[test]
    fn test_model_for_dao_file() {
        let templates = Templates::builtin();
        let mut collector = ModelCollector::new(true);
        for table in &tables() {
            collector.add(table, &templates, &RenderOptions::default());
        }
        let artifacts =
            collector.finish(&templates, Path::new("model"), "model.go", Some("model_dao.go"));
        assert_eq!(artifacts.len(), 2);
        let for_dao = &artifacts[1];
        assert_eq!(for_dao.kind, ArtifactKind::ModelForDao);
        assert!(for_dao.content.contains("type UserForDao struct {"));
        assert!(for_dao.content.contains("type OrderForDao struct {"));
        assert!(!for_dao.content.contains("gtime"));
        assert!(for_dao.content.contains("for table order, used for DAO operations"));
    }
}
