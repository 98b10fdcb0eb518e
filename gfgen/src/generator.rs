//! Generation orchestrator: runs every job against its schema source

use std::path::{Path, PathBuf};

use gfgen_schema::{ConnectionRegistry, SchemaIntrospector, TableField};
use tracing::{debug, info, warn};

use crate::codegen::{
    dao_index, dao_internal, into_ordered_fields, module_path, write_artifact, Artifact,
    Formatter, ModelCollector, TableJob, Templates, WriteOutcome,
};
use crate::config::DaoJob;
use crate::error::{GenError, Result};

/// Everything one invocation needs: the working directory, the resolved jobs
/// and an optional formatter run after each write
#[derive(Debug)]
pub struct GenerationConfig {
    pub work_dir: PathBuf,
    pub jobs: Vec<DaoJob>,
    pub formatter: Option<Formatter>,
}

/// Files touched by a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    /// Existing dao index files left untouched
    pub skipped: Vec<PathBuf>,
}

impl GenerationReport {
    fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }
}

/// Run every job in order. The first failure aborts the run; files written
/// before it stay on disk.
pub async fn generate(
    config: &GenerationConfig,
    registry: &mut ConnectionRegistry,
) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();
    for (i, job) in config.jobs.iter().enumerate() {
        debug!("running dao job {} with output path {}", i, job.path.display());
        let output_dir = output_dir(&config.work_dir, job)?;
        let group = match &job.link {
            Some(link) => registry.register_temporary(link)?,
            None => job.group.clone(),
        };
        let db = registry.connect(&group).map_err(GenError::database)?;

        let result = generate_job(
            job,
            &config.work_dir,
            &output_dir,
            db.as_ref(),
            config.formatter.as_ref(),
            &mut report,
        )
        .await;
        if let Err(e) = db.close().await {
            warn!("closing database group \"{}\" failed: {}", group, e);
        }
        result?;
    }
    Ok(report)
}

/// Output directory of a job; it must already exist
fn output_dir(work_dir: &Path, job: &DaoJob) -> Result<PathBuf> {
    let dir = work_dir.join(&job.path);
    if !dir.is_dir() {
        return Err(GenError::Environment(format!(
            "path \"{}\" does not exist",
            job.path.display()
        )));
    }
    Ok(dir)
}

/// Import prefix of a job: explicit, or module name plus the output directory
/// relative to the working directory
fn resolve_import_prefix(job: &DaoJob, work_dir: &Path, output_dir: &Path) -> Result<String> {
    if let Some(prefix) = &job.import_prefix {
        return Ok(prefix.clone());
    }
    let module = match &job.module {
        Some(module) => module.clone(),
        None => module_path::read_module_name(work_dir)?,
    };
    let work_dir = work_dir.canonicalize()?;
    let output_dir = output_dir.canonicalize()?;
    Ok(module_path::import_prefix(&module, &work_dir, &output_dir))
}

/// Tables of a job: the explicit list or every table, minus the excluded ones
async fn resolve_tables(job: &DaoJob, db: &dyn SchemaIntrospector) -> Result<Vec<String>> {
    let tables = if job.tables.is_empty() {
        db.tables().await.map_err(GenError::database)?
    } else {
        job.tables.clone()
    };
    Ok(tables
        .into_iter()
        .filter(|t| !job.tables_ex.contains(t))
        .collect())
}

/// Generate every artifact of one job from an already opened schema source
pub async fn generate_job(
    job: &DaoJob,
    work_dir: &Path,
    output_dir: &Path,
    db: &dyn SchemaIntrospector,
    formatter: Option<&Formatter>,
    report: &mut GenerationReport,
) -> Result<()> {
    let templates = Templates::load(&job.templates, work_dir)?;
    let import_prefix = resolve_import_prefix(job, work_dir, output_dir)?;
    let tables = resolve_tables(job, db).await?;
    info!("generating {} tables into {}", tables.len(), output_dir.display());

    let dao_dir = output_dir.join("dao");
    let model_dir = output_dir.join("model");
    let mut models = ModelCollector::new(job.model_file_for_dao.is_some());

    let write = |artifact: Artifact, report: &mut GenerationReport| -> Result<()> {
        let outcome = write_artifact(&artifact, formatter)?;
        report.record(artifact.path, outcome);
        Ok(())
    };

    for table_name in &tables {
        let fields = db
            .table_fields(table_name)
            .await
            .map_err(|e| GenError::table(table_name, e))?;
        let table = TableJob::new(
            table_name.as_str(),
            job.target_name(table_name),
            into_ordered_fields(fields),
        );
        debug!(
            "table {} -> {} ({} fields)",
            table.table_name,
            table.target_name,
            table.fields.len()
        );

        write(
            dao_index(&table, &templates, &import_prefix, &dao_dir, job.overwrite_dao),
            report,
        )?;
        write(
            dao_internal(&table, &templates, &import_prefix, &job.group, &dao_dir),
            report,
        )?;
        models.add(&table, &templates, &job.render);
    }

    for artifact in models.finish(
        &templates,
        &model_dir,
        &job.model_file,
        job.model_file_for_dao.as_deref(),
    ) {
        write(artifact, report)?;
    }
    Ok(())
}

/// Fields of each table in declaration order, for the `inspect` command
pub async fn describe_tables(
    db: &dyn SchemaIntrospector,
    tables: &[String],
) -> Result<Vec<(String, Vec<TableField>)>> {
    let tables = if tables.is_empty() {
        db.tables().await?
    } else {
        tables.to_vec()
    };
    let mut described = Vec::with_capacity(tables.len());
    for table in tables {
        let fields = db
            .table_fields(&table)
            .await
            .map_err(|e| GenError::table(&table, e))?;
        described.push((table, into_ordered_fields(fields)));
    }
    Ok(described)
}
