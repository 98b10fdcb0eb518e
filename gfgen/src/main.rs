//! CLI entry point for gfgen

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gfgen::codegen::Formatter;
use gfgen::config::{resolve_jobs, split_list, ConfigDocument, DaoInput};
use gfgen::{describe_tables, generate, GenerationConfig};
use gfgen_schema::{ConnectionRegistry, KeyRole};

#[derive(Parser)]
#[command(name = "gfgen")]
#[command(about = "Generate GoFrame DAO and model files from a database schema")]
#[command(version)]
struct Cli {
    /// Configuration file (toml, yaml, json...); defaults to ./config.* or ./config/config.*
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Do not run gofmt on generated files
    #[arg(long, global = true)]
    no_fmt: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate dao and model files
    Dao(DaoArgs),
    /// Show the tables and ordered fields of a connection
    Inspect(DaoArgs),
}

#[derive(Args, Debug, Default)]
struct DaoArgs {
    /// Directory storing the generated files
    #[arg(short, long)]
    path: Option<String>,
    /// Database link, e.g. "mysql:root:12345678@tcp(127.0.0.1:3306)/test"
    #[arg(short, long)]
    link: Option<String>,
    /// Tables to generate, comma separated
    #[arg(short, long)]
    tables: Option<String>,
    /// Tables to exclude, comma separated
    #[arg(short = 'e', long = "tablesEx")]
    tables_ex: Option<String>,
    /// Database configuration group, also written into the dao files
    #[arg(short, long)]
    group: Option<String>,
    /// Prefix added to every generated table name
    #[arg(short = 'f', long)]
    prefix: Option<String>,
    /// Prefixes stripped from table names, comma separated
    #[arg(short = 'r', long = "removePrefix")]
    remove_prefix: Option<String>,
    /// Naming case of json tags
    #[arg(short = 'j', long = "jsonCase")]
    json_case: Option<String>,
    /// Go import prefix of the generated packages
    #[arg(short = 'i', long = "importPrefix")]
    import_prefix: Option<String>,
    /// Go module name, instead of reading go.mod
    #[arg(short = 'm', long = "mod")]
    module: Option<String>,
    /// Use time.Time instead of *gtime.Time
    #[arg(short = 's', long = "stdTime")]
    std_time: bool,
    /// Use *gjson.Json for json columns
    #[arg(short = 'n', long = "gJsonSupport")]
    g_json_support: bool,
    /// Overwrite existing dao index files
    #[arg(short = 'o', long = "overwriteDao")]
    overwrite_dao: bool,
    /// Aggregated model file name
    #[arg(long = "modelFile")]
    model_file: Option<String>,
    /// Extra model file with XxxForDao structs
    #[arg(long = "modelFileForDao")]
    model_file_for_dao: Option<String>,
    /// Add description tags carrying column comments
    #[arg(short = 'd', long = "descriptionTag")]
    description_tag: bool,
    /// Omit json tags
    #[arg(short = 'k', long = "noJsonTag")]
    no_json_tag: bool,
    /// Omit field comments in models
    #[arg(long = "noModelComment")]
    no_model_comment: bool,
    #[arg(long = "tplDaoIndex")]
    tpl_dao_index: Option<String>,
    #[arg(long = "tplDaoInternal")]
    tpl_dao_internal: Option<String>,
    #[arg(long = "tplModelIndex")]
    tpl_model_index: Option<String>,
    #[arg(long = "tplModelStruct")]
    tpl_model_struct: Option<String>,
}

impl From<DaoArgs> for DaoInput {
    fn from(args: DaoArgs) -> Self {
        let list = |s: Option<String>| s.map(|s| split_list(&s));
        let flag = |b: bool| b.then_some(true);
        DaoInput {
            path: args.path,
            link: args.link,
            tables: list(args.tables),
            tables_ex: list(args.tables_ex),
            group: args.group,
            prefix: args.prefix,
            remove_prefix: list(args.remove_prefix),
            json_case: args.json_case,
            import_prefix: args.import_prefix,
            module: args.module,
            std_time: flag(args.std_time),
            g_json_support: flag(args.g_json_support),
            overwrite_dao: flag(args.overwrite_dao),
            model_file: args.model_file,
            model_file_for_dao: args.model_file_for_dao,
            description_tag: flag(args.description_tag),
            no_json_tag: flag(args.no_json_tag),
            no_model_comment: flag(args.no_model_comment),
            tpl_dao_index: args.tpl_dao_index,
            tpl_dao_internal: args.tpl_dao_internal,
            tpl_model_index: args.tpl_model_index,
            tpl_model_struct: args.tpl_model_struct,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let work_dir = std::env::current_dir()?;

    // Load configuration first (before logging, so we can use gfcli.logLevel)
    let document = ConfigDocument::load(&work_dir, cli.config.as_deref())?;

    // Priority: RUST_LOG env var > --debug > gfcli.logLevel > info
    let log_level = if cli.debug {
        "debug".to_string()
    } else {
        document.log_level().unwrap_or_else(|| "info".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let mut registry = ConnectionRegistry::from_config(document.database_groups()?);

    match cli.command {
        Commands::Dao(args) => {
            let jobs = resolve_jobs(&DaoInput::from(args), document.dao_elements()?)?;
            let config = GenerationConfig {
                work_dir,
                jobs,
                formatter: (!cli.no_fmt).then(Formatter::gofmt),
            };
            let report = generate(&config, &mut registry).await?;
            info!(
                "{} files generated, {} existing files kept",
                report.written.len(),
                report.skipped.len()
            );
        }
        Commands::Inspect(args) => inspect(args, &mut registry).await?,
    }

    info!("done!");
    Ok(())
}

async fn inspect(args: DaoArgs, registry: &mut ConnectionRegistry) -> Result<()> {
    let job = DaoInput::from(args).resolve()?;
    let group = match &job.link {
        Some(link) => registry.register_temporary(link)?,
        None => job.group.clone(),
    };
    let db = registry.connect(&group)?;
    let result = describe_tables(db.as_ref(), &job.tables).await;
    db.close().await?;

    let tables: Vec<_> = result?
        .into_iter()
        .filter(|(name, _)| !job.tables_ex.contains(name))
        .collect();
    println!("Found {} tables:\n", tables.len());
    for (table, fields) in &tables {
        println!("Table: {} -> {}", table, job.target_name(table));
        for field in fields {
            let nullable = if field.null { "NULL" } else { "NOT NULL" };
            let key = match field.key {
                KeyRole::Primary => " PRI",
                KeyRole::Unique => " UNI",
                KeyRole::Multiple => " MUL",
                KeyRole::None => "",
            };
            let auto_increment = if field.is_auto_increment() {
                " AUTO_INCREMENT"
            } else {
                ""
            };
            println!(
                "  {:>3} {} {} {}{}{}",
                field.index, field.name, field.sql_type, nullable, key, auto_increment
            );
            if !field.comment.is_empty() {
                println!("      -- {}", field.comment);
            }
        }
        println!();
    }
    Ok(())
}
