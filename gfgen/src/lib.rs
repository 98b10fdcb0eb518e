//! gfgen: Generate GoFrame DAO and model files from a database schema
//!
//! For every table of a schema source (a live MySQL server or a DDL file) this
//! crate writes:
//!
//! - `dao/<table>.go`, a seeded file for hand-written extensions, created only once
//! - `dao/internal/<table>.go`, the regenerated column map and DAO plumbing
//! - one aggregated `model/model.go` with a tagged struct per table
//!
//! # Configuration
//!
//! Jobs come from the `gfcli.gen.dao` node of a config file (a table or an
//! array of tables), layered over command line options:
//!
//! ```toml
//! [gfcli]
//! [[gfcli.gen.dao]]
//! link = "mysql:root:12345678@tcp(127.0.0.1:3306)/test"
//! tables = "user, user_detail"
//! removePrefix = "user_"
//! jsonCase = "CamelLower"
//! ```
//!
//! # Library usage
//!
//! ```rust,ignore
//! use gfgen::{config::ConfigDocument, generate, GenerationConfig};
//! use gfgen_schema::ConnectionRegistry;
//!
//! let document = ConfigDocument::load(&work_dir, None)?;
//! let jobs = gfgen::config::resolve_jobs(&Default::default(), document.dao_elements()?)?;
//! let mut registry = ConnectionRegistry::from_config(document.database_groups()?);
//! let config = GenerationConfig { work_dir, jobs, formatter: None };
//! let report = generate(&config, &mut registry).await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! gfgen dao -l "mysql:root:12345678@tcp(127.0.0.1:3306)/test" -r user_
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;

pub use config::{resolve_jobs, ConfigDocument, DaoInput, DaoJob};
pub use error::{GenError, Result};
pub use generator::{describe_tables, generate, generate_job, GenerationConfig, GenerationReport};
