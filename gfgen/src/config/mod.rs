//! Configuration: job options, built-in defaults and the configuration document

pub mod defaults;
mod document;
mod input;

pub use document::ConfigDocument;
pub use input::{resolve_jobs, split_list, DaoInput, DaoJob};
