//! Code generation module

mod dao_generator;
mod model_generator;
pub mod module_path;
mod naming;
mod ordering;
mod struct_generator;
pub mod template;
mod type_resolver;
mod writer;

pub use dao_generator::*;
pub use model_generator::*;
pub use naming::*;
pub use ordering::*;
pub use struct_generator::*;
pub use template::{render, TemplateKind, TemplateOverrides, TemplateValues, Templates};
pub use type_resolver::*;
pub use writer::*;
