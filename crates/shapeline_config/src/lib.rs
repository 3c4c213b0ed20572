//! shapeline generator configuration
//!
//! The human-authored override table. Every directive is optional and
//! defaults to "no override", which preserves heuristic behavior.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod generator;
pub mod resource;

pub use error::ConfigError;
pub use field::{CompareFieldConfig, FieldConfig, LateInitializeConfig, PrintFieldConfig, SourceFieldConfig};
pub use generator::GeneratorConfig;
pub use resource::{PrintOrderBy, ResourceConfig, ResourcePrintConfig};
