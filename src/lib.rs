pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::file::RemotesConfig;

pub use crate::core::compiler::{compile, Compiler, Validator};
pub use crate::core::keywords::KNOWN_KEYWORDS;
pub use crate::core::meta::{draft7_meta_schema, meta_schema};
pub use crate::utils::error::{Result, SchemaError};
