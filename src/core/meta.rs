//! The embedded draft-07 meta-schema and the process-wide validator compiled
//! from it. The meta-validator is compiled with checking off; validating the
//! meta-schema against itself before it exists would not go anywhere.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::core::compiler::{Compiler, Validator};
use crate::utils::error::{Result, SchemaError};

/// The fragment-free URI the meta-schema is registered under in every
/// compilation, so `{"$ref": "http://json-schema.org/draft-07/schema#"}`
/// resolves without caller involvement.
pub const DRAFT7_URI: &str = "http://json-schema.org/draft-07/schema";

static DRAFT7_META_SCHEMA: Lazy<Arc<Value>> = Lazy::new(|| {
    Arc::new(
        serde_json::from_str(include_str!("../../meta_schemas/draft-07.json"))
            .expect("embedded draft-07 meta-schema is valid JSON"),
    )
});

static META_VALIDATOR: Lazy<Validator> = Lazy::new(|| {
    Compiler::new()
        .check_schema(false)
        .compile(draft7_meta_schema())
        .expect("embedded draft-07 meta-schema compiles")
});

pub fn draft7_meta_schema() -> &'static Value {
    &DRAFT7_META_SCHEMA
}

pub(crate) fn draft7_meta_schema_arc() -> Arc<Value> {
    Arc::clone(&DRAFT7_META_SCHEMA)
}

pub(crate) fn meta_validator() -> &'static Validator {
    &META_VALIDATOR
}

/// Meta-schema lookup by draft name. Only draft-07 ships with the crate.
pub fn meta_schema(version: &str) -> Result<&'static Value> {
    match version {
        "draft-07" => Ok(draft7_meta_schema()),
        other => Err(SchemaError::UnsupportedVersion {
            version: other.to_string(),
        }),
    }
}
