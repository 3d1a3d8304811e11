pub mod compiler;
pub mod keywords;
pub mod meta;

pub use compiler::{compile, Compiler, Validator};
pub use meta::{draft7_meta_schema, meta_schema};
