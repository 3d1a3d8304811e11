pub mod pointer;
pub mod uri;
pub mod value;

pub use value::{json_eq, JsonType};
