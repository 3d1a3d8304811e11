use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "schemax")]
#[command(about = "Compile a JSON Schema (draft-07) and validate JSON documents against it")]
pub struct CliConfig {
    /// Path to the schema document.
    pub schema: String,

    /// Paths of JSON documents to validate against the schema.
    pub instances: Vec<String>,

    /// TOML file mapping remote schema URIs to local JSON files.
    #[arg(long)]
    pub remotes: Option<String>,

    /// Skip meta-validation of the schema.
    #[arg(long)]
    pub no_check_schema: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
