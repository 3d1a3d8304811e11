use std::path::Path;

use clap::Parser;
use schemax::config::{CliConfig, RemotesConfig};
use schemax::utils::logger;
use schemax::Compiler;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let schema: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config.schema)?)?;

    let mut compiler = Compiler::new().check_schema(!config.no_check_schema);
    if let Some(remotes_path) = &config.remotes {
        let remotes = RemotesConfig::from_file(remotes_path)?;
        let base_dir = Path::new(remotes_path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        for (uri, document) in remotes.load_schemas(base_dir)? {
            tracing::debug!(uri = %uri, "registering remote schema");
            compiler = compiler.with_remote(uri, document);
        }
    }

    let validator = match compiler.compile(&schema) {
        Ok(validator) => validator,
        Err(e) => {
            tracing::error!("schema failed to compile: {}", e);
            eprintln!("schema failed to compile: {}", e);
            std::process::exit(2);
        }
    };
    tracing::info!(schema = %config.schema, "schema compiled");

    let mut all_valid = true;
    for path in &config.instances {
        let instance: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        if validator.is_valid(&instance) {
            println!("{}: valid", path);
        } else {
            println!("{}: invalid", path);
            all_valid = false;
        }
    }

    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}
