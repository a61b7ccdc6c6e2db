//! CLI logic for the Stratum diagram tool.
//!
//! This module contains the core CLI logic for the Stratum diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, GenerateArgs, ListArgs};

use std::{fs, path::PathBuf};

use log::{info, warn};

use stratum::{
    Artifact, DiagramEngine, GenerationRequest, StratumError, catalog::StyleCatalog,
    config::AppConfig,
};

use error_adapter::{render, warnings_to_reportables};

/// Run the Stratum CLI application
///
/// # Errors
///
/// Returns `StratumError` for:
/// - Configuration loading errors
/// - Catalog loading errors
/// - Unreadable or malformed request files
/// - Document formatting errors
/// - Artifact write errors
pub fn run(args: &Args) -> Result<(), StratumError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Generate(generate_args) => {
            let artifact = generate(generate_args, app_config)?;
            println!("{}", artifact.path().display());
        }
        Command::List(list_args) => {
            println!("{}", list(list_args)?);
        }
    }

    Ok(())
}

/// Generates and stores the diagram for one request file.
///
/// # Errors
///
/// See [`run`].
pub fn generate(args: &GenerateArgs, app_config: AppConfig) -> Result<Artifact, StratumError> {
    info!(
        request_path = args.request,
        catalog_path = args.catalog;
        "Processing request"
    );

    let app_config = match &args.output_dir {
        Some(dir) => app_config.with_output_directory(PathBuf::from(dir)),
        None => app_config,
    };

    let catalog = StyleCatalog::load(&args.catalog)?;
    let source = fs::read_to_string(&args.request)?;
    let mut request = GenerationRequest::from_json(&source)?;

    if let Some(name) = &args.name {
        request = request.with_name(name);
    }
    if let Some(scale) = args.scale {
        request = request.with_scale(scale);
    }
    if let Some(prompt) = &args.prompt {
        request = request.with_prompt(prompt);
    }

    let engine = DiagramEngine::new(app_config, catalog);
    let artifact = engine.generate(&request)?;

    for reportable in warnings_to_reportables(artifact.rendered().diagnostics()) {
        warn!("{}", render(&reportable));
    }

    info!(
        output_file = artifact.path().display().to_string(),
        version:% = artifact.version();
        "Diagram exported successfully"
    );
    Ok(artifact)
}

/// Lists the component types of a catalog as pretty JSON.
///
/// # Errors
///
/// Returns [`StratumError::Catalog`] if the catalog cannot be loaded.
pub fn list(args: &ListArgs) -> Result<String, StratumError> {
    let catalog = StyleCatalog::load(&args.catalog)?;
    let types = catalog.list_component_types(args.category.as_deref());
    info!(count = types.len(); "Listing component types");
    Ok(serde_json::to_string_pretty(&types)?)
}
