//! Command-line argument definitions for the Stratum CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file and logging
//! verbosity; each [`Command`] carries its own inputs.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Stratum diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a request and store it as the next diagram version
    Generate(GenerateArgs),
    /// List the component types of a style catalog
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to the request file (JSON)
    #[arg(help = "Path to the request file")]
    pub request: String,

    /// Artifact name prefix, overriding the request
    #[arg(short, long)]
    pub name: Option<String>,

    /// Layout scale multiplier, overriding the request
    #[arg(short, long)]
    pub scale: Option<f64>,

    /// Prompt text to record in a provenance sidecar, overriding the request
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Directory that receives the versioned artifacts
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Path to the style catalog (JSON)
    #[arg(long, default_value = "assets/library.json")]
    pub catalog: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Component category; accepted for compatibility, does not filter
    #[arg(long)]
    pub category: Option<String>,

    /// Path to the style catalog (JSON)
    #[arg(long, default_value = "assets/library.json")]
    pub catalog: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_overrides() {
        let args = Args::parse_from([
            "stratum",
            "generate",
            "request.json",
            "--name",
            "shop",
            "--scale",
            "1.5",
            "--log-level",
            "off",
        ]);

        let Command::Generate(generate) = args.command else {
            panic!("Expected generate command");
        };
        assert_eq!(generate.request, "request.json");
        assert_eq!(generate.name.as_deref(), Some("shop"));
        assert_eq!(generate.scale, Some(1.5));
        assert_eq!(generate.catalog, "assets/library.json");
        assert_eq!(args.log_level, "off");
    }

    #[test]
    fn test_list_defaults() {
        let args = Args::parse_from(["stratum", "list"]);

        let Command::List(list) = args.command else {
            panic!("Expected list command");
        };
        assert_eq!(list.category, None);
        assert_eq!(args.log_level, "info");
    }
}
