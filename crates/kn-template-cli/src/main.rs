//! kn-template CLI — render and inspect knowledge-network document templates.
//!
//! Provides three commands: `placeholders`, `render`, and `list`.
//!
//! Templates are addressed by name in the configured templates directory
//! (see [`kn_template_core::config::TemplateConfig`]) or read directly with `--file`.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kn-template",
    about = "Render knowledge-network templates with sanitized placeholder values",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to kn-template.config.json (defaults apply if it does not exist)
    #[arg(long, global = true, default_value = kn_template_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the placeholder names a template uses
    Placeholders {
        /// Template name in the templates directory
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        name: Option<String>,

        /// Read the template from this file instead
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Print names as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Render a template with the given values
    Render {
        /// Template name in the templates directory
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        name: Option<String>,

        /// Read the template from this file instead
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// JSON file with an object of placeholder values
        #[arg(long)]
        values: Option<PathBuf>,

        /// Set a string value (repeatable, overrides --values)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = commands::render::parse_assignment)]
        set: Vec<(String, String)>,

        /// Fail if any placeholder has no value
        #[arg(long)]
        strict: bool,

        /// Print the SHA-256 digest of the rendered text
        #[arg(long)]
        digest: bool,

        /// Write the rendered text to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List templates in the templates directory
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Placeholders { name, file, json } => {
            commands::placeholders::run(&cli.config, name.as_deref(), file.as_deref(), json)
                .await?;
        }
        Commands::Render {
            name,
            file,
            values,
            set,
            strict,
            digest,
            output,
        } => {
            let opts = commands::render::RenderOptions {
                values_path: values,
                assignments: set,
                strict,
                digest,
                output_path: output,
            };
            commands::render::run(&cli.config, name.as_deref(), file.as_deref(), &opts).await?;
        }
        Commands::List => {
            commands::list::run(&cli.config).await?;
        }
    }

    Ok(())
}
