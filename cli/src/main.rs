//! OpenSASE Forms CLI
//!
//! Command-line interface for the forms engine: inspect form definitions,
//! fill and validate responses, and render stored responses.
//!
//! # Usage
//!
//! ```bash
//! formctl check --form contact.yaml
//! formctl blank --form contact.yaml --format json > draft.json
//! formctl fill --form contact.yaml --records draft.json --set name=Ada --set 'colors=["Red"]'
//! formctl validate --form contact.yaml --records response.json
//! formctl show --records response.json --max-length 30
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formctl")]
#[command(author = "OpenSASE")]
#[command(version)]
#[command(about = "OpenSASE Forms Command Line Interface", long_about = None)]
struct Cli {
    /// Output format (defaults to the config file's default_format, then table)
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, env = "FORMCTL_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a form definition for schema errors
    Check {
        /// Form definition (JSON or YAML)
        #[arg(long)]
        form: String,
    },
    /// Print the storage records of a blank response
    Blank {
        #[arg(long)]
        form: String,
    },
    /// Set field values and print the resulting records
    Fill {
        #[arg(long)]
        form: String,
        /// Existing records to start from
        #[arg(long)]
        records: Option<String>,
        /// Field assignment as id=value; JSON values are accepted
        #[arg(long = "set", value_name = "ID=VALUE")]
        assignments: Vec<String>,
        /// Print records even when the response does not validate
        #[arg(long)]
        draft: bool,
    },
    /// Validate stored records against a form definition
    Validate {
        #[arg(long)]
        form: String,
        #[arg(long)]
        records: String,
    },
    /// Render stored records the way response tables show them
    Show {
        #[arg(long)]
        records: String,
        /// Truncate text cells beyond this many characters
        #[arg(long)]
        max_length: Option<usize>,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config not loaded ({}), using defaults", e);
        config::Config::default()
    });
    let format = cli.format.unwrap_or_else(|| config.output_format());
    let profile = cli.profile.as_deref();

    let result = match cli.command {
        Commands::Check { form } => commands::check::handle(&form, format),
        Commands::Blank { form } => commands::fill::blank(&form, &config, format),
        Commands::Fill { form, records, assignments, draft } => {
            commands::fill::handle(&form, records.as_deref(), &assignments, draft, &config, format)
        }
        Commands::Validate { form, records } => commands::validate::handle(&form, &records, &config, format),
        Commands::Show { records, max_length } => commands::show::handle(&records, max_length, &config, format),
        Commands::Config { action } => commands::config::handle(action, profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
