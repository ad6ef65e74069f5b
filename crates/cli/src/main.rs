mod cmd;
mod output;
mod templates;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// splunkctl - compile splunk agent parameters into a desired-state catalog
#[derive(Parser)]
#[command(name = "splunkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging (overridden by RUST_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a parameter file and print the resulting catalog
  Plan {
    /// Path to the parameter file (YAML, or JSON with a .json extension)
    params: PathBuf,

    /// Fully qualified name of the managed host (default: this host)
    #[arg(long)]
    fqdn: Option<String>,

    /// Primary IP address of the managed host
    #[arg(long)]
    ipaddress: Option<String>,

    /// Template directory (default: templates/ next to the parameter file)
    #[arg(long)]
    templates: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Check a parameter file and show the resolved lifecycle
  Validate {
    /// Path to the parameter file
    params: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the host facts detected for this machine
  Facts {
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Plan {
      params,
      fqdn,
      ipaddress,
      templates,
      format,
    } => cmd::cmd_plan(&params, fqdn, ipaddress, templates, format),
    Commands::Validate { params, format } => cmd::cmd_validate(&params, format),
    Commands::Facts { format } => cmd::cmd_facts(format),
  };

  if let Err(e) = result {
    output::print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
