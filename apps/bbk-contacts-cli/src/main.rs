use clap::{Parser, Subcommand};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod run_guard;

use config::ToolConfig;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "bbk-contacts")]
#[command(about = "Convert loan customer exports into BBK handset contact files")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./bbk-contacts.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a loan export into a contact file
    Convert {
        /// Loan export to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Contact file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mobile-prefix area-code database
        #[arg(short, long)]
        area_code_db: Option<PathBuf>,

        /// Put the manager in display names
        #[arg(long, overrides_with = "no_manager")]
        manager: bool,

        /// Leave the manager out of display names
        #[arg(long, overrides_with = "manager")]
        no_manager: bool,

        /// Put the phone number in display names
        #[arg(long, overrides_with = "no_phone")]
        phone: bool,

        /// Leave the phone number out of display names
        #[arg(long, overrides_with = "phone")]
        no_phone: bool,

        /// Put the sequence number in display names
        #[arg(long, overrides_with = "no_sequence")]
        sequence: bool,

        /// Leave the sequence number out of display names
        #[arg(long, overrides_with = "sequence")]
        no_sequence: bool,
    },

    /// Look up a number in the area-code database
    Lookup {
        /// Mobile number, separators allowed
        number: String,

        /// Mobile-prefix area-code database
        #[arg(short, long)]
        area_code_db: Option<PathBuf>,
    },

    /// Show how an export's headers resolve
    Columns {
        /// Loan export to inspect
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Install the stderr subscriber; fails if one is already installed
fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

fn run(cli: Cli) -> CliResult<()> {
    let config = ToolConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            area_code_db,
            manager,
            no_manager,
            phone,
            no_phone,
            sequence,
            no_sequence,
        } => commands::convert::execute(
            config,
            commands::convert::ConvertArgs {
                input,
                output,
                area_code_db,
                manager: commands::convert::toggle(manager, no_manager),
                phone: commands::convert::toggle(phone, no_phone),
                sequence: commands::convert::toggle(sequence, no_sequence),
            },
        ),

        Commands::Lookup {
            number,
            area_code_db,
        } => commands::lookup::execute(config, number, area_code_db),

        Commands::Columns { input } => commands::columns::execute(config, input),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(cli))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        Err(CliError::Unexpected(message))
    });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e.headline());
            eprintln!("   {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_subscriber_install_reports_error() {
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }
}
