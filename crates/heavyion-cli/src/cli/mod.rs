mod commands;
mod helpers;

use clap::Parser;
use heavyion_core::domain::HeavyIonError;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    match parse_and_dispatch(std::env::args()) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_heavyion_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

fn parse_and_dispatch<I>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = String>,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            helpers::init_tracing(cli.global.verbose);
            dispatch_parsed(cli)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "heavyion",
    version,
    about = "Heavy-ion fusion barrier and cross-section calculator"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalFlags,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Args)]
struct GlobalFlags {
    /// JSON run configuration (cross-section window, precision, table paths)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug); HEAVYION_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Entrance-channel parameters and ground-state deformations
    Entrance(commands::EntranceArgs),
    /// Fusion barrier from one model, or all models side by side
    Barrier(commands::BarrierArgs),
    /// Q-value and E_lab / E_cm / E* conversion
    Energy(commands::EnergyArgs),
    /// Wong fusion cross section over the barrier region
    CrossSection(commands::CrossSectionArgs),
}

fn dispatch_parsed(cli: Cli) -> Result<i32, CliError> {
    let context = helpers::load_run_context(&cli.global)?;
    match cli.command {
        CliCommand::Entrance(args) => commands::run_entrance_command(&context, args),
        CliCommand::Barrier(args) => commands::run_barrier_command(&context, args),
        CliCommand::Energy(args) => commands::run_energy_command(&context, args),
        CliCommand::CrossSection(args) => commands::run_cross_section_command(&context, args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(HeavyIonError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<HeavyIonError> for CliError {
    fn from(error: HeavyIonError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_heavyion_error(&self) -> HeavyIonError {
        match self {
            Self::Usage(message) => {
                HeavyIonError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => HeavyIonError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}
