mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fieldcheck_core::dates::DateCheckKind;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fieldcheck", version, about = "Validate and normalize record fields")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/fieldcheck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile whose rules to apply
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print the resolved profile
    Doctor,

    /// Apply the profile's rules to every record in a file
    Check(CheckArgs),

    /// Evaluate a single date check
    Date(DateArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Record file (.json, .yaml, .yml or .md)
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Write normalized values back to the file
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DateCheckArg {
    #[default]
    Validate,
    Before,
    After,
    Between,
}

impl From<DateCheckArg> for DateCheckKind {
    fn from(arg: DateCheckArg) -> Self {
        match arg {
            DateCheckArg::Validate => Self::Validate,
            DateCheckArg::Before => Self::Before,
            DateCheckArg::After => Self::After,
            DateCheckArg::Between => Self::Between,
        }
    }
}

#[derive(Debug, Args)]
pub struct DateArgs {
    /// Value to check: a date or a relative expression like now+5days
    pub value: String,

    #[arg(long, value_enum, default_value_t = DateCheckArg::Validate)]
    pub check: DateCheckArg,

    /// Comparison bound; repeat for between
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Format specification, e.g. mm/dd/yyyy
    #[arg(long)]
    pub format: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::Check(args) => {
            cmd::check::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
        Commands::Date(args) => cmd::date::run(cli.config.as_deref(), cli.profile.as_deref(), args),
    }
}
