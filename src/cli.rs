//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};

/// Settings file used when `--config` is not given or does not exist.
pub const DEFAULT_CONFIG: &str = "config.yaml";

/// Output format of `session-maker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Target {
    /// SecureCRT XML
    #[default]
    Scrt,
    /// Devolutions RDM JSON
    Rdm,
}

impl Target {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Scrt => "xml",
            Self::Rdm => "json",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct Verbosity {
    /// Quiet output.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output (use: -v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Parser)]
#[command(
    name = "session-maker",
    version,
    about = "Read an Excel file (source) and generate a sessions file for SecureCRT or Devolutions RDM."
)]
pub struct MakerArgs {
    /// Configuration settings file.
    #[arg(long, value_name = "CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Source Excel file.
    pub source: PathBuf,

    /// Destination type.
    #[arg(long = "type", value_enum, default_value_t = Target::Scrt)]
    pub target: Target,

    /// Write to file. Defaults to the 'export' subfolder of the source.
    #[arg(short, long, value_name = "DESTINATION", conflicts_with = "print")]
    pub write: Option<PathBuf>,

    /// Print to screen only.
    #[arg(short, long)]
    pub print: bool,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

#[derive(Debug, Parser)]
#[command(
    name = "session-reader",
    version,
    about = "Read a SecureCRT sessions XML file (source) and export it to an Excel file."
)]
pub struct ReaderArgs {
    /// Configuration settings file.
    #[arg(long, value_name = "CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// SecureCRT sessions XML file (export from SecureCRT).
    pub source: PathBuf,

    /// Destination Excel (xlsx) file. Defaults to the 'export' subfolder.
    #[arg(short, long, value_name = "DESTINATION")]
    pub write: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}
