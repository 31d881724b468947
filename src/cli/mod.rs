pub mod completions;
pub mod convert;
pub mod init;
pub mod status;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "checkreg",
    version,
    about = "Convert CenterPoint check listings into TurningPoint check-register imports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CenterPoint export into a TurningPoint check register.
    Convert(ConvertArgs),
    /// Save organization name and other register defaults.
    Init {
        /// Organization name printed in the register title
        #[arg(long)]
        organization: Option<String>,
        /// Bank code written on every detail row
        #[arg(long)]
        category: Option<String>,
        /// Number of warnings listed individually after a conversion
        #[arg(long = "preview-limit")]
        preview_limit: Option<usize>,
        /// File name (without extension) used when --output is omitted
        #[arg(long = "output-name")]
        output_name: Option<String>,
    },
    /// Show the active settings.
    Status,
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ConvertArgs {
    /// CenterPoint export (.xls, .xlsx, .ods)
    pub source: String,
    /// Destination file (default: EXPORT.xlsx next to the source)
    #[arg(long, short)]
    pub output: Option<String>,
    /// Report date for the register title: YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Read and check the export without writing a register
    #[arg(long = "dry-run")]
    pub dry_run: bool,
    /// List every warning instead of the first few
    #[arg(long = "all-warnings")]
    pub all_warnings: bool,
    /// Print the conversion result as JSON
    #[arg(long)]
    pub json: bool,
}
