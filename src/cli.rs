use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::io::output;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => output::OutputFormat::Json,
            OutputFormat::Markdown => output::OutputFormat::Markdown,
            OutputFormat::Terminal => output::OutputFormat::Terminal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "roimap")]
#[command(about = "ROI and business-impact analyzer for workflow automation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute ROI, sensitivity, risk and benchmark results for a workflow
    Compute {
        /// Calculation request file (JSON)
        request: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to ./roimap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Assemble an organization dashboard from recorded metrics
    Dashboard {
        /// Dashboard request file (JSON)
        request: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to ./roimap.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create a default roimap.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
