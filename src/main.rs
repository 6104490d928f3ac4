use anyhow::Result;
use clap::Parser;
use roimap::cli::{Cli, Commands};
use roimap::commands::{compute, dashboard, init};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            request,
            format,
            output,
            config,
        } => compute::compute(compute::ComputeConfig {
            request,
            format: format.into(),
            output,
            config,
        }),
        Commands::Dashboard {
            request,
            format,
            output,
            config,
        } => dashboard::dashboard(dashboard::DashboardConfig {
            request,
            format: format.into(),
            output,
            config,
        }),
        Commands::Init { force } => init::init_config(force),
    }
}
