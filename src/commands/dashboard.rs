use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config;
use crate::engine::{self, DashboardRequest};
use crate::io::{self, output::OutputFormat};

pub struct DashboardConfig {
    pub request: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn dashboard(options: DashboardConfig) -> Result<()> {
    let config = config::load_config(options.config.as_deref())?;

    let content = io::read_file(&options.request)
        .with_context(|| format!("failed to read request file {}", options.request.display()))?;
    let request: DashboardRequest = serde_json::from_str(&content)
        .with_context(|| format!("malformed dashboard request in {}", options.request.display()))?;

    log::info!(
        "building dashboard for organization {} from {} samples",
        request.organization_id,
        request.samples.len()
    );
    let dashboard = engine::build_dashboard(&request, &config);

    let mut writer = io::create_writer(options.format, options.output.as_deref())?;
    writer.write_dashboard(&dashboard)
}
