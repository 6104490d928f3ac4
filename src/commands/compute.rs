use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config;
use crate::engine::{self, CalculationRequest};
use crate::io::{self, output::OutputFormat};

pub struct ComputeConfig {
    pub request: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn compute(options: ComputeConfig) -> Result<()> {
    let config = config::load_config(options.config.as_deref())?;

    let content = io::read_file(&options.request)
        .with_context(|| format!("failed to read request file {}", options.request.display()))?;
    let request: CalculationRequest = serde_json::from_str(&content)
        .with_context(|| format!("malformed calculation request in {}", options.request.display()))?;

    log::info!(
        "computing ROI for workflow {} (organization {})",
        request.workflow_id,
        request.organization_id
    );
    let calculation = engine::compute_roi(&request, &config)?;

    let mut writer = io::create_writer(options.format, options.output.as_deref())?;
    writer.write_calculation(&calculation)
}
