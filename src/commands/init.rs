use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from("roimap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Roimap Configuration

[risk]
technical = 0.25
financial = 0.25
operational = 0.25
strategic = 0.25
factor_adjustment = 0.2

[trend]
up_pct = 2.0
down_pct = -2.0

[benchmark]
margin_pct = 10.0

[benchmark.industry]
average_simple_roi_pct = 150.0
average_payback_months = 9.0
average_error_reduction_pct = 60.0
average_monthly_hours_saved = 40.0

[sensitivity]
high_swing = 20.0
medium_swing = 5.0
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created roimap.toml configuration file");

    Ok(())
}
