use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::benchmark::IndustryBenchmarks;

/// Weights applied to the four risk category scores.
/// The four category weights must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    #[serde(default = "default_category_weight")]
    pub technical: f64,

    #[serde(default = "default_category_weight")]
    pub financial: f64,

    #[serde(default = "default_category_weight")]
    pub operational: f64,

    #[serde(default = "default_category_weight")]
    pub strategic: f64,

    /// Weight of the probability-weighted factor exposure added on top of
    /// the category mean (0.0-1.0)
    #[serde(default = "default_factor_weight")]
    pub factor_adjustment: f64,
}

fn default_category_weight() -> f64 {
    0.25
}

fn default_factor_weight() -> f64 {
    0.2
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            technical: default_category_weight(),
            financial: default_category_weight(),
            operational: default_category_weight(),
            strategic: default_category_weight(),
            factor_adjustment: default_factor_weight(),
        }
    }
}

impl RiskWeights {
    // Pure function: check a single weight is in valid range
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Validate that category weights sum to 1.0 (small floating tolerance).
    pub fn validate(&self) -> Result<(), String> {
        let sum = self.technical + self.financial + self.operational + self.strategic;
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Risk category weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }

        for (weight, name) in [
            (self.technical, "Technical"),
            (self.financial, "Financial"),
            (self.operational, "Operational"),
            (self.strategic, "Strategic"),
            (self.factor_adjustment, "Factor adjustment"),
        ] {
            Self::validate_weight(weight, name)?;
        }
        Ok(())
    }
}

/// Percentage-change cutoffs for trend direction classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendThresholds {
    /// Change above this percentage classifies as `Up`
    #[serde(default = "default_up_pct")]
    pub up_pct: f64,

    /// Change below this percentage classifies as `Down`
    #[serde(default = "default_down_pct")]
    pub down_pct: f64,
}

fn default_up_pct() -> f64 {
    2.0
}

fn default_down_pct() -> f64 {
    -2.0
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            up_pct: default_up_pct(),
            down_pct: default_down_pct(),
        }
    }
}

impl TrendThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.up_pct <= 0.0 {
            return Err("Trend up threshold must be positive".to_string());
        }
        if self.down_pct >= 0.0 {
            return Err("Trend down threshold must be negative".to_string());
        }
        Ok(())
    }
}

/// Benchmark reference table plus the underperformance margin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// A metric must underperform its benchmark by more than this margin
    /// (percent) before an improvement opportunity is reported
    #[serde(default = "default_margin_pct")]
    pub margin_pct: f64,

    #[serde(default)]
    pub industry: IndustryBenchmarks,
}

fn default_margin_pct() -> f64 {
    10.0
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            margin_pct: default_margin_pct(),
            industry: IndustryBenchmarks::default(),
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.margin_pct) {
            return Err("Benchmark margin must be between 0 and 100 percent".to_string());
        }
        self.industry.validate()
    }
}

/// ROI-swing cutoffs for sensitivity impact tiers, in percentage points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityTiers {
    #[serde(default = "default_high_swing")]
    pub high_swing: f64,

    #[serde(default = "default_medium_swing")]
    pub medium_swing: f64,
}

fn default_high_swing() -> f64 {
    20.0
}

fn default_medium_swing() -> f64 {
    5.0
}

impl Default for SensitivityTiers {
    fn default() -> Self {
        Self {
            high_swing: default_high_swing(),
            medium_swing: default_medium_swing(),
        }
    }
}

impl SensitivityTiers {
    pub fn validate(&self) -> Result<(), String> {
        if self.high_swing <= self.medium_swing {
            return Err("Sensitivity high swing must exceed medium swing".to_string());
        }
        if self.medium_swing <= 0.0 {
            return Err("Sensitivity medium swing must be positive".to_string());
        }
        Ok(())
    }
}

/// Engine configuration, loadable from `roimap.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoimapConfig {
    #[serde(default)]
    pub risk: RiskWeights,

    #[serde(default)]
    pub trend: TrendThresholds,

    #[serde(default)]
    pub benchmark: BenchmarkConfig,

    #[serde(default)]
    pub sensitivity: SensitivityTiers,
}

impl RoimapConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.risk.validate()?;
        self.trend.validate()?;
        self.benchmark.validate()?;
        self.sensitivity.validate()
    }
}

static DEFAULT_CONFIG: Lazy<RoimapConfig> = Lazy::new(RoimapConfig::default);

/// The built-in default configuration.
pub fn default_config() -> &'static RoimapConfig {
    &DEFAULT_CONFIG
}

/// Load configuration from an explicit path, from `./roimap.toml` when
/// present, or fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RoimapConfig> {
    let candidate = match path {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let local = Path::new("roimap.toml");
            local.exists().then(|| local.to_path_buf())
        }
    };

    let config = match candidate {
        Some(p) => {
            let content = std::fs::read_to_string(&p)?;
            let config: RoimapConfig = toml::from_str(&content)?;
            log::debug!("loaded configuration from {}", p.display());
            config
        }
        None => RoimapConfig::default(),
    };

    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("invalid configuration: {msg}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn default_config_is_valid() {
        assert!(RoimapConfig::default().validate().is_ok());
    }

    #[test]
    fn unbalanced_risk_weights_are_rejected() {
        let weights = RiskWeights {
            technical: 0.5,
            financial: 0.5,
            operational: 0.5,
            strategic: 0.5,
            factor_adjustment: 0.2,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let content = indoc! {r#"
            [trend]
            up_pct = 5.0
            down_pct = -5.0
        "#};
        let config: RoimapConfig = toml::from_str(content).unwrap();
        assert_eq!(config.trend.up_pct, 5.0);
        assert_eq!(config.risk.technical, 0.25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_trend_thresholds_are_rejected() {
        let trend = TrendThresholds {
            up_pct: -1.0,
            down_pct: -2.0,
        };
        assert!(trend.validate().is_err());
    }
}
