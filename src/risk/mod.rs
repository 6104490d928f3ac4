//! Risk assessment: combines categorical risk scores and discrete
//! probability-weighted risk factors into an overall 0-100 score.

use serde::{Deserialize, Serialize};

use crate::config::RiskWeights;
use crate::errors::{EngineError, EngineResult};

const MAX_SCORE: f64 = 100.0;

/// Per-category risk scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub technical: f64,
    pub financial: f64,
    pub operational: f64,
    pub strategic: f64,
}

/// A discrete, probability-weighted source of financial risk.
/// `residual_risk` is what remains after mitigation and can never exceed
/// the unmitigated impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    /// Probability the factor materializes, 0-1
    pub probability: f64,
    pub financial_impact: f64,
    pub residual_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub category_scores: CategoryScores,
    pub factors: Vec<RiskFactor>,
    /// Probability-weighted share of the total factor impact, 0-100
    pub factor_exposure: f64,
    pub overall_score: f64,
}

pub struct RiskAssessor {
    weights: RiskWeights,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new(RiskWeights::default())
    }
}

impl RiskAssessor {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn assess(
        &self,
        scores: &CategoryScores,
        factors: &[RiskFactor],
    ) -> EngineResult<RiskAssessment> {
        validate_scores(scores)?;
        for factor in factors {
            validate_factor(factor)?;
        }

        let weighted_base = scores.technical * self.weights.technical
            + scores.financial * self.weights.financial
            + scores.operational * self.weights.operational
            + scores.strategic * self.weights.strategic;

        let factor_exposure = factor_exposure(factors);
        let overall_score =
            (weighted_base + factor_exposure * self.weights.factor_adjustment).min(MAX_SCORE);

        Ok(RiskAssessment {
            category_scores: *scores,
            factors: factors.to_vec(),
            factor_exposure,
            overall_score,
        })
    }
}

// Probability-weighted impact as a share of total impact, scaled to 0-100.
// No factors means no exposure.
fn factor_exposure(factors: &[RiskFactor]) -> f64 {
    let total_impact: f64 = factors.iter().map(|f| f.financial_impact).sum();
    if total_impact == 0.0 {
        return 0.0;
    }
    let weighted: f64 = factors
        .iter()
        .map(|f| f.probability * f.financial_impact)
        .sum();
    weighted / total_impact * 100.0
}

fn validate_scores(scores: &CategoryScores) -> EngineResult<()> {
    for (value, field) in [
        (scores.technical, "technical"),
        (scores.financial, "financial"),
        (scores.operational, "operational"),
        (scores.strategic, "strategic"),
    ] {
        if !(0.0..=MAX_SCORE).contains(&value) {
            return Err(EngineError::validation(
                field,
                value,
                "category score must be between 0 and 100",
            ));
        }
    }
    Ok(())
}

fn validate_factor(factor: &RiskFactor) -> EngineResult<()> {
    if !(0.0..=1.0).contains(&factor.probability) {
        return Err(EngineError::validation(
            format!("{}.probability", factor.name),
            factor.probability,
            "must be a probability between 0 and 1",
        ));
    }
    if factor.financial_impact < 0.0 {
        return Err(EngineError::validation(
            format!("{}.financial_impact", factor.name),
            factor.financial_impact,
            "must be non-negative",
        ));
    }
    if factor.residual_risk > factor.financial_impact {
        return Err(EngineError::validation(
            format!("{}.residual_risk", factor.name),
            factor.residual_risk,
            "residual risk cannot exceed the unmitigated impact",
        ));
    }
    if factor.residual_risk < 0.0 {
        return Err(EngineError::validation(
            format!("{}.residual_risk", factor.name),
            factor.residual_risk,
            "must be non-negative",
        ));
    }
    Ok(())
}
