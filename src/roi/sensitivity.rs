//! Scenario analysis: perturb one input at a time to measure per-variable
//! ROI impact, then combine every favorable (or unfavorable) bound into
//! optimistic and pessimistic scenarios.

use serde::{Deserialize, Serialize};

use crate::config::SensitivityTiers;
use crate::core::{MetricValue, RoiAssumptions, RoiInputs, RoiResults};
use crate::errors::{EngineError, EngineResult};
use crate::roi::RoiCalculator;

/// Perturbable calculation inputs. A closed set so the analyzer can apply
/// a value without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputVariable {
    ManualMinutesPerTask,
    AutomatedMinutesPerTask,
    TasksPerPeriod,
    EmployeeHourlyRate,
    ImplementationHours,
    ImplementationHourlyRate,
    MonthlySoftwareCost,
    ManualErrorRate,
    AutomatedErrorRate,
    ReworkCostPerError,
}

impl InputVariable {
    pub fn display_name(&self) -> &str {
        match self {
            InputVariable::ManualMinutesPerTask => "Manual minutes per task",
            InputVariable::AutomatedMinutesPerTask => "Automated minutes per task",
            InputVariable::TasksPerPeriod => "Tasks per period",
            InputVariable::EmployeeHourlyRate => "Employee hourly rate",
            InputVariable::ImplementationHours => "Implementation hours",
            InputVariable::ImplementationHourlyRate => "Implementation hourly rate",
            InputVariable::MonthlySoftwareCost => "Monthly software cost",
            InputVariable::ManualErrorRate => "Manual error rate",
            InputVariable::AutomatedErrorRate => "Automated error rate",
            InputVariable::ReworkCostPerError => "Rework cost per error",
        }
    }

    pub fn base_value(&self, inputs: &RoiInputs) -> f64 {
        match self {
            InputVariable::ManualMinutesPerTask => inputs.manual_minutes_per_task,
            InputVariable::AutomatedMinutesPerTask => inputs.automated_minutes_per_task,
            InputVariable::TasksPerPeriod => inputs.tasks_per_period,
            InputVariable::EmployeeHourlyRate => inputs.employee_hourly_rate,
            InputVariable::ImplementationHours => inputs.implementation_hours,
            InputVariable::ImplementationHourlyRate => inputs.implementation_hourly_rate,
            InputVariable::MonthlySoftwareCost => inputs.monthly_software_cost,
            InputVariable::ManualErrorRate => inputs.manual_error_rate,
            InputVariable::AutomatedErrorRate => inputs.automated_error_rate,
            InputVariable::ReworkCostPerError => inputs.rework_cost_per_error,
        }
    }

    /// A copy of `inputs` with this variable set to `value`.
    pub fn with_value(&self, inputs: &RoiInputs, value: f64) -> RoiInputs {
        let mut perturbed = inputs.clone();
        match self {
            InputVariable::ManualMinutesPerTask => perturbed.manual_minutes_per_task = value,
            InputVariable::AutomatedMinutesPerTask => perturbed.automated_minutes_per_task = value,
            InputVariable::TasksPerPeriod => perturbed.tasks_per_period = value,
            InputVariable::EmployeeHourlyRate => perturbed.employee_hourly_rate = value,
            InputVariable::ImplementationHours => perturbed.implementation_hours = value,
            InputVariable::ImplementationHourlyRate => {
                perturbed.implementation_hourly_rate = value
            }
            InputVariable::MonthlySoftwareCost => perturbed.monthly_software_cost = value,
            InputVariable::ManualErrorRate => perturbed.manual_error_rate = value,
            InputVariable::AutomatedErrorRate => perturbed.automated_error_rate = value,
            InputVariable::ReworkCostPerError => perturbed.rework_cost_per_error = value,
        }
        perturbed
    }
}

/// Caller-supplied perturbation range for one variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableRange {
    pub variable: InputVariable,
    pub min: f64,
    pub max: f64,
}

/// Qualitative size of a variable's influence on ROI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactTier {
    High,
    Medium,
    Low,
}

/// One analyzed variable: its range, ROI impact per unit change, and tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityVariable {
    pub variable: InputVariable,
    pub base: f64,
    pub min: f64,
    pub max: f64,
    /// Change in simple ROI per unit change of the variable
    pub impact_on_roi: MetricValue,
    pub impact_tier: ImpactTier,
}

/// Per-variable impacts plus three full result snapshots. Derived, never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    pub variables: Vec<SensitivityVariable>,
    pub optimistic: RoiResults,
    pub pessimistic: RoiResults,
    pub most_likely: RoiResults,
}

pub struct SensitivityAnalyzer {
    calculator: RoiCalculator,
    tiers: SensitivityTiers,
}

impl Default for SensitivityAnalyzer {
    fn default() -> Self {
        Self::new(SensitivityTiers::default())
    }
}

impl SensitivityAnalyzer {
    pub fn new(tiers: SensitivityTiers) -> Self {
        Self {
            calculator: RoiCalculator::new(),
            tiers,
        }
    }

    pub fn analyze(
        &self,
        inputs: &RoiInputs,
        assumptions: &RoiAssumptions,
        ranges: &[VariableRange],
    ) -> EngineResult<SensitivityAnalysis> {
        let most_likely = self.calculator.compute(inputs, assumptions)?;

        let mut variables = Vec::with_capacity(ranges.len());
        let mut favorable = Vec::with_capacity(ranges.len());
        let mut unfavorable = Vec::with_capacity(ranges.len());

        for range in ranges {
            if range.min > range.max {
                return Err(EngineError::validation(
                    range.variable.display_name(),
                    range.min,
                    "range minimum exceeds maximum",
                ));
            }

            let at_min = self
                .calculator
                .compute(&range.variable.with_value(inputs, range.min), assumptions)?;
            let at_max = self
                .calculator
                .compute(&range.variable.with_value(inputs, range.max), assumptions)?;

            let impact_on_roi = roi_slope(&at_min, &at_max, range);
            let swing = roi_swing(&at_min, &at_max);
            let impact_tier = self.classify_tier(swing);

            // Ties in favorability go to the bound that does not decrease ROI.
            let max_is_favorable = at_max.simple_roi.unwrap_or(f64::NEG_INFINITY)
                >= at_min.simple_roi.unwrap_or(f64::NEG_INFINITY);
            let (fav, unfav) = if max_is_favorable {
                (range.max, range.min)
            } else {
                (range.min, range.max)
            };
            favorable.push((range.variable, fav));
            unfavorable.push((range.variable, unfav));

            variables.push(SensitivityVariable {
                variable: range.variable,
                base: range.variable.base_value(inputs),
                min: range.min,
                max: range.max,
                impact_on_roi,
                impact_tier,
            });
        }

        let optimistic = self
            .calculator
            .compute(&apply_all(inputs, &favorable), assumptions)?;
        let pessimistic = self
            .calculator
            .compute(&apply_all(inputs, &unfavorable), assumptions)?;

        Ok(SensitivityAnalysis {
            variables,
            optimistic,
            pessimistic,
            most_likely,
        })
    }

    fn classify_tier(&self, swing: Option<f64>) -> ImpactTier {
        match swing {
            Some(s) if s > self.tiers.high_swing => ImpactTier::High,
            Some(s) if s > self.tiers.medium_swing => ImpactTier::Medium,
            _ => ImpactTier::Low,
        }
    }
}

// Change in simple ROI per unit change of the variable across its range
fn roi_slope(at_min: &RoiResults, at_max: &RoiResults, range: &VariableRange) -> MetricValue {
    match (at_min.simple_roi.converged(), at_max.simple_roi.converged()) {
        (Some(lo), Some(hi)) if range.max != range.min => {
            MetricValue::Converged((hi - lo) / (range.max - range.min))
        }
        _ => MetricValue::NonConvergent,
    }
}

// Absolute ROI swing across the range, in percentage points
fn roi_swing(at_min: &RoiResults, at_max: &RoiResults) -> Option<f64> {
    match (at_min.simple_roi.converged(), at_max.simple_roi.converged()) {
        (Some(lo), Some(hi)) => Some((hi - lo).abs()),
        _ => None,
    }
}

fn apply_all(inputs: &RoiInputs, values: &[(InputVariable, f64)]) -> RoiInputs {
    values
        .iter()
        .fold(inputs.clone(), |acc, (variable, value)| {
            variable.with_value(&acc, *value)
        })
}
