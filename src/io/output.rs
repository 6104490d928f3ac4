use crate::core::{MetricValue, PaybackPeriod, RoiCalculation};
use crate::dashboard::BusinessDashboard;
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_calculation(&mut self, calculation: &RoiCalculation) -> anyhow::Result<()>;
    fn write_dashboard(&mut self, dashboard: &BusinessDashboard) -> anyhow::Result<()>;
}

/// Create a writer for the chosen format, targeting a file or stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let destination: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
    })
}

fn fmt_metric(value: MetricValue) -> String {
    match value {
        MetricValue::Converged(v) => format!("{v:.2}"),
        MetricValue::NonConvergent => "n/a".to_string(),
    }
}

fn fmt_payback(payback: PaybackPeriod) -> String {
    match payback {
        PaybackPeriod::Months(m) => format!("{m:.2} months"),
        PaybackPeriod::Never => "never".to_string(),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_calculation(&mut self, calculation: &RoiCalculation) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(calculation)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }

    fn write_dashboard(&mut self, dashboard: &BusinessDashboard) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(dashboard)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_results_table(&mut self, calculation: &RoiCalculation) -> anyhow::Result<()> {
        let results = &calculation.results;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Monthly savings | {:.2} |",
            results.monthly_savings
        )?;
        writeln!(
            self.writer,
            "| Annual savings | {:.2} |",
            results.annual_savings
        )?;
        writeln!(
            self.writer,
            "| Implementation cost | {:.2} |",
            results.implementation_cost
        )?;
        writeln!(
            self.writer,
            "| Payback period | {} |",
            fmt_payback(results.payback_period)
        )?;
        writeln!(
            self.writer,
            "| Net present value | {:.2} |",
            results.net_present_value
        )?;
        writeln!(
            self.writer,
            "| Internal rate of return | {}% |",
            fmt_metric(results.internal_rate_of_return)
        )?;
        writeln!(
            self.writer,
            "| Simple ROI | {}% |",
            fmt_metric(results.simple_roi)
        )?;
        writeln!(
            self.writer,
            "| Monthly hours saved | {:.1} |",
            results.monthly_hours_saved
        )?;
        writeln!(
            self.writer,
            "| Error reduction | {}% |",
            fmt_metric(results.error_reduction)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_calculation(&mut self, calculation: &RoiCalculation) -> anyhow::Result<()> {
        writeln!(self.writer, "# ROI Analysis: {}", calculation.workflow_id)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            calculation.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Status: {}", calculation.status)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Results")?;
        writeln!(self.writer)?;
        self.write_results_table(calculation)?;

        if !calculation.results.warnings.is_empty() {
            writeln!(self.writer, "## Warnings")?;
            writeln!(self.writer)?;
            for warning in &calculation.results.warnings {
                writeln!(self.writer, "- {warning}")?;
            }
            writeln!(self.writer)?;
        }

        if let Some(sensitivity) = &calculation.sensitivity {
            writeln!(self.writer, "## Sensitivity")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Variable | Impact on ROI | Tier |")?;
            writeln!(self.writer, "|----------|---------------|------|")?;
            for variable in &sensitivity.variables {
                writeln!(
                    self.writer,
                    "| {} | {} | {:?} |",
                    variable.variable.display_name(),
                    fmt_metric(variable.impact_on_roi),
                    variable.impact_tier
                )?;
            }
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "Scenarios: optimistic {}%, most likely {}%, pessimistic {}%",
                fmt_metric(sensitivity.optimistic.simple_roi),
                fmt_metric(sensitivity.most_likely.simple_roi),
                fmt_metric(sensitivity.pessimistic.simple_roi)
            )?;
            writeln!(self.writer)?;
        }

        if let Some(risk) = &calculation.risk {
            writeln!(self.writer, "## Risk")?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "Overall risk score: {:.1}/100",
                risk.overall_score
            )?;
            writeln!(self.writer)?;
        }

        if let Some(benchmark) = &calculation.benchmark {
            if !benchmark.improvement_opportunities.is_empty() {
                writeln!(self.writer, "## Improvement Opportunities")?;
                writeln!(self.writer)?;
                for opportunity in &benchmark.improvement_opportunities {
                    writeln!(self.writer, "- {}", opportunity.suggestion)?;
                }
                writeln!(self.writer)?;
            }
        }

        Ok(())
    }

    fn write_dashboard(&mut self, dashboard: &BusinessDashboard) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "# Business Dashboard: {}",
            dashboard.organization_id
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;

        let summary = &dashboard.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Workflows | {} |", summary.total_workflows)?;
        writeln!(self.writer, "| Executions | {} |", summary.total_executions)?;
        writeln!(
            self.writer,
            "| Time saved | {:.1} hours |",
            summary.total_time_saved_hours
        )?;
        writeln!(
            self.writer,
            "| Cost savings | {:.2} |",
            summary.total_cost_savings
        )?;
        writeln!(
            self.writer,
            "| Success rate | {:.1}% |",
            summary.average_success_rate
        )?;
        writeln!(
            self.writer,
            "| Average ROI | {}% |",
            fmt_metric(summary.average_roi)
        )?;
        writeln!(self.writer)?;

        if !dashboard.trends.is_empty() {
            writeln!(self.writer, "## Trends")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Metric | Direction | Change |")?;
            writeln!(self.writer, "|--------|-----------|--------|")?;
            for trend in &dashboard.trends {
                writeln!(
                    self.writer,
                    "| {} | {:?} | {:+.1}% |",
                    trend.metric_type, trend.direction, trend.change_pct
                )?;
            }
            writeln!(self.writer)?;
        }

        for (title, lines) in [
            ("Insights", &dashboard.insights),
            ("Recommendations", &dashboard.recommendations),
        ] {
            if !lines.is_empty() {
                writeln!(self.writer, "## {title}")?;
                writeln!(self.writer)?;
                for line in lines {
                    writeln!(self.writer, "- {line}")?;
                }
                writeln!(self.writer)?;
            }
        }

        if !dashboard.alerts.is_empty() {
            writeln!(self.writer, "## Alerts")?;
            writeln!(self.writer)?;
            for alert in &dashboard.alerts {
                writeln!(
                    self.writer,
                    "- [{:?}] {} ({})",
                    alert.severity, alert.message, alert.workflow_id
                )?;
            }
            writeln!(self.writer)?;
        }

        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_line(&mut self, label: &str, value: String) -> anyhow::Result<()> {
        writeln!(self.writer, "  {:<28} {}", label, value)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_calculation(&mut self, calculation: &RoiCalculation) -> anyhow::Result<()> {
        let results = &calculation.results;
        writeln!(
            self.writer,
            "{}",
            format!("ROI Analysis: {}", calculation.workflow_id).bold()
        )?;
        writeln!(self.writer)?;

        let savings = format!("{:.2}", results.monthly_savings);
        let savings = if results.monthly_savings >= 0.0 {
            savings.green()
        } else {
            savings.red()
        };
        self.write_line("Monthly savings:", savings.to_string())?;
        self.write_line("Annual savings:", format!("{:.2}", results.annual_savings))?;
        self.write_line(
            "Implementation cost:",
            format!("{:.2}", results.implementation_cost),
        )?;
        self.write_line("Payback period:", fmt_payback(results.payback_period))?;
        self.write_line(
            "Net present value:",
            format!("{:.2}", results.net_present_value),
        )?;
        self.write_line(
            "Internal rate of return:",
            format!("{}%", fmt_metric(results.internal_rate_of_return)),
        )?;
        self.write_line("Simple ROI:", format!("{}%", fmt_metric(results.simple_roi)))?;
        self.write_line(
            "Monthly hours saved:",
            format!("{:.1}", results.monthly_hours_saved),
        )?;

        for warning in &results.warnings {
            writeln!(self.writer, "  {} {}", "warning:".yellow().bold(), warning)?;
        }

        if let Some(sensitivity) = &calculation.sensitivity {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Scenarios".bold())?;
            self.write_line(
                "Optimistic ROI:",
                format!("{}%", fmt_metric(sensitivity.optimistic.simple_roi)),
            )?;
            self.write_line(
                "Most likely ROI:",
                format!("{}%", fmt_metric(sensitivity.most_likely.simple_roi)),
            )?;
            self.write_line(
                "Pessimistic ROI:",
                format!("{}%", fmt_metric(sensitivity.pessimistic.simple_roi)),
            )?;
        }

        if let Some(risk) = &calculation.risk {
            writeln!(self.writer)?;
            let score = format!("{:.1}/100", risk.overall_score);
            let score = if risk.overall_score >= 70.0 {
                score.red()
            } else if risk.overall_score >= 40.0 {
                score.yellow()
            } else {
                score.green()
            };
            self.write_line("Overall risk:", score.to_string())?;
        }

        if let Some(benchmark) = &calculation.benchmark {
            for opportunity in &benchmark.improvement_opportunities {
                writeln!(
                    self.writer,
                    "  {} {}",
                    "opportunity:".cyan().bold(),
                    opportunity.suggestion
                )?;
            }
        }

        Ok(())
    }

    fn write_dashboard(&mut self, dashboard: &BusinessDashboard) -> anyhow::Result<()> {
        let summary = &dashboard.summary;
        writeln!(
            self.writer,
            "{}",
            format!("Dashboard: {}", dashboard.organization_id).bold()
        )?;
        writeln!(self.writer)?;
        self.write_line("Workflows:", summary.total_workflows.to_string())?;
        self.write_line("Executions:", summary.total_executions.to_string())?;
        self.write_line(
            "Time saved:",
            format!("{:.1} hours", summary.total_time_saved_hours),
        )?;
        self.write_line(
            "Cost savings:",
            format!("{:.2}", summary.total_cost_savings),
        )?;
        self.write_line(
            "Success rate:",
            format!("{:.1}%", summary.average_success_rate),
        )?;
        self.write_line(
            "Average ROI:",
            format!("{}%", fmt_metric(summary.average_roi)),
        )?;

        if !dashboard.trends.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Trends".bold())?;
            for trend in &dashboard.trends {
                let direction = match trend.direction {
                    crate::core::TrendDirection::Up => "up".green(),
                    crate::core::TrendDirection::Down => "down".red(),
                    crate::core::TrendDirection::Stable => "stable".normal(),
                };
                self.write_line(
                    &format!("{}:", trend.metric_type),
                    format!("{} ({:+.1}%)", direction, trend.change_pct),
                )?;
            }
        }

        for line in &dashboard.insights {
            writeln!(self.writer, "  {} {}", "insight:".cyan().bold(), line)?;
        }
        for line in &dashboard.recommendations {
            writeln!(self.writer, "  {} {}", "recommend:".yellow().bold(), line)?;
        }
        for alert in &dashboard.alerts {
            writeln!(self.writer, "  {} {}", "alert:".red().bold(), alert.message)?;
        }

        Ok(())
    }
}
