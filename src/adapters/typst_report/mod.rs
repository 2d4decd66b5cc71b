//! Typst-based report generation.
//!
//! Orchestrates placeholder resolution: reads a Typst template (either the
//! built-in default or a custom file via `template_path`), resolves all
//! `{{PLACEHOLDER}}` markers by calling helpers from `chart_svg` and `tables`,
//! and writes the final `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::DcasimError;
use crate::domain::simulation::InvestmentHistory;
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;

/// Context for resolving template placeholders.
pub struct ReportContext<'a> {
    pub history: &'a InvestmentHistory,
    pub summary: &'a Summary,
}

/// Resolve all `{{PLACEHOLDER}}`s in the given template string and return
/// the final Typst markup ready to be written to a `.typ` file.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let mut output = template.to_string();

    let summary_table = tables::render_summary_table(ctx.summary);
    output = output.replace("{{SIMULATION_SUMMARY}}", &summary_table);

    let insights = tables::render_insights_table(ctx.summary);
    output = output.replace("{{INSIGHTS_TABLE}}", &insights);

    output = output.replace(
        "{{GROWTH_CHART_SVG}}",
        &embed_svg(chart_svg::generate_growth_svg(ctx.history)),
    );
    output = output.replace(
        "{{RETURN_CHART_SVG}}",
        &embed_svg(chart_svg::generate_return_svg(ctx.history)),
    );
    output = output.replace(
        "{{PRICE_CHART_SVG}}",
        &embed_svg(chart_svg::generate_price_svg(ctx.history)),
    );
    output = output.replace(
        "{{HOLDINGS_CHART_SVG}}",
        &embed_svg(chart_svg::generate_holdings_svg(ctx.history)),
    );

    let history_table = tables::render_history_table(ctx.history);
    output = output.replace("{{HISTORY_TABLE}}", &history_table);

    output
}

/// SVG wrapped in Typst image.decode, or a placeholder note when empty.
fn embed_svg(svg: String) -> String {
    if svg.is_empty() {
        "_No chart data._".to_string()
    } else {
        format!(
            "#image.decode(\n\"{}\",\n  width: 100%,\n)",
            svg.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

/// [`ReportPort`] implementation producing a `.typ` file.
pub struct TypstReportAdapter {
    template_path: Option<PathBuf>,
}

impl TypstReportAdapter {
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self { template_path }
    }
}

impl ReportPort for TypstReportAdapter {
    fn write(
        &self,
        history: &InvestmentHistory,
        summary: &Summary,
        output_path: &Path,
    ) -> Result<(), DcasimError> {
        let template_content: String;
        let template: &str = match &self.template_path {
            Some(path) => {
                template_content = fs::read_to_string(path).map_err(|e| DcasimError::Data {
                    reason: format!("failed to read template {}: {}", path.display(), e),
                })?;
                &template_content
            }
            None => default_template::template(),
        };

        let ctx = ReportContext { history, summary };
        let content = resolve(template, &ctx);
        fs::write(output_path, content)?;
        Ok(())
    }
}
