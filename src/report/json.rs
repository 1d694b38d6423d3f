use crate::error::TaxonResult;
use crate::report::TaxonReport;

/// Render a TaxonReport to pretty-printed JSON
pub fn render_json(report: &TaxonReport) -> TaxonResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
