//! Tabular export of batch results.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::matching::aggregator::MatchReport;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    overall_score: u32,
    experience_pct: u32,
    education_pct: u32,
    skills_pct: u32,
    assessment: &'static str,
}

impl<'a> ReportRow<'a> {
    fn new(id: &'a str, report: &MatchReport) -> Self {
        Self {
            id,
            overall_score: report.overall_score,
            experience_pct: report.criteria.experience.percentage,
            education_pct: report.criteria.education.percentage,
            skills_pct: report.criteria.skills.percentage,
            assessment: report.assessment.label(),
        }
    }
}

/// Renders one CSV row per `(id, report)` pair, header first.
pub fn reports_to_csv<'a, I>(rows: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a MatchReport)>,
{
    // Header written by hand so an empty batch still yields a well-formed file.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record([
        "id",
        "overall_score",
        "experience_pct",
        "education_pct",
        "skills_pct",
        "assessment",
    ])?;

    for (id, report) in rows {
        writer
            .serialize(ReportRow::new(id, report))
            .with_context(|| format!("failed to serialize report row for '{id}'"))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
