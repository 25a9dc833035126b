use serde::{Deserialize, Serialize};

/// Experience criterion sub-report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceResult {
    pub met: bool,
    pub percentage: u32,
    pub candidate_years: f64,
    pub required_years: f64,
    /// `max(0, required - candidate)`; drives the experience recommendation.
    pub shortfall_years: f64,
    pub details: String,
}

/// Proportional experience score capped at 100%.
///
/// `met` compares the raw years, never the rounded percentage, so 4.99 of 5
/// reads 100% but is not met. Negative or non-finite years are clamped to 0.
pub fn score(candidate_years: f64, required_years: f64) -> ExperienceResult {
    let candidate_years = sanitize(candidate_years);
    let required_years = sanitize(required_years);

    if required_years == 0.0 {
        return ExperienceResult {
            met: true,
            percentage: 100,
            candidate_years,
            required_years,
            shortfall_years: 0.0,
            details: format!(
                "No specific experience required. Candidate has {} years.",
                display_years(candidate_years)
            ),
        };
    }

    let met = candidate_years >= required_years;
    let percentage = ((candidate_years / required_years) * 100.0).round().min(100.0) as u32;
    let shortfall_years = (required_years - candidate_years).max(0.0);

    let details = if met {
        format!(
            "Candidate has {} years, required: {} years.",
            display_years(candidate_years),
            display_years(required_years)
        )
    } else {
        format!(
            "Candidate has {} years, required: {} years. {percentage}% match.",
            display_years_exact(candidate_years),
            display_years_exact(required_years)
        )
    };

    ExperienceResult {
        met,
        percentage,
        candidate_years,
        required_years,
        shortfall_years,
        details,
    }
}

fn sanitize(years: f64) -> f64 {
    if years.is_finite() {
        years.max(0.0)
    } else {
        0.0
    }
}

/// One decimal, trailing `.0` dropped: `5` → "5", `2.5` → "2.5".
fn display_years(years: f64) -> String {
    let rounded = (years * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

/// Up to two decimals, trailing zeros dropped: `4.96` → "4.96", `5` → "5".
fn display_years_exact(years: f64) -> String {
    let formatted = format!("{years:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Like [`display_years`], but a non-zero shortfall never renders as "0".
pub(crate) fn display_shortfall(years: f64) -> String {
    if years > 0.0 && years < 0.05 {
        return "0.1".to_string();
    }
    display_years(years)
}
