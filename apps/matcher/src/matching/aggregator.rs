//! Score Aggregator — folds the three criterion results into one report.
//!
//! overall = round(experience × 0.35 + education × 0.25 + skills × 0.40)
//!
//! Recommendations are derived from gaps only, in a fixed order: missing
//! skills (requirement order), then education, then experience.

use serde::{Deserialize, Serialize};

use crate::matching::education::EducationResult;
use crate::matching::error::ConfigError;
use crate::matching::experience::{display_shortfall, ExperienceResult};
use crate::matching::skill_matcher::SkillsResult;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            experience: 0.35,
            education: 0.25,
            skills: 0.40,
        }
    }
}

impl Weights {
    pub fn new(experience: f64, education: f64, skills: f64) -> Result<Self, ConfigError> {
        let weights = Self {
            experience,
            education,
            skills,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.experience + self.education + self.skills
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = [self.experience, self.education, self.skills]
            .iter()
            .all(|w| (0.0..=1.0).contains(w));
        let sum = self.sum();
        if in_range && (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            Ok(())
        } else {
            Err(ConfigError::WeightSum {
                experience: self.experience,
                education: self.education,
                skills: self.skills,
                sum,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Excellent,
    Great,
    Good,
    Moderate,
    Poor,
}

impl Assessment {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Assessment::Excellent,
            75..=89 => Assessment::Great,
            60..=74 => Assessment::Good,
            40..=59 => Assessment::Moderate,
            _ => Assessment::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Excellent => "Excellent Match",
            Assessment::Great => "Great Match",
            Assessment::Good => "Good Match",
            Assessment::Moderate => "Moderate Match",
            Assessment::Poor => "Poor Match",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub experience: ExperienceResult,
    pub education: EducationResult,
    pub skills: SkillsResult,
}

/// Weighted contribution of each criterion to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
}

/// Full match report for one (candidate, requirement) pair. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub overall_score: u32, // 0 – 100
    pub assessment: Assessment,
    pub criteria: Criteria,
    pub section_scores: SectionScores,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: Weights,
}

impl ScoreAggregator {
    pub fn new(weights: Weights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn aggregate(
        &self,
        skills: SkillsResult,
        education: EducationResult,
        experience: ExperienceResult,
    ) -> MatchReport {
        let w = self.weights;
        let section_scores = SectionScores {
            experience: one_decimal(experience.percentage as f64 * w.experience),
            education: one_decimal(education.percentage as f64 * w.education),
            skills: one_decimal(skills.percentage as f64 * w.skills),
        };

        let weighted = experience.percentage as f64 * w.experience
            + education.percentage as f64 * w.education
            + skills.percentage as f64 * w.skills;
        let overall_score = weighted.round().clamp(0.0, 100.0) as u32;

        let recommendations = build_recommendations(&skills, &education, &experience);
        let gaps = build_gaps(&skills, &education, &experience);
        let summary = build_summary(overall_score, &skills, &education, &experience);

        MatchReport {
            overall_score,
            assessment: Assessment::from_score(overall_score),
            criteria: Criteria {
                experience,
                education,
                skills,
            },
            section_scores,
            gaps,
            recommendations,
            summary,
        }
    }
}

fn build_recommendations(
    skills: &SkillsResult,
    education: &EducationResult,
    experience: &ExperienceResult,
) -> Vec<String> {
    let mut recommendations: Vec<String> = skills
        .missing_skills
        .iter()
        .map(|skill| format!("Acquire skill: {skill}"))
        .collect();

    if !education.met {
        recommendations.push(format!(
            "Pursue a {} or equivalent qualification",
            education.required_degree
        ));
    }

    if !experience.met {
        let years = display_shortfall(experience.shortfall_years);
        let unit = if years == "1" { "year" } else { "years" };
        recommendations.push(format!("Gain {years} more {unit} of experience"));
    }

    recommendations
}

fn build_gaps(
    skills: &SkillsResult,
    education: &EducationResult,
    experience: &ExperienceResult,
) -> Vec<String> {
    let mut gaps = Vec::new();
    if !experience.met {
        gaps.push(format!("Experience: {}% match", experience.percentage));
    }
    if !education.met {
        gaps.push(format!("Education: {}% match", education.percentage));
    }
    if !skills.met {
        gaps.push(format!("Skills: {}% match", skills.percentage));
    }
    gaps
}

fn build_summary(
    score: u32,
    skills: &SkillsResult,
    education: &EducationResult,
    experience: &ExperienceResult,
) -> String {
    let met = [skills.met, education.met, experience.met]
        .iter()
        .filter(|m| **m)
        .count();
    let verdict = if score >= 75 {
        "Strong candidate for interview."
    } else if score >= 60 {
        "Good candidate to consider."
    } else if score >= 40 {
        "Moderate candidate with gaps."
    } else {
        "Significant improvement needed."
    };
    format!("Matches {met}/3 criteria. {verdict}")
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::education::EducationStatus;
    use crate::matching::experience;

    fn skills_result(percentage: u32, missing: &[&str]) -> SkillsResult {
        SkillsResult {
            met: percentage >= 50,
            percentage,
            candidate_skills_count: 3,
            required_skills_count: 4,
            matched_skills: vec![],
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            skill_match_details: vec![],
            details: String::new(),
        }
    }

    fn education_result(met: bool, percentage: u32) -> EducationResult {
        EducationResult {
            met,
            percentage,
            is_overqualified: false,
            status: EducationStatus::Compared,
            candidate_degree: Some("Diploma".to_string()),
            required_degree: "Bachelor".to_string(),
            candidate_level: None,
            required_level: None,
            details: String::new(),
        }
    }

    #[test]
    fn test_default_weights_are_valid() {
        assert!(Weights::default().validate().is_ok());
        assert!((Weights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_sum_violation_is_config_error() {
        let err = Weights::new(0.3, 0.3, 0.3).unwrap_err();
        assert!(matches!(err, ConfigError::WeightSum { .. }));
        assert!(ScoreAggregator::new(Weights {
            experience: 0.3,
            education: 0.3,
            skills: 0.3,
        })
        .is_err());
    }

    #[test]
    fn test_negative_weight_is_rejected_even_if_sum_is_one() {
        assert!(Weights::new(1.2, -0.2, 0.0).is_err());
    }

    #[test]
    fn test_overall_is_weighted_sum() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let report = agg.aggregate(
            skills_result(50, &["kafka", "rust"]),
            education_result(false, 50),
            experience::score(2.5, 5.0),
        );
        // 50×0.35 + 50×0.25 + 50×0.40 = 50
        assert_eq!(report.overall_score, 50);
        assert_eq!(report.assessment, Assessment::Moderate);
        assert_eq!(report.section_scores.experience, 17.5);
        assert_eq!(report.section_scores.education, 12.5);
        assert_eq!(report.section_scores.skills, 20.0);
    }

    #[test]
    fn test_perfect_report_has_no_recommendations() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let report = agg.aggregate(
            skills_result(100, &[]),
            education_result(true, 100),
            experience::score(6.0, 5.0),
        );
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.assessment, Assessment::Excellent);
        assert!(report.recommendations.is_empty());
        assert!(report.gaps.is_empty());
        assert_eq!(report.summary, "Matches 3/3 criteria. Strong candidate for interview.");
    }

    #[test]
    fn test_recommendation_order() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let report = agg.aggregate(
            skills_result(25, &["terraform", "haskell"]),
            education_result(false, 50),
            experience::score(2.0, 3.0),
        );
        assert_eq!(
            report.recommendations,
            vec![
                "Acquire skill: terraform".to_string(),
                "Acquire skill: haskell".to_string(),
                "Pursue a Bachelor or equivalent qualification".to_string(),
                "Gain 1 more year of experience".to_string(),
            ]
        );
        assert_eq!(
            report.gaps,
            vec!["Experience: 67% match", "Education: 50% match", "Skills: 25% match"]
        );
    }

    #[test]
    fn test_fractional_shortfall_in_recommendation() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let report = agg.aggregate(
            skills_result(100, &[]),
            education_result(true, 100),
            experience::score(2.5, 5.0),
        );
        assert_eq!(report.recommendations, vec!["Gain 2.5 more years of experience"]);
    }

    #[test]
    fn test_near_miss_shortfall_is_not_zero_years() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let report = agg.aggregate(
            skills_result(100, &[]),
            education_result(true, 100),
            experience::score(4.96, 5.0),
        );
        assert!(!report.criteria.experience.met);
        assert_eq!(report.recommendations, vec!["Gain 0.1 more years of experience"]);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let skills = skills_result(75, &["go"]);
        let education = education_result(false, 67);
        let experience = experience::score(3.3, 4.0);
        let first = agg.aggregate(skills.clone(), education.clone(), experience.clone());
        let second = agg.aggregate(skills, education, experience);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights() {
        let agg = ScoreAggregator::new(Weights::new(0.0, 0.0, 1.0).unwrap()).unwrap();
        let report = agg.aggregate(
            skills_result(40, &[]),
            education_result(true, 100),
            experience::score(9.0, 1.0),
        );
        assert_eq!(report.overall_score, 40);
    }

    #[test]
    fn test_assessment_thresholds() {
        assert_eq!(Assessment::from_score(100), Assessment::Excellent);
        assert_eq!(Assessment::from_score(90), Assessment::Excellent);
        assert_eq!(Assessment::from_score(89), Assessment::Great);
        assert_eq!(Assessment::from_score(60), Assessment::Good);
        assert_eq!(Assessment::from_score(40), Assessment::Moderate);
        assert_eq!(Assessment::from_score(39), Assessment::Poor);
        assert_eq!(Assessment::Poor.label(), "Poor Match");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let agg = ScoreAggregator::new(Weights::default()).unwrap();
        let report = agg.aggregate(
            skills_result(100, &[]),
            education_result(true, 100),
            experience::score(1.0, 1.0),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overallScore"], 100);
        assert_eq!(json["criteria"]["skills"]["requiredSkillsCount"], 4);
        assert_eq!(json["criteria"]["education"]["isOverqualified"], false);
        assert_eq!(json["assessment"], "excellent");
    }
}
