//! Candidate and job-requirement records consumed by the matching engine,
//! plus the wire payloads they are validated from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::normalize::normalize_skill;

/// One education entry. Only `degree` takes part in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

impl EducationEntry {
    pub fn new(degree: impl Into<String>) -> Self {
        Self {
            degree: degree.into(),
            field: None,
            institution: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateProfile {
    skills: Vec<String>,
    education: Vec<EducationEntry>,
    total_years_experience: f64,
}

impl CandidateProfile {
    /// Skills are deduplicated by normalized value (first spelling kept).
    /// Negative years are clamped to 0.
    pub fn new(
        skills: Vec<String>,
        education: Vec<EducationEntry>,
        total_years_experience: f64,
    ) -> Self {
        Self {
            skills: dedup_skills(skills),
            education,
            total_years_experience: total_years_experience.max(0.0),
        }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    #[allow(dead_code)]
    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn degrees(&self) -> impl Iterator<Item = &str> {
        self.education.iter().map(|e| e.degree.as_str())
    }

    pub fn total_years_experience(&self) -> f64 {
        self.total_years_experience
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRequirement {
    required_skills: Vec<String>,
    required_education: String,
    min_experience_years: f64,
}

impl JobRequirement {
    pub fn new(
        required_skills: Vec<String>,
        required_education: impl Into<String>,
        min_experience_years: f64,
    ) -> Self {
        Self {
            required_skills: dedup_skills(required_skills),
            required_education: required_education.into(),
            min_experience_years,
        }
    }

    pub fn required_skills(&self) -> &[String] {
        &self.required_skills
    }

    pub fn required_education(&self) -> &str {
        &self.required_education
    }

    pub fn min_experience_years(&self) -> f64 {
        self.min_experience_years
    }
}

fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| {
            let key = normalize_skill(s);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Wire payloads
// ────────────────────────────────────────────────────────────────────────────

/// A skill as produced by the extraction step: a bare string or `{ "name": … }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillValue {
    Name(String),
    Named { name: String },
}

impl SkillValue {
    fn into_name(self) -> String {
        match self {
            SkillValue::Name(name) | SkillValue::Named { name } => name,
        }
    }
}

/// An education entry as a bare degree string or a full object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EducationValue {
    Degree(String),
    Entry(EducationEntry),
}

impl From<EducationValue> for EducationEntry {
    fn from(value: EducationValue) -> Self {
        match value {
            EducationValue::Degree(degree) => EducationEntry::new(degree),
            EducationValue::Entry(entry) => entry,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub skills: Option<Vec<SkillValue>>,
    pub education: Option<Vec<EducationValue>>,
    /// Absent means no experience.
    pub total_years_experience: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementPayload {
    pub required_skills: Option<Vec<String>>,
    pub required_education: Option<String>,
    pub min_experience_years: Option<f64>,
}

impl TryFrom<CandidatePayload> for CandidateProfile {
    type Error = AppError;

    fn try_from(payload: CandidatePayload) -> Result<Self, Self::Error> {
        let skills = payload
            .skills
            .ok_or_else(|| missing("candidate.skills"))?
            .into_iter()
            .map(SkillValue::into_name)
            .collect();
        let education = payload
            .education
            .ok_or_else(|| missing("candidate.education"))?
            .into_iter()
            .map(EducationEntry::from)
            .collect();

        Ok(CandidateProfile::new(
            skills,
            education,
            payload.total_years_experience.unwrap_or(0.0),
        ))
    }
}

impl TryFrom<RequirementPayload> for JobRequirement {
    type Error = AppError;

    fn try_from(payload: RequirementPayload) -> Result<Self, Self::Error> {
        let required_skills = payload
            .required_skills
            .ok_or_else(|| missing("requirement.requiredSkills"))?;
        let required_education = payload
            .required_education
            .ok_or_else(|| missing("requirement.requiredEducation"))?;
        let min_experience_years = payload
            .min_experience_years
            .ok_or_else(|| missing("requirement.minExperienceYears"))?;

        Ok(JobRequirement::new(
            required_skills,
            required_education,
            min_experience_years,
        ))
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("{field} is required"))
}
