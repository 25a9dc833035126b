//! Matching Engine — the one entry point callers use. Validates configuration
//! once, then scores (candidate, requirement) pairs as a pure computation.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::matching::aggregator::{MatchReport, ScoreAggregator, Weights};
use crate::matching::education::{default_levels, EducationHierarchy, LevelDefinition};
use crate::matching::error::ConfigError;
use crate::matching::experience;
use crate::matching::skill_matcher::{SkillMatcher, DEFAULT_FUZZY_THRESHOLD};
use crate::matching::taxonomy::{default_families, SkillFamily, SkillTaxonomy};
use crate::models::profile::{CandidateProfile, JobRequirement};

/// Static configuration consumed at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fuzzy_threshold: f64,
    pub weights: Weights,
    pub taxonomy: Vec<SkillFamily>,
    pub hierarchy: Vec<LevelDefinition>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            weights: Weights::default(),
            taxonomy: default_families(),
            hierarchy: default_levels(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchingEngine {
    matcher: SkillMatcher,
    hierarchy: EducationHierarchy,
    aggregator: ScoreAggregator,
}

impl MatchingEngine {
    /// Fails on any invalid table, threshold, or weight set. An engine that
    /// exists is always runnable.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let aggregator = ScoreAggregator::new(config.weights)?;
        let taxonomy = Arc::new(SkillTaxonomy::from_families(&config.taxonomy)?);
        let matcher = SkillMatcher::new(taxonomy, config.fuzzy_threshold)?;
        let hierarchy = EducationHierarchy::from_levels(&config.hierarchy)?;

        info!(
            canonical_skills = matcher.taxonomy().len(),
            education_levels = hierarchy.len(),
            fuzzy_threshold = config.fuzzy_threshold,
            "Matching engine initialized"
        );

        Ok(Self {
            matcher,
            hierarchy,
            aggregator,
        })
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        self.matcher.taxonomy()
    }

    pub fn hierarchy(&self) -> &EducationHierarchy {
        &self.hierarchy
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.matcher.fuzzy_threshold()
    }

    pub fn weights(&self) -> Weights {
        self.aggregator.weights()
    }

    pub fn score(&self, candidate: &CandidateProfile, requirement: &JobRequirement) -> MatchReport {
        let skills = self
            .matcher
            .evaluate(requirement.required_skills(), candidate.skills());
        let education = self
            .hierarchy
            .evaluate(candidate.degrees(), requirement.required_education());
        let experience = experience::score(
            candidate.total_years_experience(),
            requirement.min_experience_years(),
        );

        let report = self.aggregator.aggregate(skills, education, experience);

        info!(
            overall = report.overall_score,
            experience = report.criteria.experience.percentage,
            education = report.criteria.education.percentage,
            skills = report.criteria.skills.percentage,
            "Match scored"
        );

        report
    }

    /// Scores every candidate independently against one requirement. Output
    /// order follows input order; candidates are not ranked.
    pub fn score_batch(
        &self,
        requirement: &JobRequirement,
        candidates: &[CandidateProfile],
    ) -> Vec<MatchReport> {
        candidates
            .par_iter()
            .map(|candidate| self.score(candidate, requirement))
            .collect()
    }
}
