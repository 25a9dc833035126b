//! Skill Matcher — decides whether a candidate skill satisfies a required one.
//!
//! Tiers are tried in a fixed priority order and the first one that accepts
//! the pair wins:
//!
//! 1. Exact: normalized strings are identical (confidence 1.0)
//! 2. Analogy: both resolve to the same taxonomy canonical (0.95)
//! 3. Fuzzy: edit-distance ratio ≥ threshold (confidence = ratio)
//! 4. Substring: one contains the other, contained side ≥ 3 chars (0.88)

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::error::ConfigError;
use crate::matching::normalize::normalize_skill;
use crate::matching::taxonomy::SkillTaxonomy;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.70;

/// Skills criterion is met at or above this percentage.
pub const SKILLS_MET_PERCENTAGE: u32 = 50;

const ANALOGY_CONFIDENCE: f64 = 0.95;
const SUBSTRING_CONFIDENCE: f64 = 0.88;
const SUBSTRING_MIN_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Analogy,
    Fuzzy,
    Substring,
}

/// Outcome of a successful tier. `None` from the matcher means no match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillMatch {
    pub tier: MatchTier,
    pub confidence: f64,
}

/// Inputs every tier sees. Both strings are already normalized and non-empty.
pub struct TierInput<'a> {
    pub candidate: &'a str,
    pub required: &'a str,
    pub taxonomy: &'a SkillTaxonomy,
    pub fuzzy_threshold: f64,
}

type Tier = fn(&TierInput<'_>) -> Option<f64>;

const TIERS: &[(MatchTier, Tier)] = &[
    (MatchTier::Exact, exact_tier),
    (MatchTier::Analogy, analogy_tier),
    (MatchTier::Fuzzy, fuzzy_tier),
    (MatchTier::Substring, substring_tier),
];

pub fn exact_tier(input: &TierInput<'_>) -> Option<f64> {
    (input.candidate == input.required).then_some(1.0)
}

pub fn analogy_tier(input: &TierInput<'_>) -> Option<f64> {
    let candidate = input.taxonomy.resolve_normalized(input.candidate)?;
    let required = input.taxonomy.resolve_normalized(input.required)?;
    (candidate == required).then_some(ANALOGY_CONFIDENCE)
}

pub fn fuzzy_tier(input: &TierInput<'_>) -> Option<f64> {
    let similarity = similarity(input.candidate, input.required);
    (similarity >= input.fuzzy_threshold).then_some(similarity)
}

pub fn substring_tier(input: &TierInput<'_>) -> Option<f64> {
    let (shorter, longer) = if input.candidate.len() <= input.required.len() {
        (input.candidate, input.required)
    } else {
        (input.required, input.candidate)
    };
    (shorter.chars().count() >= SUBSTRING_MIN_CHARS && longer.contains(shorter))
        .then_some(SUBSTRING_CONFIDENCE)
}

/// Symmetric edit-distance ratio in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Per-requirement record of which candidate skill satisfied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchDetail {
    pub required: String,
    pub matched: String,
    pub tier: MatchTier,
    pub confidence: f64,
}

/// Skills criterion sub-report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsResult {
    pub met: bool,
    pub percentage: u32,
    pub candidate_skills_count: usize,
    pub required_skills_count: usize,
    pub matched_skills: Vec<String>,
    /// In requirement order; drives the skill recommendations.
    pub missing_skills: Vec<String>,
    pub skill_match_details: Vec<SkillMatchDetail>,
    pub details: String,
}

#[derive(Debug, Clone)]
pub struct SkillMatcher {
    taxonomy: Arc<SkillTaxonomy>,
    fuzzy_threshold: f64,
}

impl SkillMatcher {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, fuzzy_threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&fuzzy_threshold) {
            return Err(ConfigError::InvalidThreshold(fuzzy_threshold));
        }
        Ok(Self {
            taxonomy,
            fuzzy_threshold,
        })
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Runs the tier chain for one pair. `None` is NoMatch.
    pub fn match_skill(&self, candidate: &str, required: &str) -> Option<SkillMatch> {
        let candidate = normalize_skill(candidate);
        let required = normalize_skill(required);
        if candidate.is_empty() || required.is_empty() {
            return None;
        }

        let input = TierInput {
            candidate: &candidate,
            required: &required,
            taxonomy: &self.taxonomy,
            fuzzy_threshold: self.fuzzy_threshold,
        };

        TIERS.iter().find_map(|(tier, accept)| {
            accept(&input).map(|confidence| {
                debug!(%candidate, %required, ?tier, confidence, "skill tier matched");
                SkillMatch {
                    tier: *tier,
                    confidence,
                }
            })
        })
    }

    /// Evaluates every required skill against the whole candidate set.
    /// An empty requirement is trivially satisfied (100%, met).
    pub fn evaluate(&self, required: &[String], candidate: &[String]) -> SkillsResult {
        if required.is_empty() {
            return SkillsResult {
                met: true,
                percentage: 100,
                candidate_skills_count: candidate.len(),
                required_skills_count: 0,
                matched_skills: vec![],
                missing_skills: vec![],
                skill_match_details: vec![],
                details: format!(
                    "No specific skills required. Candidate lists {} skills.",
                    candidate.len()
                ),
            };
        }

        let mut matched_skills = Vec::new();
        let mut missing_skills = Vec::new();
        let mut skill_match_details = Vec::new();

        for req in required {
            let mut best: Option<(&String, SkillMatch)> = None;

            for cand in candidate {
                if let Some(found) = self.match_skill(cand, req) {
                    let better = best
                        .as_ref()
                        .map_or(true, |(_, current)| found.confidence > current.confidence);
                    if better {
                        best = Some((cand, found));
                    }
                }
            }

            match best {
                Some((cand, found)) => {
                    matched_skills.push(req.clone());
                    skill_match_details.push(SkillMatchDetail {
                        required: req.clone(),
                        matched: cand.clone(),
                        tier: found.tier,
                        confidence: (found.confidence * 100.0).round() / 100.0,
                    });
                }
                None => missing_skills.push(req.clone()),
            }
        }

        let percentage =
            ((matched_skills.len() as f64 / required.len() as f64) * 100.0).round() as u32;
        let details = skills_details(matched_skills.len(), required.len(), candidate.len(), percentage);

        SkillsResult {
            met: percentage >= SKILLS_MET_PERCENTAGE,
            percentage,
            candidate_skills_count: candidate.len(),
            required_skills_count: required.len(),
            matched_skills,
            missing_skills,
            skill_match_details,
            details,
        }
    }
}

fn skills_details(matched: usize, required: usize, candidate: usize, percentage: u32) -> String {
    if matched == 0 {
        return format!(
            "No matching skills. Candidate lists {candidate}, {required} required."
        );
    }
    let grade = match percentage {
        0..=24 => "Limited match",
        25..=49 => "Partial match",
        50..=74 => "Good match",
        _ => "Excellent match",
    };
    format!("{matched}/{required} required skills ({percentage}%). {grade}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::taxonomy::{default_families, SkillTaxonomy};

    fn matcher(threshold: f64) -> SkillMatcher {
        let taxonomy = SkillTaxonomy::from_families(&default_families()).unwrap();
        SkillMatcher::new(Arc::new(taxonomy), threshold).unwrap()
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn input<'a>(c: &'a str, r: &'a str, taxonomy: &'a SkillTaxonomy) -> TierInput<'a> {
        TierInput {
            candidate: c,
            required: r,
            taxonomy,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    // ── individual tiers ───────────────────────────────────────────────────

    #[test]
    fn test_exact_tier() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(exact_tier(&input("rust", "rust", m.taxonomy())), Some(1.0));
        assert_eq!(exact_tier(&input("rust", "go", m.taxonomy())), None);
    }

    #[test]
    fn test_analogy_tier_requires_both_mapped() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(
            analogy_tier(&input("reactjs", "jsx", m.taxonomy())),
            Some(ANALOGY_CONFIDENCE)
        );
        assert_eq!(analogy_tier(&input("reactjs", "elm", m.taxonomy())), None);
        assert_eq!(analogy_tier(&input("reactjs", "vue", m.taxonomy())), None);
    }

    #[test]
    fn test_fuzzy_tier_respects_threshold() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let hit = fuzzy_tier(&input("pythn", "python", m.taxonomy())).unwrap();
        assert!(hit >= 0.70 && hit < 0.95, "similarity was {hit}");

        let strict = TierInput {
            fuzzy_threshold: 0.95,
            ..input("pythn", "python", m.taxonomy())
        };
        assert_eq!(fuzzy_tier(&strict), None);
    }

    #[test]
    fn test_substring_tier_min_length() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(
            substring_tier(&input("microservices", "microservices architecture", m.taxonomy())),
            Some(SUBSTRING_CONFIDENCE)
        );
        assert_eq!(substring_tier(&input("go", "golang", m.taxonomy())), None);
        assert_eq!(substring_tier(&input("ab", "abc", m.taxonomy())), None);
    }

    // ── tier chain ─────────────────────────────────────────────────────────

    #[test]
    fn test_self_match_is_always_exact() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        for skill in ["Rust", "react native", "C++", "underwater basket weaving"] {
            assert_eq!(m.match_skill(skill, skill).unwrap().tier, MatchTier::Exact);
        }
    }

    #[test]
    fn test_exact_wins_over_other_tiers_after_normalization() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(m.match_skill("Node.JS", "nodejs").unwrap().tier, MatchTier::Exact);
    }

    #[test]
    fn test_analogy_before_fuzzy() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        // "reactjs"/"react" would also pass the fuzzy ratio.
        assert_eq!(m.match_skill("reactjs", "react").unwrap().tier, MatchTier::Analogy);
        assert_eq!(m.match_skill("k8s", "Kubernetes").unwrap().tier, MatchTier::Analogy);
    }

    #[test]
    fn test_fuzzy_before_substring() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(m.match_skill("microservice", "microservices").unwrap().tier, MatchTier::Fuzzy);
    }

    #[test]
    fn test_substring_fallback() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let found = m.match_skill("kafka", "apache kafka streams").unwrap();
        assert_eq!(found.tier, MatchTier::Substring);
        assert_eq!(found.confidence, SUBSTRING_CONFIDENCE);
    }

    #[test]
    fn test_no_match() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(m.match_skill("accounting", "kubernetes"), None);
        assert_eq!(m.match_skill("", "kubernetes"), None);
        assert_eq!(m.match_skill("...", "..."), None);
    }

    #[test]
    fn test_match_is_symmetric() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let pairs = [
            ("pythn", "python"),
            ("reactjs", "jsx"),
            ("kafka", "apache kafka streams"),
            ("accounting", "kubernetes"),
            ("postgres", "postgresql"),
        ];
        for (a, b) in pairs {
            assert_eq!(m.match_skill(a, b), m.match_skill(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn test_threshold_out_of_range_is_config_error() {
        let taxonomy = Arc::new(SkillTaxonomy::from_families(&default_families()).unwrap());
        assert_eq!(
            SkillMatcher::new(taxonomy.clone(), 1.5).unwrap_err(),
            ConfigError::InvalidThreshold(1.5)
        );
        assert!(SkillMatcher::new(taxonomy, f64::NAN).is_err());
    }

    // ── requirement evaluation ─────────────────────────────────────────────

    #[test]
    fn test_evaluate_analogy_pair_is_full_match() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let result = m.evaluate(&skills(&["react", "node.js"]), &skills(&["reactjs", "nodejs"]));
        assert_eq!(result.percentage, 100);
        assert!(result.met);
        assert_eq!(result.skill_match_details[0].tier, MatchTier::Analogy);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_evaluate_empty_requirement_is_trivially_met() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let result = m.evaluate(&[], &skills(&["rust"]));
        assert_eq!(result.percentage, 100);
        assert!(result.met);
        assert_eq!(result.candidate_skills_count, 1);
    }

    #[test]
    fn test_evaluate_empty_candidate() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let result = m.evaluate(&skills(&["rust", "go"]), &[]);
        assert_eq!(result.percentage, 0);
        assert!(!result.met);
        assert_eq!(result.missing_skills, skills(&["rust", "go"]));
        assert!(result.details.starts_with("No matching skills"));
    }

    #[test]
    fn test_half_matched_is_met() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let result = m.evaluate(&skills(&["rust", "haskell"]), &skills(&["rust"]));
        assert_eq!(result.percentage, 50);
        assert!(result.met);
    }

    #[test]
    fn test_missing_skills_keep_requirement_order() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let result = m.evaluate(
            &skills(&["terraform", "rust", "haskell", "erlang"]),
            &skills(&["rust"]),
        );
        assert_eq!(result.missing_skills, skills(&["terraform", "haskell", "erlang"]));
        assert_eq!(result.percentage, 25);
        assert!(!result.met);
    }

    #[test]
    fn test_single_match_in_huge_requirement_is_not_reported_as_none() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let mut required = skills(&["rust"]);
        required.extend((0..250).map(|n| format!("zzskill{n}")));

        let result = m.evaluate(&required, &skills(&["rust"]));
        assert_eq!(result.matched_skills, skills(&["rust"]));
        assert_eq!(result.percentage, 0);
        assert_eq!(result.details, "1/251 required skills (0%). Limited match.");
    }

    #[test]
    fn test_best_confidence_candidate_is_reported() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let result = m.evaluate(&skills(&["react"]), &skills(&["reactjs", "react"]));
        assert_eq!(result.skill_match_details[0].matched, "react");
        assert_eq!(result.skill_match_details[0].tier, MatchTier::Exact);
    }

    #[test]
    fn test_adding_candidate_skill_never_decreases_percentage() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let required = skills(&["rust", "kubernetes", "postgresql", "graphql"]);
        let mut candidate = skills(&["rust"]);
        let mut previous = m.evaluate(&required, &candidate).percentage;
        for extra in ["k8s", "cobol", "postgres", "gql"] {
            candidate.push(extra.to_string());
            let now = m.evaluate(&required, &candidate).percentage;
            assert!(now >= previous, "{now} < {previous} after adding {extra}");
            previous = now;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_removing_unmatched_requirement_never_decreases_percentage() {
        let m = matcher(DEFAULT_FUZZY_THRESHOLD);
        let candidate = skills(&["rust", "docker"]);
        let full = m.evaluate(&skills(&["rust", "docker", "haskell"]), &candidate);
        let trimmed = m.evaluate(&skills(&["rust", "docker"]), &candidate);
        assert!(trimmed.percentage >= full.percentage);
    }

    #[test]
    fn test_typo_matches_at_default_threshold_but_not_strict() {
        let loose = matcher(DEFAULT_FUZZY_THRESHOLD).evaluate(&skills(&["python"]), &skills(&["pythn"]));
        assert_eq!(loose.percentage, 100);

        let strict = matcher(0.95).evaluate(&skills(&["python"]), &skills(&["pythn"]));
        assert_eq!(strict.percentage, 0);
        assert!(!strict.met);
    }
}
