//! Education Resolver — maps free-form degree strings onto an ordered ladder
//! and compares a candidate's highest qualification to the requirement.

use serde::{Deserialize, Serialize};

use crate::matching::error::ConfigError;
use crate::matching::normalize::{tokenize, tokenize_dotted};

/// One rung of the ladder. Position in the hierarchy (lowest first) is the
/// level. This is also the on-disk shape of `EDUCATION_HIERARCHY_PATH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub aliases: Vec<String>,
}

/// Index into the hierarchy; higher is more advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EducationLevel(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationStatus {
    Compared,
    /// Requirement string not recognized; treated as no requirement.
    NoRequirement,
    /// None of the candidate's entries were recognized.
    CandidateUnknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EducationComparison {
    pub met: bool,
    pub percentage: u32,
    pub overqualified: bool,
    pub status: EducationStatus,
}

/// Education criterion sub-report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationResult {
    pub met: bool,
    pub percentage: u32,
    pub is_overqualified: bool,
    pub status: EducationStatus,
    pub candidate_degree: Option<String>,
    pub required_degree: String,
    pub candidate_level: Option<EducationLevel>,
    pub required_level: Option<EducationLevel>,
    pub details: String,
}

#[derive(Debug, Clone)]
struct Rung {
    name: String,
    phrases: Vec<Vec<String>>,
    /// Short dotted abbreviations (`b.e`, `m.e`) that only count with their
    /// dots, since the bare form is an ordinary word.
    dotted: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EducationHierarchy {
    rungs: Vec<Rung>,
}

impl EducationHierarchy {
    pub fn from_levels(levels: &[LevelDefinition]) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyHierarchy);
        }

        let mut rungs: Vec<Rung> = Vec::with_capacity(levels.len());
        for def in levels {
            let mut phrases: Vec<Vec<String>> = Vec::new();
            let mut dotted: Vec<String> = Vec::new();
            for alias in &def.aliases {
                if let Some(abbrev) = dotted_abbreviation(alias) {
                    dotted.push(abbrev);
                } else {
                    let phrase = tokenize(alias);
                    if !phrase.is_empty() {
                        phrases.push(phrase);
                    }
                }
            }
            if phrases.is_empty() && dotted.is_empty() {
                return Err(ConfigError::EmptyLevel(def.name.clone()));
            }

            for phrase in &phrases {
                if let Some(owner) = rungs.iter().find(|r| r.phrases.contains(phrase)) {
                    return Err(ConfigError::DuplicateDegreeAlias {
                        alias: phrase.join(" "),
                        first: owner.name.clone(),
                        second: def.name.clone(),
                    });
                }
            }
            for abbrev in &dotted {
                if let Some(owner) = rungs.iter().find(|r| r.dotted.contains(abbrev)) {
                    return Err(ConfigError::DuplicateDegreeAlias {
                        alias: abbrev.clone(),
                        first: owner.name.clone(),
                        second: def.name.clone(),
                    });
                }
            }

            rungs.push(Rung {
                name: def.name.clone(),
                phrases,
                dotted,
            });
        }

        Ok(Self { rungs })
    }

    /// Level of a degree string, or `None` if nothing on the ladder is
    /// mentioned. Higher rungs are checked first so `"Master of Technology
    /// (M.Tech)"` is a master's even though it contains no bachelor alias.
    pub fn level_of(&self, degree: &str) -> Option<EducationLevel> {
        let tokens = tokenize(degree);
        if tokens.is_empty() {
            return None;
        }
        let dotted_tokens = tokenize_dotted(degree);

        self.rungs
            .iter()
            .enumerate()
            .rev()
            .find(|(_, rung)| {
                rung.phrases.iter().any(|p| contains_phrase(&tokens, p))
                    || rung.dotted.iter().any(|d| dotted_tokens.contains(d))
            })
            .map(|(idx, _)| EducationLevel(idx))
    }

    /// Highest recognized level across all entries, with the entry that
    /// produced it. Unrecognized entries are skipped, never counted as 0.
    pub fn candidate_level<'a, I>(&self, degrees: I) -> Option<(EducationLevel, &'a str)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        degrees
            .into_iter()
            .filter_map(|d| self.level_of(d).map(|level| (level, d)))
            .fold(None, |best, (level, degree)| match best {
                Some((top, _)) if top >= level => best,
                _ => Some((level, degree)),
            })
    }

    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    /// Full education criterion for a candidate's degree strings against a
    /// required degree string.
    pub fn evaluate<'a, I>(&self, degrees: I, required_degree: &str) -> EducationResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let candidate = self.candidate_level(degrees);
        let required_level = self.level_of(required_degree);
        let comparison = compare(candidate.map(|(level, _)| level), required_level);

        let candidate_degree = candidate.map(|(_, degree)| degree.to_string());
        let required_display = if required_degree.trim().is_empty() {
            "not specified".to_string()
        } else {
            required_degree.trim().to_string()
        };

        let details = match comparison.status {
            EducationStatus::NoRequirement => "No specific education required.".to_string(),
            EducationStatus::CandidateUnknown => format!(
                "Candidate education could not be recognized (required: {required_display})."
            ),
            EducationStatus::Compared => {
                let held = candidate_degree.as_deref().unwrap_or_default();
                if comparison.overqualified {
                    format!("Candidate is overqualified: {held} (required: {required_display}).")
                } else if comparison.met {
                    format!("Candidate has {held}, required: {required_display}.")
                } else {
                    format!(
                        "Candidate has {held}, required: {required_display}. {}% match.",
                        comparison.percentage
                    )
                }
            }
        };

        EducationResult {
            met: comparison.met,
            percentage: comparison.percentage,
            is_overqualified: comparison.overqualified,
            status: comparison.status,
            candidate_degree,
            required_degree: required_display,
            candidate_level: candidate.map(|(level, _)| level),
            required_level,
            details,
        }
    }
}

/// Compares two resolved levels. An unknown requirement is no requirement;
/// an unknown candidate (with a known requirement) is a miss.
pub fn compare(
    candidate: Option<EducationLevel>,
    required: Option<EducationLevel>,
) -> EducationComparison {
    let Some(required) = required else {
        return EducationComparison {
            met: true,
            percentage: 100,
            overqualified: false,
            status: EducationStatus::NoRequirement,
        };
    };
    let Some(candidate) = candidate else {
        return EducationComparison {
            met: false,
            percentage: 0,
            overqualified: false,
            status: EducationStatus::CandidateUnknown,
        };
    };

    let met = candidate >= required;
    let percentage = if met {
        100
    } else {
        ((candidate.0 as f64 / required.0 as f64) * 100.0).round() as u32
    };

    EducationComparison {
        met,
        percentage,
        overqualified: candidate > required,
        status: EducationStatus::Compared,
    }
}

/// A single-word alias written with dots whose dotless form is at most two
/// characters (`b.e`, `m.s`). Returned lowercase, outer dots trimmed.
fn dotted_abbreviation(alias: &str) -> Option<String> {
    let word = alias.trim().to_lowercase();
    let word = word.trim_matches('.');
    let letters = word.chars().filter(|c| *c != '.').count();
    (word.contains('.') && !word.contains(char::is_whitespace) && letters <= 2)
        .then(|| word.to_string())
}

fn contains_phrase(tokens: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty()
        && tokens.len() >= phrase.len()
        && tokens.windows(phrase.len()).any(|w| w == phrase)
}

const DEFAULT_LEVELS: &[(&str, &[&str])] = &[
    (
        "High School",
        &[
            "high school",
            "secondary school",
            "higher secondary",
            "hsc",
            "ssc",
            "intermediate",
            "ged",
            "12th",
        ],
    ),
    (
        "Diploma",
        &["diploma", "associate", "associates", "associate degree"],
    ),
    (
        "Bachelor",
        &[
            "bachelor", "bachelors", "b.tech", "b.e", "b.s", "bs", "bsc", "b.a", "ba", "beng",
            "bca", "bcom", "bba", "llb", "mbbs", "undergraduate",
        ],
    ),
    (
        "Master",
        &[
            "master",
            "masters",
            "m.tech",
            "m.e",
            "m.s",
            "ms",
            "msc",
            "m.a",
            "ma",
            "meng",
            "mba",
            "m.b.a",
            "mca",
            "mcom",
            "mphil",
            "pgdm",
            "postgraduate",
            "post graduate",
        ],
    ),
    (
        "PhD",
        &[
            "phd",
            "ph.d",
            "doctorate",
            "doctoral",
            "doctor of philosophy",
            "dphil",
            "md",
        ],
    ),
];

/// The built-in five-level ladder: High School, Diploma, Bachelor, Master, PhD.
pub fn default_levels() -> Vec<LevelDefinition> {
    DEFAULT_LEVELS
        .iter()
        .map(|(name, aliases)| LevelDefinition {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        })
        .collect()
}
