use thiserror::Error;

/// Invalid engine configuration. Raised while building the engine, never
/// during scoring.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("aggregation weights must each be within [0, 1] and sum to 1.0 (got {experience} + {education} + {skills} = {sum})")]
    WeightSum {
        experience: f64,
        education: f64,
        skills: f64,
        sum: f64,
    },

    #[error("fuzzy similarity threshold must be within [0, 1] (got {0})")]
    InvalidThreshold(f64),

    #[error("education hierarchy is empty")]
    EmptyHierarchy,

    #[error("education level '{0}' has no recognized degree strings")]
    EmptyLevel(String),

    #[error("degree alias '{alias}' is mapped to both '{first}' and '{second}'")]
    DuplicateDegreeAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("skill alias '{alias}' resolves to both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("skill family '{0}' contains an empty skill name")]
    EmptySkill(String),
}
