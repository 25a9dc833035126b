// Matching Engine
// Skill taxonomy + tiered skill matching, education ladder, experience
// scoring, and the weighted aggregate report. Scoring is pure; only
// `handlers` and `export` touch the outside world.

pub mod aggregator;
pub mod education;
pub mod engine;
pub mod error;
pub mod experience;
pub mod export;
pub mod handlers;
pub mod normalize;
pub mod skill_matcher;
pub mod taxonomy;

pub use engine::{EngineConfig, MatchingEngine};
