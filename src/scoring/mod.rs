pub mod band;
pub mod engine;
pub mod grade;
pub mod jurisdiction;
pub mod normalize;
pub mod rules;

pub use band::ScoreBand;
pub use engine::{
    calculate, calculate_with_policy, scaled_score, CalculationResult, ScoreBreakdown,
    ScoredSubject, SubjectEntry,
};
pub use grade::GradeLetter;
pub use jurisdiction::{JurisdictionId, JurisdictionRule, Selection};
pub use normalize::{normalize, MAX_SCORE};
pub use rules::{Aggregate, Contribution};
