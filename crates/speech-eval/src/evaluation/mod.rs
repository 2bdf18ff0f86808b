//! Transcript evaluation: the rubric scoring engine and the service and HTTP router that
//! drive it.
//!
//! The engine in [`scoring`] is pure; it receives a complete [`FeatureSet`] and either
//! rejects it or returns an [`EvaluationResult`]. [`TranscriptEvaluator`] runs the feature
//! providers to build that feature set from raw text.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{CriterionScore, DetailedAnalysis, EvaluationResult, FeatureSet};
pub use router::{evaluation_router, TranscriptRequest};
pub use scoring::{
    ConfigurationError, Criterion, CriterionId, Grade, Rubric, ScoringConfig, ScoringEngine,
};
pub use service::{
    EvaluationServiceError, TranscriptError, TranscriptEvaluator, MAX_TRANSCRIPT_CHARS,
    MIN_TRANSCRIPT_CHARS,
};
pub use validation::{validate_feature_set, FeatureSetError};
