use serde::{Deserialize, Serialize};

use super::rubric::CriterionId;

/// Allowed deviation of the rubric weight sum from 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Rubric and threshold invariants. Raised only while building the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("rubric weights sum to {sum:.2}, expected 100 (tolerance 0.01)")]
    WeightSum { sum: f64 },
    #[error("criterion {0} is missing from the rubric")]
    MissingCriterion(CriterionId),
    #[error("criterion {0} appears more than once in the rubric")]
    DuplicateCriterion(CriterionId),
    #[error("criterion {criterion} has weight {weight}, expected a value within [0, 100]")]
    InvalidWeight { criterion: CriterionId, weight: f64 },
    #[error("criterion {criterion} has max score {max_score}, expected a positive value")]
    InvalidMaxScore { criterion: CriterionId, max_score: f64 },
    #[error(
        "speech rate bands must satisfy acceptable_min <= optimal_min <= optimal_max <= acceptable_max \
         (found {acceptable_min}, {optimal_min}, {optimal_max}, {acceptable_max})"
    )]
    SpeechRateBands {
        acceptable_min: f64,
        optimal_min: f64,
        optimal_max: f64,
        acceptable_max: f64,
    },
    #[error("max grammar errors per 100 words must be positive, found {0}")]
    GrammarCeiling(f64),
}

/// Tunable thresholds applied by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub optimal_wpm_min: f64,
    pub optimal_wpm_max: f64,
    pub acceptable_wpm_min: f64,
    pub acceptable_wpm_max: f64,
    /// Error rate at which the grammar score reaches 70.
    pub max_grammar_errors_per_100_words: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            optimal_wpm_min: 120.0,
            optimal_wpm_max: 150.0,
            acceptable_wpm_min: 100.0,
            acceptable_wpm_max: 180.0,
            max_grammar_errors_per_100_words: 5.0,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let bands = [
            self.acceptable_wpm_min,
            self.optimal_wpm_min,
            self.optimal_wpm_max,
            self.acceptable_wpm_max,
        ];
        let ordered = bands.windows(2).all(|pair| pair[0] <= pair[1]);
        let sane = bands.iter().all(|value| value.is_finite() && *value >= 0.0);
        if !ordered || !sane {
            return Err(ConfigurationError::SpeechRateBands {
                acceptable_min: self.acceptable_wpm_min,
                optimal_min: self.optimal_wpm_min,
                optimal_max: self.optimal_wpm_max,
                acceptable_max: self.acceptable_wpm_max,
            });
        }

        let ceiling = self.max_grammar_errors_per_100_words;
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return Err(ConfigurationError::GrammarCeiling(ceiling));
        }

        Ok(())
    }
}
