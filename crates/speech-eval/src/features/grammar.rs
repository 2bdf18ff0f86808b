use serde::{Deserialize, Serialize};
use tracing::warn;

use super::rate_per_hundred;

/// At most this many issue descriptions are kept from a checker report.
const MAX_REPORTED_ISSUES: usize = 10;

/// One problem flagged by a grammar checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub message: String,
    pub context: String,
    pub suggestions: Vec<String>,
}

/// Raw output of a grammar checker run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarReport {
    pub error_count: u32,
    pub issues: Vec<GrammarIssue>,
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarCheckError {
    #[error("grammar checker unavailable: {0}")]
    Unavailable(String),
    #[error("grammar check failed: {0}")]
    Failed(String),
}

/// External grammar checking service.
pub trait GrammarChecker: Send + Sync {
    fn check(&self, text: &str) -> Result<GrammarReport, GrammarCheckError>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in used when no checker is configured; always reports itself unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGrammarChecker;

impl GrammarChecker for UnavailableGrammarChecker {
    fn check(&self, _text: &str) -> Result<GrammarReport, GrammarCheckError> {
        Err(GrammarCheckError::Unavailable(
            "no grammar checker configured".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Grammar measurements consumed by the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarFeatures {
    pub error_count: u32,
    /// Errors per hundred words.
    pub error_rate: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<GrammarIssue>,
}

/// Runs the checker and converts its report into per-hundred-word measurements.
///
/// A failing checker degrades to a clean report so the rest of the evaluation can proceed.
pub fn analyze_grammar(
    checker: &dyn GrammarChecker,
    text: &str,
    word_count: usize,
) -> GrammarFeatures {
    let report = match checker.check(text) {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "grammar check degraded to zero errors");
            GrammarReport::default()
        }
    };

    let mut issues = report.issues;
    issues.truncate(MAX_REPORTED_ISSUES);

    GrammarFeatures {
        error_count: report.error_count,
        error_rate: rate_per_hundred(report.error_count as usize, word_count),
        issues,
    }
}

/// Maps an error rate (per hundred words) onto a 0-100 grammar score.
///
/// `max_error_rate` is the rate at which the score reaches 70; beyond it the score drops by
/// ten points per additional error and floors at zero.
pub fn grammar_score(error_rate: f64, max_error_rate: f64) -> f64 {
    if error_rate == 0.0 {
        100.0
    } else if error_rate <= 2.0 {
        100.0 - error_rate * 5.0
    } else if error_rate <= max_error_rate {
        90.0 - (error_rate - 2.0) * 6.67
    } else {
        (70.0 - (error_rate - max_error_rate) * 10.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedChecker(u32);

    impl GrammarChecker for FixedChecker {
        fn check(&self, _text: &str) -> Result<GrammarReport, GrammarCheckError> {
            let issues = (0..self.0)
                .map(|index| GrammarIssue {
                    message: format!("issue {index}"),
                    context: String::new(),
                    suggestions: Vec::new(),
                })
                .collect();
            Ok(GrammarReport {
                error_count: self.0,
                issues,
            })
        }
    }

    #[test]
    fn score_follows_piecewise_curve() {
        assert_eq!(grammar_score(0.0, 5.0), 100.0);
        assert_eq!(grammar_score(1.0, 5.0), 95.0);
        assert_eq!(grammar_score(2.0, 5.0), 90.0);
        assert!((grammar_score(5.0, 5.0) - 69.99).abs() < 1e-9);
        assert_eq!(grammar_score(6.0, 5.0), 60.0);
        assert_eq!(grammar_score(20.0, 5.0), 0.0);
    }

    #[test]
    fn unavailable_checker_degrades_to_zero_errors() {
        let features = analyze_grammar(&UnavailableGrammarChecker, "Me and him goes home.", 5);
        assert_eq!(features.error_count, 0);
        assert_eq!(features.error_rate, 0.0);
    }

    #[test]
    fn rate_is_per_hundred_words_and_issues_are_capped() {
        let features = analyze_grammar(&FixedChecker(12), "text", 200);
        assert_eq!(features.error_count, 12);
        assert_eq!(features.error_rate, 6.0);
        assert_eq!(features.issues.len(), MAX_REPORTED_ISSUES);
    }

    #[test]
    fn zero_words_yield_zero_rate() {
        let features = analyze_grammar(&FixedChecker(3), "", 0);
        assert_eq!(features.error_rate, 0.0);
    }
}
