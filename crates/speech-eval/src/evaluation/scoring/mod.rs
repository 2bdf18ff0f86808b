mod config;
pub mod feedback;
mod grade;
mod rubric;
mod rules;

pub use config::{ConfigurationError, ScoringConfig, WEIGHT_SUM_TOLERANCE};
pub use grade::Grade;
pub use rubric::{Criterion, CriterionId, Rubric, STANDARD_MAX_RAW_SCORE};
pub use rules::{Coverage, Level, Presence, SpeechRateBand, Tier};

use tracing::debug;

use super::domain::{CriterionScore, DetailedAnalysis, EvaluationResult, FeatureSet};
use super::validation::{validate_feature_set, FeatureSetError};
use crate::features::{
    clarity_score, engagement_score, grammar_score, round_to, vocabulary_score,
};
use rules::{presence, SpeechRateBands};

/// Sub-scores the engine derives from raw measurements before applying the ladders.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DerivedScores {
    grammar: f64,
    vocabulary: f64,
    clarity: f64,
    engagement: f64,
}

/// Stateless evaluator that applies the rubric to a feature set.
///
/// Holds only immutable configuration, so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    rubric: Rubric,
    config: ScoringConfig,
    speech_rate: SpeechRateBands,
}

impl ScoringEngine {
    pub fn new(rubric: Rubric, config: ScoringConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let speech_rate = SpeechRateBands::from_config(&config);

        Ok(Self {
            rubric,
            config,
            speech_rate,
        })
    }

    /// Engine over the standard rubric and default thresholds.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::new(Rubric::standard()?, ScoringConfig::default())
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, features: &FeatureSet) -> Result<EvaluationResult, FeatureSetError> {
        validate_feature_set(features)?;

        let derived = self.derive_scores(features);
        let criteria_scores: Vec<CriterionScore> = self
            .rubric
            .criteria()
            .iter()
            .map(|criterion| {
                let level = self.assess(criterion.id, features, &derived);
                let score = CriterionScore::new(
                    criterion.id,
                    criterion.name.clone(),
                    level.raw_score(criterion.max_raw_score),
                    criterion.max_raw_score,
                    criterion.weight,
                    feedback::render(features, level),
                );
                debug!(
                    criterion = %criterion.id,
                    score = score.score(),
                    percentage = score.percentage(),
                    "criterion scored"
                );
                score
            })
            .collect();

        let overall: f64 = criteria_scores
            .iter()
            .map(CriterionScore::weighted_contribution)
            .sum();
        let overall_score = round_to(overall.clamp(0.0, 100.0), 2);
        let grade = Grade::from_score(overall_score);

        Ok(EvaluationResult {
            overall_score,
            grade,
            word_count: features.transcript.word_count,
            sentence_count: features.transcript.sentence_count,
            criteria_scores,
            detailed_analysis: detailed_analysis(features, &derived),
            summary: feedback::summary(grade),
        })
    }

    fn derive_scores(&self, features: &FeatureSet) -> DerivedScores {
        DerivedScores {
            grammar: grammar_score(
                features.grammar.error_rate,
                self.config.max_grammar_errors_per_100_words,
            ),
            vocabulary: vocabulary_score(features.vocabulary.ttr),
            clarity: clarity_score(features.vocabulary.filler_rate),
            engagement: engagement_score(features.sentiment.compound, features.sentiment.positive),
        }
    }

    fn assess(&self, id: CriterionId, features: &FeatureSet, derived: &DerivedScores) -> Level {
        match id {
            CriterionId::Salutation => {
                Level::Salutation(presence(features.keywords.salutation_found))
            }
            CriterionId::PersonalInformation => Level::PersonalInformation(
                rules::COVERAGE.classify(features.keywords.personal_info_count() as f64),
            ),
            CriterionId::Hobbies => Level::Hobbies(presence(features.keywords.hobbies_found)),
            CriterionId::FlowCoherence => {
                Level::FlowCoherence(rules::FLOW.classify(features.coherence.coherence_score))
            }
            CriterionId::SpeechRate => Level::SpeechRate(
                self.speech_rate
                    .classify(features.transcript.speech_rate_wpm),
            ),
            CriterionId::Grammar => Level::Grammar(rules::GRAMMAR.classify(derived.grammar)),
            CriterionId::Vocabulary => {
                Level::Vocabulary(rules::VOCABULARY.classify(derived.vocabulary))
            }
            CriterionId::Clarity => Level::Clarity(rules::CLARITY.classify(derived.clarity)),
            CriterionId::Engagement => {
                Level::Engagement(rules::ENGAGEMENT.classify(derived.engagement))
            }
        }
    }
}

fn detailed_analysis(features: &FeatureSet, derived: &DerivedScores) -> DetailedAnalysis {
    let keywords = &features.keywords;
    DetailedAnalysis {
        keywords_found: keywords.keywords_found(),
        keywords_missing: keywords.keywords_missing(),
        salutation_detected: keywords
            .salutation_found
            .then(|| keywords.salutation_phrase.clone()),
        grammar_errors: features.grammar.error_count,
        grammar_error_rate: round_to(features.grammar.error_rate, 2),
        grammar_score: round_to(derived.grammar, 2),
        filler_words_count: features.vocabulary.filler_count,
        filler_word_rate: features.vocabulary.filler_rate,
        filler_details: features.vocabulary.filler_details.clone(),
        clarity_score: round_to(derived.clarity, 2),
        sentiment_score: features.sentiment.compound,
        sentiment_label: features.sentiment.label,
        engagement_score: derived.engagement,
        vocabulary_richness: features.vocabulary.ttr,
        vocabulary_score: round_to(derived.vocabulary, 2),
        coherence_score: features.coherence.coherence_score,
        avg_similarity: features.coherence.avg_similarity,
        flow_quality: features.coherence.flow_quality,
        speech_rate_wpm: features.transcript.speech_rate_wpm,
    }
}
