use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::evaluation::domain::FeatureSet;
use crate::evaluation::scoring::ScoringEngine;
use crate::evaluation::service::TranscriptEvaluator;
use crate::evaluation::evaluation_router;
use crate::features::{
    CoherenceFeatures, FlowQuality, GrammarCheckError, GrammarChecker, GrammarFeatures,
    GrammarIssue, GrammarReport, KeywordFeatures, PersonalInfoCategory, PolarityScores,
    SentimentFeatures, TranscriptMetrics, VocabularyFeatures,
};

pub(super) const SAMPLE_TRANSCRIPT: &str = "Hello everyone! My name is Sarah Johnson. I am 15 \
    years old and I study at Lincoln High School in grade 10. I live with my parents and my \
    younger brother. I love reading books, especially mystery novels, and I enjoy playing \
    basketball on weekends. I'm also interested in learning new languages. Thank you for \
    listening to my introduction!";

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::standard().expect("standard rubric is valid")
}

pub(super) fn evaluator() -> TranscriptEvaluator {
    TranscriptEvaluator::standard().expect("standard rubric is valid")
}

pub(super) fn personal_info(found: usize) -> BTreeMap<PersonalInfoCategory, bool> {
    PersonalInfoCategory::ALL
        .into_iter()
        .enumerate()
        .map(|(index, category)| (category, index < found))
        .collect()
}

/// Feature set for which every criterion lands in its top tier.
pub(super) fn perfect_features() -> FeatureSet {
    FeatureSet {
        transcript: TranscriptMetrics {
            word_count: 135,
            sentence_count: 8,
            speech_rate_wpm: 135.0,
        },
        keywords: KeywordFeatures {
            salutation_found: true,
            salutation_phrase: "Hello".to_string(),
            personal_info: personal_info(5),
            hobbies_found: true,
        },
        grammar: GrammarFeatures {
            error_count: 0,
            error_rate: 0.0,
            issues: Vec::new(),
        },
        sentiment: SentimentFeatures::from_polarity(PolarityScores {
            compound: 1.0,
            positive: 0.5,
            negative: 0.0,
            neutral: 0.5,
        }),
        vocabulary: VocabularyFeatures::from_measurements(80.0, 0, 0.0, BTreeMap::new()),
        coherence: CoherenceFeatures {
            coherence_score: 90.0,
            avg_similarity: 0.75,
            flow_quality: FlowQuality::Excellent,
        },
    }
}

/// Perfect features for an empty transcript.
pub(super) fn wordless_features() -> FeatureSet {
    let mut features = perfect_features();
    features.transcript = TranscriptMetrics {
        word_count: 0,
        sentence_count: 0,
        speech_rate_wpm: 0.0,
    };
    features
}

/// Grammar checker reporting a fixed number of issues.
pub(super) struct FixedGrammarChecker(pub(super) u32);

impl GrammarChecker for FixedGrammarChecker {
    fn check(&self, _text: &str) -> Result<GrammarReport, GrammarCheckError> {
        Ok(GrammarReport {
            error_count: self.0,
            issues: (0..self.0)
                .map(|index| GrammarIssue {
                    message: format!("agreement issue {index}"),
                    context: "I has".to_string(),
                    suggestions: vec!["I have".to_string()],
                })
                .collect(),
        })
    }
}

pub(super) struct OfflineGrammarChecker;

impl GrammarChecker for OfflineGrammarChecker {
    fn check(&self, _text: &str) -> Result<GrammarReport, GrammarCheckError> {
        Err(GrammarCheckError::Failed("connection refused".to_string()))
    }
}

pub(super) fn router() -> axum::Router {
    evaluation_router(Arc::new(evaluator()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
