//! Reference feature providers.
//!
//! Each provider turns transcript text into a small record of measurements. The scoring engine
//! only ever sees those records; collaborators that can fail (grammar checking, sentence
//! embeddings) degrade to neutral values here so the engine always receives a complete input.

mod coherence;
mod grammar;
mod keywords;
mod preprocess;
mod sentiment;
mod vocabulary;

pub use coherence::{
    coherence_score, flow_quality, CoherenceAnalyzer, CoherenceFeatures, EmbeddingError,
    FlowQuality, SentenceEmbedder, TermFrequencyEmbedder, NEUTRAL_COHERENCE_SCORE,
};
pub use grammar::{
    analyze_grammar, grammar_score, GrammarCheckError, GrammarChecker, GrammarFeatures,
    GrammarIssue, GrammarReport, UnavailableGrammarChecker,
};
pub use keywords::{KeywordCatalog, KeywordDetector, KeywordFeatures, PersonalInfoCategory};
pub use preprocess::{PreparedTranscript, Preprocessor, TranscriptMetrics};
pub use sentiment::{
    engagement_score, PolarityScorer, PolarityScores, SentimentFeatures, SentimentLabel,
    VaderPolarity,
};
pub use vocabulary::{
    clarity_score, vocabulary_score, VocabularyAnalyzer, VocabularyFeatures, DEFAULT_FILLER_WORDS,
};

/// Occurrences per hundred words. A transcript without words has a rate of 0.0.
pub fn rate_per_hundred(count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / word_count as f64
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
