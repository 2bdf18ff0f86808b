use std::sync::Arc;

use tracing::info;

use super::domain::{EvaluationResult, FeatureSet};
use super::scoring::{ConfigurationError, Rubric, ScoringEngine};
use super::validation::FeatureSetError;
use crate::config::{AppConfig, CoherenceModel};
use crate::features::{
    analyze_grammar, CoherenceAnalyzer, GrammarChecker, KeywordCatalog, KeywordDetector,
    PolarityScorer, Preprocessor, SentenceEmbedder, SentimentFeatures, TermFrequencyEmbedder,
    UnavailableGrammarChecker, VaderPolarity, VocabularyAnalyzer,
};

pub const MIN_TRANSCRIPT_CHARS: usize = 10;
pub const MAX_TRANSCRIPT_CHARS: usize = 5000;

/// Request-level rejection of the transcript text itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("transcript cannot be empty")]
    Empty,
    #[error("transcript must be at least {min} characters, found {found}")]
    TooShort { min: usize, found: usize },
    #[error("transcript must be at most {max} characters, found {found}")]
    TooLong { max: usize, found: usize },
}

/// Error raised by the transcript evaluator.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Features(#[from] FeatureSetError),
}

/// Service composing the feature providers and the scoring engine.
pub struct TranscriptEvaluator {
    engine: Arc<ScoringEngine>,
    preprocessor: Preprocessor,
    keywords: KeywordDetector,
    grammar: Arc<dyn GrammarChecker>,
    polarity: Arc<dyn PolarityScorer>,
    vocabulary: VocabularyAnalyzer,
    coherence: CoherenceAnalyzer,
}

impl TranscriptEvaluator {
    /// Evaluator with the built-in providers: no grammar checker, VADER sentiment and no
    /// coherence model.
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            preprocessor: Preprocessor::new(),
            keywords: KeywordDetector::default(),
            grammar: Arc::new(UnavailableGrammarChecker),
            polarity: Arc::new(VaderPolarity::new()),
            vocabulary: VocabularyAnalyzer::default(),
            coherence: CoherenceAnalyzer::default(),
        }
    }

    pub fn standard() -> Result<Self, ConfigurationError> {
        Ok(Self::new(ScoringEngine::standard()?))
    }

    /// Builds the engine from configured thresholds. Invalid thresholds are fatal here.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let engine = ScoringEngine::new(Rubric::standard()?, config.scoring_config())?;
        let evaluator = Self::new(engine);

        Ok(match config.scoring.coherence_model {
            CoherenceModel::Disabled => evaluator,
            CoherenceModel::TermFrequency => {
                evaluator.with_embedder(Arc::new(TermFrequencyEmbedder))
            }
        })
    }

    pub fn with_grammar_checker(mut self, checker: Arc<dyn GrammarChecker>) -> Self {
        self.grammar = checker;
        self
    }

    pub fn with_polarity_scorer(mut self, scorer: Arc<dyn PolarityScorer>) -> Self {
        self.polarity = scorer;
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn SentenceEmbedder>) -> Self {
        self.coherence = CoherenceAnalyzer::with_embedder(embedder);
        self
    }

    pub fn with_keyword_catalog(mut self, catalog: KeywordCatalog) -> Self {
        self.keywords = KeywordDetector::new(catalog);
        self
    }

    pub fn with_filler_words<I, S>(mut self, fillers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocabulary = VocabularyAnalyzer::new(fillers);
        self
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// True when both the grammar checker and a coherence model are available.
    pub fn models_loaded(&self) -> bool {
        self.grammar.is_available() && self.coherence.is_model_loaded()
    }

    /// Trims the transcript and enforces the accepted length range, counted in characters.
    pub fn validate_transcript<'a>(
        &self,
        transcript: &'a str,
    ) -> Result<&'a str, TranscriptError> {
        let trimmed = transcript.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(TranscriptError::Empty);
        }
        if length < MIN_TRANSCRIPT_CHARS {
            return Err(TranscriptError::TooShort {
                min: MIN_TRANSCRIPT_CHARS,
                found: length,
            });
        }
        if length > MAX_TRANSCRIPT_CHARS {
            return Err(TranscriptError::TooLong {
                max: MAX_TRANSCRIPT_CHARS,
                found: length,
            });
        }

        Ok(trimmed)
    }

    /// Runs every feature provider over the cleaned transcript.
    pub fn extract_features(&self, transcript: &str) -> FeatureSet {
        let prepared = self.preprocessor.prepare(transcript);
        let word_count = prepared.word_count();
        let text = prepared.cleaned_text.as_str();

        FeatureSet {
            transcript: prepared.metrics(),
            keywords: self.keywords.analyze(text),
            grammar: analyze_grammar(self.grammar.as_ref(), text, word_count),
            sentiment: SentimentFeatures::from_polarity(self.polarity.polarity(text)),
            vocabulary: self.vocabulary.analyze(text, &prepared.words),
            coherence: self.coherence.analyze(&prepared.sentences),
        }
    }

    pub fn evaluate(&self, transcript: &str) -> Result<EvaluationResult, EvaluationServiceError> {
        let transcript = self.validate_transcript(transcript)?;
        let features = self.extract_features(transcript);
        let result = self.engine.evaluate(&features)?;

        info!(
            overall_score = result.overall_score,
            grade = %result.grade,
            word_count = result.word_count,
            "transcript evaluated"
        );

        Ok(result)
    }
}
