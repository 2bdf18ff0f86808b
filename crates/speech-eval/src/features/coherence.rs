use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::round_to;

/// Score reported when coherence cannot be measured.
pub const NEUTRAL_COHERENCE_SCORE: f64 = 75.0;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding model unavailable: {0}")]
    Unavailable(String),
    #[error("expected {expected} embeddings, received {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("embedding {index} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("similarity between sentences {index} and {next} is not finite")]
    NonFiniteSimilarity { index: usize, next: usize },
    #[error("embedding failed: {0}")]
    Failed(String),
}

/// External sentence-embedding model. Returns one vector per input sentence.
pub trait SentenceEmbedder: Send + Sync {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowQuality {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl FlowQuality {
    pub const fn label(self) -> &'static str {
        match self {
            FlowQuality::Excellent => "Excellent",
            FlowQuality::Good => "Good",
            FlowQuality::Fair => "Fair",
            FlowQuality::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for FlowQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn flow_quality(coherence_score: f64) -> FlowQuality {
    if coherence_score >= 85.0 {
        FlowQuality::Excellent
    } else if coherence_score >= 70.0 {
        FlowQuality::Good
    } else if coherence_score >= 50.0 {
        FlowQuality::Fair
    } else {
        FlowQuality::NeedsImprovement
    }
}

/// Maps mean adjacent-sentence similarity onto a 0-100 coherence score.
///
/// Negative similarities score 0.0.
pub fn coherence_score(avg_similarity: f64) -> f64 {
    let s = avg_similarity;
    let score = if s >= 0.6 {
        85.0 + (s - 0.6) / 0.4 * 15.0
    } else if s >= 0.4 {
        70.0 + (s - 0.4) / 0.2 * 15.0
    } else if s >= 0.2 {
        50.0 + (s - 0.2) / 0.2 * 20.0
    } else {
        s / 0.2 * 50.0
    };
    score.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoherenceFeatures {
    pub coherence_score: f64,
    pub avg_similarity: f64,
    pub flow_quality: FlowQuality,
}

impl CoherenceFeatures {
    pub const NEUTRAL: CoherenceFeatures = CoherenceFeatures {
        coherence_score: NEUTRAL_COHERENCE_SCORE,
        avg_similarity: 0.0,
        flow_quality: FlowQuality::Good,
    };
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn adjacent_similarities(embeddings: &[Vec<f32>]) -> Result<Vec<f64>, EmbeddingError> {
    let expected = embeddings.first().map_or(0, Vec::len);
    if let Some((index, embedding)) = embeddings
        .iter()
        .enumerate()
        .find(|(_, embedding)| embedding.len() != expected)
    {
        return Err(EmbeddingError::DimensionMismatch {
            index,
            expected,
            actual: embedding.len(),
        });
    }

    embeddings
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let similarity = cosine_similarity(&pair[0], &pair[1]);
            if similarity.is_finite() {
                Ok(similarity)
            } else {
                Err(EmbeddingError::NonFiniteSimilarity {
                    index,
                    next: index + 1,
                })
            }
        })
        .collect()
}

/// Measures how smoothly consecutive sentences connect.
#[derive(Clone, Default)]
pub struct CoherenceAnalyzer {
    embedder: Option<Arc<dyn SentenceEmbedder>>,
}

impl fmt::Debug for CoherenceAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoherenceAnalyzer")
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl CoherenceAnalyzer {
    pub fn new(embedder: Option<Arc<dyn SentenceEmbedder>>) -> Self {
        Self { embedder }
    }

    pub fn with_embedder(embedder: Arc<dyn SentenceEmbedder>) -> Self {
        Self::new(Some(embedder))
    }

    pub fn is_model_loaded(&self) -> bool {
        self.embedder.is_some()
    }

    /// Mean cosine similarity of each adjacent sentence pair, or `None` when it cannot be
    /// computed.
    pub fn average_similarity(&self, sentences: &[String]) -> Option<f64> {
        if sentences.len() < 2 {
            return None;
        }
        let embedder = self.embedder.as_ref()?;

        let embeddings = match embedder.embed(sentences) {
            Ok(embeddings) if embeddings.len() == sentences.len() => embeddings,
            Ok(embeddings) => {
                let err = EmbeddingError::CountMismatch {
                    expected: sentences.len(),
                    actual: embeddings.len(),
                };
                warn!(error = %err, "coherence degraded to neutral score");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "coherence degraded to neutral score");
                return None;
            }
        };

        match adjacent_similarities(&embeddings) {
            Ok(similarities) => {
                Some(similarities.iter().sum::<f64>() / similarities.len() as f64)
            }
            Err(err) => {
                warn!(error = %err, "coherence degraded to neutral score");
                None
            }
        }
    }

    pub fn analyze(&self, sentences: &[String]) -> CoherenceFeatures {
        let Some(avg_similarity) = self.average_similarity(sentences) else {
            return CoherenceFeatures::NEUTRAL;
        };

        let score = round_to(coherence_score(avg_similarity), 2);
        debug!(avg_similarity, score, "coherence measured");

        CoherenceFeatures {
            coherence_score: score,
            avg_similarity: round_to(avg_similarity, 3),
            flow_quality: flow_quality(score),
        }
    }
}

/// Lexical embedder: bag-of-words counts over the vocabulary of the sentences it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequencyEmbedder;

impl TermFrequencyEmbedder {
    fn terms(sentence: &str) -> impl Iterator<Item = String> + '_ {
        sentence
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

impl SentenceEmbedder for TermFrequencyEmbedder {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        for sentence in sentences {
            for term in Self::terms(sentence) {
                let next = vocabulary.len();
                vocabulary.entry(term).or_insert(next);
            }
        }

        let embeddings = sentences
            .iter()
            .map(|sentence| {
                let mut vector = vec![0.0_f32; vocabulary.len()];
                for term in Self::terms(sentence) {
                    if let Some(&index) = vocabulary.get(&term) {
                        vector[index] += 1.0;
                    }
                }
                vector
            })
            .collect();

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingEmbedder;

    impl SentenceEmbedder for FailingEmbedder {
        fn embed(&self, _sentences: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::Unavailable("offline".to_string()))
        }
    }

    struct FixedEmbedder(Vec<Vec<f32>>);

    impl SentenceEmbedder for FixedEmbedder {
        fn embed(&self, _sentences: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(self.0.clone())
        }
    }

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn score_follows_similarity_tiers() {
        assert_eq!(coherence_score(1.0), 100.0);
        assert_eq!(coherence_score(0.6), 85.0);
        assert_eq!(coherence_score(0.0), 0.0);
        assert!((coherence_score(0.5) - 77.5).abs() < 1e-9);
        assert!((coherence_score(0.3) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn flow_labels_follow_score_ladder() {
        assert_eq!(flow_quality(85.0), FlowQuality::Excellent);
        assert_eq!(flow_quality(84.99), FlowQuality::Good);
        assert_eq!(flow_quality(50.0), FlowQuality::Fair);
        assert_eq!(flow_quality(49.0), FlowQuality::NeedsImprovement);
    }

    #[test]
    fn missing_model_uses_neutral_score() {
        let features = CoherenceAnalyzer::default().analyze(&sentences(&["One.", "Two."]));
        assert_eq!(features, CoherenceFeatures::NEUTRAL);
    }

    #[test]
    fn single_sentence_uses_neutral_score() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(TermFrequencyEmbedder));
        assert_eq!(
            analyzer.analyze(&sentences(&["Only one sentence"])),
            CoherenceFeatures::NEUTRAL
        );
    }

    #[test]
    fn embedder_failure_uses_neutral_score() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(FailingEmbedder));
        assert_eq!(
            analyzer.analyze(&sentences(&["First", "Second"])),
            CoherenceFeatures::NEUTRAL
        );
    }

    #[test]
    fn mismatched_embedding_count_uses_neutral_score() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(FixedEmbedder(vec![vec![1.0]])));
        assert_eq!(
            analyzer.analyze(&sentences(&["First", "Second"])),
            CoherenceFeatures::NEUTRAL
        );
    }

    #[test]
    fn opposed_sentences_score_zero_instead_of_negative() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(FixedEmbedder(vec![
            vec![1.0, 0.0],
            vec![-1.0, 0.0],
        ])));
        let features = analyzer.analyze(&sentences(&["First", "Second"]));

        assert_eq!(features.avg_similarity, -1.0);
        assert_eq!(features.coherence_score, 0.0);
        assert_eq!(features.flow_quality, FlowQuality::NeedsImprovement);
    }

    #[test]
    fn score_is_clamped_to_percentage_range() {
        assert_eq!(coherence_score(-0.5), 0.0);
        assert_eq!(coherence_score(1.2), 100.0);
    }

    #[test]
    fn non_finite_embedding_uses_neutral_score() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(FixedEmbedder(vec![
            vec![f32::NAN, 1.0],
            vec![1.0, 1.0],
        ])));
        assert_eq!(
            analyzer.analyze(&sentences(&["First", "Second"])),
            CoherenceFeatures::NEUTRAL
        );

        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(FixedEmbedder(vec![
            vec![f32::INFINITY, 0.0],
            vec![1.0, 0.0],
        ])));
        assert_eq!(
            analyzer.analyze(&sentences(&["First", "Second"])),
            CoherenceFeatures::NEUTRAL
        );
    }

    #[test]
    fn ragged_embeddings_use_neutral_score() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(FixedEmbedder(vec![
            vec![1.0, 0.0, 0.0],
            vec![1.0, 0.0],
        ])));
        assert_eq!(
            analyzer.analyze(&sentences(&["First", "Second"])),
            CoherenceFeatures::NEUTRAL
        );
    }

    #[test]
    fn identical_sentences_are_fully_coherent() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(TermFrequencyEmbedder));
        let features = analyzer.analyze(&sentences(&["I love music", "I love music"]));

        assert_eq!(features.avg_similarity, 1.0);
        assert_eq!(features.coherence_score, 100.0);
        assert_eq!(features.flow_quality, FlowQuality::Excellent);
    }

    #[test]
    fn unrelated_sentences_score_zero() {
        let analyzer = CoherenceAnalyzer::with_embedder(Arc::new(TermFrequencyEmbedder));
        let features = analyzer.analyze(&sentences(&["cats sleep", "rivers flow"]));

        assert_eq!(features.avg_similarity, 0.0);
        assert_eq!(features.flow_quality, FlowQuality::NeedsImprovement);
    }
}
