use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::scoring::{CriterionId, Grade};
use crate::features::{
    round_to, CoherenceFeatures, FlowQuality, GrammarFeatures, KeywordFeatures,
    SentimentFeatures, SentimentLabel, TranscriptMetrics, VocabularyFeatures,
};

/// Every measurement the scoring engine needs for one transcript.
///
/// Built once per evaluation from the feature providers' outputs and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub transcript: TranscriptMetrics,
    pub keywords: KeywordFeatures,
    pub grammar: GrammarFeatures,
    pub sentiment: SentimentFeatures,
    pub vocabulary: VocabularyFeatures,
    pub coherence: CoherenceFeatures,
}

/// Scored outcome for a single criterion.
///
/// The percentage and display grade are always computed from the current raw and maximum
/// scores.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub id: CriterionId,
    pub criterion: String,
    score: f64,
    max_score: f64,
    pub weight: f64,
    pub feedback: String,
}

impl CriterionScore {
    pub fn new(
        id: CriterionId,
        criterion: impl Into<String>,
        score: f64,
        max_score: f64,
        weight: f64,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            id,
            criterion: criterion.into(),
            score,
            max_score,
            weight,
            feedback: feedback.into(),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn percentage(&self) -> f64 {
        self.score / self.max_score * 100.0
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.percentage())
    }

    /// Percentage points this criterion adds to the overall score.
    pub fn weighted_contribution(&self) -> f64 {
        self.percentage() * (self.weight / 100.0)
    }
}

impl Serialize for CriterionScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CriterionScore", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("criterion", &self.criterion)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("max_score", &self.max_score)?;
        state.serialize_field("weight", &self.weight)?;
        state.serialize_field("percentage", &round_to(self.percentage(), 2))?;
        state.serialize_field("grade", &self.grade())?;
        state.serialize_field("feedback", &self.feedback)?;
        state.end()
    }
}

/// Caller-facing snapshot of the measurements behind a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub keywords_found: Vec<String>,
    pub keywords_missing: Vec<String>,
    pub salutation_detected: Option<String>,
    pub grammar_errors: u32,
    pub grammar_error_rate: f64,
    pub grammar_score: f64,
    pub filler_words_count: u32,
    pub filler_word_rate: f64,
    pub filler_details: BTreeMap<String, u32>,
    pub clarity_score: f64,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub engagement_score: f64,
    pub vocabulary_richness: f64,
    pub vocabulary_score: f64,
    pub coherence_score: f64,
    pub avg_similarity: f64,
    pub flow_quality: FlowQuality,
    pub speech_rate_wpm: f64,
}

/// Final output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Weighted 0-100 score, rounded to two decimals.
    pub overall_score: f64,
    pub grade: Grade,
    pub word_count: usize,
    pub sentence_count: usize,
    pub criteria_scores: Vec<CriterionScore>,
    pub detailed_analysis: DetailedAnalysis,
    pub summary: String,
}

impl EvaluationResult {
    pub fn criterion(&self, id: CriterionId) -> Option<&CriterionScore> {
        self.criteria_scores.iter().find(|score| score.id == id)
    }
}
