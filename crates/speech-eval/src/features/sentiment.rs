use std::fmt;

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

use super::round_to;

/// Polarity proportions and the normalised compound score for a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Overall polarity in [-1, 1].
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl PolarityScores {
    pub const NEUTRAL: PolarityScores = PolarityScores {
        compound: 0.0,
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
    };
}

/// External sentiment analyser.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> PolarityScores;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= 0.5 {
            SentimentLabel::VeryPositive
        } else if compound >= 0.1 {
            SentimentLabel::Positive
        } else if compound >= -0.1 {
            SentimentLabel::Neutral
        } else if compound >= -0.5 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::VeryNegative
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sentiment measurements consumed by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentFeatures {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// 0-100 blend of polarity and positivity.
    pub engagement_score: f64,
    pub label: SentimentLabel,
}

impl SentimentFeatures {
    pub fn from_polarity(scores: PolarityScores) -> Self {
        Self {
            compound: scores.compound,
            positive: scores.positive,
            negative: scores.negative,
            neutral: scores.neutral,
            engagement_score: engagement_score(scores.compound, scores.positive),
            label: SentimentLabel::from_compound(scores.compound),
        }
    }
}

/// `0.7 * compound rescaled to 0-100 + 0.3 * positive proportion as a percentage`,
/// rounded to two decimals.
pub fn engagement_score(compound: f64, positive: f64) -> f64 {
    let compound_normalized = (compound + 1.0) / 2.0 * 100.0;
    let positive_normalized = positive * 100.0;
    round_to(compound_normalized * 0.7 + positive_normalized * 0.3, 2)
}

/// Scores text with the VADER lexicon and rule set.
pub struct VaderPolarity {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderPolarity {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderPolarity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaderPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderPolarity").finish_non_exhaustive()
    }
}

impl PolarityScorer for VaderPolarity {
    fn polarity(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::NEUTRAL;
        }

        let scores = self.analyzer.polarity_scores(text);
        let read = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        PolarityScores {
            compound: read("compound").clamp(-1.0, 1.0),
            positive: read("pos").clamp(0.0, 1.0),
            negative: read("neg").clamp(0.0, 1.0),
            neutral: read("neu").clamp(0.0, 1.0),
        }
    }
}
