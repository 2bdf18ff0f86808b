use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{rate_per_hundred, round_to};

pub const DEFAULT_FILLER_WORDS: [&str; 11] = [
    "um",
    "uh",
    "like",
    "you know",
    "basically",
    "actually",
    "literally",
    "sort of",
    "kind of",
    "i mean",
    "well",
];

/// Vocabulary richness and filler-word measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyFeatures {
    /// Type-token ratio as a percentage.
    pub ttr: f64,
    pub vocabulary_score: f64,
    pub filler_count: u32,
    /// Filler words per hundred words.
    pub filler_rate: f64,
    pub filler_details: BTreeMap<String, u32>,
    pub clarity_score: f64,
}

impl VocabularyFeatures {
    /// Builds the record from raw measurements, deriving both 0-100 scores.
    pub fn from_measurements(
        ttr: f64,
        filler_count: u32,
        filler_rate: f64,
        filler_details: BTreeMap<String, u32>,
    ) -> Self {
        Self {
            ttr,
            vocabulary_score: vocabulary_score(ttr),
            filler_count,
            filler_rate,
            filler_details,
            clarity_score: clarity_score(filler_rate),
        }
    }
}

/// Maps a type-token ratio percentage onto a 0-100 vocabulary score.
pub fn vocabulary_score(ttr: f64) -> f64 {
    if ttr >= 70.0 {
        90.0 + (ttr - 70.0) / 30.0 * 10.0
    } else if ttr >= 50.0 {
        70.0 + (ttr - 50.0) / 20.0 * 20.0
    } else if ttr >= 30.0 {
        50.0 + (ttr - 30.0) / 20.0 * 20.0
    } else {
        ttr / 30.0 * 50.0
    }
}

/// Maps a filler rate (per hundred words) onto a 0-100 clarity score.
pub fn clarity_score(filler_rate: f64) -> f64 {
    if filler_rate == 0.0 {
        100.0
    } else if filler_rate <= 2.0 {
        100.0 - filler_rate * 5.0
    } else if filler_rate <= 5.0 {
        90.0 - (filler_rate - 2.0) * 6.67
    } else {
        (70.0 - (filler_rate - 5.0) * 10.0).max(0.0)
    }
}

struct FillerPattern {
    phrase: String,
    pattern: Regex,
}

/// Computes type-token ratio and counts filler words and phrases.
pub struct VocabularyAnalyzer {
    fillers: Vec<FillerPattern>,
}

impl Default for VocabularyAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_FILLER_WORDS)
    }
}

impl VocabularyAnalyzer {
    /// Fillers are matched case-insensitively as whole words or phrases.
    pub fn new<I, S>(fillers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fillers = fillers
            .into_iter()
            .filter_map(|filler| {
                let phrase = filler.as_ref().trim().to_lowercase();
                if phrase.is_empty() {
                    return None;
                }
                let source = format!(r"\b{}\b", regex::escape(&phrase).replace(' ', r"\s+"));
                match Regex::new(&source) {
                    Ok(pattern) => Some(FillerPattern { phrase, pattern }),
                    Err(err) => {
                        warn!(filler = %phrase, error = %err, "skipping unusable filler phrase");
                        None
                    }
                }
            })
            .collect();

        Self { fillers }
    }

    pub fn filler_words(&self) -> impl Iterator<Item = &str> {
        self.fillers.iter().map(|filler| filler.phrase.as_str())
    }

    pub fn type_token_ratio(&self, words: &[String]) -> f64 {
        if words.is_empty() {
            return 0.0;
        }
        let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
        round_to(unique.len() as f64 / words.len() as f64 * 100.0, 2)
    }

    pub fn count_fillers(&self, text: &str) -> BTreeMap<String, u32> {
        let lowered = text.to_lowercase();
        self.fillers
            .iter()
            .filter_map(|filler| {
                let count = filler.pattern.find_iter(&lowered).count() as u32;
                (count > 0).then(|| (filler.phrase.clone(), count))
            })
            .collect()
    }

    pub fn analyze(&self, text: &str, words: &[String]) -> VocabularyFeatures {
        let ttr = self.type_token_ratio(words);
        let filler_details = self.count_fillers(text);
        let filler_count: u32 = filler_details.values().sum();
        let filler_rate = round_to(rate_per_hundred(filler_count as usize, words.len()), 2);

        VocabularyFeatures::from_measurements(ttr, filler_count, filler_rate, filler_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn vocabulary_score_is_piecewise_linear() {
        assert_eq!(vocabulary_score(100.0), 100.0);
        assert!((vocabulary_score(80.0) - 93.333).abs() < 1e-3);
        assert_eq!(vocabulary_score(70.0), 90.0);
        assert_eq!(vocabulary_score(60.0), 80.0);
        assert_eq!(vocabulary_score(50.0), 70.0);
        assert_eq!(vocabulary_score(30.0), 50.0);
        assert_eq!(vocabulary_score(15.0), 25.0);
        assert_eq!(vocabulary_score(0.0), 0.0);
    }

    #[test]
    fn clarity_score_is_piecewise_linear() {
        assert_eq!(clarity_score(0.0), 100.0);
        assert_eq!(clarity_score(2.0), 90.0);
        assert_eq!(clarity_score(7.0), 50.0);
        assert_eq!(clarity_score(50.0), 0.0);
    }

    #[test]
    fn ttr_counts_unique_tokens() {
        let analyzer = VocabularyAnalyzer::default();
        assert_eq!(analyzer.type_token_ratio(&words("a b a b")), 50.0);
        assert_eq!(analyzer.type_token_ratio(&[]), 0.0);
    }

    #[test]
    fn fillers_match_whole_words_and_phrases() {
        let analyzer = VocabularyAnalyzer::default();
        let details = analyzer.count_fillers("Um, I like, you know, really likely enjoy it. Um.");

        assert_eq!(details.get("um"), Some(&2));
        assert_eq!(details.get("like"), Some(&1));
        assert_eq!(details.get("you know"), Some(&1));
        assert_eq!(details.get("well"), None);
    }

    #[test]
    fn analyze_reports_rates_per_hundred_words() {
        let analyzer = VocabularyAnalyzer::default();
        let text = "um so I basically study music";
        let features = analyzer.analyze(text, &words(text));

        assert_eq!(features.filler_count, 2);
        assert_eq!(features.filler_rate, 33.33);
        assert_eq!(features.clarity_score, 0.0);
        assert_eq!(features.ttr, 100.0);
        assert_eq!(features.vocabulary_score, 100.0);
    }

    #[test]
    fn empty_transcript_has_zero_rates() {
        let features = VocabularyAnalyzer::default().analyze("", &[]);
        assert_eq!(features.filler_rate, 0.0);
        assert_eq!(features.ttr, 0.0);
        assert_eq!(features.clarity_score, 100.0);
    }
}
