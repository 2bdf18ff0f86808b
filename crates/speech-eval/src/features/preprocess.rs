use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::round_to;

/// Transcripts shorter than this are assumed to have been spoken in half a minute.
const SHORT_TRANSCRIPT_WORDS: usize = 100;
/// Transcripts longer than this are assumed to have been spoken in a minute and a half.
const LONG_TRANSCRIPT_WORDS: usize = 200;

// Literal patterns only; `literal_patterns_compile` exercises every one.
static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static DISALLOWED: OnceLock<Regex> = OnceLock::new();
static WORD: OnceLock<Regex> = OnceLock::new();
static SENTENCE_BREAK: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn disallowed() -> &'static Regex {
    DISALLOWED.get_or_init(|| Regex::new(r"[^\w\s.,!?'\-]").expect("valid character pattern"))
}

fn word() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("valid word pattern"))
}

fn sentence_break() -> &'static Regex {
    SENTENCE_BREAK.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"))
}

/// Word, sentence and pace measurements for one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub speech_rate_wpm: f64,
}

/// Cleaned transcript together with its tokenisation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTranscript {
    pub cleaned_text: String,
    pub words: Vec<String>,
    pub sentences: Vec<String>,
    pub speech_rate_wpm: f64,
}

impl PreparedTranscript {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn metrics(&self) -> TranscriptMetrics {
        TranscriptMetrics {
            word_count: self.word_count(),
            sentence_count: self.sentence_count(),
            speech_rate_wpm: self.speech_rate_wpm,
        }
    }
}

/// Normalises raw transcript text and splits it into words and sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn clean_text(&self, text: &str) -> String {
        let collapsed = whitespace().replace_all(text, " ");
        disallowed().replace_all(&collapsed, "").trim().to_string()
    }

    pub fn tokenize_words(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        word()
            .find_iter(&lowered)
            .map(|found| found.as_str().to_string())
            .collect()
    }

    pub fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        sentence_break()
            .split(text)
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Words per minute under the assumed speaking duration for the transcript length.
    pub fn estimate_speech_rate(&self, word_count: usize) -> f64 {
        let minutes = if word_count < SHORT_TRANSCRIPT_WORDS {
            0.5
        } else if word_count > LONG_TRANSCRIPT_WORDS {
            1.5
        } else {
            1.0
        };

        round_to(word_count as f64 / minutes, 2)
    }

    pub fn prepare(&self, text: &str) -> PreparedTranscript {
        let cleaned_text = self.clean_text(text);
        let words = self.tokenize_words(&cleaned_text);
        let sentences = self.tokenize_sentences(&cleaned_text);
        let speech_rate_wpm = self.estimate_speech_rate(words.len());

        PreparedTranscript {
            cleaned_text,
            words,
            sentences,
            speech_rate_wpm,
        }
    }
}
