use super::domain::FeatureSet;
use crate::features::PersonalInfoCategory;

/// Reason a feature set was refused before scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureSetError {
    #[error("{field} must be a finite number, found {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, found {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be within [{min}, {max}], found {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("personal_info is missing the '{0}' category")]
    MissingPersonalInfo(PersonalInfoCategory),
    #[error("{field} is {value} but the transcript has no words")]
    RateWithoutWords { field: &'static str, value: f64 },
}

impl FeatureSetError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            FeatureSetError::NotFinite { field, .. }
            | FeatureSetError::Negative { field, .. }
            | FeatureSetError::OutOfRange { field, .. }
            | FeatureSetError::RateWithoutWords { field, .. } => field,
            FeatureSetError::MissingPersonalInfo(_) => "personal_info",
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, FeatureSetError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FeatureSetError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), FeatureSetError> {
    if finite(field, value)? < 0.0 {
        return Err(FeatureSetError::Negative { field, value });
    }
    Ok(())
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), FeatureSetError> {
    if !(min..=max).contains(&finite(field, value)?) {
        return Err(FeatureSetError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn rate(field: &'static str, value: f64, word_count: usize) -> Result<(), FeatureSetError> {
    non_negative(field, value)?;
    if word_count == 0 && value != 0.0 {
        return Err(FeatureSetError::RateWithoutWords { field, value });
    }
    Ok(())
}

/// Checks every field the engine reads. Nothing is scored unless this passes.
pub fn validate_feature_set(features: &FeatureSet) -> Result<(), FeatureSetError> {
    let word_count = features.transcript.word_count;

    non_negative("speech_rate_wpm", features.transcript.speech_rate_wpm)?;

    if let Some(missing) = PersonalInfoCategory::ALL
        .into_iter()
        .find(|category| !features.keywords.personal_info.contains_key(category))
    {
        return Err(FeatureSetError::MissingPersonalInfo(missing));
    }

    rate("grammar_error_rate", features.grammar.error_rate, word_count)?;

    within("sentiment_compound", features.sentiment.compound, -1.0, 1.0)?;
    within("sentiment_positive", features.sentiment.positive, 0.0, 1.0)?;
    within("sentiment_negative", features.sentiment.negative, 0.0, 1.0)?;
    within("sentiment_neutral", features.sentiment.neutral, 0.0, 1.0)?;

    within("vocabulary_ttr", features.vocabulary.ttr, 0.0, 100.0)?;
    rate("filler_word_rate", features.vocabulary.filler_rate, word_count)?;

    within(
        "coherence_score",
        features.coherence.coherence_score,
        0.0,
        100.0,
    )?;
    finite("avg_similarity", features.coherence.avg_similarity)?;

    Ok(())
}
