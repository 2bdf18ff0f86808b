use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{ConfigurationError, WEIGHT_SUM_TOLERANCE};

/// Raw scores in the standard rubric are out of five.
pub const STANDARD_MAX_RAW_SCORE: f64 = 5.0;

/// Stable identifiers for the nine rubric dimensions, in rubric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionId {
    Salutation,
    PersonalInformation,
    Hobbies,
    FlowCoherence,
    SpeechRate,
    Grammar,
    Vocabulary,
    Clarity,
    Engagement,
}

impl CriterionId {
    pub const ALL: [CriterionId; 9] = [
        CriterionId::Salutation,
        CriterionId::PersonalInformation,
        CriterionId::Hobbies,
        CriterionId::FlowCoherence,
        CriterionId::SpeechRate,
        CriterionId::Grammar,
        CriterionId::Vocabulary,
        CriterionId::Clarity,
        CriterionId::Engagement,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            CriterionId::Salutation => "salutation",
            CriterionId::PersonalInformation => "personal_information",
            CriterionId::Hobbies => "hobbies",
            CriterionId::FlowCoherence => "flow_coherence",
            CriterionId::SpeechRate => "speech_rate",
            CriterionId::Grammar => "grammar",
            CriterionId::Vocabulary => "vocabulary",
            CriterionId::Clarity => "clarity",
            CriterionId::Engagement => "engagement",
        }
    }

    /// Name shown to students.
    pub const fn display_name(self) -> &'static str {
        match self {
            CriterionId::Salutation => "Salutation Level",
            CriterionId::PersonalInformation => "Personal Information",
            CriterionId::Hobbies => "Hobbies/Interests",
            CriterionId::FlowCoherence => "Flow & Coherence",
            CriterionId::SpeechRate => "Speech Rate",
            CriterionId::Grammar => "Grammar Accuracy",
            CriterionId::Vocabulary => "Vocabulary Richness",
            CriterionId::Clarity => "Clarity (Filler Words)",
            CriterionId::Engagement => "Engagement & Positivity",
        }
    }

    pub const fn standard_weight(self) -> f64 {
        match self {
            CriterionId::Salutation => 5.0,
            CriterionId::PersonalInformation
            | CriterionId::Hobbies
            | CriterionId::SpeechRate
            | CriterionId::Grammar
            | CriterionId::Vocabulary => 10.0,
            CriterionId::FlowCoherence | CriterionId::Clarity | CriterionId::Engagement => 15.0,
        }
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One weighted rubric dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    /// Share of the overall score, in percent.
    pub weight: f64,
    pub max_raw_score: f64,
}

impl Criterion {
    pub fn standard(id: CriterionId) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            weight: id.standard_weight(),
            max_raw_score: STANDARD_MAX_RAW_SCORE,
        }
    }
}

/// Validated, immutable set of the nine criteria. Weights are never renormalised.
#[derive(Debug, Clone, PartialEq)]
pub struct Rubric {
    criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ConfigurationError> {
        let mut seen = BTreeSet::new();
        for criterion in &criteria {
            if !seen.insert(criterion.id) {
                return Err(ConfigurationError::DuplicateCriterion(criterion.id));
            }
            if !criterion.weight.is_finite() || !(0.0..=100.0).contains(&criterion.weight) {
                return Err(ConfigurationError::InvalidWeight {
                    criterion: criterion.id,
                    weight: criterion.weight,
                });
            }
            if !criterion.max_raw_score.is_finite() || criterion.max_raw_score <= 0.0 {
                return Err(ConfigurationError::InvalidMaxScore {
                    criterion: criterion.id,
                    max_score: criterion.max_raw_score,
                });
            }
        }

        if let Some(missing) = CriterionId::ALL.into_iter().find(|id| !seen.contains(id)) {
            return Err(ConfigurationError::MissingCriterion(missing));
        }

        let rubric = Self { criteria };
        if !rubric.weight_sum_invariant() {
            return Err(ConfigurationError::WeightSum {
                sum: rubric.weight_sum(),
            });
        }

        Ok(rubric)
    }

    /// The standard rubric: weights 5, 10, 10, 15, 10, 10, 10, 15, 15.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::new(CriterionId::ALL.into_iter().map(Criterion::standard).collect())
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn get(&self, id: CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| criterion.id == id)
    }

    pub fn weight_sum(&self) -> f64 {
        self.criteria.iter().map(|criterion| criterion.weight).sum()
    }

    pub fn weight_sum_invariant(&self) -> bool {
        (self.weight_sum() - 100.0).abs() < WEIGHT_SUM_TOLERANCE
    }
}
