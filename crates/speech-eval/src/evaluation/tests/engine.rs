use super::common::*;

use crate::evaluation::scoring::{CriterionId, Grade};
use crate::features::PolarityScores;
use crate::features::SentimentFeatures;

fn raw_score(features: &crate::evaluation::FeatureSet, id: CriterionId) -> f64 {
    engine()
        .evaluate(features)
        .expect("features are valid")
        .criterion(id)
        .expect("criterion scored")
        .score()
}

#[test]
fn perfect_features_score_full_marks() {
    let result = engine()
        .evaluate(&perfect_features())
        .expect("features are valid");

    assert_eq!(result.criteria_scores.len(), 9);
    assert!(result
        .criteria_scores
        .iter()
        .all(|criterion| criterion.score() == 5.0));
    assert_eq!(result.overall_score, 100.0);
    assert_eq!(result.grade, Grade::APlus);
    assert_eq!(result.word_count, 135);
    assert_eq!(result.sentence_count, 8);
}

#[test]
fn missing_salutation_costs_its_weight() {
    let mut features = perfect_features();
    features.keywords.salutation_found = false;
    features.keywords.salutation_phrase.clear();

    let result = engine().evaluate(&features).expect("features are valid");

    assert_eq!(result.overall_score, 95.0);
    assert_eq!(result.grade, Grade::APlus);
    assert_eq!(result.detailed_analysis.salutation_detected, None);
}

#[test]
fn two_personal_info_categories_earn_half_the_slot() {
    let mut features = perfect_features();
    features.keywords.personal_info = personal_info(2);

    let result = engine().evaluate(&features).expect("features are valid");
    let personal = result
        .criterion(CriterionId::PersonalInformation)
        .expect("criterion scored");

    assert_eq!(personal.score(), 2.5);
    assert_eq!(personal.weighted_contribution(), 5.0);
    assert_eq!(result.overall_score, 95.0);
}

#[test]
fn coherence_sixty_lands_in_fair_tier() {
    let mut features = perfect_features();
    features.coherence.coherence_score = 60.0;

    assert_eq!(raw_score(&features, CriterionId::FlowCoherence), 3.0);
}

#[test]
fn optimal_speech_rate_bounds_are_inclusive() {
    for wpm in [120.0, 150.0] {
        let mut features = perfect_features();
        features.transcript.speech_rate_wpm = wpm;
        assert_eq!(raw_score(&features, CriterionId::SpeechRate), 5.0, "wpm {wpm}");
    }

    let mut features = perfect_features();
    features.transcript.speech_rate_wpm = 181.0;
    assert_eq!(raw_score(&features, CriterionId::SpeechRate), 2.0);

    features.transcript.speech_rate_wpm = 110.0;
    assert_eq!(raw_score(&features, CriterionId::SpeechRate), 3.5);
}

#[test]
fn grammar_score_of_ninety_is_excellent() {
    let mut features = perfect_features();
    features.grammar.error_count = 2;
    features.grammar.error_rate = 2.0;
    assert_eq!(raw_score(&features, CriterionId::Grammar), 5.0);

    features.grammar.error_rate = 2.0002;
    assert_eq!(raw_score(&features, CriterionId::Grammar), 4.0);
}

#[test]
fn zero_word_transcript_scores_without_division() {
    let result = engine()
        .evaluate(&wordless_features())
        .expect("zero rates are valid");

    assert_eq!(result.word_count, 0);
    assert_eq!(result.detailed_analysis.filler_word_rate, 0.0);
    assert_eq!(result.detailed_analysis.grammar_error_rate, 0.0);
    assert_eq!(
        result
            .criterion(CriterionId::SpeechRate)
            .expect("criterion scored")
            .score(),
        2.0
    );
}

#[test]
fn criteria_follow_rubric_order() {
    let result = engine()
        .evaluate(&perfect_features())
        .expect("features are valid");
    let ids: Vec<CriterionId> = result.criteria_scores.iter().map(|score| score.id).collect();
    assert_eq!(ids, CriterionId::ALL.to_vec());
}

#[test]
fn evaluation_is_idempotent() {
    let engine = engine();
    let mut features = perfect_features();
    features.vocabulary.ttr = 47.3;
    features.coherence.coherence_score = 66.6;

    let first = engine.evaluate(&features).expect("features are valid");
    let second = engine.evaluate(&features).expect("features are valid");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn engagement_is_derived_from_polarity() {
    let mut features = perfect_features();
    features.sentiment = SentimentFeatures::from_polarity(PolarityScores {
        compound: 0.0,
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
    });

    let result = engine().evaluate(&features).expect("features are valid");

    assert_eq!(result.detailed_analysis.engagement_score, 35.0);
    assert_eq!(
        result
            .criterion(CriterionId::Engagement)
            .expect("criterion scored")
            .score(),
        2.0
    );
}

#[test]
fn overall_grade_uses_rounded_score() {
    let mut features = perfect_features();
    features.transcript.speech_rate_wpm = 110.0;
    features.coherence.coherence_score = 72.0;
    features.vocabulary.ttr = 40.0;

    let result = engine().evaluate(&features).expect("features are valid");

    // speech 3.5/5 at 10%, flow 4/5 at 15%, vocabulary 3/5 at 10%.
    assert_eq!(result.overall_score, 100.0 - 3.0 - 3.0 - 4.0);
    assert_eq!(result.grade, Grade::APlus);
    assert_eq!(result.grade, Grade::from_score(result.overall_score));
}

#[test]
fn criterion_grades_follow_percentages() {
    let mut features = perfect_features();
    features.keywords.personal_info = personal_info(3);

    let result = engine().evaluate(&features).expect("features are valid");
    let personal = result
        .criterion(CriterionId::PersonalInformation)
        .expect("criterion scored");

    assert_eq!(personal.score(), 3.5);
    assert!((personal.percentage() - 70.0).abs() < 1e-9);
    assert_eq!(personal.grade(), Grade::CPlus);
}

#[test]
fn serialized_result_exposes_derived_fields() {
    let result = engine()
        .evaluate(&perfect_features())
        .expect("features are valid");
    let json = serde_json::to_value(&result).expect("serializes");

    assert_eq!(json["grade"], "A+");
    assert_eq!(json["overall_score"], 100.0);
    let first = &json["criteria_scores"][0];
    assert_eq!(first["id"], "salutation");
    assert_eq!(first["criterion"], "Salutation Level");
    assert_eq!(first["percentage"], 100.0);
    assert_eq!(first["grade"], "A+");
    assert_eq!(json["detailed_analysis"]["salutation_detected"], "Hello");
    assert_eq!(json["detailed_analysis"]["flow_quality"], "Excellent");
}
