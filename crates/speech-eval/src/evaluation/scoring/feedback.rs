use super::grade::Grade;
use super::rules::{Coverage, Level, Presence, SpeechRateBand, Tier};
use crate::evaluation::domain::FeatureSet;

/// Feedback text for one criterion, selected by the level its scoring rule produced.
pub fn render(features: &FeatureSet, level: Level) -> String {
    match level {
        Level::Salutation(Presence::Present) => format!(
            "Great! Used '{}' as a greeting. This creates a positive first impression.",
            features.keywords.salutation_phrase
        ),
        Level::Salutation(Presence::Absent) => "Consider starting with a greeting like \
             'Hello', 'Hi', or 'Good morning' to make your introduction more engaging."
            .to_string(),
        Level::PersonalInformation(coverage) => personal_information(features, coverage),
        Level::Hobbies(Presence::Present) => "Great! You mentioned your hobbies and \
             interests, which makes your introduction more personal."
            .to_string(),
        Level::Hobbies(Presence::Absent) => "Consider mentioning your hobbies or interests \
             to help others get to know you better."
            .to_string(),
        Level::FlowCoherence(tier) => flow(features, tier),
        Level::SpeechRate(band) => speech_rate(features.transcript.speech_rate_wpm, band),
        Level::Grammar(tier) => grammar(features.grammar.error_count, tier),
        Level::Vocabulary(tier) => vocabulary(features.vocabulary.ttr, tier),
        Level::Clarity(tier) => clarity(features.vocabulary.filler_count, tier),
        Level::Engagement(tier) => engagement(features, tier),
    }
}

fn personal_information(features: &FeatureSet, coverage: Coverage) -> String {
    let missing = features
        .keywords
        .missing_personal_info()
        .into_iter()
        .map(|category| category.key())
        .collect::<Vec<_>>()
        .join(", ");

    match coverage {
        Coverage::Complete => "Excellent! You included all key personal information \
             (name, age, school, grade, family)."
            .to_string(),
        Coverage::Most => {
            format!("Good coverage of personal information. Consider adding: {missing}.")
        }
        Coverage::Some | Coverage::Minimal | Coverage::Missing => format!(
            "Include more personal details to make your introduction complete. Missing: {missing}."
        ),
    }
}

fn flow(features: &FeatureSet, tier: Tier) -> String {
    let quality = features.coherence.flow_quality;
    match tier {
        Tier::Excellent => format!("Excellent flow! Your ideas connect smoothly. ({quality})"),
        Tier::Good => format!("Good flow between ideas. ({quality})"),
        Tier::Fair => format!(
            "Fair flow. Try using transition words to connect your ideas better. ({quality})"
        ),
        Tier::NeedsImprovement => format!(
            "Work on connecting your ideas more smoothly. Use transition words like 'also', \
             'moreover', 'furthermore'. ({quality})"
        ),
    }
}

fn speech_rate(wpm: f64, band: SpeechRateBand) -> String {
    match band {
        SpeechRateBand::Optimal => {
            format!("Perfect speech rate at {wpm} WPM! This is ideal for clear communication.")
        }
        SpeechRateBand::SlightlySlow => format!(
            "Speech rate is {wpm} WPM. Try speaking a bit faster to sound more confident."
        ),
        SpeechRateBand::SlightlyFast => {
            format!("Speech rate is {wpm} WPM. Try slowing down slightly to ensure clarity.")
        }
        SpeechRateBand::TooSlow => {
            format!("Speech rate is {wpm} WPM. This is quite slow. Try to speak more fluently.")
        }
        SpeechRateBand::TooFast => format!(
            "Speech rate is {wpm} WPM. This is very fast. Slow down to ensure your audience \
             can follow."
        ),
    }
}

fn grammar(errors: u32, tier: Tier) -> String {
    match tier {
        Tier::Excellent if errors == 0 => "Perfect! No grammar errors detected.".to_string(),
        Tier::Excellent => format!("Very good! Only {errors} minor grammar error(s) detected."),
        Tier::Good | Tier::Fair => format!(
            "Good effort! Found {errors} grammar error(s). Review basic grammar rules to improve."
        ),
        Tier::NeedsImprovement => format!(
            "Found {errors} grammar error(s). Focus on improving grammar through practice and \
             review."
        ),
    }
}

fn vocabulary(ttr: f64, tier: Tier) -> String {
    match tier {
        Tier::Excellent => format!("Excellent vocabulary richness! (TTR: {ttr}%)"),
        Tier::Good => format!("Good vocabulary variety. (TTR: {ttr}%)"),
        Tier::Fair => format!(
            "Fair vocabulary. Try using more varied words to enhance your speech. (TTR: {ttr}%)"
        ),
        Tier::NeedsImprovement => format!(
            "Work on expanding your vocabulary. Avoid repeating the same words. (TTR: {ttr}%)"
        ),
    }
}

fn clarity(fillers: u32, tier: Tier) -> String {
    match tier {
        Tier::Excellent if fillers == 0 => {
            "Excellent clarity! No filler words detected.".to_string()
        }
        Tier::Excellent => format!("Very clear! Only {fillers} filler word(s) detected."),
        Tier::Good | Tier::Fair => format!(
            "Good clarity. Found {fillers} filler word(s). Try to reduce 'um', 'uh', 'like', etc."
        ),
        Tier::NeedsImprovement => format!(
            "Found {fillers} filler word(s). Practice speaking more deliberately to reduce fillers."
        ),
    }
}

fn engagement(features: &FeatureSet, tier: Tier) -> String {
    let label = features.sentiment.label;
    match tier {
        Tier::Excellent => format!("Excellent enthusiasm and positivity! ({label})"),
        Tier::Good => format!("Good positive tone. ({label})"),
        Tier::Fair => {
            format!("Fair engagement. Try to sound more enthusiastic and positive. ({label})")
        }
        Tier::NeedsImprovement => format!(
            "Work on sounding more positive and engaged. Smile while speaking! ({label})"
        ),
    }
}

/// One-sentence verdict keyed on the overall grade.
pub fn summary(grade: Grade) -> String {
    match grade {
        Grade::APlus => format!(
            "Outstanding performance! (Grade: {grade}) Your self-introduction is excellent with \
             strong content, delivery, and engagement."
        ),
        Grade::A | Grade::BPlus => format!(
            "Great job! (Grade: {grade}) Your introduction is well-structured with good delivery. \
             Minor improvements will make it perfect."
        ),
        Grade::B | Grade::CPlus => format!(
            "Good effort! (Grade: {grade}) Your introduction covers the basics well. Focus on the \
             areas marked for improvement."
        ),
        Grade::C | Grade::D => format!(
            "Fair performance. (Grade: {grade}) Work on including more details and improving \
             your delivery."
        ),
        Grade::F => format!(
            "Needs improvement. (Grade: {grade}) Review the feedback carefully and practice your \
             introduction."
        ),
    }
}
