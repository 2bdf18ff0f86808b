use std::ops::RangeInclusive;

use super::config::ScoringConfig;
use super::rubric::{CriterionId, STANDARD_MAX_RAW_SCORE};

/// One rung of a [`Ladder`]: values at or above `min` map to `level`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Threshold<L> {
    pub min: f64,
    pub level: L,
}

/// Ordered threshold table. Rungs are checked top-down and the first match wins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ladder<L: 'static> {
    rungs: &'static [Threshold<L>],
    floor: L,
}

impl<L: Copy + 'static> Ladder<L> {
    pub(crate) const fn new(rungs: &'static [Threshold<L>], floor: L) -> Self {
        Self { rungs, floor }
    }

    pub(crate) fn classify(&self, value: f64) -> L {
        self.rungs
            .iter()
            .find(|rung| value >= rung.min)
            .map(|rung| rung.level)
            .unwrap_or(self.floor)
    }
}

/// Four-step quality tier shared by the score-driven criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

const fn tier_ladder(excellent: f64, good: f64, fair: f64) -> [Threshold<Tier>; 3] {
    [
        Threshold {
            min: excellent,
            level: Tier::Excellent,
        },
        Threshold {
            min: good,
            level: Tier::Good,
        },
        Threshold {
            min: fair,
            level: Tier::Fair,
        },
    ]
}

const FLOW_RUNGS: [Threshold<Tier>; 3] = tier_ladder(85.0, 70.0, 50.0);
const GRAMMAR_RUNGS: [Threshold<Tier>; 3] = tier_ladder(90.0, 75.0, 60.0);
const VOCABULARY_RUNGS: [Threshold<Tier>; 3] = tier_ladder(85.0, 70.0, 55.0);
const CLARITY_RUNGS: [Threshold<Tier>; 3] = tier_ladder(90.0, 75.0, 60.0);
const ENGAGEMENT_RUNGS: [Threshold<Tier>; 3] = tier_ladder(80.0, 65.0, 50.0);

pub(crate) const FLOW: Ladder<Tier> = Ladder::new(&FLOW_RUNGS, Tier::NeedsImprovement);
pub(crate) const GRAMMAR: Ladder<Tier> = Ladder::new(&GRAMMAR_RUNGS, Tier::NeedsImprovement);
pub(crate) const VOCABULARY: Ladder<Tier> =
    Ladder::new(&VOCABULARY_RUNGS, Tier::NeedsImprovement);
pub(crate) const CLARITY: Ladder<Tier> = Ladder::new(&CLARITY_RUNGS, Tier::NeedsImprovement);
pub(crate) const ENGAGEMENT: Ladder<Tier> =
    Ladder::new(&ENGAGEMENT_RUNGS, Tier::NeedsImprovement);

/// How many of the five personal-information categories were covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Complete,
    Most,
    Some,
    Minimal,
    Missing,
}

const COVERAGE_RUNGS: [Threshold<Coverage>; 4] = [
    Threshold {
        min: 5.0,
        level: Coverage::Complete,
    },
    Threshold {
        min: 3.0,
        level: Coverage::Most,
    },
    Threshold {
        min: 2.0,
        level: Coverage::Some,
    },
    Threshold {
        min: 1.0,
        level: Coverage::Minimal,
    },
];

pub(crate) const COVERAGE: Ladder<Coverage> = Ladder::new(&COVERAGE_RUNGS, Coverage::Missing);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechRateBand {
    Optimal,
    SlightlySlow,
    SlightlyFast,
    TooSlow,
    TooFast,
}

/// Optimal and acceptable words-per-minute ranges, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpeechRateBands {
    optimal: RangeInclusive<f64>,
    acceptable: RangeInclusive<f64>,
}

impl SpeechRateBands {
    pub(crate) fn from_config(config: &ScoringConfig) -> Self {
        Self {
            optimal: config.optimal_wpm_min..=config.optimal_wpm_max,
            acceptable: config.acceptable_wpm_min..=config.acceptable_wpm_max,
        }
    }

    pub(crate) fn classify(&self, wpm: f64) -> SpeechRateBand {
        if self.optimal.contains(&wpm) {
            SpeechRateBand::Optimal
        } else if self.acceptable.contains(&wpm) {
            if wpm < *self.optimal.start() {
                SpeechRateBand::SlightlySlow
            } else {
                SpeechRateBand::SlightlyFast
            }
        } else if wpm < *self.acceptable.start() {
            SpeechRateBand::TooSlow
        } else {
            SpeechRateBand::TooFast
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    fn points(self) -> f64 {
        match self {
            Presence::Present => 5.0,
            Presence::Absent => 0.0,
        }
    }
}

impl Coverage {
    fn points(self) -> f64 {
        match self {
            Coverage::Complete => 5.0,
            Coverage::Most => 3.5,
            Coverage::Some => 2.5,
            Coverage::Minimal => 1.5,
            Coverage::Missing => 0.0,
        }
    }
}

impl Tier {
    fn points(self) -> f64 {
        match self {
            Tier::Excellent => 5.0,
            Tier::Good => 4.0,
            Tier::Fair => 3.0,
            Tier::NeedsImprovement => 2.0,
        }
    }
}

impl SpeechRateBand {
    fn points(self) -> f64 {
        match self {
            SpeechRateBand::Optimal => 5.0,
            SpeechRateBand::SlightlySlow | SpeechRateBand::SlightlyFast => 3.5,
            SpeechRateBand::TooSlow | SpeechRateBand::TooFast => 2.0,
        }
    }
}

/// Outcome of applying a criterion's rule; selects both the raw score and the feedback.
///
/// One variant per criterion, so a level always belongs to exactly one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Salutation(Presence),
    PersonalInformation(Coverage),
    Hobbies(Presence),
    FlowCoherence(Tier),
    SpeechRate(SpeechRateBand),
    Grammar(Tier),
    Vocabulary(Tier),
    Clarity(Tier),
    Engagement(Tier),
}

impl Level {
    pub const fn criterion(self) -> CriterionId {
        match self {
            Level::Salutation(_) => CriterionId::Salutation,
            Level::PersonalInformation(_) => CriterionId::PersonalInformation,
            Level::Hobbies(_) => CriterionId::Hobbies,
            Level::FlowCoherence(_) => CriterionId::FlowCoherence,
            Level::SpeechRate(_) => CriterionId::SpeechRate,
            Level::Grammar(_) => CriterionId::Grammar,
            Level::Vocabulary(_) => CriterionId::Vocabulary,
            Level::Clarity(_) => CriterionId::Clarity,
            Level::Engagement(_) => CriterionId::Engagement,
        }
    }

    /// Points on the standard five-point scale.
    pub fn points(self) -> f64 {
        match self {
            Level::Salutation(presence) | Level::Hobbies(presence) => presence.points(),
            Level::PersonalInformation(coverage) => coverage.points(),
            Level::SpeechRate(band) => band.points(),
            Level::FlowCoherence(tier)
            | Level::Grammar(tier)
            | Level::Vocabulary(tier)
            | Level::Clarity(tier)
            | Level::Engagement(tier) => tier.points(),
        }
    }

    /// Raw score for a criterion whose maximum is `max_raw_score`.
    pub fn raw_score(self, max_raw_score: f64) -> f64 {
        if max_raw_score == STANDARD_MAX_RAW_SCORE {
            self.points()
        } else {
            self.points() / STANDARD_MAX_RAW_SCORE * max_raw_score
        }
    }
}

pub(crate) fn presence(found: bool) -> Presence {
    if found {
        Presence::Present
    } else {
        Presence::Absent
    }
}
