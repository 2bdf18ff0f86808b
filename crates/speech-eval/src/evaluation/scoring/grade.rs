use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{Ladder, Threshold};

/// Letter grade derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

const GRADE_RUNGS: [Threshold<Grade>; 7] = [
    Threshold {
        min: 90.0,
        level: Grade::APlus,
    },
    Threshold {
        min: 85.0,
        level: Grade::A,
    },
    Threshold {
        min: 80.0,
        level: Grade::BPlus,
    },
    Threshold {
        min: 75.0,
        level: Grade::B,
    },
    Threshold {
        min: 70.0,
        level: Grade::CPlus,
    },
    Threshold {
        min: 65.0,
        level: Grade::C,
    },
    Threshold {
        min: 60.0,
        level: Grade::D,
    },
];

const GRADES: Ladder<Grade> = Ladder::new(&GRADE_RUNGS, Grade::F);

impl Grade {
    /// The single grade ladder used for overall and per-criterion grades.
    pub fn from_score(score: f64) -> Self {
        GRADES.classify(score)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
