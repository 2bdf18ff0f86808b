use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The five pieces of personal information a complete introduction covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalInfoCategory {
    Name,
    Age,
    School,
    Grade,
    Family,
}

impl PersonalInfoCategory {
    pub const ALL: [PersonalInfoCategory; 5] = [
        PersonalInfoCategory::Name,
        PersonalInfoCategory::Age,
        PersonalInfoCategory::School,
        PersonalInfoCategory::Grade,
        PersonalInfoCategory::Family,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            PersonalInfoCategory::Name => "name",
            PersonalInfoCategory::Age => "age",
            PersonalInfoCategory::School => "school",
            PersonalInfoCategory::Grade => "grade",
            PersonalInfoCategory::Family => "family",
        }
    }
}

impl fmt::Display for PersonalInfoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Cue phrases searched for in a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCatalog {
    pub salutations: Vec<String>,
    pub personal_info: BTreeMap<PersonalInfoCategory, Vec<String>>,
    pub hobbies: Vec<String>,
}

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|phrase| phrase.to_string()).collect()
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        let mut personal_info = BTreeMap::new();
        personal_info.insert(
            PersonalInfoCategory::Name,
            owned(&["name", "called", "i'm", "i am"]),
        );
        personal_info.insert(
            PersonalInfoCategory::Age,
            owned(&["age", "years old", "year old"]),
        );
        personal_info.insert(
            PersonalInfoCategory::School,
            owned(&["school", "studying", "student"]),
        );
        personal_info.insert(
            PersonalInfoCategory::Grade,
            owned(&["grade", "class", "standard"]),
        );
        personal_info.insert(
            PersonalInfoCategory::Family,
            owned(&[
                "family", "parents", "siblings", "brother", "sister", "mother", "father",
            ]),
        );

        Self {
            salutations: owned(&[
                "hello",
                "hi",
                "good morning",
                "good afternoon",
                "good evening",
                "greetings",
                "hey",
                "namaste",
            ]),
            personal_info,
            hobbies: owned(&[
                "hobby",
                "hobbies",
                "like",
                "love",
                "enjoy",
                "interested",
                "passion",
                "favorite",
                "play",
                "read",
                "draw",
                "dance",
                "sing",
            ]),
        }
    }
}

/// Keyword detector output: which rubric content cues the transcript contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordFeatures {
    pub salutation_found: bool,
    /// Matched greeting, title-cased. Empty when no greeting was found.
    pub salutation_phrase: String,
    pub personal_info: BTreeMap<PersonalInfoCategory, bool>,
    pub hobbies_found: bool,
}

impl KeywordFeatures {
    pub fn personal_info_count(&self) -> usize {
        self.personal_info.values().filter(|found| **found).count()
    }

    /// Personal information categories not covered, in rubric order.
    pub fn missing_personal_info(&self) -> Vec<PersonalInfoCategory> {
        PersonalInfoCategory::ALL
            .into_iter()
            .filter(|category| !self.personal_info.get(category).copied().unwrap_or(false))
            .collect()
    }

    fn checklist(&self) -> Vec<(&'static str, bool)> {
        let mut items = vec![("salutation", self.salutation_found)];
        items.extend(PersonalInfoCategory::ALL.into_iter().map(|category| {
            (
                category.key(),
                self.personal_info.get(&category).copied().unwrap_or(false),
            )
        }));
        items.push(("hobbies", self.hobbies_found));
        items
    }

    pub fn keywords_found(&self) -> Vec<String> {
        self.checklist()
            .into_iter()
            .filter(|(_, found)| *found)
            .map(|(key, _)| key.to_string())
            .collect()
    }

    pub fn keywords_missing(&self) -> Vec<String> {
        self.checklist()
            .into_iter()
            .filter(|(_, found)| !*found)
            .map(|(key, _)| key.to_string())
            .collect()
    }
}

/// Case-insensitive substring matcher over a [`KeywordCatalog`].
#[derive(Debug, Clone, Default)]
pub struct KeywordDetector {
    catalog: KeywordCatalog,
}

impl KeywordDetector {
    pub fn new(catalog: KeywordCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// First catalogue greeting contained in the text, title-cased.
    pub fn detect_salutation(&self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        self.catalog
            .salutations
            .iter()
            .find(|phrase| lowered.contains(phrase.as_str()))
            .map(|phrase| title_case(phrase))
    }

    pub fn detect_personal_info(&self, text: &str) -> BTreeMap<PersonalInfoCategory, bool> {
        let lowered = text.to_lowercase();
        PersonalInfoCategory::ALL
            .into_iter()
            .map(|category| {
                let found = self
                    .catalog
                    .personal_info
                    .get(&category)
                    .map(|cues| cues.iter().any(|cue| lowered.contains(cue.as_str())))
                    .unwrap_or(false);
                (category, found)
            })
            .collect()
    }

    pub fn detect_hobbies(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.catalog
            .hobbies
            .iter()
            .any(|cue| lowered.contains(cue.as_str()))
    }

    pub fn analyze(&self, text: &str) -> KeywordFeatures {
        let salutation = self.detect_salutation(text);
        KeywordFeatures {
            salutation_found: salutation.is_some(),
            salutation_phrase: salutation.unwrap_or_default(),
            personal_info: self.detect_personal_info(text),
            hobbies_found: self.detect_hobbies(text),
        }
    }
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
