use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type WordId = u64;
pub type ListId = u64;

/// User-assigned review priority of a word.
///
/// `Unset` is the state of a freshly added word that has never been rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    High,
    Medium,
    Low,
    #[default]
    Unset,
}

impl Frequency {
    /// The tiers a user can rate a word with.
    pub const RATED: [Frequency; 3] = [Frequency::High, Frequency::Medium, Frequency::Low];

    /// Priority weight used by the daily selection. Unset sorts below low.
    pub fn weight(self) -> u8 {
        match self {
            Frequency::High => 3,
            Frequency::Medium => 2,
            Frequency::Low => 1,
            Frequency::Unset => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::High => "high",
            Frequency::Medium => "medium",
            Frequency::Low => "low",
            Frequency::Unset => "unset",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Frequency::High),
            "medium" | "med" | "m" => Ok(Frequency::Medium),
            "low" | "l" => Ok(Frequency::Low),
            "unset" | "none" => Ok(Frequency::Unset),
            other => Err(format!(
                "Invalid frequency '{}' (expected high, medium or low)",
                other
            )),
        }
    }
}

/// The three text fields that make up a word, as typed by a user or read
/// from an import table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFields {
    pub vocabulary: String,
    pub pronunciation: String,
    pub meaning: String,
}

impl WordFields {
    pub fn new(
        vocabulary: impl Into<String>,
        pronunciation: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            vocabulary: vocabulary.into(),
            pronunciation: pronunciation.into(),
            meaning: meaning.into(),
        }
    }
}

/// Partial edit of a word. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordUpdate {
    pub vocabulary: Option<String>,
    pub pronunciation: Option<String>,
    pub meaning: Option<String>,
}

impl WordUpdate {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_none() && self.pronunciation.is_none() && self.meaning.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: WordId,
    pub vocabulary: String,
    pub pronunciation: String,
    pub meaning: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub review_count: u32,
}

impl WordEntry {
    pub fn new(id: WordId, fields: WordFields) -> Self {
        Self {
            id,
            vocabulary: fields.vocabulary,
            pronunciation: fields.pronunciation,
            meaning: fields.meaning,
            frequency: Frequency::Unset,
            date_added: Utc::now(),
            review_count: 0,
        }
    }

    pub fn fields(&self) -> WordFields {
        WordFields::new(
            self.vocabulary.clone(),
            self.pronunciation.clone(),
            self.meaning.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyList {
    pub id: ListId,
    pub name: String,
    // Soft references: ids may outlive the words they point at.
    #[serde(default)]
    pub word_ids: Vec<WordId>,
    pub date_created: DateTime<Utc>,
}

impl VocabularyList {
    pub fn new(id: ListId, name: String) -> Self {
        Self {
            id,
            name,
            word_ids: Vec::new(),
            date_created: Utc::now(),
        }
    }

    pub fn contains(&self, word: WordId) -> bool {
        self.word_ids.contains(&word)
    }
}

/// The words picked for one study day. Entries are copies taken at
/// generation time, not live references into the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySelection {
    pub date: NaiveDate,
    pub words: Vec<WordEntry>,
}

impl DailySelection {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            words: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// Hands out millisecond-timestamp ids.
///
/// Ids are strictly increasing within a generator, so two creations in the
/// same millisecond still get distinct ids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already in use.
    pub fn seeded(max_existing: u64) -> Self {
        Self { last: max_existing }
    }

    /// `None` once the id space is used up.
    pub fn next_id(&mut self) -> Option<u64> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_weights_put_unset_below_low() {
        assert!(Frequency::High.weight() > Frequency::Medium.weight());
        assert!(Frequency::Medium.weight() > Frequency::Low.weight());
        assert!(Frequency::Low.weight() > Frequency::Unset.weight());
    }

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Frequency>().unwrap(), Frequency::High);
        assert_eq!("m".parse::<Frequency>().unwrap(), Frequency::Medium);
        assert!("often".parse::<Frequency>().is_err());
    }

    #[test]
    fn id_generator_is_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id().unwrap();
        let b = ids.next_id().unwrap();
        let c = ids.next_id().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn seeded_generator_skips_existing_ids() {
        let far_future = u64::MAX / 2;
        let mut ids = IdGenerator::seeded(far_future);
        assert_eq!(ids.next_id(), Some(far_future + 1));
    }

    #[test]
    fn generator_seeded_at_max_runs_dry() {
        let mut ids = IdGenerator::seeded(u64::MAX);
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn word_entry_serializes_with_camel_case_keys() {
        let word = WordEntry::new(7, WordFields::new("猫", "ねこ", "cat"));
        let json = serde_json::to_string(&word).unwrap();
        assert!(json.contains("\"reviewCount\":0"));
        assert!(json.contains("\"dateAdded\""));
        assert!(json.contains("\"frequency\":\"unset\""));
    }

    #[test]
    fn missing_frequency_defaults_to_unset() {
        let json = r#"{"id":1,"vocabulary":"犬","pronunciation":"いぬ","meaning":"dog","dateAdded":"2024-01-01T00:00:00Z"}"#;
        let word: WordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(word.frequency, Frequency::Unset);
        assert_eq!(word.review_count, 0);
    }
}
