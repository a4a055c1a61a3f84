//! # Daily Selection
//!
//! Picks the day's study set from the whole collection. The ordering is:
//!
//! 1. frequency tier, highest first (high, medium, low, then unrated words),
//! 2. within a tier, fewest reviews first,
//! 3. otherwise collection order (the sort is stable).
//!
//! The first `limit` words of that ordering are copied into the selection.
//! Given the same collection and date the result is always the same.
//!
//! A selection belongs to the date it was generated for. [`current`] hides a
//! stale one instead of deleting it; regeneration is always caller-triggered.

use crate::error::{Result, TangoError};
use crate::model::{DailySelection, WordEntry};
use chrono::{Local, NaiveDate};
use std::cmp::Ordering;

pub const DEFAULT_DAILY_LIMIT: usize = 50;

/// Today's date on the device clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn generate(words: &[WordEntry], today: NaiveDate, limit: usize) -> Result<DailySelection> {
    if words.is_empty() {
        return Err(TangoError::EmptyCollection);
    }

    let mut ranked: Vec<&WordEntry> = words.iter().collect();
    ranked.sort_by(|a, b| priority(a, b));

    Ok(DailySelection {
        date: today,
        words: ranked.into_iter().take(limit).cloned().collect(),
    })
}

/// The stored selection if it was made for `today`, otherwise an empty one.
pub fn current(stored: Option<&DailySelection>, today: NaiveDate) -> DailySelection {
    match stored {
        Some(selection) if selection.is_for(today) => selection.clone(),
        _ => DailySelection::empty(today),
    }
}

fn priority(a: &WordEntry, b: &WordEntry) -> Ordering {
    b.frequency
        .weight()
        .cmp(&a.frequency.weight())
        .then(a.review_count.cmp(&b.review_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Frequency, WordFields};

    fn word(id: u64, frequency: Frequency, reviews: u32) -> WordEntry {
        let mut w = WordEntry::new(id, WordFields::new(format!("w{}", id), "r", "m"));
        w.frequency = frequency;
        w.review_count = reviews;
        w
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn empty_collection_is_an_error() {
        let err = generate(&[], day(), DEFAULT_DAILY_LIMIT).unwrap_err();
        assert!(matches!(err, TangoError::EmptyCollection));
    }

    #[test]
    fn orders_by_tier_then_review_count() {
        let words = vec![
            word(1, Frequency::Low, 0),
            word(2, Frequency::High, 5),
            word(3, Frequency::Medium, 0),
            word(4, Frequency::High, 2),
        ];
        let selection = generate(&words, day(), DEFAULT_DAILY_LIMIT).unwrap();
        let ids: Vec<u64> = selection.words.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
        assert_eq!(selection.date, day());
    }

    #[test]
    fn unset_sorts_after_low() {
        let words = vec![word(1, Frequency::Unset, 0), word(2, Frequency::Low, 9)];
        let selection = generate(&words, day(), DEFAULT_DAILY_LIMIT).unwrap();
        assert_eq!(selection.words[0].id, 2);
    }

    #[test]
    fn ties_keep_collection_order() {
        let words = vec![
            word(10, Frequency::Medium, 1),
            word(11, Frequency::Medium, 1),
            word(12, Frequency::Medium, 1),
        ];
        let selection = generate(&words, day(), DEFAULT_DAILY_LIMIT).unwrap();
        let ids: Vec<u64> = selection.words.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn caps_at_fifty_words() {
        let words: Vec<WordEntry> = (0..73).map(|i| word(i, Frequency::High, 0)).collect();
        let selection = generate(&words, day(), DEFAULT_DAILY_LIMIT).unwrap();
        assert_eq!(selection.len(), 50);
    }

    #[test]
    fn small_collections_are_taken_whole() {
        let words: Vec<WordEntry> = (0..3).map(|i| word(i, Frequency::Low, 0)).collect();
        let selection = generate(&words, day(), DEFAULT_DAILY_LIMIT).unwrap();
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn current_ignores_stale_selection() {
        let words = vec![word(1, Frequency::High, 0)];
        let selection = generate(&words, day(), DEFAULT_DAILY_LIMIT).unwrap();

        assert_eq!(current(Some(&selection), day()).len(), 1);

        let tomorrow = day().succ_opt().unwrap();
        let stale = current(Some(&selection), tomorrow);
        assert!(stale.is_empty());
        assert_eq!(stale.date, tomorrow);

        assert!(current(None, day()).is_empty());
    }
}
