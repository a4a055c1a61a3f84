//! Word store operations.
//!
//! Words live in collection order (insertion order). Deleting a word never
//! touches lists: their ids go stale and are filtered when read.

use crate::commands::required;
use crate::error::{Result, TangoError};
use crate::model::{Frequency, WordEntry, WordFields, WordId, WordUpdate};
use crate::repository::VocabularyRepository;
use crate::store::Gateway;
use log::info;

pub fn add<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    vocabulary: &str,
    pronunciation: &str,
    meaning: &str,
) -> Result<WordEntry> {
    let fields = WordFields {
        vocabulary: required("Vocabulary", vocabulary)?,
        pronunciation: required("Pronunciation", pronunciation)?,
        meaning: required("Meaning", meaning)?,
    };

    let word = WordEntry::new(repo.next_id()?, fields);
    repo.commit_words(|words| {
        words.push(word.clone());
        Ok(())
    })?;
    Ok(word)
}

pub fn get<G: Gateway>(repo: &VocabularyRepository<G>, id: WordId) -> Result<&WordEntry> {
    repo.words()
        .iter()
        .find(|w| w.id == id)
        .ok_or(TangoError::WordNotFound(id))
}

/// Overwrite the supplied text fields. Rating and history are left alone.
pub fn update<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    id: WordId,
    changes: WordUpdate,
) -> Result<WordEntry> {
    // Validate everything before touching the entry.
    let vocabulary = changes
        .vocabulary
        .as_deref()
        .map(|v| required("Vocabulary", v))
        .transpose()?;
    let pronunciation = changes
        .pronunciation
        .as_deref()
        .map(|v| required("Pronunciation", v))
        .transpose()?;
    let meaning = changes
        .meaning
        .as_deref()
        .map(|v| required("Meaning", v))
        .transpose()?;

    repo.commit_words(|words| {
        let word = find_mut(words, id)?;
        if let Some(v) = vocabulary {
            word.vocabulary = v;
        }
        if let Some(v) = pronunciation {
            word.pronunciation = v;
        }
        if let Some(v) = meaning {
            word.meaning = v;
        }
        Ok(word.clone())
    })
}

/// Record a rating. Every call counts as a review, even if the tier is
/// unchanged. If the word is on today's card its snapshot is refreshed.
pub fn rate<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    id: WordId,
    frequency: Frequency,
) -> Result<WordEntry> {
    let rated = repo.commit_words(|words| {
        let word = find_mut(words, id)?;
        word.frequency = frequency;
        word.review_count += 1;
        Ok(word.clone())
    })?;

    repo.update_daily(|daily| {
        let mut refreshed = false;
        for snapshot in daily.words.iter_mut().filter(|w| w.id == id) {
            *snapshot = rated.clone();
            refreshed = true;
        }
        refreshed
    })?;

    Ok(rated)
}

/// Delete a word. Unknown ids are a no-op and return `None`.
pub fn remove<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    id: WordId,
) -> Result<Option<WordEntry>> {
    let Some(pos) = repo.words().iter().position(|w| w.id == id) else {
        return Ok(None);
    };
    let removed = repo.commit_words(|words| Ok(words.remove(pos)))?;

    repo.update_daily(|daily| {
        let before = daily.words.len();
        daily.words.retain(|w| w.id != id);
        daily.words.len() != before
    })?;

    Ok(Some(removed))
}

/// Delete every word and empty the cached daily selection. Lists are kept.
pub fn clear<G: Gateway>(repo: &mut VocabularyRepository<G>) -> Result<usize> {
    let count = repo.commit_words(|words| {
        let count = words.len();
        words.clear();
        Ok(count)
    })?;

    repo.update_daily(|daily| {
        daily.words.clear();
        true
    })?;

    info!("cleared {} words", count);
    Ok(count)
}

/// Case-insensitive substring match on any of the three text fields.
/// An empty term matches everything.
pub fn search<G: Gateway>(repo: &VocabularyRepository<G>, term: &str) -> Vec<WordEntry> {
    let term = term.to_lowercase();
    repo.words()
        .iter()
        .filter(|w| {
            term.is_empty()
                || w.vocabulary.to_lowercase().contains(&term)
                || w.pronunciation.to_lowercase().contains(&term)
                || w.meaning.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Newest first, at most `limit` words.
pub fn most_recent<G: Gateway>(repo: &VocabularyRepository<G>, limit: usize) -> Vec<WordEntry> {
    let mut words: Vec<&WordEntry> = repo.words().iter().collect();
    words.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    words.into_iter().take(limit).cloned().collect()
}

pub fn by_frequency<G: Gateway>(
    repo: &VocabularyRepository<G>,
    tier: Frequency,
) -> Vec<WordEntry> {
    repo.words()
        .iter()
        .filter(|w| w.frequency == tier)
        .cloned()
        .collect()
}

fn find_mut(words: &mut [WordEntry], id: WordId) -> Result<&mut WordEntry> {
    words
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or(TangoError::WordNotFound(id))
}
