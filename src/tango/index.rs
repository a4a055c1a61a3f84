//! # Display Indexes
//!
//! Word ids are millisecond timestamps, which nobody wants to type. The CLI
//! shows each word with a 1-based index over the collection order instead,
//! and accepts those indexes back as selectors:
//!
//! - `3` selects the third word,
//! - `3-5` selects the third through fifth,
//! - `#1718000000000` selects a word by its id.
//!
//! Indexes are canonical: a filtered view (search, recent, a list) shows each
//! word with the same index it has in the full collection, so `tango rm 7`
//! means the same word no matter which view printed the 7.

use crate::error::{Result, TangoError};
use crate::model::{WordEntry, WordId};
use std::collections::HashMap;
use std::str::FromStr;

/// A user-facing, 1-based position in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(DisplayIndex(n)),
            _ => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// A user input to select a word, either by display index or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSelector {
    Index(DisplayIndex),
    Id(WordId),
}

impl std::fmt::Display for WordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordSelector::Index(idx) => write!(f, "{}", idx),
            WordSelector::Id(id) => write!(f, "#{}", id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayWord {
    /// `None` for a word that is no longer in the collection.
    pub index: Option<DisplayIndex>,
    pub word: WordEntry,
}

/// Pairs every word with its index, in collection order.
pub fn index_words(words: &[WordEntry]) -> Vec<DisplayWord> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| DisplayWord {
            index: Some(DisplayIndex(i + 1)),
            word: word.clone(),
        })
        .collect()
}

/// Pairs each word of a filtered view with its index in `all`.
pub fn index_subset(all: &[WordEntry], subset: Vec<WordEntry>) -> Vec<DisplayWord> {
    let mut positions: HashMap<WordId, DisplayIndex> = HashMap::with_capacity(all.len());
    for (i, word) in all.iter().enumerate() {
        positions.entry(word.id).or_insert(DisplayIndex(i + 1));
    }
    subset
        .into_iter()
        .map(|word| DisplayWord {
            index: positions.get(&word.id).copied(),
            word,
        })
        .collect()
}

/// Parses a single selector that may also be a range of indexes.
///
/// Supports formats:
/// - Single index: "3"
/// - Range: "3-5" (expands to 3, 4, 5); start must be <= end
/// - Id: "#1718000000000"
///
/// Whether the indexes exist is checked later, in [`resolve_selectors`].
pub fn parse_selector_or_range(s: &str) -> std::result::Result<Vec<WordSelector>, String> {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix('#') {
        return rest
            .parse::<WordId>()
            .map(|id| vec![WordSelector::Id(id)])
            .map_err(|_| format!("Invalid word id: {}", s));
    }

    if let Some((start, end)) = s.split_once('-') {
        let start = DisplayIndex::from_str(start)?;
        let end = DisplayIndex::from_str(end)?;
        if start > end {
            return Err(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            ));
        }
        return Ok((start.0..=end.0)
            .map(|i| WordSelector::Index(DisplayIndex(i)))
            .collect());
    }

    DisplayIndex::from_str(s).map(|idx| vec![WordSelector::Index(idx)])
}

/// Parses every input, flattening ranges.
pub fn parse_selectors<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<WordSelector>> {
    let mut selectors = Vec::new();
    for input in inputs {
        selectors.extend(parse_selector_or_range(input.as_ref()).map_err(TangoError::Api)?);
    }
    Ok(selectors)
}

/// Turns selectors into word ids, in the order given and without repeats.
pub fn resolve_selectors(words: &[WordEntry], selectors: &[WordSelector]) -> Result<Vec<WordId>> {
    let mut ids = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let id = match selector {
            WordSelector::Index(idx) => idx
                .0
                .checked_sub(1)
                .and_then(|i| words.get(i))
                .map(|w| w.id)
                .ok_or_else(|| TangoError::Api(format!("Index {} not found", idx)))?,
            WordSelector::Id(id) => words
                .iter()
                .find(|w| w.id == *id)
                .map(|w| w.id)
                .ok_or(TangoError::WordNotFound(*id))?,
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
