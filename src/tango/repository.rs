//! # Repository
//!
//! [`VocabularyRepository`] is the single in-memory aggregate behind every
//! operation: the word collection, the lists, and the cached daily
//! selection. It is built once per session with [`VocabularyRepository::open`]
//! (load-on-construct) and each command saves the document it changed
//! (save-on-mutate).
//!
//! ## Corrupt State
//!
//! A stored document that fails to parse is treated as empty for that key
//! and a warning is logged. The bad text stays on disk until the next save
//! of that key overwrites it. I/O failures are still errors.

use crate::error::{Result, TangoError};
use crate::model::{DailySelection, IdGenerator, VocabularyList, WordEntry};
use crate::store::{Gateway, StoreKey};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct VocabularyRepository<G: Gateway> {
    gateway: G,
    words: Vec<WordEntry>,
    lists: Vec<VocabularyList>,
    daily: Option<DailySelection>,
    ids: IdGenerator,
}

impl<G: Gateway> VocabularyRepository<G> {
    pub fn open(gateway: G) -> Result<Self> {
        let words: Vec<WordEntry> = load_or_default(&gateway, StoreKey::Words)?;
        let lists: Vec<VocabularyList> = load_or_default(&gateway, StoreKey::Lists)?;
        let daily: Option<DailySelection> = load_or_default(&gateway, StoreKey::Daily)?;

        let max_id = words
            .iter()
            .map(|w| w.id)
            .chain(lists.iter().map(|l| l.id))
            .max()
            .unwrap_or(0);

        debug!(
            "repository opened: {} words, {} lists, daily cache {}",
            words.len(),
            lists.len(),
            if daily.is_some() { "present" } else { "absent" }
        );

        Ok(Self {
            gateway,
            words,
            lists,
            daily,
            ids: IdGenerator::seeded(max_id),
        })
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn lists(&self) -> &[VocabularyList] {
        &self.lists
    }

    /// The cached selection as stored, whatever its date.
    pub fn daily(&self) -> Option<&DailySelection> {
        self.daily.as_ref()
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub(crate) fn words_mut(&mut self) -> &mut Vec<WordEntry> {
        &mut self.words
    }

    pub(crate) fn next_id(&mut self) -> Result<u64> {
        self.ids
            .next_id()
            .ok_or_else(|| TangoError::Store("No ids left to assign".to_string()))
    }

    /// Run `change` on a copy of the words and keep the copy only once it
    /// has been saved. On any error the collection is left as it was.
    pub(crate) fn commit_words<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<WordEntry>) -> Result<T>,
    ) -> Result<T> {
        let mut candidate = self.words.clone();
        let out = change(&mut candidate)?;
        save(&self.gateway, StoreKey::Words, &candidate)?;
        self.words = candidate;
        Ok(out)
    }

    /// Same as [`Self::commit_words`], for the lists.
    pub(crate) fn commit_lists<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<VocabularyList>) -> Result<T>,
    ) -> Result<T> {
        let mut candidate = self.lists.clone();
        let out = change(&mut candidate)?;
        save(&self.gateway, StoreKey::Lists, &candidate)?;
        self.lists = candidate;
        Ok(out)
    }

    /// Replace the cached selection once it has been saved.
    pub(crate) fn commit_daily(&mut self, selection: DailySelection) -> Result<()> {
        save(&self.gateway, StoreKey::Daily, &selection)?;
        self.daily = Some(selection);
        Ok(())
    }

    /// Edit the cached selection, if there is one. `change` returns whether
    /// it touched anything; untouched selections are not saved.
    pub(crate) fn update_daily(
        &mut self,
        change: impl FnOnce(&mut DailySelection) -> bool,
    ) -> Result<()> {
        let Some(mut selection) = self.daily.clone() else {
            return Ok(());
        };
        if change(&mut selection) {
            self.commit_daily(selection)?;
        }
        Ok(())
    }
}

fn load_or_default<G: Gateway, T: DeserializeOwned + Default>(
    gateway: &G,
    key: StoreKey,
) -> Result<T> {
    let Some(text) = gateway.load(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("stored {} is unreadable, starting empty: {}", key, e);
            Ok(T::default())
        }
    }
}

fn save<G: Gateway, T: Serialize + ?Sized>(gateway: &G, key: StoreKey, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    gateway.save(key, &text)
}
