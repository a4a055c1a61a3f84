use super::{Gateway, StoreKey};
use crate::error::{Result, TangoError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory gateway for testing.
///
/// Uses `RefCell` for interior mutability since tango is single-threaded,
/// which lets `Gateway::save` take `&self`.
#[derive(Default)]
pub struct MemGateway {
    entries: RefCell<HashMap<StoreKey, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with corrupt text.
    pub fn with_entry(self, key: StoreKey, text: &str) -> Self {
        self.entries.borrow_mut().insert(key, text.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw stored text, for asserting on what was persisted.
    pub fn raw(&self, key: StoreKey) -> Option<String> {
        self.entries.borrow().get(&key).cloned()
    }
}

impl Gateway for MemGateway {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(&key).cloned())
    }

    fn save(&self, key: StoreKey, text: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(TangoError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().insert(key, text.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Frequency, WordEntry, WordFields};
    use crate::repository::VocabularyRepository;

    pub struct RepoFixture {
        pub repo: VocabularyRepository<MemGateway>,
    }

    impl Default for RepoFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RepoFixture {
        pub fn new() -> Self {
            Self {
                repo: VocabularyRepository::open(MemGateway::new())
                    .expect("in-memory repository always opens"),
            }
        }

        pub fn with_words(mut self, count: usize) -> Self {
            for i in 0..count {
                self.push(WordFields::new(
                    format!("word {}", i + 1),
                    format!("reading {}", i + 1),
                    format!("meaning {}", i + 1),
                ));
            }
            self
        }

        pub fn with_word(mut self, vocabulary: &str, pronunciation: &str, meaning: &str) -> Self {
            self.push(WordFields::new(vocabulary, pronunciation, meaning));
            self
        }

        pub fn with_rated_word(
            mut self,
            vocabulary: &str,
            frequency: Frequency,
            reviews: u32,
        ) -> Self {
            let id = self.push(WordFields::new(vocabulary, "-", "-"));
            if let Some(word) = self.repo.words_mut().iter_mut().find(|w| w.id == id) {
                word.frequency = frequency;
                word.review_count = reviews;
            }
            self
        }

        pub fn ids(&self) -> Vec<u64> {
            self.repo.words().iter().map(|w| w.id).collect()
        }

        fn push(&mut self, fields: WordFields) -> u64 {
            let id = self.repo.next_id().expect("fixture ids never run out");
            self.repo.words_mut().push(WordEntry::new(id, fields));
            id
        }
    }
}
