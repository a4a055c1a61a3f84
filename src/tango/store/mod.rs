//! # Storage Layer
//!
//! Tango persists three documents, each a JSON blob under a fixed key. The
//! [`Gateway`] trait is the whole contract between the core and durable
//! storage: load a key's text, or save it.
//!
//! ## Implementations
//!
//! - [`fs::FileGateway`]: one `<key>.json` file per key in the data directory,
//!   written atomically (temp file, then rename).
//! - [`memory::MemGateway`]: in-memory map for tests, with write-error
//!   simulation.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── vocabularyWords.json   # Word entries (JSON array)
//! ├── vocabularyLists.json   # Lists (JSON array)
//! ├── dailyWords.json        # Cached daily selection {date, words}
//! └── config.json            # Settings (see config.rs)
//! ```
//!
//! The gateway knows nothing about the shape of the documents; decoding and
//! recovery from corrupt text live in [`crate::repository`].

use crate::error::Result;
use std::fmt;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Words,
    Lists,
    Daily,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [StoreKey::Words, StoreKey::Lists, StoreKey::Daily];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Words => "vocabularyWords",
            StoreKey::Lists => "vocabularyLists",
            StoreKey::Daily => "dailyWords",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value storage for the serialized collections.
pub trait Gateway {
    /// Read the text stored under `key`. `Ok(None)` means nothing was ever saved.
    fn load(&self, key: StoreKey) -> Result<Option<String>>;

    /// Replace the text stored under `key`.
    fn save(&self, key: StoreKey, text: &str) -> Result<()>;
}
