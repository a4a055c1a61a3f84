use crate::model::{ListId, WordId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TangoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Word not found: {0}")]
    WordNotFound(WordId),

    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("A list named '{0}' already exists")]
    DuplicateName(String),

    #[error("Word {word} is already in list '{list}'")]
    AlreadyMember { list: String, word: WordId },

    #[error("No words available. Please add some vocabulary first.")]
    EmptyCollection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, TangoError>;
