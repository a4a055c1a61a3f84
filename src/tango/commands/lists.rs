//! List store operations.
//!
//! Lists hold bare word ids. Nothing here checks that an id exists when it
//! is added, and deleting a list or a word never cascades. Readers go
//! through [`resolve_members`], which skips ids that no longer resolve.
//!
//! Names are unique ignoring case and surrounding whitespace.

use crate::commands::required;
use crate::error::{Result, TangoError};
use crate::model::{ListId, VocabularyList, WordEntry, WordId};
use crate::repository::VocabularyRepository;
use crate::store::Gateway;
use std::collections::HashMap;

pub fn create<G: Gateway>(repo: &mut VocabularyRepository<G>, name: &str) -> Result<VocabularyList> {
    create_seeded(repo, name, None)
}

/// Create a list that already contains `word`.
pub fn create_with_word<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    name: &str,
    word: WordId,
) -> Result<VocabularyList> {
    create_seeded(repo, name, Some(word))
}

pub fn get<G: Gateway>(repo: &VocabularyRepository<G>, id: ListId) -> Result<&VocabularyList> {
    repo.lists()
        .iter()
        .find(|l| l.id == id)
        .ok_or(TangoError::ListNotFound(id))
}

/// Look a list up by name, ignoring case.
pub fn find_by_name<'a, G: Gateway>(
    repo: &'a VocabularyRepository<G>,
    name: &str,
) -> Option<&'a VocabularyList> {
    let wanted = normalize(name);
    repo.lists().iter().find(|l| normalize(&l.name) == wanted)
}

pub fn rename<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    id: ListId,
    new_name: &str,
) -> Result<VocabularyList> {
    let name = required("List name", new_name)?;
    get(repo, id)?;
    ensure_unique(repo, &name, Some(id))?;

    repo.commit_lists(|lists| {
        let list = find_mut(lists, id)?;
        list.name = name;
        Ok(list.clone())
    })
}

/// Delete a list. The words it referenced are untouched; unknown ids are a no-op.
pub fn remove<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    id: ListId,
) -> Result<Option<VocabularyList>> {
    let Some(pos) = repo.lists().iter().position(|l| l.id == id) else {
        return Ok(None);
    };
    let removed = repo.commit_lists(|lists| Ok(lists.remove(pos)))?;
    Ok(Some(removed))
}

pub fn add_word<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    list: ListId,
    word: WordId,
) -> Result<VocabularyList> {
    check_can_add(repo, list, word)?;
    repo.commit_lists(|lists| {
        let target = find_mut(lists, list)?;
        target.word_ids.push(word);
        Ok(target.clone())
    })
}

/// Take `word` out of `list`. Returns whether anything changed.
pub fn remove_word<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    list: ListId,
    word: WordId,
) -> Result<bool> {
    let is_member = repo
        .lists()
        .iter()
        .any(|l| l.id == list && l.contains(word));
    if !is_member {
        return Ok(false);
    }
    repo.commit_lists(|lists| {
        find_mut(lists, list)?.word_ids.retain(|id| *id != word);
        Ok(true)
    })
}

/// Move `word` from one list to another in a single save.
///
/// The destination is checked first, so a failed move leaves both lists as
/// they were. Moving within the same list does nothing.
pub fn move_word<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    from: ListId,
    to: ListId,
    word: WordId,
) -> Result<()> {
    move_words(repo, from, to, &[word]).map(|_| ())
}

/// Move several words at once. Every word is checked against the
/// destination before anything changes, so either all of them move or none
/// do. Returns how many words moved.
pub fn move_words<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    from: ListId,
    to: ListId,
    words: &[WordId],
) -> Result<usize> {
    if from == to || words.is_empty() {
        return Ok(0);
    }
    let mut moving: Vec<WordId> = Vec::with_capacity(words.len());
    for &word in words {
        check_can_add(repo, to, word)?;
        if !moving.contains(&word) {
            moving.push(word);
        }
    }

    repo.commit_lists(|lists| {
        if let Some(source) = lists.iter_mut().find(|l| l.id == from) {
            source.word_ids.retain(|id| !moving.contains(id));
        }
        find_mut(lists, to)?.word_ids.extend(moving.iter().copied());
        Ok(moving.len())
    })
}

pub fn lists_containing<G: Gateway>(
    repo: &VocabularyRepository<G>,
    word: WordId,
) -> Vec<VocabularyList> {
    repo.lists()
        .iter()
        .filter(|l| l.contains(word))
        .cloned()
        .collect()
}

/// The list's words in list order, skipping ids with no matching word.
pub fn resolve_members<G: Gateway>(
    repo: &VocabularyRepository<G>,
    list: ListId,
) -> Result<Vec<WordEntry>> {
    let target = get(repo, list)?;

    let mut by_id: HashMap<WordId, &WordEntry> = HashMap::with_capacity(repo.words().len());
    for word in repo.words() {
        by_id.entry(word.id).or_insert(word);
    }

    Ok(target
        .word_ids
        .iter()
        .filter_map(|id| by_id.get(id).map(|w| (*w).clone()))
        .collect())
}

fn create_seeded<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    name: &str,
    word: Option<WordId>,
) -> Result<VocabularyList> {
    let name = required("List name", name)?;
    ensure_unique(repo, &name, None)?;

    let mut list = VocabularyList::new(repo.next_id()?, name);
    list.word_ids.extend(word);
    repo.commit_lists(|lists| {
        lists.push(list.clone());
        Ok(())
    })?;
    Ok(list)
}

fn ensure_unique<G: Gateway>(
    repo: &VocabularyRepository<G>,
    name: &str,
    except: Option<ListId>,
) -> Result<()> {
    let wanted = normalize(name);
    let taken = repo
        .lists()
        .iter()
        .any(|l| Some(l.id) != except && normalize(&l.name) == wanted);
    if taken {
        return Err(TangoError::DuplicateName(name.to_string()));
    }
    Ok(())
}

fn check_can_add<G: Gateway>(
    repo: &VocabularyRepository<G>,
    list: ListId,
    word: WordId,
) -> Result<()> {
    let target = get(repo, list)?;
    if target.contains(word) {
        return Err(TangoError::AlreadyMember {
            list: target.name.clone(),
            word,
        });
    }
    Ok(())
}

fn find_mut(lists: &mut [VocabularyList], id: ListId) -> Result<&mut VocabularyList> {
    lists
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or(TangoError::ListNotFound(id))
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
