use crate::error::{Result, TangoError};
use crate::model::WordEntry;
use crate::repository::VocabularyRepository;
use crate::store::Gateway;
use crate::table;
use log::info;
use std::fs;
use std::path::Path;

/// Replace the whole collection with the rows decoded from `text`.
///
/// Imported words get fresh ids, no rating and no review history. The
/// cached daily selection is emptied; lists are left as they are. If no
/// row decodes, nothing changes and a validation error is returned.
pub fn import_text<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    text: &str,
) -> Result<Vec<WordEntry>> {
    let rows = table::decode(text);
    if rows.is_empty() {
        return Err(TangoError::Validation(
            "No valid vocabulary table found in the imported text".to_string(),
        ));
    }

    let imported: Vec<WordEntry> = rows
        .into_iter()
        .map(|fields| Ok(WordEntry::new(repo.next_id()?, fields)))
        .collect::<Result<_>>()?;

    repo.commit_words(|words| {
        *words = imported.clone();
        Ok(())
    })?;
    repo.update_daily(|daily| {
        daily.words.clear();
        true
    })?;

    info!("imported {} words", imported.len());
    Ok(imported)
}

/// Read `path` and import it, refusing files over `max_bytes`.
pub fn import_file<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    path: &Path,
    max_bytes: u64,
) -> Result<Vec<WordEntry>> {
    let size = fs::metadata(path).map_err(TangoError::Io)?.len();
    if size > max_bytes {
        return Err(TangoError::Validation(format!(
            "{} is {} bytes, larger than the {} byte import limit",
            path.display(),
            size,
            max_bytes
        )));
    }
    let text = fs::read_to_string(path).map_err(TangoError::Io)?;
    import_text(repo, &text)
}
