use crate::error::{Result, TangoError};
use crate::repository::VocabularyRepository;
use crate::store::Gateway;
use crate::table;
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// The whole collection as a markdown table document.
pub fn render<G: Gateway>(repo: &VocabularyRepository<G>, exported_on: NaiveDate) -> Result<String> {
    if repo.words().is_empty() {
        return Err(TangoError::Validation(
            "No vocabulary words to export".to_string(),
        ));
    }
    Ok(table::encode(repo.words(), exported_on))
}

pub fn export_filename(exported_on: NaiveDate) -> String {
    format!("japanese-vocabulary-{}.md", exported_on.format("%Y-%m-%d"))
}

/// Write the export into `dir` under the dated filename and return its path.
pub fn write_to<G: Gateway>(
    repo: &VocabularyRepository<G>,
    dir: &Path,
    exported_on: NaiveDate,
) -> Result<PathBuf> {
    let document = render(repo, exported_on)?;
    let path = dir.join(export_filename(exported_on));
    fs::write(&path, document).map_err(TangoError::Io)?;
    info!("exported {} words to {}", repo.words().len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::RepoFixture;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn empty_collection_is_refused() {
        let repo = RepoFixture::new().repo;
        assert!(matches!(
            render(&repo, day()),
            Err(TangoError::Validation(_))
        ));
    }

    #[test]
    fn render_uses_table_layout() {
        let fx = RepoFixture::new().with_word("猫", "ねこ", "cat");
        let doc = render(&fx.repo, day()).unwrap();
        assert!(doc.contains("Export Date: 2024-01-15"));
        assert!(doc.contains("Total Words: 1"));
        assert!(doc.contains("| 猫 | ねこ | cat |"));
    }

    #[test]
    fn filename_carries_the_date() {
        assert_eq!(export_filename(day()), "japanese-vocabulary-2024-01-15.md");
    }

    #[test]
    fn write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let fx = RepoFixture::new().with_words(2);
        let path = write_to(&fx.repo, dir.path(), day()).unwrap();

        assert_eq!(path, dir.path().join("japanese-vocabulary-2024-01-15.md"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("| word 2 | reading 2 | meaning 2 |"));
    }

    #[test]
    fn write_to_empty_collection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RepoFixture::new().repo;
        assert!(write_to(&repo, dir.path(), day()).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
