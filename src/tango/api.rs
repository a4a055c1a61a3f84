//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for all tango operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (display indexes and list names to ids)
//! - **Applies configuration** (daily and recent limits, import size cap)
//! - **Returns structured types** (entries, lists, [`DisplayWord`]s)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation concerns**: No stdout, stderr, or colors
//!
//! ## Generic Over Gateway
//!
//! `TangoApi<G: Gateway>` is generic over the storage backend:
//! - Production: `TangoApi<FileGateway>`
//! - Testing: `TangoApi<MemGateway>`

use crate::commands;
use crate::config::TangoConfig;
use crate::error::{Result, TangoError};
use crate::index::{index_subset, index_words, parse_selectors, resolve_selectors, DisplayWord};
use crate::model::{
    DailySelection, Frequency, ListId, VocabularyList, WordEntry, WordId, WordUpdate,
};
use crate::repository::VocabularyRepository;
use crate::store::Gateway;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;

/// The main API facade for tango operations.
pub struct TangoApi<G: Gateway> {
    repo: VocabularyRepository<G>,
    config: TangoConfig,
    data_dir: PathBuf,
}

impl<G: Gateway> TangoApi<G> {
    /// Open the repository behind `gateway` and load `<data_dir>/config.json`.
    pub fn open(gateway: G, data_dir: PathBuf) -> Result<Self> {
        let config = TangoConfig::load(&data_dir)?;
        let repo = VocabularyRepository::open(gateway)?;
        Ok(Self {
            repo,
            config,
            data_dir,
        })
    }

    pub fn repository(&self) -> &VocabularyRepository<G> {
        &self.repo
    }

    pub fn config(&self) -> &TangoConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Words ---

    pub fn add_word(
        &mut self,
        vocabulary: &str,
        pronunciation: &str,
        meaning: &str,
    ) -> Result<WordEntry> {
        commands::words::add(&mut self.repo, vocabulary, pronunciation, meaning)
    }

    pub fn update_word(&mut self, selector: &str, changes: WordUpdate) -> Result<WordEntry> {
        if changes.is_empty() {
            return Err(TangoError::Validation("Nothing to update".to_string()));
        }
        let id = self.resolve_one(selector)?;
        commands::words::update(&mut self.repo, id, changes)
    }

    pub fn rate_words<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        frequency: Frequency,
    ) -> Result<Vec<WordEntry>> {
        if !Frequency::RATED.contains(&frequency) {
            return Err(TangoError::Validation(
                "Rate words as high, medium or low".to_string(),
            ));
        }
        let ids = self.resolve(selectors)?;
        ids.into_iter()
            .map(|id| commands::words::rate(&mut self.repo, id, frequency))
            .collect()
    }

    pub fn remove_words<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<Vec<WordEntry>> {
        let ids = self.resolve(selectors)?;
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            removed.extend(commands::words::remove(&mut self.repo, id)?);
        }
        Ok(removed)
    }

    pub fn clear_words(&mut self) -> Result<usize> {
        commands::words::clear(&mut self.repo)
    }

    pub fn all_words(&self) -> Vec<DisplayWord> {
        index_words(self.repo.words())
    }

    pub fn search_words(&self, term: &str) -> Vec<DisplayWord> {
        self.display(commands::words::search(&self.repo, term))
    }

    /// Newest words first; `limit` falls back to the configured recent limit.
    pub fn recent_words(&self, limit: Option<usize>) -> Vec<DisplayWord> {
        let limit = limit.unwrap_or(self.config.recent_limit);
        self.display(commands::words::most_recent(&self.repo, limit))
    }

    pub fn words_by_frequency(&self, tier: Frequency) -> Vec<DisplayWord> {
        self.display(commands::words::by_frequency(&self.repo, tier))
    }

    /// The selected word with its display index.
    pub fn word(&self, selector: &str) -> Result<DisplayWord> {
        let id = self.resolve_one(selector)?;
        let word = commands::words::get(&self.repo, id)?.clone();
        Ok(self.display(vec![word]).remove(0))
    }

    /// Lists that contain the selected word.
    pub fn word_lists(&self, selector: &str) -> Result<Vec<VocabularyList>> {
        let id = self.resolve_one(selector)?;
        Ok(commands::lists::lists_containing(&self.repo, id))
    }

    // --- Daily selection ---

    pub fn generate_daily(&mut self, today: NaiveDate) -> Result<DailySelection> {
        let limit = self.config.daily_limit;
        commands::daily::generate(&mut self.repo, today, limit)
    }

    pub fn daily(&self, today: NaiveDate) -> DailySelection {
        commands::daily::load(&self.repo, today)
    }

    // --- Lists ---

    pub fn lists(&self) -> &[VocabularyList] {
        self.repo.lists()
    }

    /// Create a list, optionally seeded with one selected word.
    pub fn create_list(&mut self, name: &str, seed: Option<&str>) -> Result<VocabularyList> {
        match seed {
            Some(selector) => {
                let id = self.resolve_one(selector)?;
                commands::lists::create_with_word(&mut self.repo, name, id)
            }
            None => commands::lists::create(&mut self.repo, name),
        }
    }

    pub fn rename_list(&mut self, name: &str, new_name: &str) -> Result<VocabularyList> {
        let id = self.list_id(name)?;
        commands::lists::rename(&mut self.repo, id, new_name)
    }

    pub fn remove_list(&mut self, name: &str) -> Result<VocabularyList> {
        let id = self.list_id(name)?;
        commands::lists::remove(&mut self.repo, id)?.ok_or(TangoError::ListNotFound(id))
    }

    pub fn add_to_list<I: AsRef<str>>(
        &mut self,
        name: &str,
        selectors: &[I],
    ) -> Result<VocabularyList> {
        let list = self.list_id(name)?;
        let ids = self.resolve(selectors)?;
        for id in ids {
            commands::lists::add_word(&mut self.repo, list, id)?;
        }
        commands::lists::get(&self.repo, list).cloned()
    }

    /// Take the selected words out of a list. Returns how many were members.
    pub fn remove_from_list<I: AsRef<str>>(
        &mut self,
        name: &str,
        selectors: &[I],
    ) -> Result<usize> {
        let list = self.list_id(name)?;
        let ids = self.resolve(selectors)?;
        let mut removed = 0;
        for id in ids {
            if commands::lists::remove_word(&mut self.repo, list, id)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Move the selected words in one step. Returns how many moved, which is
    /// zero when both names are the same list.
    pub fn move_between_lists<I: AsRef<str>>(
        &mut self,
        from: &str,
        to: &str,
        selectors: &[I],
    ) -> Result<usize> {
        let from = self.list_id(from)?;
        let to = self.list_id(to)?;
        let ids = self.resolve(selectors)?;
        commands::lists::move_words(&mut self.repo, from, to, &ids)
    }

    pub fn list_members(&self, name: &str) -> Result<(VocabularyList, Vec<DisplayWord>)> {
        let id = self.list_id(name)?;
        let list = commands::lists::get(&self.repo, id)?.clone();
        let members = commands::lists::resolve_members(&self.repo, id)?;
        Ok((list, self.display(members)))
    }

    // --- Import / export ---

    pub fn export_text(&self, today: NaiveDate) -> Result<String> {
        commands::export::render(&self.repo, today)
    }

    pub fn export_to(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf> {
        commands::export::write_to(&self.repo, dir, today)
    }

    pub fn import_text(&mut self, text: &str) -> Result<Vec<WordEntry>> {
        commands::import::import_text(&mut self.repo, text)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<Vec<WordEntry>> {
        let max_bytes = self.config.max_import_bytes;
        commands::import::import_file(&mut self.repo, path, max_bytes)
    }

    // --- Config ---

    pub fn config_action(&mut self, action: ConfigAction) -> Result<Vec<(String, String)>> {
        let reload = matches!(action, ConfigAction::Set(..));
        let pairs = commands::config::run(&self.data_dir, action)?;
        if reload {
            self.config = TangoConfig::load(&self.data_dir)?;
        }
        Ok(pairs)
    }

    // --- Selectors ---

    /// Word ids for user selectors (`3`, `2-4`, `#<id>`).
    pub fn resolve<I: AsRef<str>>(&self, selectors: &[I]) -> Result<Vec<WordId>> {
        if selectors.is_empty() {
            return Err(TangoError::Api("No words selected".to_string()));
        }
        let parsed = parse_selectors(selectors)?;
        resolve_selectors(self.repo.words(), &parsed)
    }

    fn resolve_one(&self, selector: &str) -> Result<WordId> {
        let ids = self.resolve(&[selector])?;
        match ids.as_slice() {
            [id] => Ok(*id),
            _ => Err(TangoError::Api(format!(
                "'{}' selects {} words, expected one",
                selector,
                ids.len()
            ))),
        }
    }

    fn list_id(&self, name: &str) -> Result<ListId> {
        commands::lists::find_by_name(&self.repo, name)
            .map(|l| l.id)
            .ok_or_else(|| TangoError::Api(format!("No list named '{}'", name.trim())))
    }

    /// Pairs words from any view (a daily card, a list) with their indexes.
    pub fn display(&self, words: Vec<WordEntry>) -> Vec<DisplayWord> {
        index_subset(self.repo.words(), words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemGateway;
    use tempfile::TempDir;

    fn api() -> (TangoApi<MemGateway>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let api = TangoApi::open(MemGateway::new(), dir.path().to_path_buf()).unwrap();
        (api, dir)
    }

    fn seeded() -> (TangoApi<MemGateway>, TempDir) {
        let (mut api, dir) = api();
        api.add_word("猫", "ねこ", "cat").unwrap();
        api.add_word("犬", "いぬ", "dog").unwrap();
        api.add_word("鳥", "とり", "bird").unwrap();
        (api, dir)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn selectors_reach_the_right_words() {
        let (mut api, _dir) = seeded();
        let rated = api.rate_words(&["1", "3"], Frequency::High).unwrap();
        let names: Vec<&str> = rated.iter().map(|w| w.vocabulary.as_str()).collect();
        assert_eq!(names, vec!["猫", "鳥"]);

        let removed = api.remove_words(&["2-3"]).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(api.all_words().len(), 1);
    }

    #[test]
    fn rating_back_to_unset_is_rejected() {
        let (mut api, _dir) = seeded();
        assert!(matches!(
            api.rate_words(&["1"], Frequency::Unset),
            Err(TangoError::Validation(_))
        ));
        assert_eq!(api.all_words()[0].word.review_count, 0);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let (mut api, _dir) = seeded();
        let none: [&str; 0] = [];
        assert!(matches!(
            api.remove_words(&none),
            Err(TangoError::Api(_))
        ));
    }

    #[test]
    fn update_needs_a_single_word_and_a_change() {
        let (mut api, _dir) = seeded();
        let changes = WordUpdate {
            meaning: Some("kitty".into()),
            ..Default::default()
        };
        assert!(api.update_word("1-2", changes.clone()).is_err());
        assert!(api.update_word("1", WordUpdate::default()).is_err());
        assert_eq!(api.update_word("1", changes).unwrap().meaning, "kitty");
    }

    #[test]
    fn filtered_views_keep_canonical_indexes() {
        let (api, _dir) = seeded();
        let found = api.search_words("dog");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index.map(|i| i.0), Some(2));

        let recent = api.recent_words(Some(1));
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn lists_are_addressed_by_name() {
        let (mut api, _dir) = seeded();
        api.create_list("Animals", Some("1")).unwrap();
        api.create_list("Pets", None).unwrap();

        let list = api.add_to_list("animals", &["2"]).unwrap();
        assert_eq!(list.word_ids.len(), 2);

        assert_eq!(api.move_between_lists("Animals", "PETS", &["1"]).unwrap(), 1);
        let (_, pets) = api.list_members("Pets").unwrap();
        assert_eq!(pets[0].word.vocabulary, "猫");

        assert_eq!(api.word_lists("2").unwrap()[0].name, "Animals");
        assert_eq!(api.remove_from_list("Animals", &["1-2"]).unwrap(), 1);

        assert!(matches!(
            api.list_members("Birds"),
            Err(TangoError::Api(msg)) if msg == "No list named 'Birds'"
        ));
        assert_eq!(api.remove_list("pets").unwrap().name, "Pets");
        assert_eq!(api.lists().len(), 1);
    }

    #[test]
    fn moving_several_words_is_all_or_nothing() {
        let (mut api, _dir) = seeded();
        api.create_list("Animals", None).unwrap();
        api.add_to_list("Animals", &["1-3"]).unwrap();
        api.create_list("Pets", Some("2")).unwrap();

        assert!(matches!(
            api.move_between_lists("Animals", "Pets", &["1", "2"]),
            Err(TangoError::AlreadyMember { .. })
        ));
        let (animals, _) = api.list_members("Animals").unwrap();
        assert_eq!(animals.word_ids.len(), 3);

        assert_eq!(api.move_between_lists("Animals", "animals", &["1-3"]).unwrap(), 0);
        assert_eq!(api.move_between_lists("Animals", "Pets", &["1", "3"]).unwrap(), 2);
        let (pets, _) = api.list_members("Pets").unwrap();
        assert_eq!(pets.word_ids.len(), 3);
    }

    #[test]
    fn daily_uses_configured_limit() {
        let (mut api, _dir) = seeded();
        api.config_action(ConfigAction::Set("daily-limit".into(), "2".into()))
            .unwrap();
        assert_eq!(api.config().daily_limit, 2);

        assert_eq!(api.generate_daily(day()).unwrap().len(), 2);
        assert_eq!(api.daily(day()).len(), 2);
    }

    #[test]
    fn export_then_import_round_trips() {
        let (mut api, dir) = seeded();
        let path = api.export_to(dir.path(), day()).unwrap();
        api.clear_words().unwrap();
        assert!(api.export_text(day()).is_err());

        let words = api.import_file(&path).unwrap();
        let names: Vec<&str> = words.iter().map(|w| w.vocabulary.as_str()).collect();
        assert_eq!(names, vec!["猫", "犬", "鳥"]);
    }

    #[test]
    fn import_respects_configured_size_limit() {
        let (mut api, dir) = seeded();
        let path = api.export_to(dir.path(), day()).unwrap();
        api.config_action(ConfigAction::Set("max-import-bytes".into(), "16".into()))
            .unwrap();
        assert!(matches!(
            api.import_file(&path),
            Err(TangoError::Validation(_))
        ));
        assert_eq!(api.all_words().len(), 3);
    }
}
