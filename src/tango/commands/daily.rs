use crate::daily;
use crate::error::Result;
use crate::model::DailySelection;
use crate::repository::VocabularyRepository;
use crate::store::Gateway;
use chrono::NaiveDate;
use log::info;

/// Build and cache today's selection, replacing any earlier one.
pub fn generate<G: Gateway>(
    repo: &mut VocabularyRepository<G>,
    today: NaiveDate,
    limit: usize,
) -> Result<DailySelection> {
    let selection = daily::generate(repo.words(), today, limit)?;
    repo.commit_daily(selection.clone())?;
    info!("generated {} words for {}", selection.len(), today);
    Ok(selection)
}

/// Today's cached selection, or an empty one if none was generated today.
pub fn load<G: Gateway>(repo: &VocabularyRepository<G>, today: NaiveDate) -> DailySelection {
    daily::current(repo.daily(), today)
}
