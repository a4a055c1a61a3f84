use crate::config::{TangoConfig, CONFIG_KEYS};
use crate::error::{Result, TangoError};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Run a config action against `<dir>/config.json`.
///
/// Returns the `(key, value)` pairs to show: every key for `ShowAll`, the
/// one requested or changed otherwise.
pub fn run(dir: &Path, action: ConfigAction) -> Result<Vec<(String, String)>> {
    match action {
        ConfigAction::ShowAll => {
            let config = TangoConfig::load(dir)?;
            Ok(CONFIG_KEYS
                .iter()
                .filter_map(|key| config.get(key).map(|val| (key.to_string(), val)))
                .collect())
        }
        ConfigAction::ShowKey(key) => {
            let config = TangoConfig::load(dir)?;
            match config.get(&key) {
                Some(val) => Ok(vec![(key, val)]),
                None => Err(TangoError::Validation(format!(
                    "Unknown config key: {}",
                    key
                ))),
            }
        }
        ConfigAction::Set(key, value) => {
            let mut config = TangoConfig::load(dir)?;
            config.set(&key, &value).map_err(TangoError::Validation)?;
            config.save(dir)?;
            // Fetch formatted value back
            let display_val = config.get(&key).unwrap_or(value);
            Ok(vec![(key, display_val)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_all_lists_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let pairs = run(dir.path(), ConfigAction::ShowAll).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, CONFIG_KEYS.to_vec());
        assert_eq!(pairs[0].1, "50");
    }

    #[test]
    fn set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let pairs = run(
            dir.path(),
            ConfigAction::Set("daily-limit".into(), " 12 ".into()),
        )
        .unwrap();
        assert_eq!(pairs, vec![("daily-limit".to_string(), "12".to_string())]);
        assert_eq!(TangoConfig::load(dir.path()).unwrap().daily_limit, 12);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), ConfigAction::ShowKey("theme".into())).is_err());
        assert!(run(dir.path(), ConfigAction::Set("theme".into(), "dark".into())).is_err());
        assert!(!dir.path().join("config.json").exists());
    }
}
