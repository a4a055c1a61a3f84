use super::{Gateway, StoreKey};
use crate::error::{Result, TangoError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileGateway {
    root: PathBuf,
}

impl FileGateway {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TangoError::Io)?;
        }
        Ok(())
    }
}

impl Gateway for FileGateway {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(TangoError::Io)?;
        debug!("loaded {} ({} bytes)", path.display(), content.len());
        Ok(Some(content))
    }

    fn save(&self, key: StoreKey, text: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.key_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, text).map_err(TangoError::Io)?;
        fs::rename(&tmp, &target).map_err(TangoError::Io)?;

        debug!("saved {} ({} bytes)", target.display(), text.len());
        Ok(())
    }
}
