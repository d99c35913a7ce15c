//! JSON file storage
//!
//! One pretty-printed document per period, named after the period key
//! (`"2025 - WK 3.json"`), inside a single data directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::error::{Error, Result};
use crate::models::{Period, PeriodKey};

use super::PeriodStore;

/// Directory of per-week JSON documents
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the given period
    pub fn path_for(&self, key: &PeriodKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Keys of all stored periods, oldest first
    ///
    /// Files whose names are not period keys are ignored.
    pub fn list_keys(&self) -> Result<Vec<PeriodKey>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<PeriodKey>().ok());
            if let Some(key) = parsed {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl PeriodStore for JsonFileStore {
    fn load(&self, key: &PeriodKey) -> Result<Option<Period>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let period: Period = serde_json::from_str(&content)?;
        if period.key != *key {
            return Err(Error::Persistence(format!(
                "{} holds period {}, expected {}",
                path.display(),
                period.key,
                key
            )));
        }
        Ok(Some(period))
    }

    fn save(&self, period: &Period) -> Result<()> {
        let path = self.path_for(&period.key);
        let tmp = path.with_extension("json.tmp");

        // Readers see either the old record or the new one
        fs::write(&tmp, serde_json::to_string_pretty(period)?)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), "Failed to remove temp file: {}", cleanup);
            }
            return Err(e.into());
        }

        tracing::debug!(week = %period.key, path = %path.display(), "Saved period");
        Ok(())
    }
}
