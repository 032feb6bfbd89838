use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minesweep_core::{HighScoreStore, HighScoreTable};

/// High score table persisted as a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    type Error = anyhow::Error;

    fn load(&self) -> HighScoreTable {
        match fs::read_to_string(&self.path) {
            Ok(text) => HighScoreTable::from_json(&text),
            Err(err) if err.kind() == ErrorKind::NotFound => HighScoreTable::default(),
            Err(err) => {
                log::warn!("Could not read {}: {}", self.path.display(), err);
                HighScoreTable::default()
            }
        }
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        let json = table.to_json()?;
        // Written to a sibling file first, then renamed over the target.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Could not write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Could not replace {}", self.path.display()))?;
        log::debug!("saved high scores to {}", self.path.display());
        Ok(())
    }
}
