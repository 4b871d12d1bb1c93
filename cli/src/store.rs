use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sumfall_core::{HighScoreStore, Score};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct ScoreFile {
    high_score: Score,
}

/// High score kept in a small JSON file.
#[derive(Clone, Debug)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(path: &Path) -> Result<Score> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read high score from {}", path.display()))?;
        let file: ScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parse high score in {}", path.display()))?;
        Ok(file.high_score)
    }

    fn write(path: &Path, high_score: Score) -> Result<()> {
        let text = serde_json::to_string_pretty(&ScoreFile { high_score })?;
        fs::write(path, text).with_context(|| format!("write high score to {}", path.display()))
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Score {
        if !self.path.exists() {
            log::debug!("No high score file at {}", self.path.display());
            return 0;
        }
        match Self::read(&self.path) {
            Ok(score) => score,
            Err(err) => {
                log::warn!("Ignoring stored high score: {:#}", err);
                0
            }
        }
    }

    fn save(&mut self, score: Score) {
        if let Err(err) = Self::write(&self.path, score) {
            log::error!("Could not store high score: {:#}", err);
        }
    }
}
