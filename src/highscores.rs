//! Best score persistence
//!
//! The session reads the stored best once at construction and writes it back
//! only when a run ends on a new record.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, StorageError};

/// Where the best score lives between process runs
pub trait BestScoreStore {
    fn load(&mut self) -> Result<u32, StorageError>;
    fn save(&mut self, best: u32) -> Result<(), StorageError>;
}

/// Process-local store (nothing survives a restart)
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScore {
    best: u32,
    saves: u32,
}

impl MemoryBestScore {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of times `save` has been called
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl BestScoreStore for MemoryBestScore {
    fn load(&mut self) -> Result<u32, StorageError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<(), StorageError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileBestScore {
    path: PathBuf,
}

impl FileBestScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BestScoreStore for FileBestScore {
    fn load(&mut self) -> Result<u32, StorageError> {
        let record: Option<BestScoreRecord> = persistence::read_json(&self.path)?;
        match record {
            Some(record) => {
                log::info!("Loaded best score {} from {}", record.best_score, self.path.display());
                Ok(record.best_score)
            }
            None => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                Ok(0)
            }
        }
    }

    fn save(&mut self, best: u32) -> Result<(), StorageError> {
        persistence::write_json(&self.path, &BestScoreRecord { best_score: best })?;
        log::info!("Best score {best} saved");
        Ok(())
    }
}
