//! Best-run leaderboard
//!
//! Keeps the fastest victories, quickest first.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum number of runs to keep
pub const MAX_RECORDS: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Time from start to victory (ms)
    pub elapsed_ms: f64,
    pub jumps: u32,
    pub respawns: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Fastest-run leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunRecords {
    pub entries: Vec<RunRecord>,
}

impl RunRecords {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run time makes the board
    pub fn qualifies(&self, elapsed_ms: f64) -> bool {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return false;
        }
        if self.entries.len() < MAX_RECORDS {
            return true;
        }
        self.entries
            .last()
            .map(|e| elapsed_ms < e.elapsed_ms)
            .unwrap_or(true)
    }

    /// Rank a run time would achieve (1-indexed), if it qualifies
    pub fn potential_rank(&self, elapsed_ms: f64) -> Option<usize> {
        if !self.qualifies(elapsed_ms) {
            return None;
        }
        let rank = self.entries.iter().position(|e| elapsed_ms < e.elapsed_ms);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run, returning its rank if it made the board
    pub fn add_run(&mut self, record: RunRecord) -> Option<usize> {
        let rank = self.potential_rank(record.elapsed_ms)?;
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_RECORDS);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fastest run (if any)
    pub fn best(&self) -> Option<&RunRecord> {
        self.entries.first()
    }

    /// Parse a leaderboard, re-sorting and trimming whatever was stored
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut records: RunRecords = serde_json::from_str(json)?;
        records
            .entries
            .retain(|e| e.elapsed_ms.is_finite() && e.elapsed_ms >= 0.0);
        records
            .entries
            .sort_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms));
        records.entries.truncate(MAX_RECORDS);
        log::info!("Loaded {} run records", records.entries.len());
        Ok(records)
    }

    /// Parse a leaderboard, starting fresh on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Discarding unreadable run records: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
