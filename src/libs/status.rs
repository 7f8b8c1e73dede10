//! Status snapshot shared between the running watcher and the `status` command.
//!
//! The watcher overwrites `status.json` after every tick; `restwatch status`
//! reads it back. Write failures are ignored by the watcher.

use super::clock::{ClockState, WorkClock};
use super::data_storage::DataStorage;
use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;

pub const STATUS_FILE_NAME: &str = "status.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub state: ClockState,
    pub work_seconds: u64,
    pub repeat_seconds: u64,
    pub reminded: bool,
    pub status_line: String,
    pub pid: u32,
    pub updated_at: DateTime<Local>,
}

impl StatusSnapshot {
    pub fn capture(clock: &WorkClock, at: DateTime<Local>) -> Self {
        StatusSnapshot {
            state: clock.state(),
            work_seconds: clock.work_seconds(),
            repeat_seconds: clock.repeat_seconds(),
            reminded: clock.is_reminded(),
            status_line: clock.status_line(),
            pid: std::process::id(),
            updated_at: at,
        }
    }

    pub fn write(&self) -> Result<()> {
        DataStorage::new().replace(STATUS_FILE_NAME, &serde_json::to_string(self)?)
    }

    /// Reads the last snapshot, if a watcher ever wrote one.
    pub fn read() -> Result<Option<StatusSnapshot>> {
        let path = DataStorage::new().get_path(STATUS_FILE_NAME)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Removes the snapshot, used when the watcher shuts down.
    pub fn clear() -> Result<()> {
        let path = DataStorage::new().get_path(STATUS_FILE_NAME)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Seconds since the snapshot was written.
    pub fn age_secs(&self, now: DateTime<Local>) -> i64 {
        (now - self.updated_at).num_seconds()
    }
}
