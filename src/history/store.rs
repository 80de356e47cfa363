//! Append-only history file, one JSON record per line.

use crate::models::{HistoryRecord, SubnetDescriptor};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Just the id of a stored row.
#[derive(Deserialize)]
struct RowId {
    id: u64,
}

/// Local row store for calculated subnets.
///
/// Every operation opens, changes and closes the file on its own; nothing is held open
/// between calls.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Open the store at `path`, creating the file (and its directory) when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<HistoryStore, Box<dyn Error>> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Error creating history directory {}: {e}", dir.display()))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("Error opening history file {}: {e}", path.display()))?;
        log::debug!("History store at {}", path.display());
        Ok(HistoryStore { path })
    }

    /// Store a copy of `descriptor` stamped with `created_at`.
    pub fn append(
        &self,
        descriptor: &SubnetDescriptor,
        created_at: DateTime<Utc>,
    ) -> Result<HistoryRecord, Box<dyn Error>> {
        let mut saved = self.append_all(std::slice::from_ref(descriptor), created_at)?;
        saved
            .pop()
            .ok_or_else(|| "History append wrote no record".into())
    }

    /// Store every descriptor with consecutive ids, in one write.
    pub fn append_all(
        &self,
        descriptors: &[SubnetDescriptor],
        created_at: DateTime<Utc>,
    ) -> Result<Vec<HistoryRecord>, Box<dyn Error>> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }
        let first_id = self.last_id()? + 1;

        let mut records = Vec::with_capacity(descriptors.len());
        let mut buffer = String::new();
        for (id, descriptor) in (first_id..).zip(descriptors) {
            let record = HistoryRecord::from_descriptor(id, descriptor, created_at);
            let line = serde_json::to_string(&record)
                .map_err(|e| format!("Error serializing history record: {e}"))?;
            buffer.push_str(&line);
            buffer.push('\n');
            records.push(record);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| format!("Error opening history file {}: {e}", self.path.display()))?;
        file.write_all(buffer.as_bytes())?;
        log::info!(
            "Saved #{}..#{} to {}",
            first_id,
            first_id + records.len() as u64 - 1,
            self.path.display()
        );
        Ok(records)
    }

    /// Id of the newest readable row, 0 for an empty store.
    ///
    /// Ids only grow, so the last line that carries an id holds the largest one.
    fn last_id(&self) -> Result<u64, Box<dyn Error>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        for line in text.lines().rev().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<RowId>(line) {
                Ok(row) => return Ok(row.id),
                Err(e) => log::warn!(
                    "Skipping unreadable history row in {}: {e}",
                    self.path.display()
                ),
            }
        }
        Ok(0)
    }

    /// Every readable record in insertion order. Rows that fail to parse are logged and
    /// left out.
    pub fn all(&self) -> Result<Vec<HistoryRecord>, Box<dyn Error>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("History file not found: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut deserializer = serde_json::Deserializer::from_str(line);
            let parsed: Result<HistoryRecord, _> =
                serde_path_to_error::deserialize(&mut deserializer);
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "Skipping {} line {}: ErrPath:{} e:{}",
                    self.path.display(),
                    i + 1,
                    e.path(),
                    e.inner()
                ),
            }
        }
        Ok(records)
    }

    /// Up to `limit` records, newest first.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, Box<dyn Error>> {
        let mut records = self.all()?;
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        records.truncate(limit);
        Ok(records)
    }

    /// Delete every record. Returns how many rows were removed; clearing twice is fine.
    pub fn clear(&self) -> Result<usize, Box<dyn Error>> {
        let removed = match fs::read_to_string(&self.path) {
            Ok(text) => text.lines().filter(|l| !l.trim().is_empty()).count(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        fs::write(&self.path, "")
            .map_err(|e| format!("Error clearing history file {}: {e}", self.path.display()))?;
        log::warn!("Cleared {removed} history records from {}", self.path.display());
        Ok(removed)
    }
}
