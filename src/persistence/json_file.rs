//! JSON file backend.
//!
//! File format: a pretty-printed JSON array of record objects, four-space
//! indented, with a trailing newline. This is also the format produced by
//! the one-shot ingestion tooling.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::errors::{PersistenceError, PersistenceResult};
use super::PersistenceGateway;
use crate::record::Record;

/// Gateway over a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written before the atomic rename
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn encode(records: &[&Record]) -> PersistenceResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(records.len() * 192);
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        records
            .serialize(&mut serializer)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    fn corrupt(&self, reason: impl Into<String>) -> PersistenceError {
        PersistenceError::CorruptData {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn load(&self) -> PersistenceResult<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(self.corrupt(format!("duplicate id {}", record.id)));
            }
        }

        Ok(records)
    }

    fn save(&self, records: &[&Record]) -> PersistenceResult<()> {
        let encoded = Self::encode(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
            }
        }

        let staging = self.staging_path();
        {
            let mut file = File::create(&staging).map_err(|e| PersistenceError::io(&staging, e))?;
            file.write_all(&encoded)
                .map_err(|e| PersistenceError::io(&staging, e))?;
            file.sync_all()
                .map_err(|e| PersistenceError::io(&staging, e))?;
        }

        fs::rename(&staging, &self.path).map_err(|e| PersistenceError::io(&self.path, e))
    }
}
