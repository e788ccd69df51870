use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::store::write_json_pretty;

/// Accumulates rows across units of work and rewrites the whole output file
/// after every unit. Crude crash recovery for multi-season crawls: a network
/// failure on season N keeps seasons 1..N-1 on disk.
pub struct Checkpoint<T> {
    path: PathBuf,
    rows: Vec<T>,
}

impl<T: Serialize> Checkpoint<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: Vec::new(),
        }
    }

    pub fn extend_and_persist(&mut self, rows: impl IntoIterator<Item = T>) -> Result<()> {
        self.rows.extend(rows);
        write_json_pretty(&self.path, &self.rows)
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
