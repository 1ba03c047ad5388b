//! In-memory sink

use serde_json::Value;
use std::collections::BTreeMap;

use super::{RecordKind, TableKey, TableSink};
use crate::error::SinkError;

/// Keeps emitted records in a map keyed by path and record kind
///
/// Useful for tests and for handing a compiled table to another process
/// without touching the file system.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: BTreeMap<(String, RecordKind), Value>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record written for `path`, if any
    pub fn get(&self, path: &str, kind: RecordKind) -> Option<&Value> {
        self.records.get(&(path.to_string(), kind))
    }

    /// All records in path order
    pub fn records(&self) -> impl Iterator<Item = (&str, RecordKind, &Value)> {
        self.records
            .iter()
            .map(|((path, kind), value)| (path.as_str(), *kind, value))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TableSink for MemorySink {
    fn write(&mut self, key: &TableKey<'_>, kind: RecordKind, record: &Value) -> Result<(), SinkError> {
        self.records
            .insert((key.path.to_string(), kind), record.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
