//! Table emission
//!
//! Writes the compiled table to a [`TableSink`], one node at a time. Each
//! declared node produces a `route` record and, when present, `tabs` and
//! `actions` records under the same path.
//!
//! A failing write stops the remaining writes of that node only; the failure
//! is collected and emission moves on to the next node.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{EmitError, SinkError};
use crate::trie::{RouterTrie, TrieNode};

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemSink;
pub use memory::MemorySink;

/// Kind of record written for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Route,
    Tabs,
    Actions,
}

impl RecordKind {
    /// Record name (also the file stem of the filesystem sink)
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Route => "route",
            RecordKind::Tabs => "tabs",
            RecordKind::Actions => "actions",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a node in the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableKey<'a> {
    /// Canonical path (`node/%/edit`)
    pub path: &'a str,
    /// Canonical segments, one per trie level
    pub segments: Vec<&'a str>,
}

/// Destination of compiled records
pub trait TableSink {
    /// Writes one record for the node at `key`
    ///
    /// Implementations create whatever containers `key` implies.
    fn write(&mut self, key: &TableKey<'_>, kind: RecordKind, record: &Value) -> Result<(), SinkError>;

    /// Sink name for logs
    fn name(&self) -> &'static str;
}

/// Outcome of emitting a table
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Nodes fully written
    pub nodes: usize,
    /// Records written, including those of failed nodes
    pub records: usize,
    /// One entry per node that failed
    pub failures: Vec<EmitError>,
}

impl EmitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Paths of the nodes that failed
    pub fn failed_paths(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.path.as_str())
    }
}

/// Writes every declared node of `trie` to `sink`
pub fn emit_trie<S: TableSink + ?Sized>(trie: &RouterTrie, sink: &mut S) -> EmitReport {
    let mut report = EmitReport::default();

    for (id, node) in trie.declared() {
        let key = TableKey {
            path: node.path(),
            segments: segments_of(trie, id),
        };

        match emit_node(node, &key, sink, &mut report.records) {
            Ok(()) => report.nodes += 1,
            Err(error) => {
                tracing::warn!(
                    path = %error.path,
                    record = %error.record,
                    sink = sink.name(),
                    "emit failed: {}",
                    error.source
                );
                report.failures.push(error);
            }
        }
    }

    tracing::info!(
        nodes = report.nodes,
        records = report.records,
        failures = report.failures.len(),
        sink = sink.name(),
        "emitted router table"
    );
    report
}

fn emit_node<S: TableSink + ?Sized>(
    node: &TrieNode,
    key: &TableKey<'_>,
    sink: &mut S,
    written: &mut usize,
) -> Result<(), EmitError> {
    let records = [
        (RecordKind::Route, node.descriptor().map(to_record)),
        (RecordKind::Tabs, node.tabs().map(to_record)),
        (RecordKind::Actions, node.actions().map(to_record)),
    ];

    for (kind, record) in records {
        let Some(record) = record else { continue };

        record
            .and_then(|value| sink.write(key, kind, &value))
            .map_err(|source| EmitError {
                path: key.path.to_string(),
                record: kind,
                source,
            })?;
        *written += 1;
    }

    Ok(())
}

fn to_record<T: Serialize>(value: &T) -> Result<Value, SinkError> {
    Ok(serde_json::to_value(value)?)
}

/// Canonical segments from the root down to `id`
fn segments_of(trie: &RouterTrie, id: crate::trie::NodeId) -> Vec<&str> {
    let mut segments: Vec<&str> = std::iter::once(id)
        .chain(trie.ancestors(id))
        .filter_map(|node| trie.node(node).key().map(|key| key.as_str()))
        .collect();
    segments.reverse();
    segments
}
