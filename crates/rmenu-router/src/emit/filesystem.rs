//! Filesystem sink for compiled tables
//!
//! Lays the table out as one directory per path segment:
//!
//! ```text
//! router/
//!   node/
//!     route.json
//!     %25/
//!       route.json
//!       tabs.json
//!       edit/
//!         route.json
//! ```
//!
//! Segment names are percent-encoded so that every segment maps to exactly
//! one directory: `%` becomes `%25`, `/` inside a folded segment becomes
//! `%2F`, and the otherwise unrepresentable `""`, `.` and `..` become `@`,
//! `%2E` and `%2E%2E`.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::{RecordKind, TableKey, TableSink};
use crate::error::SinkError;

/// Directory name standing for an empty segment
pub const EMPTY_SEGMENT_DIR: &str = "@";

/// Writes records as JSON files under a root directory
#[derive(Debug, Clone)]
pub struct FilesystemSink {
    root: PathBuf,
    pretty: bool,
}

impl FilesystemSink {
    /// Creates a sink writing pretty-printed JSON under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    /// Toggles pretty-printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the records of `key`
    pub fn dir_for(&self, key: &TableKey<'_>) -> PathBuf {
        key.segments
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment_dir_name(segment)))
    }

    /// File holding one record of `key`
    pub fn file_for(&self, key: &TableKey<'_>, kind: RecordKind) -> PathBuf {
        self.dir_for(key).join(format!("{}.json", kind.as_str()))
    }
}

impl TableSink for FilesystemSink {
    fn write(&mut self, key: &TableKey<'_>, kind: RecordKind, record: &Value) -> Result<(), SinkError> {
        let dir = self.dir_for(key);
        fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;

        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };

        let file = dir.join(format!("{}.json", kind.as_str()));
        fs::write(&file, json).map_err(|source| SinkError::Io { path: file, source })
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

/// Directory name of one canonical segment (pure function)
///
/// ```
/// use rmenu_router::emit::filesystem::segment_dir_name;
///
/// assert_eq!(segment_dir_name("node"), "node");
/// assert_eq!(segment_dir_name("%"), "%25");
/// assert_eq!(segment_dir_name(""), "@");
/// assert_eq!(segment_dir_name(".."), "%2E%2E");
/// assert_eq!(segment_dir_name("c/d"), "c%2Fd");
/// ```
pub fn segment_dir_name(segment: &str) -> String {
    match segment {
        "" => EMPTY_SEGMENT_DIR.to_string(),
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        other => urlencoding::encode(other).into_owned(),
    }
}
