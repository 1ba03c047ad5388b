/// Integration tests for table emission
///
/// Exercises the in-memory and filesystem sinks, and failure collection
/// when a sink refuses writes.

use std::fs;

use pretty_assertions::assert_eq;
use rmenu_router::{
    CompiledTable, Compiler, FilesystemSink, FunctionTable, MemorySink, MenuType, RecordKind,
    RouteDeclaration, RouteDescriptor, SinkError, TableKey, TableSink, TabSet,
};
use serde_json::{json, Value};

fn table() -> CompiledTable {
    let functions = FunctionTable::new().with_function("node_load");
    Compiler::new(&functions).compile(vec![
        RouteDeclaration::new("node").with_page_callback("node_page_default"),
        RouteDeclaration::new("node/%node")
            .with_page_callback("node_page_view")
            .with_access_callback("node_access"),
        RouteDeclaration::new("node/%node/view").with_type(MenuType::DEFAULT_LOCAL_TASK),
        RouteDeclaration::new("node/%node/edit")
            .with_type(MenuType::LOCAL_TASK)
            .with_page_callback("node_page_edit"),
        RouteDeclaration::new("node/%node/translate")
            .with_type(MenuType::LOCAL_ACTION)
            .with_page_callback("translate"),
    ])
}

/// Sink refusing one record kind at one path
struct RejectingSink {
    inner: MemorySink,
    path: &'static str,
    kind: RecordKind,
}

impl TableSink for RejectingSink {
    fn write(&mut self, key: &TableKey<'_>, kind: RecordKind, record: &Value) -> Result<(), SinkError> {
        if key.path == self.path && kind == self.kind {
            return Err(SinkError::Rejected(format!("{} is read-only", key.path)));
        }
        self.inner.write(key, kind, record)
    }

    fn name(&self) -> &'static str {
        "rejecting"
    }
}

// ============================================================================
// Memory sink
// ============================================================================

#[test]
fn test_memory_sink_receives_every_record() {
    let table = table();
    let mut sink = MemorySink::new();
    let report = table.emit(&mut sink);

    assert!(report.is_success());
    assert_eq!(report.nodes, 5);
    // five routes, one tab set and one action set under node/%
    assert_eq!(report.records, 7);
    assert_eq!(sink.len(), 7);

    let route: RouteDescriptor =
        serde_json::from_value(sink.get("node/%", RecordKind::Route).unwrap().clone()).unwrap();
    assert_eq!(&route, table.get("node/%").unwrap());

    let tabs: TabSet =
        serde_json::from_value(sink.get("node/%", RecordKind::Tabs).unwrap().clone()).unwrap();
    assert_eq!(tabs.len(), 2);
    assert!(sink.get("node/%", RecordKind::Actions).is_some());
    assert!(sink.get("node", RecordKind::Tabs).is_none());
}

#[test]
fn test_records_keyed_by_canonical_path() {
    let mut sink = MemorySink::new();
    table().emit(&mut sink);

    let paths: Vec<&str> = sink
        .records()
        .filter(|(_, kind, _)| *kind == RecordKind::Route)
        .map(|(path, _, _)| path)
        .collect();
    assert_eq!(
        paths,
        vec!["node", "node/%", "node/%/edit", "node/%/translate", "node/%/view"]
    );
}

// ============================================================================
// Failure collection
// ============================================================================

#[test]
fn test_failure_stops_node_but_not_table() {
    let table = table();
    let mut sink = RejectingSink {
        inner: MemorySink::new(),
        path: "node/%",
        kind: RecordKind::Tabs,
    };
    let report = table.emit(&mut sink);

    assert!(!report.is_success());
    assert_eq!(report.failed_paths().collect::<Vec<_>>(), vec!["node/%"]);
    assert_eq!(report.failures[0].record, RecordKind::Tabs);
    assert!(matches!(report.failures[0].source, SinkError::Rejected(_)));

    // route record written before the failure, actions skipped after it
    assert!(sink.inner.get("node/%", RecordKind::Route).is_some());
    assert!(sink.inner.get("node/%", RecordKind::Actions).is_none());

    assert_eq!(report.nodes, 4);
    assert!(sink.inner.get("node/%/edit", RecordKind::Route).is_some());
}

#[test]
fn test_emit_error_message() {
    let mut sink = RejectingSink {
        inner: MemorySink::new(),
        path: "node",
        kind: RecordKind::Route,
    };
    let report = table().emit(&mut sink);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].to_string(), "failed to emit route for 'node'");
}

// ============================================================================
// Filesystem sink
// ============================================================================

#[test]
fn test_filesystem_layout() {
    let dir = tempfile::tempdir().unwrap();
    let table = table();
    let mut sink = FilesystemSink::new(dir.path());
    let report = table.emit(&mut sink);

    assert!(report.is_success());
    assert!(dir.path().join("node/route.json").is_file());
    assert!(dir.path().join("node/%25/route.json").is_file());
    assert!(dir.path().join("node/%25/tabs.json").is_file());
    assert!(dir.path().join("node/%25/actions.json").is_file());
    assert!(dir.path().join("node/%25/edit/route.json").is_file());
    assert!(!dir.path().join("node/tabs.json").exists());

    let content = fs::read_to_string(dir.path().join("node/%25/edit/route.json")).unwrap();
    let route: RouteDescriptor = serde_json::from_str(&content).unwrap();
    assert_eq!(&route, table.get("node/%/edit").unwrap());
}

#[test]
fn test_filesystem_compact_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FilesystemSink::new(dir.path()).with_pretty(false);
    table().emit(&mut sink);

    let content = fs::read_to_string(dir.path().join("node/route.json")).unwrap();
    assert!(!content.contains('\n'));
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["page_callback"], json!("node_page_default"));
}

#[test]
fn test_filesystem_unwritable_root_reports_every_node() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("router");
    fs::write(&blocker, "not a directory").unwrap();

    let table = table();
    let mut sink = FilesystemSink::new(&blocker);
    let report = table.emit(&mut sink);

    assert_eq!(report.nodes, 0);
    assert_eq!(report.failures.len(), table.len());
    assert!(report
        .failures
        .iter()
        .all(|failure| matches!(failure.source, SinkError::Io { .. })));
}
