/// Integration tests for manifests, the registry and configuration loading

use std::fs;

use pretty_assertions::assert_eq;
use rmenu_router::{
    AccessCallback, Compiler, Config, ManifestError, MenuType, ModuleManifest, RouteRegistry,
};
use serde_json::json;

const NODE_MANIFEST: &str = r#"
module = "node"
path = "core/modules/node"
functions = ["node_load"]

[[routes]]
pattern = "node/%node"
title_callback = "node_page_title"
page_callback = "node_page_view"
page_arguments = [1]
access_callback = "node_access"
access_arguments = ["view", 1]

[[routes]]
pattern = "node/%node/view"
title = "View"
type = "default_local_task"
weight = -10

[[routes]]
pattern = "node/%node/edit"
title = "Edit"
type = "MENU_LOCAL_TASK"
page_callback = "node_page_edit"
page_arguments = [1]
access_callback = "node_access"
access_arguments = ["update", 1]
file = "node.pages.inc"
"#;

const CUSTOM_MANIFEST: &str = r#"{
    "module": "custom",
    "path": "modules/custom",
    "routes": [
        {
            "pattern": "node/%node/edit",
            "title": "Edit with care",
            "type": 132,
            "page_callback": "custom_node_edit",
            "access_callback": true,
            "file": "custom.pages.inc"
        }
    ]
}"#;

#[test]
fn test_manifests_from_files_compile_with_override() {
    let dir = tempfile::tempdir().unwrap();
    let node = dir.path().join("node.toml");
    let custom = dir.path().join("custom.json");
    fs::write(&node, NODE_MANIFEST).unwrap();
    fs::write(&custom, CUSTOM_MANIFEST).unwrap();

    let mut registry = RouteRegistry::new();
    registry.register_module(ModuleManifest::from_file(&node).unwrap());
    registry.register_module(ModuleManifest::from_file(&custom).unwrap());
    assert_eq!(registry.len(), 3);

    let (declarations, functions) = registry.into_parts();
    let patterns: Vec<&str> = declarations.iter().map(|d| d.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["node/%node", "node/%node/view", "node/%node/edit"]);

    let table = Compiler::new(&functions).compile(declarations);

    let edit = table.get("node/%/edit").unwrap();
    assert_eq!(edit.module, "custom");
    assert_eq!(edit.title, "Edit with care");
    assert_eq!(edit.menu_type, MenuType::LOCAL_TASK);
    assert_eq!(edit.access_callback, AccessCallback::Constant(true));
    assert_eq!(edit.include_file, "modules/custom/custom.pages.inc");
    assert_eq!(edit.loader_at(1).unwrap().function, "node_load");

    let view = table.get("node/%/view").unwrap();
    assert_eq!(view.page_arguments, vec![json!(1)]);
    assert_eq!(view.access_arguments, vec![json!("view"), json!(1)]);
    assert_eq!(table.tabs("node/%").unwrap().len(), 2);
}

#[test]
fn test_manifest_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModuleManifest::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
}

#[test]
fn test_manifest_bad_menu_type() {
    let err = ModuleManifest::from_toml_str(
        r#"
        module = "x"
        [[routes]]
        pattern = "x"
        type = "sidebar"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ManifestError::Toml(_)));
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rmenu.toml");
    fs::write(
        &path,
        r#"
        [compiler]
        permission_callback = "check_permission"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.compiler.permission_callback, "check_permission");
    assert_eq!(config.compiler.max_parts, 9);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.output, Config::default().output);
}
