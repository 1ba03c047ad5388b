/// Integration tests for runtime path resolution against a compiled table

use std::collections::BTreeMap;

use rmenu_router::{CompiledTable, Compiler, CompilerOptions, FunctionTable, RouteDeclaration};
use rstest::{fixture, rstest};

#[fixture]
fn table() -> CompiledTable {
    let functions = FunctionTable::new().with_functions(["node_load", "user_load"]);
    Compiler::new(&functions).compile(vec![
        RouteDeclaration::new("node").with_page_callback("node_page_default"),
        RouteDeclaration::new("node/add").with_page_callback("node_add_page"),
        RouteDeclaration::new("node/add/%").with_page_callback("node_add"),
        RouteDeclaration::new("node/%node").with_page_callback("node_page_view"),
        RouteDeclaration::new("node/%node/edit").with_page_callback("node_page_edit"),
        RouteDeclaration::new("a/b/c").with_page_callback("abc"),
        RouteDeclaration::new("a/%/d").with_page_callback("a_any_d"),
    ])
}

#[rstest]
#[case::literal("node", "node")]
#[case::literal_beats_wildcard("node/add", "node/add")]
#[case::wildcard("node/42", "node/%")]
#[case::wildcard_then_literal("node/42/edit", "node/%/edit")]
#[case::literal_then_wildcard("node/add/article", "node/add/%")]
#[case::backtracks_to_wildcard("a/b/d", "a/%/d")]
#[case::literal_path_kept("a/b/c", "a/b/c")]
fn test_lookup_picks_most_specific(table: CompiledTable, #[case] runtime: &str, #[case] expected: &str) {
    let matched = table.lookup(runtime).unwrap();
    assert_eq!(matched.route.path, expected);
    assert!(matched.extra_args().is_empty());
}

#[rstest]
#[case::extra_part("node/42/revisions", "node/%", &["revisions"])]
#[case::extra_parts("node/add/page/extra/more", "node/add/%", &["extra", "more"])]
fn test_lookup_falls_back_to_prefix(
    table: CompiledTable,
    #[case] runtime: &str,
    #[case] expected: &str,
    #[case] extra: &[&str],
) {
    let matched = table.lookup(runtime).unwrap();
    assert_eq!(matched.route.path, expected);
    assert_eq!(matched.extra_args(), extra);
}

#[rstest]
#[case::unknown_root("unknown")]
#[case::undeclared_prefix("a/x")]
#[case::undeclared_prefix_deeper("a")]
fn test_lookup_misses(table: CompiledTable, #[case] runtime: &str) {
    assert!(table.lookup(runtime).is_none());
}

#[rstest]
fn test_wildcard_args(table: CompiledTable) {
    let matched = table.lookup("node/42/edit").unwrap();

    assert_eq!(matched.args, vec!["node", "42", "edit"]);
    assert_eq!(matched.wildcard_args(), BTreeMap::from([(1, "42")]));
}

// ============================================================================
// Routes folded at the part limit
// ============================================================================

#[test]
fn test_lookup_reaches_route_folded_at_default_limit() {
    let table = Compiler::new(FunctionTable::new()).compile(vec![
        RouteDeclaration::new("a/b/c/d/e/f/g/h/i/j").with_page_callback("deep"),
    ]);
    assert_eq!(table.get("a/b/c/d/e/f/g/h/i/j").unwrap().number_parts, 9);

    let matched = table.lookup("a/b/c/d/e/f/g/h/i/j").unwrap();
    assert_eq!(matched.route.path, "a/b/c/d/e/f/g/h/i/j");
    assert_eq!(matched.args.len(), 9);
    assert_eq!(matched.args[8], "i/j");
    assert!(matched.extra_args().is_empty());
}

#[test]
fn test_folded_wildcard_text_is_not_a_wildcard_position() {
    let options = CompilerOptions {
        max_parts: 3,
        ..CompilerOptions::default()
    };
    let table = Compiler::new(FunctionTable::new())
        .with_options(options)
        .compile(vec![
            RouteDeclaration::new("a/%").with_page_callback("any"),
            RouteDeclaration::new("a/%/x/%").with_page_callback("folded"),
        ]);
    assert_eq!(table.max_parts(), 3);

    let folded = table.lookup("a/5/x/%").unwrap();
    assert_eq!(folded.route.path, "a/%/x/%");
    assert_eq!(folded.wildcard_args(), BTreeMap::from([(1, "5")]));

    let prefix = table.lookup("a/5/x/7").unwrap();
    assert_eq!(prefix.route.path, "a/%");
    assert_eq!(prefix.extra_args(), ["x/7"]);
    assert_eq!(prefix.wildcard_args(), BTreeMap::from([(1, "5")]));
}
