//! # RMenu Router
//!
//! Compiles the flat set of menu routes declared by every module into a
//! hierarchical router table:
//! - Wildcard segments (`node/%node`) bound to loader and to-arg functions
//! - Wildcards collapsed to a single `%` per level, literals matched first
//! - Page, access, delivery and theme callbacks inherited from parent routes
//! - Tabs (local tasks) and action links derived from sibling routes
//! - Emission of the compiled table to a pluggable sink
//!
//! ## Build Phases
//!
//! 1. **Parse** every pattern, asking a [`NameResolver`] which `%name`
//!    segments are real wildcards
//! 2. **Insert** patterns into an arena trie, shallowest first
//! 3. **Resolve** parked declarations breadth-first, so every route sees its
//!    already resolved ancestors regardless of declaration order
//! 4. **Derive** tab and action sets
//!
//! ## Example
//!
//! ```
//! use rmenu_router::{Compiler, FunctionTable, MenuType, RouteDeclaration};
//! use serde_json::json;
//!
//! let functions = FunctionTable::new().with_function("node_load");
//! let table = Compiler::new(&functions).compile(vec![
//!     RouteDeclaration::new("node/%node")
//!         .with_page_callback("node_page_view")
//!         .with_page_arguments([json!(1)])
//!         .with_access_callback("node_access"),
//!     RouteDeclaration::new("node/%node/view")
//!         .with_title("View")
//!         .with_type(MenuType::DEFAULT_LOCAL_TASK),
//!     RouteDeclaration::new("node/%node/edit")
//!         .with_title("Edit")
//!         .with_type(MenuType::LOCAL_TASK)
//!         .with_page_callback("node_page_edit")
//!         .with_access_callback("node_access"),
//! ]);
//!
//! // The default tab reuses its parent's page.
//! let view = table.get("node/%/view").unwrap();
//! assert_eq!(view.page_callback, "node_page_view");
//!
//! let tabs = table.tabs("node/%").unwrap();
//! assert_eq!(tabs.default_tab().unwrap().href, "node/%");
//! assert_eq!(tabs.local_tasks().count(), 1);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod builder;
mod config;
mod declaration;
mod descriptor;
pub mod emit;
mod error;
mod flags;
mod registry;
mod resolver;
pub mod route;
mod table;
mod tabs;
pub mod trie;

// ============================================================================
// Public API
// ============================================================================

pub use builder::{compile, Compiler};
pub use config::{CompilerOptions, Config, LoggingConfig, OutputConfig};
pub use declaration::{AccessCallback, AccessValue, RouteDeclaration};
pub use descriptor::{LoaderSpec, RouteDescriptor};
pub use emit::{EmitReport, FilesystemSink, MemorySink, RecordKind, TableKey, TableSink};
pub use error::{EmitError, ManifestError, SinkError};
pub use flags::{MenuContext, MenuType};
pub use registry::{ModuleManifest, RouteRegistry};
pub use resolver::{FunctionTable, NameResolver, LOADER_SUFFIX, TO_ARG_SUFFIX};
pub use route::{classify_segment, is_function_name, RoutePattern, Segment, WILDCARD};
pub use table::{CompiledTable, RouteMatch};
pub use tabs::{derive_local_tasks, ActionEntry, ActionSet, TabEntry, TabSet};
pub use trie::{NodeId, RouterTrie, SegmentKey, TrieNode};
