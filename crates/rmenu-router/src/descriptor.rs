/// Resolved route descriptors
///
/// A [`RouteDescriptor`] is what the compiler persists for every declared
/// path. Unlike a declaration, every field is concrete: defaults and inherited
/// values have already been applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::declaration::AccessCallback;
use crate::flags::{MenuContext, MenuType};

/// A loader bound to a wildcard position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSpec {
    /// Loader function name (`node_load`)
    pub function: String,
    /// Extra arguments, present only when declared or inherited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Value>>,
}

impl LoaderSpec {
    /// Loader without explicit arguments
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            arguments: None,
        }
    }

    /// Loader carrying explicit arguments
    pub fn with_arguments(function: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            function: function.into(),
            arguments: Some(arguments),
        }
    }

    /// Whether explicit arguments are attached
    pub fn has_arguments(&self) -> bool {
        self.arguments.is_some()
    }
}

/// Fully resolved route, one per declared canonical path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Canonical path (`node/%/edit`)
    pub path: String,
    pub load_functions: BTreeMap<usize, LoaderSpec>,
    pub to_arg_functions: BTreeMap<usize, String>,
    pub access_callback: AccessCallback,
    pub access_arguments: Vec<Value>,
    pub page_callback: String,
    pub page_arguments: Vec<Value>,
    pub delivery_callback: String,
    pub context: MenuContext,
    pub title: String,
    pub title_callback: String,
    pub title_arguments: Vec<Value>,
    pub theme_callback: String,
    pub theme_arguments: Vec<Value>,
    #[serde(rename = "type")]
    pub menu_type: MenuType,
    pub description: String,
    pub position: String,
    pub weight: i32,
    /// Path of the file to include before calling the page callback
    pub include_file: String,
    pub file: String,
    pub file_path: String,
    pub module: String,
    /// Shown in breadcrumbs
    pub visible: bool,
    /// Local task or local action
    pub is_tab: bool,
    /// Nearest declared ancestor of a tab (empty for non-tabs)
    pub tab_parent: String,
    /// Nearest non-tab ancestor of a tab (own path for non-tabs)
    pub tab_root: String,
    /// Specificity score, see [`RoutePattern::fit`](crate::RoutePattern::fit)
    pub fit: u32,
    pub number_parts: usize,
}

impl RouteDescriptor {
    /// Whether access is denied by construction
    pub fn is_access_denied(&self) -> bool {
        self.access_callback.is_denied()
    }

    /// Loader at a wildcard position
    pub fn loader_at(&self, position: usize) -> Option<&LoaderSpec> {
        self.load_functions.get(&position)
    }
}
