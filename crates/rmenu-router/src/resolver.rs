/// Function-name resolution for wildcard segments
///
/// A `%name` segment only becomes a wildcard when the module system provides a
/// `name_load` or `name_to_arg` function. The compiler never probes for those
/// functions itself: it asks a [`NameResolver`] supplied by the caller.

use std::collections::{HashMap, HashSet};

/// Suffix of loader function names (`node` → `node_load`)
pub const LOADER_SUFFIX: &str = "_load";

/// Suffix of to-arg function names (`user` → `user_to_arg`)
pub const TO_ARG_SUFFIX: &str = "_to_arg";

/// Capability answering which loader and to-arg functions exist
///
/// `name` is the wildcard identifier without the `%` and without suffix.
pub trait NameResolver {
    /// Whether `{name}_load` exists
    fn has_loader(&self, name: &str) -> bool;

    /// Whether `{name}_to_arg` exists
    fn has_to_arg(&self, name: &str) -> bool;

    /// Base path of a module, used to compute include files
    fn module_path(&self, _module: &str) -> Option<&str> {
        None
    }
}

/// Resolver over an explicit set of function names and module paths
///
/// # Examples
///
/// ```
/// use rmenu_router::{FunctionTable, NameResolver};
///
/// let table = FunctionTable::new()
///     .with_function("node_load")
///     .with_module_path("node", "core/modules/node");
///
/// assert!(table.has_loader("node"));
/// assert!(!table.has_to_arg("node"));
/// assert_eq!(table.module_path("node"), Some("core/modules/node"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashSet<String>,
    module_paths: HashMap<String, String>,
}

impl FunctionTable {
    /// Creates an empty table (every `%name` segment stays literal)
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function name
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.add_function(name);
        self
    }

    /// Adds several function names
    pub fn with_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().for_each(|name| self.add_function(name));
        self
    }

    /// Records the base path of a module
    pub fn with_module_path(mut self, module: impl Into<String>, path: impl Into<String>) -> Self {
        self.set_module_path(module, path);
        self
    }

    /// Adds a function name in place
    pub fn add_function(&mut self, name: impl Into<String>) {
        self.functions.insert(name.into());
    }

    /// Records the base path of a module in place
    pub fn set_module_path(&mut self, module: impl Into<String>, path: impl Into<String>) {
        self.module_paths.insert(module.into(), path.into());
    }

    /// Whether a fully suffixed function name is known
    pub fn contains(&self, function: &str) -> bool {
        self.functions.contains(function)
    }

    /// Number of known functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no functions are known
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl NameResolver for FunctionTable {
    fn has_loader(&self, name: &str) -> bool {
        self.contains(&format!("{name}{LOADER_SUFFIX}"))
    }

    fn has_to_arg(&self, name: &str) -> bool {
        self.contains(&format!("{name}{TO_ARG_SUFFIX}"))
    }

    fn module_path(&self, module: &str) -> Option<&str> {
        self.module_paths.get(module).map(String::as_str)
    }
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn has_loader(&self, name: &str) -> bool {
        (**self).has_loader(name)
    }

    fn has_to_arg(&self, name: &str) -> bool {
        (**self).has_to_arg(name)
    }

    fn module_path(&self, module: &str) -> Option<&str> {
        (**self).module_path(module)
    }
}
