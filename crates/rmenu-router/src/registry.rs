/// Route registry
///
/// Collects the routes declared by every module before a build. Modules
/// either call [`RouteRegistry::declare`] directly or ship a
/// [`ModuleManifest`] (TOML or JSON) listing their routes and the loader /
/// to-arg functions they provide.
///
/// ```toml
/// module = "node"
/// path = "core/modules/node"
/// functions = ["node_load"]
///
/// [[routes]]
/// pattern = "node/%node"
/// page_callback = "node_page_view"
/// page_arguments = [1]
/// access_callback = "node_access"
/// ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::declaration::RouteDeclaration;
use crate::error::ManifestError;
use crate::resolver::FunctionTable;

/// Routes and functions contributed by one module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleManifest {
    /// Module name
    pub module: String,
    /// Base directory of the module's files
    pub path: Option<String>,
    /// Loader and to-arg functions the module defines
    pub functions: Vec<String>,
    pub routes: Vec<RouteDeclaration>,
}

impl ModuleManifest {
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads a manifest, choosing the format by file extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();

        let parse: fn(&str) -> Result<Self, ManifestError> =
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => Self::from_toml_str,
                Some("json") => Self::from_json_str,
                _ => return Err(ManifestError::UnsupportedFormat(path.to_path_buf())),
            };

        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&content)
    }
}

/// Declarations of all modules, in declaration order
///
/// Declaring the same pattern twice keeps the first position and the last
/// content, so a module can override another module's route.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    entries: Vec<RouteDeclaration>,
    index: HashMap<String, usize>,
    functions: FunctionTable,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration on behalf of `module`
    ///
    /// The module name is attached unless the declaration already names one.
    pub fn declare(&mut self, module: &str, mut declaration: RouteDeclaration) {
        if declaration.module.is_none() {
            declaration.module = Some(module.to_string());
        }

        match self.index.get(&declaration.pattern) {
            Some(&slot) => {
                debug!(
                    pattern = %declaration.pattern,
                    module,
                    previous = self.entries[slot].module.as_deref().unwrap_or_default(),
                    "route overridden"
                );
                self.entries[slot] = declaration;
            }
            None => {
                self.index
                    .insert(declaration.pattern.clone(), self.entries.len());
                self.entries.push(declaration);
            }
        }
    }

    /// Adds every route and function of a manifest
    pub fn register_module(&mut self, manifest: ModuleManifest) {
        let ModuleManifest {
            module,
            path,
            functions,
            routes,
        } = manifest;

        if let Some(path) = path {
            self.functions.set_module_path(module.as_str(), path);
        }
        for function in functions {
            self.functions.add_function(function);
        }

        let count = routes.len();
        for declaration in routes {
            self.declare(&module, declaration);
        }
        debug!(module = %module, routes = count, "registered module");
    }

    /// Current declaration of `pattern`
    pub fn get(&self, pattern: &str) -> Option<&RouteDeclaration> {
        self.index.get(pattern).map(|&slot| &self.entries[slot])
    }

    /// Snapshot of every declaration
    pub fn all_declarations(&self) -> Vec<RouteDeclaration> {
        self.entries.clone()
    }

    /// Functions and module paths collected from manifests
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Mutable access for functions defined outside manifests
    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    /// Splits the registry into declarations and resolver
    pub fn into_parts(self) -> (Vec<RouteDeclaration>, FunctionTable) {
        (self.entries, self.functions)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
