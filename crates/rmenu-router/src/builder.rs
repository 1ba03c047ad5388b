//! Router table compiler
//!
//! Turns the flat list of declarations into a [`CompiledTable`] in three
//! passes over an arena trie:
//!
//! 1. **Insert** – parse every pattern and park its declaration on the
//!    terminal node. Shallow patterns go first; within a depth the registry
//!    order is kept, so a later declaration of the same canonical path wins.
//! 2. **Resolve** – visit nodes breadth-first and turn each parked
//!    declaration into a [`RouteDescriptor`]. Ancestors are always resolved
//!    before their descendants, so inheritance does not depend on the order
//!    routes were declared in.
//! 3. **Derive** – build tab and action sets from sibling descriptors.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

use crate::config::CompilerOptions;
use crate::declaration::{AccessCallback, RouteDeclaration};
use crate::descriptor::{LoaderSpec, RouteDescriptor};
use crate::flags::MenuType;
use crate::resolver::NameResolver;
use crate::route::{RoutePattern, MAX_PARTS_LIMIT};
use crate::table::CompiledTable;
use crate::tabs::derive_local_tasks;
use crate::trie::{NodeId, RouterTrie};

/// A declaration waiting on its terminal node
struct Parked {
    pattern: RoutePattern,
    declaration: RouteDeclaration,
}

/// Compiles declarations against a resolver
///
/// # Examples
///
/// ```
/// use rmenu_router::{Compiler, FunctionTable, RouteDeclaration};
///
/// let functions = FunctionTable::new().with_function("node_load");
/// let table = Compiler::new(&functions).compile(vec![
///     RouteDeclaration::new("node/%node")
///         .with_page_callback("node_page_view")
///         .with_access_callback("node_access"),
/// ]);
///
/// let route = table.get("node/%").unwrap();
/// assert_eq!(route.load_functions[&1].function, "node_load");
/// ```
pub struct Compiler<R> {
    resolver: R,
    options: CompilerOptions,
}

impl<R: NameResolver> Compiler<R> {
    /// Creates a compiler with default options
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            options: CompilerOptions::default(),
        }
    }

    /// Replaces the compiler options
    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compiles a full set of declarations
    pub fn compile<I>(&self, declarations: I) -> CompiledTable
    where
        I: IntoIterator<Item = RouteDeclaration>,
    {
        let (mut trie, parked) = self.insert_all(declarations);
        let routes = self.resolve_all(&mut trie, parked);
        let parents = derive_local_tasks(&mut trie);

        info!(routes, nodes = trie.len() - 1, parents, "compiled router table");
        CompiledTable::new(trie, self.options.max_parts.clamp(1, MAX_PARTS_LIMIT))
    }

    // ========================================================================
    // Phase 1: insert
    // ========================================================================

    fn insert_all<I>(&self, declarations: I) -> (RouterTrie, HashMap<NodeId, Parked>)
    where
        I: IntoIterator<Item = RouteDeclaration>,
    {
        let mut parsed: Vec<Parked> = declarations
            .into_iter()
            .map(|declaration| Parked {
                pattern: RoutePattern::parse_with_limit(
                    &declaration.pattern,
                    &self.resolver,
                    self.options.max_parts,
                ),
                declaration,
            })
            .collect();
        parsed.sort_by_key(|parked| parked.pattern.number_parts());

        let mut trie = RouterTrie::new();
        let mut parked: HashMap<NodeId, Parked> = HashMap::new();

        for entry in parsed {
            let id = trie.insert(&entry.pattern);
            debug!(pattern = entry.pattern.raw(), path = trie.node(id).path(), "inserted route");

            if let Some(previous) = parked.insert(id, entry) {
                let current = &parked[&id];
                if previous.pattern.raw() != current.pattern.raw() {
                    warn!(
                        path = trie.node(id).path(),
                        replaced = previous.pattern.raw(),
                        by = current.pattern.raw(),
                        "patterns share a canonical path; keeping the later declaration"
                    );
                }
            }
        }

        (trie, parked)
    }

    // ========================================================================
    // Phase 2: resolve
    // ========================================================================

    fn resolve_all(&self, trie: &mut RouterTrie, mut parked: HashMap<NodeId, Parked>) -> usize {
        let mut resolved = 0;

        for id in trie.ids_by_depth() {
            let Some(entry) = parked.remove(&id) else {
                continue;
            };
            let descriptor = self.resolve(trie, id, entry);
            trie.node_mut(id).descriptor = Some(descriptor);
            resolved += 1;
        }

        resolved
    }

    /// Applies inheritance and defaults to one declaration
    fn resolve(&self, trie: &RouterTrie, id: NodeId, entry: Parked) -> RouteDescriptor {
        let Parked {
            pattern,
            declaration,
        } = entry;
        let RouteDeclaration {
            pattern: _,
            title,
            description,
            position,
            weight,
            menu_type,
            access_callback,
            access_arguments,
            page_callback,
            page_arguments,
            delivery_callback,
            theme_callback,
            theme_arguments,
            title_callback,
            title_arguments,
            load_arguments,
            file,
            file_path,
            context,
            module,
        } = declaration;

        let path = trie.node(id).path().to_string();
        let menu_type = menu_type.unwrap_or_default();
        let module = module.unwrap_or_default();

        let mut access_callback: Option<AccessCallback> = access_callback.map(Into::into);
        let mut access_arguments = access_arguments;
        let mut page_callback = page_callback;
        let mut page_arguments = page_arguments;
        let mut file = file;
        let mut file_path = file_path;
        let mut delivery_callback = delivery_callback;
        let mut theme_callback = theme_callback;
        let mut theme_arguments = theme_arguments;

        let mut file_module = module.clone();

        let parent = trie.declared_ancestors(id).next();

        if let Some(parent) = parent {
            // Default tabs stand for their parent page, so they share its access check.
            if menu_type == MenuType::DEFAULT_LOCAL_TASK && access_callback.is_none() {
                access_callback = Some(parent.access_callback.clone());
                if access_arguments.is_none() {
                    access_arguments = Some(parent.access_arguments.clone());
                }
            }

            if page_callback.is_none() {
                page_callback = Some(parent.page_callback.clone());
                page_arguments.get_or_insert_with(|| parent.page_arguments.clone());
                file_path.get_or_insert_with(|| parent.file_path.clone());

                if file.is_none() {
                    file = Some(parent.file.clone());
                    let no_file_path = file_path.as_deref().map_or(true, str::is_empty);
                    if no_file_path && !parent.file.is_empty() && module != parent.module {
                        // The file belongs to the parent module, never to this one.
                        file_module = parent.module.clone();
                        match self.resolver.module_path(&parent.module) {
                            Some(base) => file_path = Some(base.to_string()),
                            None => warn!(
                                path = %path,
                                file = %parent.file,
                                module = %parent.module,
                                "no base path for the module owning an inherited file"
                            ),
                        }
                    }
                }
            }

            if delivery_callback.is_none() {
                delivery_callback = Some(parent.delivery_callback.clone());
            }

            if theme_callback.is_none() {
                theme_callback = Some(parent.theme_callback.clone());
                theme_arguments.get_or_insert_with(|| parent.theme_arguments.clone());
            }
        }

        let load_functions = self.resolve_loaders(trie, id, &pattern, load_arguments);

        if access_callback.is_none() && access_arguments.is_some() {
            access_callback = Some(AccessCallback::Named(self.options.permission_callback.clone()));
        }

        let page_callback = page_callback.unwrap_or_default();
        let access_callback = match access_callback {
            Some(callback) if !page_callback.is_empty() => callback,
            _ => AccessCallback::DENIED,
        };

        let file = file.unwrap_or_default();
        let file_path = file_path.unwrap_or_default();
        let include_file = self.include_file(&file, &file_path, &file_module);

        let is_tab = menu_type.is_local_task();
        let (tab_parent, tab_root) = if is_tab {
            let tab_parent = parent.map(|p| p.path.clone()).unwrap_or_default();
            let tab_root = trie
                .declared_ancestors(id)
                .find(|ancestor| !ancestor.is_tab)
                .map_or_else(|| path.clone(), |ancestor| ancestor.path.clone());
            (tab_parent, tab_root)
        } else {
            (String::new(), path.clone())
        };

        RouteDescriptor {
            load_functions,
            to_arg_functions: pattern.to_arg_functions(),
            access_callback,
            access_arguments: access_arguments.unwrap_or_default(),
            page_callback,
            page_arguments: page_arguments.unwrap_or_default(),
            delivery_callback: delivery_callback.unwrap_or_default(),
            context: context.unwrap_or_default(),
            title: title.unwrap_or_default(),
            title_callback: title_callback
                .unwrap_or_else(|| self.options.default_title_callback.clone()),
            title_arguments: title_arguments.unwrap_or_default(),
            theme_callback: theme_callback.unwrap_or_default(),
            theme_arguments: theme_arguments.unwrap_or_default(),
            menu_type,
            description: description.unwrap_or_default(),
            position: position.unwrap_or_default(),
            weight: weight.unwrap_or(0),
            include_file,
            file,
            file_path,
            module,
            visible: menu_type.is_visible(),
            is_tab,
            tab_parent,
            tab_root,
            fit: pattern.fit(),
            number_parts: pattern.number_parts(),
            path,
        }
    }

    /// Binds loaders, inheriting arguments from declared ancestors
    ///
    /// Explicit load arguments apply to every loader of the route. Without
    /// them, a loader picks up the arguments of the nearest ancestor loader
    /// with the same function at the same position.
    fn resolve_loaders(
        &self,
        trie: &RouterTrie,
        id: NodeId,
        pattern: &RoutePattern,
        load_arguments: Option<Vec<serde_json::Value>>,
    ) -> BTreeMap<usize, LoaderSpec> {
        pattern
            .load_functions()
            .into_iter()
            .map(|(position, function)| {
                let spec = match &load_arguments {
                    Some(arguments) => LoaderSpec::with_arguments(function, arguments.clone()),
                    None => trie
                        .declared_ancestors(id)
                        .filter_map(|ancestor| ancestor.loader_at(position))
                        .find(|loader| loader.function == function && loader.has_arguments())
                        .cloned()
                        .unwrap_or_else(|| LoaderSpec::new(function)),
                };
                (position, spec)
            })
            .collect()
    }

    /// `file` under `file_path`, else under the base path of `module`
    ///
    /// With neither base known the bare file name is returned.
    fn include_file(&self, file: &str, file_path: &str, module: &str) -> String {
        if file.is_empty() {
            return String::new();
        }

        let base = if file_path.is_empty() {
            self.resolver.module_path(module).unwrap_or_default()
        } else {
            file_path
        };

        if base.is_empty() {
            file.to_string()
        } else {
            format!("{base}/{file}")
        }
    }
}

/// Compiles `declarations` in one call
pub fn compile<R, I>(declarations: I, resolver: &R, options: &CompilerOptions) -> CompiledTable
where
    R: NameResolver + ?Sized,
    I: IntoIterator<Item = RouteDeclaration>,
{
    Compiler::new(resolver)
        .with_options(options.clone())
        .compile(declarations)
}
