/// Compiled router table
///
/// Read-side API over a built trie: routes by canonical path, their tabs and
/// actions, runtime path resolution, and emission to a sink.

use std::collections::BTreeMap;

use crate::descriptor::RouteDescriptor;
use crate::emit::{emit_trie, EmitReport, TableSink};
use crate::route::parser::split_parts;
use crate::route::DEFAULT_MAX_PARTS;
use crate::tabs::{ActionSet, TabSet};
use crate::trie::{NodeId, RouterTrie, SegmentKey};

/// A runtime path resolved against the table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    /// Parts of the runtime path, folded at the table's part limit
    pub args: Vec<String>,
    /// Positions of the route's wildcard segments
    wildcards: Vec<usize>,
}

impl<'a> RouteMatch<'a> {
    /// Runtime values at the route's wildcard positions
    pub fn wildcard_args(&self) -> BTreeMap<usize, &str> {
        self.wildcards
            .iter()
            .filter_map(|&position| {
                self.args
                    .get(position)
                    .map(|arg| (position, arg.as_str()))
            })
            .collect()
    }

    /// Parts beyond the route's own, passed on as extra page arguments
    pub fn extra_args(&self) -> &[String] {
        self.args
            .get(self.route.number_parts..)
            .unwrap_or_default()
    }
}

/// Result of a compile
#[derive(Debug, Clone)]
pub struct CompiledTable {
    trie: RouterTrie,
    max_parts: usize,
}

impl Default for CompiledTable {
    fn default() -> Self {
        Self::new(RouterTrie::new(), DEFAULT_MAX_PARTS)
    }
}

impl CompiledTable {
    pub(crate) fn new(trie: RouterTrie, max_parts: usize) -> Self {
        Self { trie, max_parts }
    }

    /// Part limit the table was compiled with
    pub fn max_parts(&self) -> usize {
        self.max_parts
    }

    /// Route declared at a canonical path (`node/%/edit`)
    pub fn get(&self, path: &str) -> Option<&RouteDescriptor> {
        self.trie
            .find(path)
            .and_then(|id| self.trie.node(id).descriptor())
    }

    /// Tabs under a canonical path
    pub fn tabs(&self, path: &str) -> Option<&TabSet> {
        self.trie.find(path).and_then(|id| self.trie.node(id).tabs())
    }

    /// Actions under a canonical path
    pub fn actions(&self, path: &str) -> Option<&ActionSet> {
        self.trie
            .find(path)
            .and_then(|id| self.trie.node(id).actions())
    }

    /// Every route, parents before children
    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.trie
            .declared()
            .filter_map(|(_, node)| node.descriptor())
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.routes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.routes().next().is_none()
    }

    pub fn trie(&self) -> &RouterTrie {
        &self.trie
    }

    /// Resolves a runtime path such as `node/5/edit`
    ///
    /// Literal children are tried before the wildcard child at every level,
    /// backtracking when a branch dead-ends, so the most specific route
    /// wins. When no route covers the whole path, the longest prefix with a
    /// route is used and the remaining parts become extra arguments.
    ///
    /// The runtime path is split at the same part limit as the patterns, so
    /// a folded last part matches the folded route segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use rmenu_router::{Compiler, FunctionTable, RouteDeclaration};
    ///
    /// let functions = FunctionTable::new().with_function("node_load");
    /// let table = Compiler::new(&functions).compile(vec![
    ///     RouteDeclaration::new("node/%node").with_page_callback("node_page_view"),
    ///     RouteDeclaration::new("node/add").with_page_callback("node_add_page"),
    /// ]);
    ///
    /// assert_eq!(table.lookup("node/add").unwrap().route.path, "node/add");
    /// assert_eq!(table.lookup("node/7").unwrap().route.path, "node/%");
    /// assert_eq!(table.lookup("node/7/revisions").unwrap().extra_args(), ["revisions"]);
    /// ```
    pub fn lookup(&self, runtime_path: &str) -> Option<RouteMatch<'_>> {
        let parts = split_parts(runtime_path, self.max_parts);

        (1..=parts.len()).rev().find_map(|len| {
            let id = self.descend(NodeId::ROOT, &parts[..len])?;
            let route = self.trie.node(id).descriptor()?;
            tracing::trace!(runtime_path, route = %route.path, "resolved path");
            Some(RouteMatch {
                route,
                args: parts.iter().map(|part| part.to_string()).collect(),
                wildcards: self.wildcard_positions(id),
            })
        })
    }

    /// Positions of wildcard keys on the way from the root to `id`
    fn wildcard_positions(&self, id: NodeId) -> Vec<usize> {
        let mut positions: Vec<usize> = std::iter::once(id)
            .chain(self.trie.ancestors(id))
            .map(|node| self.trie.node(node))
            .filter(|node| node.is_wildcard())
            .map(|node| node.depth() - 1)
            .collect();
        positions.reverse();
        positions
    }

    /// Declared node matching `parts` exactly below `id`
    fn descend(&self, id: NodeId, parts: &[&str]) -> Option<NodeId> {
        let Some((first, rest)) = parts.split_first() else {
            return self.trie.node(id).descriptor().map(|_| id);
        };

        let literal = SegmentKey::Literal(first.to_string());
        [literal, SegmentKey::Wildcard]
            .iter()
            .filter_map(|key| self.trie.child(id, key))
            .find_map(|child| self.descend(child, rest))
    }

    /// Writes every route, tab set and action set to `sink`
    pub fn emit<S: TableSink + ?Sized>(&self, sink: &mut S) -> EmitReport {
        emit_trie(&self.trie, sink)
    }
}
