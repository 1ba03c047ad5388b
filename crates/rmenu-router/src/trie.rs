/// Arena-backed router trie
///
/// Every distinct canonical prefix reached by a declared pattern owns one
/// [`TrieNode`]. Nodes live in a flat arena and refer to each other through
/// [`NodeId`]s, so a node can be rewritten while its ancestors are read.
///
/// All wildcard segments of a level collapse into one `%` child; literal
/// children sort before it.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::descriptor::RouteDescriptor;
use crate::route::{RoutePattern, Segment, WILDCARD};
use crate::tabs::{ActionSet, TabSet};

/// Index of a node in the trie arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node (empty prefix, never carries a route)
    pub const ROOT: NodeId = NodeId(0);
}

/// Child key of a trie node
///
/// Literal keys order before the wildcard key, so iterating children visits
/// literal matches first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKey {
    Literal(String),
    Wildcard,
}

impl SegmentKey {
    /// Key of a parsed segment
    pub fn of(segment: &Segment) -> Self {
        match segment {
            Segment::Literal(text) => SegmentKey::Literal(text.clone()),
            Segment::Wildcard { .. } => SegmentKey::Wildcard,
        }
    }

    /// Canonical text (`%` for the wildcard)
    pub fn as_str(&self) -> &str {
        match self {
            SegmentKey::Literal(text) => text,
            SegmentKey::Wildcard => WILDCARD,
        }
    }
}

/// One node of the router trie
#[derive(Debug, Clone)]
pub struct TrieNode {
    key: Option<SegmentKey>,
    parent: Option<NodeId>,
    depth: usize,
    path: String,
    children: BTreeMap<SegmentKey, NodeId>,
    pub(crate) descriptor: Option<RouteDescriptor>,
    pub(crate) load_functions: BTreeMap<usize, String>,
    pub(crate) to_arg_functions: BTreeMap<usize, String>,
    pub(crate) tabs: Option<TabSet>,
    pub(crate) actions: Option<ActionSet>,
}

impl TrieNode {
    fn new(key: Option<SegmentKey>, parent: Option<NodeId>, depth: usize, path: String) -> Self {
        Self {
            key,
            parent,
            depth,
            path,
            children: BTreeMap::new(),
            descriptor: None,
            load_functions: BTreeMap::new(),
            to_arg_functions: BTreeMap::new(),
            tabs: None,
            actions: None,
        }
    }

    /// Segment key (`None` for the root)
    pub fn key(&self) -> Option<&SegmentKey> {
        self.key.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Number of segments from the root
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Canonical path of this prefix
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.key, Some(SegmentKey::Wildcard))
    }

    pub fn children(&self) -> &BTreeMap<SegmentKey, NodeId> {
        &self.children
    }

    /// Route terminating exactly here
    pub fn descriptor(&self) -> Option<&RouteDescriptor> {
        self.descriptor.as_ref()
    }

    /// Loader bindings recorded when this prefix was created
    pub fn load_functions(&self) -> &BTreeMap<usize, String> {
        &self.load_functions
    }

    /// To-arg bindings recorded when this prefix was created
    pub fn to_arg_functions(&self) -> &BTreeMap<usize, String> {
        &self.to_arg_functions
    }

    pub fn tabs(&self) -> Option<&TabSet> {
        self.tabs.as_ref()
    }

    pub fn actions(&self) -> Option<&ActionSet> {
        self.actions.as_ref()
    }
}

/// Prefix trie over canonical route segments
#[derive(Debug, Clone)]
pub struct RouterTrie {
    nodes: Vec<TrieNode>,
    by_path: HashMap<String, NodeId>,
}

impl Default for RouterTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterTrie {
    /// Creates a trie holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(None, None, 0, String::new())],
            by_path: HashMap::new(),
        }
    }

    /// Walks (creating as needed) the nodes for `pattern`
    ///
    /// Each wildcard node records the loader/to-arg bound at its position by
    /// the first pattern that reaches it. Returns the terminal node.
    pub fn insert(&mut self, pattern: &RoutePattern) -> NodeId {
        pattern
            .segments()
            .iter()
            .enumerate()
            .fold(NodeId::ROOT, |current, (position, segment)| {
                let child = self.child_or_insert(current, SegmentKey::of(segment));
                let node = &mut self.nodes[child.0];
                if let Some(loader) = segment.loader() {
                    node.load_functions
                        .entry(position)
                        .or_insert_with(|| loader.to_string());
                }
                if let Some(to_arg) = segment.to_arg() {
                    node.to_arg_functions
                        .entry(position)
                        .or_insert_with(|| to_arg.to_string());
                }
                child
            })
    }

    fn child_or_insert(&mut self, parent: NodeId, key: SegmentKey) -> NodeId {
        if let Some(&existing) = self.nodes[parent.0].children.get(&key) {
            return existing;
        }

        let parent_node = &self.nodes[parent.0];
        let path = if parent == NodeId::ROOT {
            key.as_str().to_string()
        } else {
            format!("{}/{}", parent_node.path, key.as_str())
        };
        let depth = parent_node.depth + 1;

        let id = NodeId(self.nodes.len());
        self.nodes
            .push(TrieNode::new(Some(key.clone()), Some(parent), depth, path.clone()));
        self.nodes[parent.0].children.insert(key, id);
        self.by_path.entry(path).or_insert(id);
        id
    }

    /// Node by id
    ///
    /// Ids are only handed out by this trie, so indexing cannot go out of
    /// bounds for ids obtained from it.
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id.0]
    }

    /// Node whose canonical path is `path`
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Direct children of `id` in key order (literals first)
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TrieNode)> {
        self.node(id)
            .children
            .values()
            .map(move |&child| (child, self.node(child)))
    }

    /// Child of `id` under `key`
    pub fn child(&self, id: NodeId, key: &SegmentKey) -> Option<NodeId> {
        self.node(id).children.get(key).copied()
    }

    /// Strict ancestors of `id`, nearest first, root excluded
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).parent, move |&current| self.node(current).parent)
            .filter(|&ancestor| ancestor != NodeId::ROOT)
    }

    /// Descriptors of the declared ancestors of `id`, nearest first
    pub fn declared_ancestors(&self, id: NodeId) -> impl Iterator<Item = &RouteDescriptor> + '_ {
        self.ancestors(id)
            .filter_map(move |ancestor| self.node(ancestor).descriptor())
    }

    /// Nearest ancestor of `id` carrying a descriptor
    pub fn declared_parent(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors(id)
            .find(|&ancestor| self.node(ancestor).descriptor.is_some())
    }

    /// All node ids in breadth-first order (parents before children)
    pub fn ids_by_depth(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([NodeId::ROOT]);

        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.node(id).children.values().copied());
        }

        order
    }

    /// Nodes carrying a descriptor, breadth-first
    pub fn declared(&self) -> impl Iterator<Item = (NodeId, &TrieNode)> {
        self.ids_by_depth()
            .into_iter()
            .map(move |id| (id, self.node(id)))
            .filter(|(_, node)| node.descriptor.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FunctionTable;

    fn functions() -> FunctionTable {
        FunctionTable::new().with_functions(["node_load", "user_load"])
    }

    fn insert(trie: &mut RouterTrie, raw: &str) -> NodeId {
        trie.insert(&RoutePattern::parse(raw, &functions()))
    }

    #[test]
    fn test_insert_creates_prefix_nodes() {
        let mut trie = RouterTrie::new();
        let id = insert(&mut trie, "admin/config/system");

        assert_eq!(trie.len(), 4);
        assert_eq!(trie.node(id).path(), "admin/config/system");
        assert_eq!(trie.node(id).depth(), 3);
        assert_eq!(trie.find("admin/config"), trie.node(id).parent());
    }

    #[test]
    fn test_insert_shares_prefixes() {
        let mut trie = RouterTrie::new();
        let a = insert(&mut trie, "admin/people");
        let b = insert(&mut trie, "admin/content");

        assert_ne!(a, b);
        assert_eq!(trie.node(a).parent(), trie.node(b).parent());
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_wildcards_collapse() {
        let mut trie = RouterTrie::new();
        let a = insert(&mut trie, "a/%node/b");
        let c = insert(&mut trie, "a/%user/c");

        let root_a = trie.find("a").unwrap();
        let wildcard_children: Vec<_> = trie
            .children(root_a)
            .filter(|(_, node)| node.is_wildcard())
            .collect();
        assert_eq!(wildcard_children.len(), 1);
        assert_eq!(trie.node(a).path(), "a/%/b");
        assert_eq!(trie.node(c).path(), "a/%/c");
    }

    #[test]
    fn test_first_binding_recorded() {
        let mut trie = RouterTrie::new();
        insert(&mut trie, "a/%node/b");
        insert(&mut trie, "a/%user/c");

        let wildcard = trie.find("a/%").unwrap();
        assert_eq!(
            trie.node(wildcard).load_functions().get(&1).map(String::as_str),
            Some("node_load")
        );
    }

    #[test]
    fn test_literal_children_sort_first() {
        let mut trie = RouterTrie::new();
        insert(&mut trie, "node/%node");
        insert(&mut trie, "node/add");

        let node = trie.find("node").unwrap();
        let keys: Vec<&str> = trie
            .children(node)
            .map(|(_, child)| child.key().unwrap().as_str())
            .collect();
        assert_eq!(keys, vec!["add", "%"]);
    }

    #[test]
    fn test_ids_by_depth_orders_parents_first() {
        let mut trie = RouterTrie::new();
        insert(&mut trie, "a/b/c");
        insert(&mut trie, "x");

        let depths: Vec<usize> = trie
            .ids_by_depth()
            .into_iter()
            .map(|id| trie.node(id).depth())
            .collect();
        let mut sorted = depths.clone();
        sorted.sort_unstable();
        assert_eq!(depths, sorted);
    }

    #[test]
    fn test_ancestors_exclude_root() {
        let mut trie = RouterTrie::new();
        let id = insert(&mut trie, "a/b/c");

        let paths: Vec<&str> = trie.ancestors(id).map(|a| trie.node(a).path()).collect();
        assert_eq!(paths, vec!["a/b", "a"]);
    }
}
