/// Local task and local action derivation
///
/// After every route is resolved, each declared node looks at its direct
/// declared children and sorts them into tabs and actions:
///
/// - inline-context children and non-tab types are skipped
/// - `LINKS_TO_PARENT` children become the default tab, linking to the parent
/// - `LOCAL_ACTION` children become action links
/// - everything else becomes a regular tab
///
/// Which tab is *active* depends on the request being served and is left to
/// the dispatcher; here the default tab is only marked `is_default_tab`.

use serde::{Deserialize, Serialize};

use crate::descriptor::RouteDescriptor;
use crate::flags::MenuContext;
use crate::trie::{NodeId, RouterTrie};

/// A tab under a parent route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabEntry {
    /// Link target; the parent's path for the default tab
    pub href: String,
    /// Whether this tab stands for the parent page itself
    pub is_default_tab: bool,
    pub route: RouteDescriptor,
}

/// An action link under a parent route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub href: String,
    pub route: RouteDescriptor,
}

/// Ordered tabs of one parent, default tab included
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabSet {
    pub tabs: Vec<TabEntry>,
}

impl TabSet {
    /// The tab linking to the parent, if declared
    pub fn default_tab(&self) -> Option<&TabEntry> {
        self.tabs.iter().find(|tab| tab.is_default_tab)
    }

    /// Regular tabs (default tab excluded)
    pub fn local_tasks(&self) -> impl Iterator<Item = &TabEntry> {
        self.tabs.iter().filter(|tab| !tab.is_default_tab)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

/// Ordered action links of one parent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionSet {
    pub actions: Vec<ActionEntry>,
}

impl ActionSet {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Derives tab and action sets for every declared node of `trie`
///
/// Returns the number of parents that received a tab or action set.
pub fn derive_local_tasks(trie: &mut RouterTrie) -> usize {
    let view: &RouterTrie = trie;
    let derived: Vec<(NodeId, Option<TabSet>, Option<ActionSet>)> = view
        .declared()
        .map(|(id, _)| {
            let (tabs, actions) = derive_for(view, id);
            (id, tabs, actions)
        })
        .filter(|(_, tabs, actions)| tabs.is_some() || actions.is_some())
        .collect();

    let parents = derived.len();
    for (id, tabs, actions) in derived {
        let node = trie.node_mut(id);
        node.tabs = tabs;
        node.actions = actions;
    }

    tracing::debug!(parents, "derived local tasks");
    parents
}

/// Classifies the direct declared children of `parent`
fn derive_for(trie: &RouterTrie, parent: NodeId) -> (Option<TabSet>, Option<ActionSet>) {
    let mut tabs = Vec::new();
    let mut actions = Vec::new();

    let routes = trie
        .children(parent)
        .filter_map(|(_, child)| child.descriptor())
        .filter(|route| route.context != MenuContext::Inline)
        .filter(|route| route.menu_type.is_local_task());

    for route in routes {
        if route.menu_type.links_to_parent() {
            tabs.push(TabEntry {
                href: default_tab_href(trie, parent),
                is_default_tab: true,
                route: route.clone(),
            });
        } else if route.menu_type.is_local_action() {
            actions.push(ActionEntry {
                href: route.path.clone(),
                route: route.clone(),
            });
        } else {
            tabs.push(TabEntry {
                href: route.path.clone(),
                is_default_tab: false,
                route: route.clone(),
            });
        }
    }

    tabs.sort_by(|a, b| display_order(&a.route, &b.route));
    actions.sort_by(|a, b| display_order(&a.route, &b.route));

    let tabs = (!tabs.is_empty()).then_some(TabSet { tabs });
    let actions = (!actions.is_empty()).then_some(ActionSet { actions });
    (tabs, actions)
}

/// Path the default tab of `parent` links to
///
/// When the parent is itself a default tab, keep climbing to the first
/// declared ancestor that is not.
fn default_tab_href(trie: &RouterTrie, parent: NodeId) -> String {
    let mut current = parent;
    loop {
        let node = trie.node(current);
        let links_up = node
            .descriptor()
            .is_some_and(|route| route.menu_type.links_to_parent());

        match trie.declared_parent(current) {
            Some(up) if links_up => current = up,
            _ => return node.path().to_string(),
        }
    }
}

fn display_order(a: &RouteDescriptor, b: &RouteDescriptor) -> std::cmp::Ordering {
    a.weight
        .cmp(&b.weight)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.path.cmp(&b.path))
}
