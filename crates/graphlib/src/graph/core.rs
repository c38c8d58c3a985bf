//! The `Graph` container itself.
//!
//! Storage favors the insertion-order semantics a JS `Map`-backed graphlib gives callers: node
//! and edge iteration order matches the order things were first added, not some hash order.
//! Several layout algorithms built on top of this container rely on that for determinism (ties
//! are broken by "whichever came first"), so this isn't just cosmetic.

use super::edge_key::EdgeKeyView;
use super::entries::{EdgeEntry, NodeEntry};
use super::options::GraphOptions;
use super::EdgeKey;
use rustc_hash::{FxBuildHasher, FxHashMap};

type EdgeMap<E> = hashbrown::HashMap<EdgeKey, EdgeEntry<E>, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Graph<N, E, G> {
    options: GraphOptions,
    label: G,

    node_order: Vec<String>,
    nodes: FxHashMap<String, NodeEntry<N>>,
    parent_of: FxHashMap<String, String>,
    children_of: FxHashMap<Option<String>, Vec<String>>,

    edge_order: Vec<EdgeKey>,
    edges: EdgeMap<E>,
    out_adj: FxHashMap<String, Vec<EdgeKey>>,
    in_adj: FxHashMap<String, Vec<EdgeKey>>,

    #[allow(clippy::type_complexity)]
    default_node_label: Option<std::rc::Rc<dyn Fn() -> N>>,
    #[allow(clippy::type_complexity)]
    default_edge_label: Option<std::rc::Rc<dyn Fn() -> E>>,
}

impl<N, E, G: Default> Graph<N, E, G> {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            label: G::default(),
            node_order: Vec::new(),
            nodes: FxHashMap::default(),
            parent_of: FxHashMap::default(),
            children_of: FxHashMap::default(),
            edge_order: Vec::new(),
            edges: EdgeMap::default(),
            out_adj: FxHashMap::default(),
            in_adj: FxHashMap::default(),
            default_node_label: None,
            default_edge_label: None,
        }
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    pub fn set_graph(&mut self, label: G) {
        self.label = label;
    }

    pub fn set_default_node_label(&mut self, f: impl Fn() -> N + 'static) {
        self.default_node_label = Some(std::rc::Rc::new(f));
    }

    pub fn set_default_edge_label(&mut self, f: impl Fn() -> E + 'static) {
        self.default_edge_label = Some(std::rc::Rc::new(f));
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(|s| s.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.node_order.clone()
    }

    pub fn has_node(&self, v: &str) -> bool {
        self.nodes.contains_key(v)
    }

    pub fn node(&self, v: &str) -> Option<&N> {
        self.nodes.get(v).map(|e| &e.label)
    }

    pub fn node_mut(&mut self, v: &str) -> Option<&mut N> {
        self.nodes.get_mut(v).map(|e| &mut e.label)
    }

    /// Inserts or overwrites a node's label. Preserves the node's current parent, if any.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut N {
        let id = id.into();
        if let Some(entry) = self.nodes.get_mut(&id) {
            entry.label = label;
        } else {
            self.node_order.push(id.clone());
            self.children_of.entry(None).or_default().push(id.clone());
            self.nodes.insert(
                id.clone(),
                NodeEntry {
                    id: id.clone(),
                    label,
                },
            );
        }
        &mut self.nodes.get_mut(&id).expect("just inserted").label
    }

    fn ensure_node_default(&mut self, id: &str)
    where
        N: Default,
    {
        if self.has_node(id) {
            return;
        }
        let label = match &self.default_node_label {
            Some(f) => f(),
            None => N::default(),
        };
        self.set_node(id.to_string(), label);
    }

    /// Removes a node along with every edge touching it. Any children of `v` are reparented to
    /// the root, matching the conventional `removeNode` semantics of a compound graph container.
    pub fn remove_node(&mut self, v: &str) -> Option<N> {
        if !self.nodes.contains_key(v) {
            return None;
        }

        let children: Vec<String> = self
            .children_of
            .get(&Some(v.to_string()))
            .cloned()
            .unwrap_or_default();
        for child in &children {
            self.set_parent_unchecked(child, None);
        }
        self.children_of.remove(&Some(v.to_string()));

        if let Some(parent) = self.parent_of.remove(v) {
            if let Some(siblings) = self.children_of.get_mut(&Some(parent)) {
                siblings.retain(|c| c != v);
            }
        } else if let Some(roots) = self.children_of.get_mut(&None) {
            roots.retain(|c| c != v);
        }

        let out: Vec<EdgeKey> = self.out_adj.remove(v).unwrap_or_default();
        let in_: Vec<EdgeKey> = self.in_adj.remove(v).unwrap_or_default();
        for ek in out.into_iter().chain(in_) {
            self.remove_edge(&ek.v, &ek.w, ek.name.as_deref());
        }

        self.node_order.retain(|id| id != v);
        self.nodes.remove(v).map(|e| e.label)
    }

    fn set_parent_unchecked(&mut self, v: &str, parent: Option<&str>) {
        let old_parent = self.parent_of.remove(v);
        match &old_parent {
            Some(p) => {
                if let Some(siblings) = self.children_of.get_mut(&Some(p.clone())) {
                    siblings.retain(|c| c != v);
                }
            }
            None => {
                if let Some(roots) = self.children_of.get_mut(&None) {
                    roots.retain(|c| c != v);
                }
            }
        }

        match parent {
            Some(p) => {
                self.parent_of.insert(v.to_string(), p.to_string());
                self.children_of
                    .entry(Some(p.to_string()))
                    .or_default()
                    .push(v.to_string());
            }
            None => {
                self.children_of.entry(None).or_default().push(v.to_string());
            }
        }
    }

    /// Sets `v`'s parent, creating `v` and `parent` with default labels if either is missing.
    pub fn set_parent(&mut self, v: &str, parent: Option<&str>)
    where
        N: Default,
    {
        self.ensure_node_default(v);
        if let Some(p) = parent {
            self.ensure_node_default(p);
        }
        self.set_parent_unchecked(v, parent);
    }

    pub fn parent(&self, v: &str) -> Option<&str> {
        self.parent_of.get(v).map(|s| s.as_str())
    }

    pub fn children(&self, v: &str) -> Vec<&str> {
        self.children_of
            .get(&Some(v.to_string()))
            .map(|c| c.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn children_root(&self) -> Vec<&str> {
        self.children_of
            .get(&None)
            .map(|c| c.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        if let Some(edges) = self.in_adj.get(v) {
            for ek in edges {
                if seen.insert(ek.v.as_str()) {
                    out.push(ek.v.as_str());
                }
            }
        }
        out
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        if let Some(edges) = self.out_adj.get(v) {
            for ek in edges {
                if seen.insert(ek.w.as_str()) {
                    out.push(ek.w.as_str());
                }
            }
        }
        out
    }

    pub fn first_predecessor(&self, v: &str) -> Option<&str> {
        self.in_adj.get(v).and_then(|e| e.first()).map(|ek| ek.v.as_str())
    }

    pub fn sources(&self) -> Vec<&str> {
        self.node_order
            .iter()
            .filter(|v| self.in_adj.get(v.as_str()).map(|e| e.is_empty()).unwrap_or(true))
            .map(|s| s.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        self.node_order
            .iter()
            .filter(|v| self.out_adj.get(v.as_str()).map(|e| e.is_empty()).unwrap_or(true))
            .map(|s| s.as_str())
            .collect()
    }

    /// Union of predecessors and successors, deduplicated, predecessors first.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        for w in self.predecessors(v).into_iter().chain(self.successors(v)) {
            if seen.insert(w) {
                out.push(w);
            }
        }
        out
    }

    /// Every edge with `v` as an endpoint, in or out, in no particular order.
    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let mut out = self.out_edges(v, None);
        out.extend(self.in_edges(v, None));
        out
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edge_order.iter()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edge_order.clone()
    }

    fn lookup(&self, v: &str, w: &str, name: Option<&str>) -> Option<&EdgeKey> {
        let view = EdgeKeyView { v, w, name };
        self.edges.get(&view).map(|e| &e.key)
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        let view = EdgeKeyView { v, w, name };
        self.edges.contains_key(&view)
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let view = EdgeKeyView { v, w, name };
        self.edges.get(&view).map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let view = EdgeKeyView { v, w, name };
        self.edges.get_mut(&view).map(|e| &mut e.label)
    }

    pub fn edge_by_key(&self, ek: &EdgeKey) -> Option<&E> {
        self.edge(&ek.v, &ek.w, ek.name.as_deref())
    }

    pub fn edge_mut_by_key(&mut self, ek: &EdgeKey) -> Option<&mut E> {
        self.edge_mut(&ek.v, &ek.w, ek.name.as_deref())
    }

    /// Inserts or overwrites an edge, auto-creating missing endpoints with default node labels.
    pub fn set_edge_with_label(&mut self, v: impl Into<String>, w: impl Into<String>, label: E)
    where
        N: Default,
    {
        let v = v.into();
        let w = w.into();
        self.ensure_node_default(&v);
        self.ensure_node_default(&w);

        // Plain v/w edges always use an unnamed key; callers that need parallel edges between
        // the same pair in a multigraph go through `set_edge_key` with an explicit name.
        let name: Option<String> = None;

        if let Some(existing) = self.lookup(&v, &w, name.as_deref()).cloned() {
            if let Some(e) = self.edges.get_mut(&existing) {
                e.label = label;
            }
            return;
        }

        let key = EdgeKey::new(v.clone(), w.clone(), name);
        self.edge_order.push(key.clone());
        self.out_adj.entry(v.clone()).or_default().push(key.clone());
        self.in_adj.entry(w.clone()).or_default().push(key.clone());
        self.edges.insert(key.clone(), EdgeEntry { key, label });
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E)
    where
        N: Default,
    {
        self.ensure_node_default(&key.v);
        self.ensure_node_default(&key.w);

        if let Some(existing) = self.lookup(&key.v, &key.w, key.name.as_deref()).cloned() {
            if let Some(e) = self.edges.get_mut(&existing) {
                e.label = label;
            }
            return;
        }

        self.edge_order.push(key.clone());
        self.out_adj.entry(key.v.clone()).or_default().push(key.clone());
        self.in_adj.entry(key.w.clone()).or_default().push(key.clone());
        self.edges.insert(key.clone(), EdgeEntry { key, label });
    }

    /// Inserts an edge using the default edge label factory (or `E::default()`), auto-creating
    /// missing endpoints.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>)
    where
        N: Default,
        E: Default,
    {
        let label = match &self.default_edge_label {
            Some(f) => f(),
            None => E::default(),
        };
        self.set_edge_with_label(v, w, label);
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<E> {
        let key = self.lookup(v, w, name)?.clone();
        if let Some(edges) = self.out_adj.get_mut(&key.v) {
            edges.retain(|e| e != &key);
        }
        if let Some(edges) = self.in_adj.get_mut(&key.w) {
            edges.retain(|e| e != &key);
        }
        self.edge_order.retain(|e| e != &key);
        self.edges.remove(&key).map(|e| e.label)
    }

    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        self.out_adj
            .get(v)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|ek| w.is_none_or(|w| ek.w == w))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn in_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        self.in_adj
            .get(v)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|ek| w.is_none_or(|w| ek.v == w))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Convenience used throughout tests: creates a path of nodes connected by default-labeled
    /// edges, auto-vivifying nodes that don't already exist.
    pub fn set_path(&mut self, path: &[&str])
    where
        N: Default,
        E: Default,
    {
        for pair in path.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
    }
}
