use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use log::trace;

use crate::error::GraphError;
use crate::search;

/// Internal node handle: an index into the graph's node arena.
///
/// Handles give every live vertex a stable identity that is independent of
/// the vertex value's own equality contract: two handles name the same
/// node exactly when they are equal.
pub(crate) type NodeId = usize;

/// Weight assigned to an edge when none is specified.
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// Whether edges form ordered pairs or unordered pairs.
///
/// Selected at construction, the orientation decides how connect,
/// disconnect, and edge lookup mirror across the two endpoints and how
/// edge identity is canonicalized. All traversal and path-finding logic is
/// orientation-agnostic: it walks whatever adjacency each node exposes,
/// which already encodes the right semantics by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// An edge from a to b is distinct from an edge from b to a.
    Directed,
    /// An edge between a and b is the same edge as between b and a;
    /// the weight is shared and both adjacency records mirror it.
    Undirected,
}

impl Orientation {
    /// Canonical identity of the edge between two nodes. For undirected
    /// graphs the key is symmetric in its endpoints.
    fn key(self, a: NodeId, b: NodeId) -> EdgeKey {
        match self {
            Orientation::Directed => EdgeKey { a, b },
            Orientation::Undirected => EdgeKey {
                a: a.min(b),
                b: a.max(b),
            },
        }
    }
}

/// Canonical edge identity within the global edge index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    a: NodeId,
    b: NodeId,
}

/// A weighted arc stored once in the global edge index. `a` and `b` are
/// kept in the order the edge was first added, also for undirected graphs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Connection {
    pub(crate) a: NodeId,
    pub(crate) b: NodeId,
    pub(crate) weight: f32,
}

/// Per-vertex adjacency record.
///
/// `adjacency` holds outgoing connections in insertion order; for the
/// undirected variant both endpoints list each other. `incoming` is the
/// reverse index, maintained for directed graphs only, so vertex removal
/// can strip incoming edges in O(degree).
#[derive(Debug, Clone)]
struct AdjacencyNode<V> {
    value: V,
    adjacency: IndexSet<NodeId>,
    incoming: IndexSet<NodeId>,
}

/// A read-only view of one edge: both endpoint values and the weight.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'g, V> {
    pub a: &'g V,
    pub b: &'g V,
    pub weight: f32,
}

/// A generic in-memory graph over an arbitrary vertex type `V`.
///
/// Vertices are identified by value (`Eq + Hash`); at most one edge exists
/// per ordered (directed) or unordered (undirected) pair, and self loops
/// are rejected. Vertices and edges iterate in insertion order unless
/// re-sorted with [`Graph::sort_vertices_by`] / [`Graph::sort_edges_by`].
///
/// Shortest path (A*/Dijkstra), bounded breadth/depth-first traversal and
/// cycle detection are built in and operate on the live structure.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    orientation: Orientation,
    /// Vertex value -> node handle, in insertion order.
    index: IndexMap<V, NodeId>,
    /// Node arena; a slot is `None` after its vertex was removed and may
    /// be recycled through `free`.
    nodes: Vec<Option<AdjacencyNode<V>>>,
    free: Vec<NodeId>,
    /// Global edge index in insertion order, keyed by canonical identity.
    edges: IndexMap<EdgeKey, Connection>,
}

fn live<V>(nodes: &[Option<AdjacencyNode<V>>], id: NodeId) -> &AdjacencyNode<V> {
    nodes[id].as_ref().expect("dangling node handle")
}

fn live_mut<V>(nodes: &mut [Option<AdjacencyNode<V>>], id: NodeId) -> &mut AdjacencyNode<V> {
    nodes[id].as_mut().expect("dangling node handle")
}

impl<V: Eq + Hash + Clone> Graph<V> {
    /// Create an empty graph with the given edge orientation.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            index: IndexMap::new(),
            nodes: Vec::new(),
            free: Vec::new(),
            edges: IndexMap::new(),
        }
    }

    /// Create an empty graph whose edges are ordered pairs.
    pub fn directed() -> Self {
        Self::new(Orientation::Directed)
    }

    /// Create an empty graph whose edges are unordered pairs.
    pub fn undirected() -> Self {
        Self::new(Orientation::Undirected)
    }

    //--------------------
    //  Mutation
    //--------------------

    /// Add a vertex.
    ///
    /// Returns true if the vertex was not already in the graph, false
    /// otherwise (the graph is unchanged in that case).
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.index.contains_key(&v) {
            return false;
        }
        let node = AdjacencyNode {
            value: v.clone(),
            adjacency: IndexSet::new(),
            incoming: IndexSet::new(),
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.index.insert(v, id);
        true
    }

    /// Add every vertex in the iterator, skipping ones already present.
    pub fn add_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = V>,
    {
        for v in vertices {
            self.add_vertex(v);
        }
    }

    /// Remove a vertex and every edge incident to it, incoming and
    /// outgoing, from the global index and from neighbors' adjacency
    /// records alike.
    ///
    /// Returns true if the vertex was in the graph, false otherwise.
    pub fn remove_vertex(&mut self, v: &V) -> bool {
        let Some(id) = self.index.shift_remove(v) else {
            return false;
        };
        let node = self.nodes[id].take().expect("dangling node handle");
        trace!(
            "removing node {} with {} outgoing / {} incoming edges",
            id,
            node.adjacency.len(),
            node.incoming.len()
        );
        for &t in &node.adjacency {
            self.edges.shift_remove(&self.orientation.key(id, t));
            if let Some(other) = self.nodes[t].as_mut() {
                match self.orientation {
                    Orientation::Directed => other.incoming.shift_remove(&id),
                    Orientation::Undirected => other.adjacency.shift_remove(&id),
                };
            }
        }
        for &s in &node.incoming {
            self.edges.shift_remove(&self.orientation.key(s, id));
            if let Some(other) = self.nodes[s].as_mut() {
                other.adjacency.shift_remove(&id);
            }
        }
        self.free.push(id);
        true
    }

    /// Remove every vertex in the iterator, with cascading edge cleanup.
    pub fn remove_vertices<'a, I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        for v in vertices {
            self.remove_vertex(v);
        }
    }

    /// Add an edge from a to b with the default weight of 1.
    ///
    /// If the pair is already connected, the existing edge's weight is set
    /// to 1 instead; no duplicate is created. For undirected graphs the
    /// mirrored adjacency record at b is created or updated as well.
    pub fn add_edge(&mut self, a: &V, b: &V) -> Result<EdgeRef<'_, V>, GraphError> {
        self.add_edge_weighted(a, b, DEFAULT_WEIGHT)
    }

    /// Add an edge from a to b with the specified weight, or update the
    /// existing edge's weight in place.
    ///
    /// Fails with [`GraphError::SelfLoop`] when a equals b (checked before
    /// registration) and with [`GraphError::VertexNotInGraph`] when either
    /// endpoint was never added.
    pub fn add_edge_weighted(
        &mut self,
        a: &V,
        b: &V,
        weight: f32,
    ) -> Result<EdgeRef<'_, V>, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop);
        }
        let (ia, ib) = self.endpoints(a, b)?;
        let key = self.connect(ia, ib, weight);
        Ok(self.edge_view(&self.edges[&key]))
    }

    /// Remove the edge from a to b (for undirected graphs, the edge
    /// between a and b, from both adjacency records).
    ///
    /// Returns whether an edge existed and was removed.
    pub fn remove_edge(&mut self, a: &V, b: &V) -> Result<bool, GraphError> {
        let (ia, ib) = self.endpoints(a, b)?;
        let key = self.orientation.key(ia, ib);
        if self.edges.shift_remove(&key).is_none() {
            return Ok(false);
        }
        trace!("disconnect {} / {}", ia, ib);
        match self.orientation {
            Orientation::Directed => {
                live_mut(&mut self.nodes, ia).adjacency.shift_remove(&ib);
                live_mut(&mut self.nodes, ib).incoming.shift_remove(&ia);
            }
            Orientation::Undirected => {
                live_mut(&mut self.nodes, ia).adjacency.shift_remove(&ib);
                live_mut(&mut self.nodes, ib).adjacency.shift_remove(&ia);
            }
        }
        Ok(true)
    }

    /// Remove every edge; vertices are kept.
    pub fn remove_all_edges(&mut self) {
        self.edges.clear();
        for node in self.nodes.iter_mut().flatten() {
            node.adjacency.clear();
            node.incoming.clear();
        }
    }

    /// Remove every vertex and every edge.
    pub fn remove_all_vertices(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.free.clear();
        self.edges.clear();
    }

    /// Re-order the vertices with the provided comparator. The new order
    /// is reflected by [`Graph::vertices`] and by algorithms that iterate
    /// over all vertices, such as cycle detection.
    pub fn sort_vertices_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        self.index.sort_by(|a, _, b, _| cmp(a, b));
    }

    /// Re-order the edges with the provided comparator. The new order is
    /// reflected by [`Graph::edges`] and by traversal expansion order:
    /// per-node adjacency records are re-synchronized to the sorted order.
    pub fn sort_edges_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(EdgeRef<'_, V>, EdgeRef<'_, V>) -> Ordering,
    {
        let nodes = &self.nodes;
        self.edges.sort_by(|_, c1, _, c2| {
            let e1 = EdgeRef {
                a: &live(nodes, c1.a).value,
                b: &live(nodes, c1.b).value,
                weight: c1.weight,
            };
            let e2 = EdgeRef {
                a: &live(nodes, c2.a).value,
                b: &live(nodes, c2.b).value,
                weight: c2.weight,
            };
            cmp(e1, e2)
        });
        self.resync_adjacency();
    }

    //--------------------
    //  Queries
    //--------------------

    /// Check whether the graph contains a vertex.
    pub fn contains(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    /// Check whether the edge from a to b is in the graph. For undirected
    /// graphs this is symmetric in a and b.
    pub fn edge_exists(&self, a: &V, b: &V) -> Result<bool, GraphError> {
        let (ia, ib) = self.endpoints(a, b)?;
        Ok(self.edges.contains_key(&self.orientation.key(ia, ib)))
    }

    /// Retrieve the edge from a to b, or `None` if the pair is not
    /// connected.
    pub fn get_edge(&self, a: &V, b: &V) -> Result<Option<EdgeRef<'_, V>>, GraphError> {
        let (ia, ib) = self.endpoints(a, b)?;
        Ok(self
            .edges
            .get(&self.orientation.key(ia, ib))
            .map(|c| self.edge_view(c)))
    }

    /// Iterate the edges that have v as a source, in insertion order. The
    /// queried vertex is always presented as endpoint `a`.
    pub fn edges_of(&self, v: &V) -> Result<impl Iterator<Item = EdgeRef<'_, V>> + '_, GraphError> {
        let Some(&id) = self.index.get(v) else {
            return Err(GraphError::VertexNotInGraph);
        };
        let node = live(&self.nodes, id);
        Ok(node.adjacency.iter().map(move |&t| EdgeRef {
            a: &node.value,
            b: &live(&self.nodes, t).value,
            weight: self.edges[&self.orientation.key(id, t)].weight,
        }))
    }

    /// Iterate every edge in the graph in insertion order. Each edge
    /// appears exactly once, also for undirected graphs.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, V>> + '_ {
        self.edges.values().map(move |c| self.edge_view(c))
    }

    /// Iterate every vertex in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.index.keys()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether edges form ordered pairs.
    pub fn is_directed(&self) -> bool {
        self.orientation == Orientation::Directed
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    //--------------------
    //  Algorithms
    //--------------------

    /// Find a shortest path from start to target using Dijkstra's
    /// algorithm, returned as the ordered vertices of the path including
    /// both endpoints. An empty vector means no path exists.
    ///
    /// Weights are assumed non-negative; the result is undefined
    /// otherwise.
    pub fn find_shortest_path(&self, start: &V, target: &V) -> Result<Vec<V>, GraphError> {
        self.find_shortest_path_with(start, target, |_, _| 0.0)
    }

    /// Find a shortest path from start to target using A* search with the
    /// provided heuristic. `heuristic(v, target)` estimates the remaining
    /// cost from v; the zero heuristic reduces the search to Dijkstra's
    /// algorithm.
    pub fn find_shortest_path_with<H>(
        &self,
        start: &V,
        target: &V,
        heuristic: H,
    ) -> Result<Vec<V>, GraphError>
    where
        H: FnMut(&V, &V) -> f32,
    {
        let (s, t) = self.endpoints(start, target)?;
        match search::shortest_path(self, s, t, heuristic) {
            Some(found) => Ok(found
                .nodes
                .iter()
                .map(|&id| live(&self.nodes, id).value.clone())
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    /// The sum of the weights along a shortest path from start to target,
    /// or `f32::INFINITY` when the target is unreachable (or either
    /// endpoint is not in the graph).
    pub fn find_minimum_distance(&self, start: &V, target: &V) -> f32 {
        match (self.index.get(start), self.index.get(target)) {
            (Some(&s), Some(&t)) => search::shortest_path(self, s, t, |_, _| 0.0)
                .map(|found| found.cost)
                .unwrap_or(f32::INFINITY),
            _ => f32::INFINITY,
        }
    }

    /// Check whether any path leads from start to target.
    pub fn is_reachable(&self, start: &V, target: &V) -> Result<bool, GraphError> {
        let (s, t) = self.endpoints(start, target)?;
        Ok(search::shortest_path(self, s, t, |_, _| 0.0).is_some())
    }

    /// Breadth first search over the whole reachable component. Equivalent
    /// to [`Graph::breadth_first_search_bounded`] with both bounds set to
    /// the vertex count.
    pub fn breadth_first_search(&self, start: &V) -> Result<Graph<V>, GraphError> {
        self.breadth_first_search_bounded(start, self.vertex_count(), self.vertex_count())
    }

    /// Breadth first search from the given vertex.
    ///
    /// Returns a new graph of the same orientation containing the
    /// processed vertices and the edge through which each one was first
    /// discovered, in discovery order. At most `max_vertices` vertices are
    /// emitted; a vertex at depth `max_depth` is emitted but not expanded,
    /// and `max_depth == 0` yields an empty graph.
    pub fn breadth_first_search_bounded(
        &self,
        start: &V,
        max_vertices: usize,
        max_depth: usize,
    ) -> Result<Graph<V>, GraphError> {
        let Some(&s) = self.index.get(start) else {
            return Err(GraphError::VertexNotInGraph);
        };
        Ok(search::breadth_first(self, s, max_vertices, max_depth))
    }

    /// Depth first search over the whole reachable component. Equivalent
    /// to [`Graph::depth_first_search_bounded`] with both bounds set to
    /// the vertex count.
    pub fn depth_first_search(&self, start: &V) -> Result<Graph<V>, GraphError> {
        self.depth_first_search_bounded(start, self.vertex_count(), self.vertex_count())
    }

    /// Depth first search from the given vertex; same contract and bounds
    /// as [`Graph::breadth_first_search_bounded`] but with stack
    /// discipline. A vertex is processed at most once, on its first pop;
    /// later pops of a vertex that was stacked several times are no-ops.
    pub fn depth_first_search_bounded(
        &self,
        start: &V,
        max_vertices: usize,
        max_depth: usize,
    ) -> Result<Graph<V>, GraphError> {
        let Some(&s) = self.index.get(start) else {
            return Err(GraphError::VertexNotInGraph);
        };
        Ok(search::depth_first(self, s, max_vertices, max_depth))
    }

    /// Check whether the graph contains any cycle.
    pub fn detect_cycle(&self) -> bool {
        search::has_cycle(self)
    }

    //--------------------
    //  Internal
    //--------------------

    fn endpoints(&self, a: &V, b: &V) -> Result<(NodeId, NodeId), GraphError> {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => Ok((ia, ib)),
            _ => Err(GraphError::VertexNotInGraph),
        }
    }

    /// Create or update the edge between two live nodes and keep the
    /// adjacency records consistent with the orientation.
    fn connect(&mut self, ia: NodeId, ib: NodeId, weight: f32) -> EdgeKey {
        let key = self.orientation.key(ia, ib);
        if let Some(conn) = self.edges.get_mut(&key) {
            conn.weight = weight;
        } else {
            trace!("connect {} -> {} (weight {})", ia, ib, weight);
            self.edges.insert(key, Connection { a: ia, b: ib, weight });
            match self.orientation {
                Orientation::Directed => {
                    live_mut(&mut self.nodes, ia).adjacency.insert(ib);
                    live_mut(&mut self.nodes, ib).incoming.insert(ia);
                }
                Orientation::Undirected => {
                    live_mut(&mut self.nodes, ia).adjacency.insert(ib);
                    live_mut(&mut self.nodes, ib).adjacency.insert(ia);
                }
            }
        }
        key
    }

    /// Rebuild every adjacency record in global edge order.
    fn resync_adjacency(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.adjacency.clear();
            node.incoming.clear();
        }
        let nodes = &mut self.nodes;
        for c in self.edges.values() {
            match self.orientation {
                Orientation::Directed => {
                    live_mut(nodes, c.a).adjacency.insert(c.b);
                    live_mut(nodes, c.b).incoming.insert(c.a);
                }
                Orientation::Undirected => {
                    live_mut(nodes, c.a).adjacency.insert(c.b);
                    live_mut(nodes, c.b).adjacency.insert(c.a);
                }
            }
        }
    }

    fn edge_view<'g>(&'g self, c: &Connection) -> EdgeRef<'g, V> {
        EdgeRef {
            a: &live(&self.nodes, c.a).value,
            b: &live(&self.nodes, c.b).value,
            weight: c.weight,
        }
    }

    //--------------------
    //  Crate-internal API for the search module
    //--------------------

    /// An empty graph with the same orientation, used by traversals to
    /// collect their result.
    pub(crate) fn empty_like(&self) -> Graph<V> {
        Graph::new(self.orientation)
    }

    /// Size of the node arena, including recycled slots; side tables
    /// indexed by `NodeId` are allocated at this length.
    pub(crate) fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Node handles in vertex iteration order.
    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    pub(crate) fn value(&self, id: NodeId) -> &V {
        &live(&self.nodes, id).value
    }

    /// Outgoing neighbors of a node in adjacency order.
    pub(crate) fn adjacency(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        live(&self.nodes, id).adjacency.iter().copied()
    }

    pub(crate) fn adjacency_len(&self, id: NodeId) -> usize {
        live(&self.nodes, id).adjacency.len()
    }

    pub(crate) fn adjacency_at(&self, id: NodeId, pos: usize) -> NodeId {
        live(&self.nodes, id).adjacency[pos]
    }

    pub(crate) fn edge_weight(&self, a: NodeId, b: NodeId) -> f32 {
        self.edges[&self.orientation.key(a, b)].weight
    }

    /// Insert a discovery edge between two vertices already present in
    /// this graph; used when traversals build their result graph.
    pub(crate) fn link(&mut self, a: &V, b: &V, weight: f32) {
        if let Ok((ia, ib)) = self.endpoints(a, b) {
            self.connect(ia, ib, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directed_with(vertices: &[u32]) -> Graph<u32> {
        let mut g = Graph::directed();
        g.add_vertices(vertices.iter().copied());
        g
    }

    fn undirected_with(vertices: &[u32]) -> Graph<u32> {
        let mut g = Graph::undirected();
        g.add_vertices(vertices.iter().copied());
        g
    }

    // --- Vertex bookkeeping ---

    #[test]
    fn test_add_vertex_reports_novelty() {
        let mut g = Graph::directed();
        assert!(g.add_vertex(1));
        assert!(!g.add_vertex(1));
        assert_eq!(g.vertex_count(), 1);
        assert!(g.contains(&1));
        assert!(!g.contains(&2));
    }

    #[test]
    fn test_remove_vertex_reports_presence() {
        let mut g = directed_with(&[1, 2]);
        assert!(g.remove_vertex(&1));
        assert!(!g.remove_vertex(&1));
        assert!(!g.contains(&1));
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_remove_vertex_strips_outgoing_edges() {
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&1, &3).unwrap();
        assert!(g.remove_vertex(&1));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.edges_of(&2).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_vertex_strips_incoming_directed_edges() {
        // 2 -> 1 and 3 -> 1 with no edge back: removing 1 must not leave
        // dangling entries in 2's or 3's adjacency.
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge(&2, &1).unwrap();
        g.add_edge(&3, &1).unwrap();
        assert!(g.remove_vertex(&1));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.edges_of(&2).unwrap().count(), 0);
        assert_eq!(g.edges_of(&3).unwrap().count(), 0);
        assert_eq!(g.edges().count(), 0);
    }

    #[test]
    fn test_remove_vertex_strips_undirected_edges() {
        let mut g = undirected_with(&[1, 2, 3]);
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&3, &1).unwrap();
        assert!(g.remove_vertex(&1));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.edges_of(&2).unwrap().count(), 0);
        assert_eq!(g.edges_of(&3).unwrap().count(), 0);
    }

    #[test]
    fn test_slot_reuse_after_removal() {
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge(&1, &2).unwrap();
        g.remove_vertex(&2);
        assert!(g.add_vertex(4));
        g.add_edge(&1, &4).unwrap();
        g.add_edge(&4, &3).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(g.edge_exists(&1, &4).unwrap());
        assert!(g.edge_exists(&4, &3).unwrap());
        let vertices: Vec<u32> = g.vertices().copied().collect();
        assert_eq!(vertices, vec![1, 3, 4]);
    }

    #[test]
    fn test_bulk_vertex_ops() {
        let mut g = Graph::directed();
        g.add_vertices(0..5u32);
        assert_eq!(g.vertex_count(), 5);
        g.remove_vertices([0, 2, 4].iter());
        let vertices: Vec<u32> = g.vertices().copied().collect();
        assert_eq!(vertices, vec![1, 3]);
    }

    // --- Edge bookkeeping ---

    #[test]
    fn test_add_edge_default_weight() {
        let mut g = directed_with(&[1, 2]);
        let edge = g.add_edge(&1, &2).unwrap();
        assert_eq!(edge.weight, DEFAULT_WEIGHT);
        assert_eq!(*edge.a, 1);
        assert_eq!(*edge.b, 2);
    }

    #[test]
    fn test_readding_edge_updates_weight_in_place() {
        let mut g = directed_with(&[1, 2]);
        g.add_edge_weighted(&1, &2, 2.0).unwrap();
        g.add_edge_weighted(&1, &2, 7.5).unwrap();
        assert_eq!(g.edge_count(), 1);
        let edge = g.get_edge(&1, &2).unwrap().unwrap();
        assert_eq!(edge.weight, 7.5);
    }

    #[test]
    fn test_self_loop_rejected_without_mutation() {
        let mut g = directed_with(&[1]);
        assert_eq!(g.add_edge(&1, &1).unwrap_err(), GraphError::SelfLoop);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_checked_before_registration() {
        // The self-loop check precedes the registration check, so an
        // unregistered value still reports SelfLoop when both endpoints
        // are equal.
        let mut g: Graph<u32> = Graph::directed();
        assert_eq!(g.add_edge(&9, &9).unwrap_err(), GraphError::SelfLoop);
    }

    #[test]
    fn test_add_edge_unregistered_endpoint() {
        let mut g = directed_with(&[1]);
        assert_eq!(g.add_edge(&1, &2).unwrap_err(), GraphError::VertexNotInGraph);
        assert_eq!(g.add_edge(&2, &1).unwrap_err(), GraphError::VertexNotInGraph);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_edge_reports_existence() {
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge(&1, &2).unwrap();
        assert_eq!(g.remove_edge(&1, &2), Ok(true));
        assert_eq!(g.remove_edge(&1, &2), Ok(false));
        assert_eq!(g.remove_edge(&1, &9), Err(GraphError::VertexNotInGraph));
    }

    #[test]
    fn test_directed_reverse_is_a_separate_edge() {
        let mut g = directed_with(&[1, 2]);
        g.add_edge_weighted(&1, &2, 2.0).unwrap();
        assert!(!g.edge_exists(&2, &1).unwrap());
        g.add_edge_weighted(&2, &1, 3.0).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.get_edge(&1, &2).unwrap().unwrap().weight, 2.0);
        assert_eq!(g.get_edge(&2, &1).unwrap().unwrap().weight, 3.0);
    }

    #[test]
    fn test_undirected_edge_is_symmetric() {
        let mut g = undirected_with(&[1, 2]);
        g.add_edge_weighted(&1, &2, 2.0).unwrap();
        assert!(g.edge_exists(&1, &2).unwrap());
        assert!(g.edge_exists(&2, &1).unwrap());
        assert_eq!(g.edge_count(), 1);
        // The mirrored record shares the weight.
        assert_eq!(g.get_edge(&2, &1).unwrap().unwrap().weight, 2.0);
        // Updating through either endpoint updates the one edge.
        g.add_edge_weighted(&2, &1, 5.0).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.get_edge(&1, &2).unwrap().unwrap().weight, 5.0);
    }

    #[test]
    fn test_undirected_removal_is_symmetric() {
        let mut g = undirected_with(&[1, 2]);
        g.add_edge(&1, &2).unwrap();
        assert_eq!(g.remove_edge(&2, &1), Ok(true));
        assert!(!g.edge_exists(&1, &2).unwrap());
        assert_eq!(g.edges_of(&1).unwrap().count(), 0);
        assert_eq!(g.edges_of(&2).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_all_edges_keeps_vertices() {
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&2, &3).unwrap();
        g.remove_all_edges();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edges_of(&1).unwrap().count(), 0);
        // The structure still accepts new edges afterwards.
        g.add_edge(&1, &3).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_remove_all_vertices_clears_everything() {
        let mut g = undirected_with(&[1, 2]);
        g.add_edge(&1, &2).unwrap();
        g.remove_all_vertices();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains(&1));
    }

    // --- Queries and iteration order ---

    #[test]
    fn test_get_edge_absent_pair() {
        let mut g = directed_with(&[1, 2]);
        assert!(g.get_edge(&1, &2).unwrap().is_none());
        assert_eq!(g.get_edge(&1, &9).unwrap_err(), GraphError::VertexNotInGraph);
        g.add_edge(&1, &2).unwrap();
        assert!(g.get_edge(&1, &2).unwrap().is_some());
    }

    #[test]
    fn test_vertices_iterate_in_insertion_order() {
        let g = directed_with(&[5, 1, 9, 3]);
        let vertices: Vec<u32> = g.vertices().copied().collect();
        assert_eq!(vertices, vec![5, 1, 9, 3]);
    }

    #[test]
    fn test_edges_iterate_in_insertion_order() {
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge(&2, &3).unwrap();
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&3, &1).unwrap();
        let pairs: Vec<(u32, u32)> = g.edges().map(|e| (*e.a, *e.b)).collect();
        assert_eq!(pairs, vec![(2, 3), (1, 2), (3, 1)]);
    }

    #[test]
    fn test_edges_of_presents_queried_vertex_first() {
        let mut g = undirected_with(&[1, 2]);
        g.add_edge(&1, &2).unwrap();
        let from_two: Vec<(u32, u32)> = g.edges_of(&2).unwrap().map(|e| (*e.a, *e.b)).collect();
        assert_eq!(from_two, vec![(2, 1)]);
    }

    #[test]
    fn test_sort_vertices_reorders_iteration() {
        let mut g = directed_with(&[5, 1, 9, 3]);
        g.sort_vertices_by(|a, b| a.cmp(b));
        let vertices: Vec<u32> = g.vertices().copied().collect();
        assert_eq!(vertices, vec![1, 3, 5, 9]);
        assert_eq!(g.vertex_count(), 4);
    }

    #[test]
    fn test_sort_edges_reorders_iteration() {
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge_weighted(&1, &2, 3.0).unwrap();
        g.add_edge_weighted(&2, &3, 1.0).unwrap();
        g.add_edge_weighted(&3, &1, 2.0).unwrap();
        g.sort_edges_by(|x, y| x.weight.total_cmp(&y.weight));
        let weights: Vec<f32> = g.edges().map(|e| e.weight).collect();
        assert_eq!(weights, vec![1.0, 2.0, 3.0]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_sort_edges_resyncs_expansion_order() {
        // Neighbor expansion follows per-node adjacency order, which must
        // track the re-sorted edge set.
        let mut g = directed_with(&[1, 2, 3]);
        g.add_edge_weighted(&1, &3, 2.0).unwrap();
        g.add_edge_weighted(&1, &2, 1.0).unwrap();
        let before: Vec<u32> = g.edges_of(&1).unwrap().map(|e| *e.b).collect();
        assert_eq!(before, vec![3, 2]);
        g.sort_edges_by(|x, y| x.b.cmp(y.b));
        let after: Vec<u32> = g.edges_of(&1).unwrap().map(|e| *e.b).collect();
        assert_eq!(after, vec![2, 3]);
    }

    #[test]
    fn test_orientation_flags() {
        let d: Graph<u32> = Graph::directed();
        let u: Graph<u32> = Graph::undirected();
        assert!(d.is_directed());
        assert!(!u.is_directed());
        assert_eq!(d.orientation(), Orientation::Directed);
        assert_eq!(u.orientation(), Orientation::Undirected);
    }

    #[test]
    fn test_string_vertices() {
        // The vertex type is caller-supplied; anything Eq + Hash + Clone.
        let mut g = Graph::undirected();
        g.add_vertex("hub".to_string());
        g.add_vertex("leaf".to_string());
        g.add_edge_weighted(&"hub".to_string(), &"leaf".to_string(), 0.5)
            .unwrap();
        assert!(g
            .edge_exists(&"leaf".to_string(), &"hub".to_string())
            .unwrap());
    }
}
