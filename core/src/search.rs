//! Search and traversal algorithms over a [`Graph`].
//!
//! Every public operation owns its scratch state for the duration of one
//! call: a side table indexed by node handle plus whatever queue the
//! algorithm needs. Nothing persists between calls, so runs are
//! self-contained and a heuristic may itself query the graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::hash::Hash;

use log::debug;

use crate::graph::{Graph, NodeId};

/// Per-node scratch record for one shortest-path run.
struct Scratch {
    /// Best known cost from the start node.
    distance: f32,
    /// Heuristic estimate of the remaining cost to the target.
    estimate: f32,
    /// The node through which this one was reached at its best cost.
    previous: Option<NodeId>,
    /// Finalized: the distance can no longer improve.
    visited: bool,
}

fn scratch_table(len: usize) -> Vec<Scratch> {
    (0..len)
        .map(|_| Scratch {
            distance: f32::INFINITY,
            estimate: 0.0,
            previous: None,
            visited: false,
        })
        .collect()
}

/// Priority-queue entry ordered by `distance + estimate`.
///
/// Reversed comparison turns `BinaryHeap`'s max-heap into a min-heap; ties
/// fall in heap order, which is some total order consistent with cost but
/// not a deterministic tie-break contract.
struct QueueEntry {
    cost: f32,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

pub(crate) struct PathFound {
    /// Node handles from start to target, inclusive.
    pub(crate) nodes: Vec<NodeId>,
    /// Total weight of the path.
    pub(crate) cost: f32,
}

/// A*/Dijkstra shortest path between two nodes.
///
/// The zero heuristic gives plain Dijkstra. The search succeeds the moment
/// the target is popped from the queue, not when it is first discovered;
/// with non-negative weights its distance is final at that point. Stale
/// queue entries (nodes re-pushed with a better cost before their first
/// pop) are skipped via the `visited` flag.
pub(crate) fn shortest_path<V, H>(
    graph: &Graph<V>,
    start: NodeId,
    target: NodeId,
    mut heuristic: H,
) -> Option<PathFound>
where
    V: Eq + Hash + Clone,
    H: FnMut(&V, &V) -> f32,
{
    let mut scratch = scratch_table(graph.arena_len());
    let mut queue = BinaryHeap::new();

    scratch[start].distance = 0.0;
    queue.push(QueueEntry { cost: 0.0, node: start });

    while let Some(QueueEntry { node: u, .. }) = queue.pop() {
        if u == target {
            let found = reconstruct(&scratch, target);
            debug!(
                "shortest path found: {} hops, cost {}",
                found.nodes.len() - 1,
                found.cost
            );
            return Some(found);
        }
        if scratch[u].visited {
            continue;
        }
        scratch[u].visited = true;

        let base = scratch[u].distance;
        for v in graph.adjacency(u) {
            if scratch[v].visited {
                continue;
            }
            let next = base + graph.edge_weight(u, v);
            if next < scratch[v].distance {
                scratch[v].distance = next;
                scratch[v].previous = Some(u);
                scratch[v].estimate = heuristic(graph.value(v), graph.value(target));
                queue.push(QueueEntry {
                    cost: next + scratch[v].estimate,
                    node: v,
                });
            }
        }
    }

    debug!("no path to target");
    None
}

/// Walk `previous` links back from the target, then reverse.
fn reconstruct(scratch: &[Scratch], target: NodeId) -> PathFound {
    let mut nodes = vec![target];
    let mut v = target;
    while let Some(p) = scratch[v].previous {
        nodes.push(p);
        v = p;
    }
    nodes.reverse();
    PathFound {
        nodes,
        cost: scratch[target].distance,
    }
}

/// Bounded breadth first traversal.
///
/// Produces a new graph of the same orientation holding the emitted
/// vertices and each one's discovery edge, in discovery order. A vertex is
/// marked discovered when enqueued and emitted when dequeued; a vertex at
/// depth `max_depth` is emitted but not expanded. `max_depth == 0` gives
/// an empty result, and at most `max_vertices` vertices are emitted.
pub(crate) fn breadth_first<V>(
    graph: &Graph<V>,
    start: NodeId,
    max_vertices: usize,
    max_depth: usize,
) -> Graph<V>
where
    V: Eq + Hash + Clone,
{
    let mut result = graph.empty_like();
    if max_depth == 0 {
        return result;
    }

    let mut discovered = vec![false; graph.arena_len()];
    let mut parent: Vec<Option<NodeId>> = vec![None; graph.arena_len()];
    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();

    discovered[start] = true;
    queue.push_back((start, 0));

    while let Some((u, depth)) = queue.pop_front() {
        if result.vertex_count() == max_vertices {
            break;
        }
        result.add_vertex(graph.value(u).clone());
        if let Some(p) = parent[u] {
            result.link(graph.value(p), graph.value(u), graph.edge_weight(p, u));
        }
        if depth == max_depth {
            continue;
        }
        for v in graph.adjacency(u) {
            if !discovered[v] {
                discovered[v] = true;
                parent[v] = Some(u);
                queue.push_back((v, depth + 1));
            }
        }
    }

    debug!("breadth first search emitted {} vertices", result.vertex_count());
    result
}

/// Bounded depth first traversal; same contract as [`breadth_first`] but
/// with stack discipline.
///
/// A node may sit on the stack more than once before its first
/// processing; it is marked visited when popped, the first pop emits it
/// and later pops are no-ops, so visit order matches first processing.
pub(crate) fn depth_first<V>(
    graph: &Graph<V>,
    start: NodeId,
    max_vertices: usize,
    max_depth: usize,
) -> Graph<V>
where
    V: Eq + Hash + Clone,
{
    let mut result = graph.empty_like();
    if max_depth == 0 {
        return result;
    }

    let mut visited = vec![false; graph.arena_len()];
    // Each entry carries the node, the node it was discovered from, and
    // its depth at that discovery.
    let mut stack: Vec<(NodeId, Option<NodeId>, usize)> = vec![(start, None, 0)];

    while let Some((u, via, depth)) = stack.pop() {
        if visited[u] {
            continue;
        }
        if result.vertex_count() == max_vertices {
            break;
        }
        visited[u] = true;
        result.add_vertex(graph.value(u).clone());
        if let Some(p) = via {
            result.link(graph.value(p), graph.value(u), graph.edge_weight(p, u));
        }
        if depth == max_depth {
            continue;
        }
        for v in graph.adjacency(u) {
            if !visited[v] {
                stack.push((v, Some(u), depth + 1));
            }
        }
    }

    debug!("depth first search emitted {} vertices", result.vertex_count());
    result
}

const NEW: u8 = 0;
const OPEN: u8 = 1;
const DONE: u8 = 2;

/// Cycle detection by iterative depth first exploration.
///
/// Explicit frames of (node, discovery edge, next child position) replace
/// the recursion stack, so depth is bounded by available memory rather
/// than the call stack. A node is OPEN while any frame below refers to it;
/// reaching an OPEN node again closes a cycle. In undirected graphs the
/// mirrored edge straight back to the node a frame was discovered from is
/// not a cycle and is skipped.
///
/// Small graphs are rejected up front: an undirected cycle needs at least
/// 3 vertices and 3 edges, a directed one (two arcs between the same
/// pair) at least 2 of each.
pub(crate) fn has_cycle<V: Eq + Hash + Clone>(graph: &Graph<V>) -> bool {
    let floor = if graph.is_directed() { 2 } else { 3 };
    if graph.vertex_count() < floor || graph.edge_count() < floor {
        return false;
    }

    let undirected = !graph.is_directed();
    let mut state = vec![NEW; graph.arena_len()];

    for root in graph.node_ids() {
        if state[root] != NEW {
            continue;
        }
        state[root] = OPEN;
        let mut stack: Vec<(NodeId, Option<NodeId>, usize)> = vec![(root, None, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, via, pos) = *frame;
            if pos < graph.adjacency_len(node) {
                frame.2 += 1;
                let next = graph.adjacency_at(node, pos);
                if undirected && via == Some(next) {
                    continue;
                }
                match state[next] {
                    OPEN => {
                        debug!("cycle found through node {}", next);
                        return true;
                    }
                    NEW => {
                        state[next] = OPEN;
                        stack.push((next, Some(node), 0));
                    }
                    _ => {}
                }
            } else {
                state[node] = DONE;
                stack.pop();
            }
        }
    }

    false
}
