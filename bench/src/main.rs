use std::time::Instant;

use pathgraph_core::Graph;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: pathgraph-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Branching tree (deep weighted paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!();
        println!("Default vertex_count: 1000000");
        return;
    }

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "tree" => vec![("Branching tree", gen_tree)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Branching tree", gen_tree as fn(u64) -> Graph<u64>),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    println!("pathgraph-bench");
    println!("===============");
    println!();

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, vertex_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s — {} vertices, {} edges",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count()
    );
    if graph.is_empty() {
        println!();
        return;
    }

    // Bounded BFS and DFS from vertex 0 at increasing depth caps
    println!();
    println!("{:>8} {:>12} {:>10} {:>12} {:>10}", "depth", "bfs", "time", "dfs", "time");
    println!("{:->8} {:->12} {:->10} {:->12} {:->10}", "", "", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let bfs = graph
            .breadth_first_search_bounded(&0, graph.vertex_count(), depth)
            .map(|tree| tree.vertex_count())
            .unwrap_or(0);
        let bfs_time = t.elapsed();

        let t = Instant::now();
        let dfs = graph
            .depth_first_search_bounded(&0, graph.vertex_count(), depth)
            .map(|tree| tree.vertex_count())
            .unwrap_or(0);
        let dfs_time = t.elapsed();

        println!(
            "{:>8} {:>12} {:>8.1}ms {:>12} {:>8.1}ms",
            depth,
            bfs,
            bfs_time.as_secs_f64() * 1000.0,
            dfs,
            dfs_time.as_secs_f64() * 1000.0
        );
        if bfs >= graph.vertex_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    // Weighted shortest path: vertex 0 to the last vertex
    let far = graph.vertex_count() as u64 - 1;
    println!();
    let t = Instant::now();
    let path = graph.find_shortest_path(&0, &far).unwrap_or_default();
    let elapsed = t.elapsed();
    if path.is_empty() {
        println!(
            "Shortest path 0 -> {}: no path ({:.1}ms)",
            far,
            elapsed.as_secs_f64() * 1000.0
        );
    } else {
        println!(
            "Shortest path 0 -> {}: {} hops, cost {:.1} in {:.1}ms",
            far,
            path.len() - 1,
            graph.find_minimum_distance(&0, &far),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    let t = Instant::now();
    let cyclic = graph.detect_cycle();
    println!(
        "Cycle detection: {} in {:.1}ms",
        cyclic,
        t.elapsed().as_secs_f64() * 1000.0
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators — all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Edge weight in [0.5, 2.5).
    fn weight(&mut self) -> f32 {
        0.5 + 2.0 * self.next_f64() as f32
    }
}

/// Branching tree: each vertex gets 3 children until the target count is
/// reached.
/// Produces deep weighted paths; tests deep traversal and reconstruction.
fn gen_tree(vertex_count: u64) -> Graph<u64> {
    let mut graph = Graph::directed();
    let mut rng = FastRng::new(42);
    let branching = 3u64;

    graph.add_vertex(0);
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertex_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.add_vertex(child);
                let w = rng.weight();
                let _ = graph.add_edge_weighted(&parent, &child, w);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Scale-free via edge-list sampling (O(edges), not O(n^2)).
///
/// Preferential attachment by picking a random endpoint from the edge
/// list; vertices with more edges are more likely to be picked.
fn gen_scale_free(vertex_count: u64) -> Graph<u64> {
    let edges_per_vertex = 10u64;
    let mut graph = Graph::directed();
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((vertex_count * edges_per_vertex * 2) as usize);

    // Seed: small clique
    let seed = 5u64;
    for i in 0..seed {
        graph.add_vertex(i);
    }
    for i in 0..seed {
        for j in (i + 1)..seed {
            let w = rng.weight();
            let _ = graph.add_edge_weighted(&i, &j, w);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_vertex in seed..vertex_count {
        graph.add_vertex(new_vertex);
        let attach = edges_per_vertex.min(new_vertex);
        for _ in 0..attach {
            let idx = rng.next(endpoints.len() as u64) as usize;
            let target = endpoints[idx];
            if target != new_vertex {
                let w = rng.weight();
                let _ = graph.add_edge_weighted(&new_vertex, &target, w);
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
/// High clustering with short path lengths.
fn gen_small_world(vertex_count: u64) -> Graph<u64> {
    let k = 10u64;
    let p = 0.05f64;
    let mut graph = Graph::undirected();
    let mut rng = FastRng::new(67890);

    graph.add_vertices(0..vertex_count);

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            let w = rng.weight();
            let target = if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                if rewired != i { rewired } else { neighbor }
            } else {
                neighbor
            };
            if target != i {
                let _ = graph.add_edge_weighted(&i, &target, w);
            }
        }
    }

    graph
}

/// Erdos-Renyi: uniform random edges, ~10 per vertex on average.
/// Baseline topology with no structure.
fn gen_random(vertex_count: u64) -> Graph<u64> {
    let target_edges = vertex_count * 10;
    let mut graph = Graph::directed();
    let mut rng = FastRng::new(54321);

    graph.add_vertices(0..vertex_count);

    for _ in 0..target_edges {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        if from != to {
            let w = rng.weight();
            let _ = graph.add_edge_weighted(&from, &to, w);
        }
    }

    graph
}

/// Barbell: two dense clusters connected by a single thin bridge.
/// Worst case for "find path through bottleneck".
fn gen_barbell(vertex_count: u64) -> Graph<u64> {
    let bridge_len = 10u64;
    let cluster_size = (vertex_count.saturating_sub(bridge_len)) / 2;
    let mut graph = Graph::undirected();
    let mut rng = FastRng::new(99999);

    graph.add_vertices(0..vertex_count);
    if cluster_size == 0 {
        return graph;
    }

    // Cluster A: vertices 0..cluster_size, ~20 random edges each
    for i in 0..cluster_size {
        for _ in 0..20u64.min(cluster_size.saturating_sub(1)) {
            let target = rng.next(cluster_size);
            if target != i {
                let w = rng.weight();
                let _ = graph.add_edge_weighted(&i, &target, w);
            }
        }
    }

    // Bridge: chain from the last vertex of A into cluster B
    let bridge_start = cluster_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let prev = if i == 0 { cluster_size - 1 } else { id - 1 };
        let _ = graph.add_edge_weighted(&prev, &id, 1.0);
    }

    // Cluster B: vertices after the bridge
    let b_start = bridge_start + bridge_len;
    let _ = graph.add_edge_weighted(&(b_start - 1), &b_start, 1.0);
    for i in 0..cluster_size {
        for _ in 0..20u64.min(cluster_size.saturating_sub(1)) {
            let target = rng.next(cluster_size);
            if target != i {
                let w = rng.weight();
                let _ = graph.add_edge_weighted(&(b_start + i), &(b_start + target), w);
            }
        }
    }

    graph
}
