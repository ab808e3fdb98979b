use campus_nav_core::{BuildError, Graph, GraphBuilder};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let location_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(250_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: campus-nav-bench [mode] [location_count]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  grid      Street grid, two-way edges with compass instructions");
        println!("  ring      One-way loop corridor (worst case: target just behind start)");
        println!("  tree      Building hierarchy, down and back up");
        println!("  random    Uniform random one-way edges");
        println!("  barbell   Two dense clusters joined by a one-way footbridge");
        println!();
        println!("Default location_count: 250000");
        return;
    }

    println!("campus-nav-bench");
    println!("================");
    println!();

    type Generator = fn(u64) -> Result<Graph, BuildError>;

    let generators: Vec<(&str, Generator)> = match mode {
        "grid" => vec![("Street grid", gen_grid)],
        "ring" => vec![("One-way ring", gen_ring)],
        "tree" => vec![("Building tree", gen_tree)],
        "random" => vec![("Random one-way", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Street grid", gen_grid as Generator),
            ("One-way ring", gen_ring),
            ("Building tree", gen_tree),
            ("Random one-way", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, location_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Result<Graph, BuildError>, location_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} locations", location_count);

    let t = Instant::now();
    let graph = match generator(location_count) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Generator failed: {}", e);
            return;
        }
    };
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} locations, {} edges, {} instructions, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.location_count(),
        graph.edge_count(),
        graph.instruction_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let first = loc(0);
    let last = loc(graph.location_count() as u64 - 1);
    let mid = loc(graph.location_count() as u64 / 2);

    println!();
    println!("{:>10} {:>10} {:>8} {:>12} {:>12}", "from", "to", "hops", "search", "directions");
    println!("{:->10} {:->10} {:->8} {:->12} {:->12}", "", "", "", "", "");

    for (from, to) in [(&first, &last), (&last, &first), (&first, &mid), (&mid, &first)] {
        let t = Instant::now();
        let path = campus_nav_core::find_path(&graph, from, to);
        let search = t.elapsed();

        match path {
            Ok(Some(p)) => {
                let t = Instant::now();
                let directions = campus_nav_core::directions_for(&graph, &p);
                let reconstruct = t.elapsed();
                if let Err(e) = directions {
                    eprintln!("{}", e);
                }
                println!(
                    "{:>10} {:>10} {:>8} {:>10.2}ms {:>10.3}ms",
                    from,
                    to,
                    p.hops(),
                    search.as_secs_f64() * 1000.0,
                    reconstruct.as_secs_f64() * 1000.0
                );
            }
            Ok(None) => println!(
                "{:>10} {:>10} {:>8} {:>10.2}ms {:>12}",
                from,
                to,
                "none",
                search.as_secs_f64() * 1000.0,
                "-"
            ),
            Err(e) => eprintln!("{}", e),
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
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
}

const INSTRUCTIONS: [&str; 5] = [
    "Take left",
    "Take right",
    "Go straight",
    "Go straight & Take Left",
    "Take the stairs",
];

fn loc(i: u64) -> String {
    format!("L{}", i)
}

/// Add an edge, treating a repeat of an existing (from, to) pair as a no-op.
fn add_once(b: &mut GraphBuilder, from: u64, to: u64, instruction: &str) -> Result<(), BuildError> {
    match b.add_edge(&loc(from), &loc(to), instruction) {
        Err(BuildError::DuplicateEdge { .. }) => Ok(()),
        other => other,
    }
}

fn register(b: &mut GraphBuilder, count: u64) -> Result<(), BuildError> {
    for i in 0..count {
        b.add_location(&loc(i))?;
    }
    Ok(())
}

/// Square street grid, two-way, with compass-style instructions.
///
/// Many equal-length routes between corners. Exercises the tie-break path.
fn gen_grid(location_count: u64) -> Result<Graph, BuildError> {
    let side = (location_count as f64).sqrt().max(1.0) as u64;
    let mut b = GraphBuilder::with_capacity((side * side) as usize);
    register(&mut b, side * side)?;

    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                b.add_edge(&loc(id), &loc(id + 1), "Head east")?;
                b.add_edge(&loc(id + 1), &loc(id), "Head west")?;
            }
            if row + 1 < side {
                b.add_edge(&loc(id), &loc(id + side), "Head south")?;
                b.add_edge(&loc(id + side), &loc(id), "Head north")?;
            }
        }
    }

    Ok(b.build())
}

/// One-way ring corridor. The route from L0 to its predecessor walks the
/// whole ring.
fn gen_ring(location_count: u64) -> Result<Graph, BuildError> {
    let n = location_count.max(2);
    let mut b = GraphBuilder::with_capacity(n as usize);
    register(&mut b, n)?;
    for i in 0..n {
        b.add_edge(&loc(i), &loc((i + 1) % n), "Go straight")?;
    }
    Ok(b.build())
}

/// Building hierarchy: each location has up to 4 children and a way back up.
///
/// Deep paths (log depth) with exponential width.
fn gen_tree(location_count: u64) -> Result<Graph, BuildError> {
    let branching = 4u64;
    let mut b = GraphBuilder::with_capacity(location_count as usize);
    let mut rng = FastRng::new(42);
    register(&mut b, location_count.max(1))?;

    for child in 1..location_count {
        let parent = (child - 1) / branching;
        b.add_edge(&loc(parent), &loc(child), INSTRUCTIONS[rng.next(5) as usize])?;
        b.add_edge(&loc(child), &loc(parent), "Go back")?;
    }

    Ok(b.build())
}

/// Uniform random one-way edges, ~4 per location. Baseline topology with
/// no structure; many pairs are unreachable in one direction.
fn gen_random(location_count: u64) -> Result<Graph, BuildError> {
    let n = location_count.max(1);
    let mut b = GraphBuilder::with_capacity(n as usize);
    let mut rng = FastRng::new(54321);
    register(&mut b, n)?;

    for _ in 0..n * 4 {
        let from = rng.next(n);
        let to = rng.next(n);
        if from != to {
            add_once(&mut b, from, to, INSTRUCTIONS[rng.next(5) as usize])?;
        }
    }

    Ok(b.build())
}

/// Barbell: two dense random clusters joined by a single footbridge chain.
///
/// Worst case for "find path through bottleneck."
fn gen_barbell(location_count: u64) -> Result<Graph, BuildError> {
    let bridge_len = 10u64;
    let cluster = (location_count.max(bridge_len + 4) - bridge_len) / 2;
    let total = cluster * 2 + bridge_len;
    let mut b = GraphBuilder::with_capacity(total as usize);
    let mut rng = FastRng::new(99999);
    register(&mut b, total)?;

    let b_start = cluster + bridge_len;
    for base in [0, b_start] {
        for i in 0..cluster {
            // Keep every cluster location reachable: a one-way ring, plus shortcuts
            add_once(&mut b, base + i, base + (i + 1) % cluster, "Go straight")?;
            for _ in 0..6u64.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    add_once(&mut b, base + i, base + target, INSTRUCTIONS[rng.next(5) as usize])?;
                }
            }
        }
    }

    // Bridge: chain from last location of the first cluster to the second
    let mut prev = cluster - 1;
    for id in cluster..=b_start {
        b.add_edge(&loc(prev), &loc(id), "Cross the footbridge")?;
        prev = id;
    }

    Ok(b.build())
}
