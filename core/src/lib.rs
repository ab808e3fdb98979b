//! campus-nav-core: In-memory campus route engine.
//!
//! A pure Rust library that holds a directed, instruction-labeled graph of
//! campus locations and answers fewest-hop route queries, including the
//! turn-by-turn instructions along the chosen path.
//! No I/O: configuration loading and presentation live in the callers.

mod error;
mod graph;
mod traversal;

pub use error::{BuildError, RouteError};
pub use graph::{
    build_graph, Edge, EdgeRecord, Graph, GraphBuilder, InstructionId, LocationId,
    MAX_INSTRUCTIONS, MAX_LOCATIONS,
};
pub use traversal::{
    directions_for, find_path, find_path_ids, route, DirectionSequence, Path, Route,
};
