use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, error, trace};

use crate::error::RouteError;
use crate::graph::{Graph, LocationId};

/// An ordered, non-empty walk of locations from start to end inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<LocationId>);

/// One instruction per consecutive pair of a [`Path`].
pub type DirectionSequence = Vec<String>;

impl Path {
    /// Wrap a sequence of ids. Returns None for an empty sequence.
    pub fn new(ids: Vec<LocationId>) -> Option<Self> {
        if ids.is_empty() {
            None
        } else {
            Some(Self(ids))
        }
    }

    pub fn ids(&self) -> &[LocationId] {
        &self.0
    }

    pub fn start(&self) -> LocationId {
        self.0[0]
    }

    pub fn end(&self) -> LocationId {
        self.0[self.0.len() - 1]
    }

    /// Number of locations, endpoints included. Always at least 1.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    /// Location names along the path. Ids unknown to `graph` are skipped.
    pub fn names<'a>(&self, graph: &'a Graph) -> Vec<&'a str> {
        self.0.iter().filter_map(|&id| graph.name(id)).collect()
    }
}

/// A resolved route: location names and the instruction for each hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub locations: Vec<String>,
    pub directions: DirectionSequence,
}

impl Route {
    pub fn hops(&self) -> usize {
        self.directions.len()
    }

    /// (from, instruction, to) for each hop, in order.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.locations
            .windows(2)
            .zip(self.directions.iter())
            .map(|(pair, dir)| (pair[0].as_str(), dir.as_str(), pair[1].as_str()))
    }

    pub fn destination(&self) -> &str {
        self.locations.last().map(|s| s.as_str()).unwrap_or_default()
    }
}

/// Fewest-hop path from `start` to `end`, by location name.
///
/// Fails with [`RouteError::InvalidLocation`] if either name is not in the
/// graph. Returns `Ok(None)` when both exist but no directed walk connects
/// them. `start == end` yields the single-location path.
pub fn find_path(graph: &Graph, start: &str, end: &str) -> Result<Option<Path>, RouteError> {
    let start_id = resolve(graph, start)?;
    let end_id = resolve(graph, end)?;
    Ok(find_path_ids(graph, start_id, end_id))
}

fn resolve(graph: &Graph, name: &str) -> Result<LocationId, RouteError> {
    graph.resolve(name).ok_or_else(|| RouteError::InvalidLocation {
        name: name.to_string(),
    })
}

/// Fewest-hop path between two already-resolved locations.
///
/// Uniform-cost search over unit-weight edges. The queue is ordered by
/// (hop count, push sequence), so among equal-cost entries the one pushed
/// first wins. Combined with configured edge order this is a deterministic
/// tie-break between equal-length paths, with no routing meaning beyond that.
///
/// Each location is finalized at most once. Instead of carrying the path
/// prefix in every queue entry, the entry carries its predecessor and the
/// path is rebuilt from the predecessor map once `end` is popped.
pub fn find_path_ids(graph: &Graph, start: LocationId, end: LocationId) -> Option<Path> {
    // (cost, push sequence, location, predecessor)
    let mut queue: BinaryHeap<Reverse<(u32, u64, LocationId, Option<LocationId>)>> =
        BinaryHeap::new();
    // finalized location → predecessor (None for start)
    let mut finalized: HashMap<LocationId, Option<LocationId>> = HashMap::new();
    let mut seq: u64 = 0;

    queue.push(Reverse((0, seq, start, None)));

    while let Some(Reverse((cost, _, current, predecessor))) = queue.pop() {
        if finalized.contains_key(&current) {
            continue;
        }
        finalized.insert(current, predecessor);
        trace!(location = %current, cost, "finalized");

        if current == end {
            let path = reconstruct_path(&finalized, end);
            debug!(
                hops = path.hops(),
                finalized = finalized.len(),
                "route found"
            );
            return Some(path);
        }

        for edge in graph.neighbors(current) {
            // Finalized targets would be discarded on pop anyway
            if finalized.contains_key(&edge.target) {
                continue;
            }
            seq += 1;
            trace!(location = %edge.target, cost = cost + 1, "queued");
            queue.push(Reverse((cost + 1, seq, edge.target, Some(current))));
        }
    }

    debug!(finalized = finalized.len(), "no route");
    None
}

/// Walk predecessor links from `end` back to the start.
fn reconstruct_path(finalized: &HashMap<LocationId, Option<LocationId>>, end: LocationId) -> Path {
    let mut ids = vec![end];
    let mut current = end;

    while let Some(&Some(parent)) = finalized.get(&current) {
        ids.push(parent);
        current = parent;
    }

    ids.reverse();
    Path(ids)
}

/// Instructions for each hop of `path`, taken from the edge between
/// consecutive locations.
///
/// A path produced by [`find_path`] against the same graph always succeeds.
/// A missing edge means the path and graph do not belong together and is
/// reported as [`RouteError::InternalInconsistency`].
pub fn directions_for(graph: &Graph, path: &Path) -> Result<DirectionSequence, RouteError> {
    path.ids()
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            graph
                .edge_between(from, to)
                .and_then(|e| graph.instruction(e.instruction))
                .map(|s| s.to_string())
                .ok_or_else(|| {
                    let err = RouteError::InternalInconsistency {
                        from: display_name(graph, from),
                        to: display_name(graph, to),
                    };
                    error!(%from, %to, "path hop has no edge in graph");
                    err
                })
        })
        .collect()
}

fn display_name(graph: &Graph, id: LocationId) -> String {
    graph
        .name(id)
        .map(|s| s.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Path and directions between two named locations in one call.
pub fn route(graph: &Graph, start: &str, end: &str) -> Result<Option<Route>, RouteError> {
    let path = match find_path(graph, start, end)? {
        Some(path) => path,
        None => return Ok(None),
    };
    let directions = directions_for(graph, &path)?;
    let locations = path.names(graph).into_iter().map(|s| s.to_string()).collect();
    Ok(Some(Route {
        locations,
        directions,
    }))
}
