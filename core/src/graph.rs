use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::BuildError;

/// Interned instruction label index (avoids storing duplicate strings per edge).
pub type InstructionId = u16;

/// Maximum number of distinct instruction labels a graph can hold.
pub const MAX_INSTRUCTIONS: usize = InstructionId::MAX as usize + 1;

/// Maximum number of locations a graph can hold.
pub const MAX_LOCATIONS: usize = u32::MAX as usize;

/// Compact location handle, minted only by [`GraphBuilder`].
///
/// Name matching is case-sensitive and exact, and happens once in
/// [`Graph::resolve`]. Everything past that boundary works on ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(u32);

impl LocationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed, instruction-labeled edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: LocationId,
    pub instruction: InstructionId,
}

/// One configured connection, as supplied by the configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub instruction: String,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            instruction: instruction.into(),
        }
    }
}

/// Immutable campus graph: location names, outgoing adjacency lists and
/// interned instruction labels.
///
/// Outgoing edges keep the order in which they were configured. The route
/// search relies on that order for its tie-break between equal-length paths.
#[derive(Debug, Clone)]
pub struct Graph {
    names: Vec<String>,
    index: HashMap<String, LocationId>,
    outgoing: Vec<Vec<Edge>>,
    instructions: Vec<String>,
}

impl Graph {
    /// All known location names, in configuration order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a location by its exact name.
    pub fn resolve(&self, name: &str) -> Option<LocationId> {
        self.index.get(name).copied()
    }

    /// Resolve a LocationId back to its name. Returns None for ids minted by
    /// another graph.
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.names.get(id.index()).map(|s| s.as_str())
    }

    /// Resolve an InstructionId back to its label.
    pub fn instruction(&self, id: InstructionId) -> Option<&str> {
        self.instructions.get(id as usize).map(|s| s.as_str())
    }

    /// Outgoing edges of a location; empty if it has none.
    pub fn neighbors(&self, id: LocationId) -> &[Edge] {
        self.outgoing
            .get(id.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Outgoing edges of a named location as (target, instruction) pairs.
    /// Unknown names yield an empty sequence.
    pub fn neighbors_by_name<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
        let edges = self.resolve(name).map(|id| self.neighbors(id)).unwrap_or(&[]);
        edges.iter().filter_map(move |e| {
            let target = self.name(e.target)?;
            let instruction = self.instruction(e.instruction)?;
            Some((target, instruction))
        })
    }

    /// The edge from `from` to `to`, if one is configured.
    pub fn edge_between(&self, from: LocationId, to: LocationId) -> Option<&Edge> {
        self.neighbors(from).iter().find(|e| e.target == to)
    }

    pub fn location_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|v| v.len()).sum()
    }

    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let names: usize = self.names.iter().map(|n| n.capacity() + size_of::<String>()).sum();
        let index = self.index.len() * (size_of::<String>() + size_of::<LocationId>() + 16);
        let edges: usize = self
            .outgoing
            .iter()
            .map(|v| v.capacity() * size_of::<Edge>() + size_of::<Vec<Edge>>())
            .sum();
        let instructions: usize = self
            .instructions
            .iter()
            .map(|s| s.capacity() + size_of::<String>())
            .sum();

        names + index * 2 + edges + instructions
    }
}

/// Build a graph from a static edge list. Every endpoint becomes a location.
pub fn build_graph<I>(edges: I) -> Result<Graph, BuildError>
where
    I: IntoIterator<Item = EdgeRecord>,
{
    let mut builder = GraphBuilder::new();
    builder.load_edges(edges)?;
    Ok(builder.build())
}

/// Mutable staging area for a [`Graph`]. The only place locations and
/// edges are added; `build` freezes the result.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    names: Vec<String>,
    index: HashMap<String, LocationId>,
    outgoing: Vec<Vec<Edge>>,
    instructions: Vec<String>,
    instruction_map: HashMap<String, InstructionId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(location_count: usize) -> Self {
        Self {
            names: Vec::with_capacity(location_count),
            index: HashMap::with_capacity(location_count),
            outgoing: Vec::with_capacity(location_count),
            instructions: Vec::new(),
            instruction_map: HashMap::new(),
        }
    }

    /// Register a location, returning its id. Re-registering an existing
    /// name returns the original id.
    pub fn add_location(&mut self, name: &str) -> Result<LocationId, BuildError> {
        if let Some(&id) = self.index.get(name) {
            return Ok(id);
        }
        if name.trim().is_empty() {
            return Err(BuildError::EmptyName);
        }
        if name.trim() != name {
            return Err(BuildError::PaddedName(name.to_string()));
        }
        if self.names.len() >= MAX_LOCATIONS {
            return Err(BuildError::TooManyLocations { max: MAX_LOCATIONS });
        }

        let id = LocationId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.outgoing.push(Vec::new());
        Ok(id)
    }

    /// Intern an instruction label, returning its compact ID.
    pub fn intern_instruction(&mut self, label: &str) -> Result<InstructionId, BuildError> {
        if let Some(&id) = self.instruction_map.get(label) {
            return Ok(id);
        }
        if self.instructions.len() >= MAX_INSTRUCTIONS {
            return Err(BuildError::TooManyInstructions { max: MAX_INSTRUCTIONS });
        }
        let id = self.instructions.len() as InstructionId;
        self.instructions.push(label.to_string());
        self.instruction_map.insert(label.to_string(), id);
        Ok(id)
    }

    /// Add a directed edge, registering both endpoints. A second edge with
    /// the same source and target is rejected.
    pub fn add_edge(&mut self, from: &str, to: &str, instruction: &str) -> Result<(), BuildError> {
        let from_id = self.add_location(from)?;
        let to_id = self.add_location(to)?;

        if self.outgoing[from_id.index()].iter().any(|e| e.target == to_id) {
            return Err(BuildError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let instruction = self.intern_instruction(instruction)?;
        self.outgoing[from_id.index()].push(Edge {
            target: to_id,
            instruction,
        });
        Ok(())
    }

    /// Bulk load edges in order.
    pub fn load_edges<I>(&mut self, edges: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        for record in edges {
            self.add_edge(&record.from, &record.to, &record.instruction)?;
        }
        Ok(())
    }

    pub fn build(self) -> Graph {
        let graph = Graph {
            names: self.names,
            index: self.index,
            outgoing: self.outgoing,
            instructions: self.instructions,
        };
        debug!(
            locations = graph.location_count(),
            edges = graph.edge_count(),
            instructions = graph.instruction_count(),
            "campus graph built"
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_edge("Entrance", "Trust Office", "Take right").unwrap();
        b.add_edge("Entrance", "Sports complex", "Take left").unwrap();
        b.add_edge("Trust Office", "Entrance", "Take left").unwrap();
        b.add_location("Bank").unwrap();
        b.build()
    }

    #[test]
    fn test_locations_in_configuration_order() {
        let g = sample();
        let names: Vec<&str> = g.locations().collect();
        assert_eq!(names, vec!["Entrance", "Trust Office", "Sports complex", "Bank"]);
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let g = sample();
        assert!(g.contains("Entrance"));
        assert!(!g.contains("entrance"));
        assert!(!g.contains("Entrance "));
        assert!(!g.contains("Library"));
    }

    #[test]
    fn test_neighbors_keep_edge_order() {
        let g = sample();
        let out: Vec<(&str, &str)> = g.neighbors_by_name("Entrance").collect();
        assert_eq!(
            out,
            vec![("Trust Office", "Take right"), ("Sports complex", "Take left")]
        );
    }

    #[test]
    fn test_neighbors_empty_for_sink_and_unknown() {
        let g = sample();
        assert_eq!(g.neighbors_by_name("Bank").count(), 0);
        assert_eq!(g.neighbors_by_name("Sports complex").count(), 0);
        assert_eq!(g.neighbors_by_name("Nowhere").count(), 0);
    }

    #[test]
    fn test_edges_are_directed() {
        let g = sample();
        let entrance = g.resolve("Entrance").unwrap();
        let sports = g.resolve("Sports complex").unwrap();
        assert!(g.edge_between(entrance, sports).is_some());
        assert!(g.edge_between(sports, entrance).is_none());
    }

    #[test]
    fn test_reverse_edge_may_differ() {
        let g = sample();
        let entrance = g.resolve("Entrance").unwrap();
        let trust = g.resolve("Trust Office").unwrap();
        let there = g.edge_between(entrance, trust).unwrap();
        let back = g.edge_between(trust, entrance).unwrap();
        assert_eq!(g.instruction(there.instruction), Some("Take right"));
        assert_eq!(g.instruction(back.instruction), Some("Take left"));
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let mut b = GraphBuilder::new();
        b.add_edge("A", "B", "go").unwrap();
        let err = b.add_edge("A", "B", "go again").unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateEdge {
                from: "A".into(),
                to: "B".into()
            }
        );
        // The reverse direction is a different edge
        assert!(b.add_edge("B", "A", "back").is_ok());
    }

    #[test]
    fn test_empty_and_padded_names_rejected() {
        let mut b = GraphBuilder::new();
        assert_eq!(b.add_location(""), Err(BuildError::EmptyName));
        assert_eq!(b.add_location("   "), Err(BuildError::EmptyName));
        assert_eq!(
            b.add_location(" Canteen"),
            Err(BuildError::PaddedName(" Canteen".into()))
        );
        assert!(b.add_edge("Canteen", "", "go").is_err());
    }

    #[test]
    fn test_add_location_is_idempotent() {
        let mut b = GraphBuilder::new();
        let a = b.add_location("A").unwrap();
        assert_eq!(b.add_location("A").unwrap(), a);
        assert_eq!(b.build().location_count(), 1);
    }

    #[test]
    fn test_instruction_interning() {
        let mut b = GraphBuilder::new();
        b.add_edge("A", "B", "Go straight").unwrap();
        b.add_edge("B", "C", "Go straight").unwrap();
        b.add_edge("C", "A", "Take left").unwrap();
        let g = b.build();
        assert_eq!(g.instruction_count(), 2);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_instruction_invalid_id() {
        let g = sample();
        assert_eq!(g.instruction(999), None);
    }

    #[test]
    fn test_instruction_overflow() {
        let mut b = GraphBuilder::new();
        for i in 0..MAX_INSTRUCTIONS {
            b.intern_instruction(&format!("step {}", i)).unwrap();
        }
        assert_eq!(
            b.intern_instruction("one too many"),
            Err(BuildError::TooManyInstructions { max: MAX_INSTRUCTIONS })
        );
    }

    #[test]
    fn test_foreign_id_resolves_to_nothing() {
        let small = sample();
        let mut b = GraphBuilder::new();
        for i in 0..10 {
            b.add_location(&format!("L{}", i)).unwrap();
        }
        let big = b.build();
        let far = big.resolve("L9").unwrap();
        assert_eq!(small.name(far), None);
        assert!(small.neighbors(far).is_empty());
    }

    #[test]
    fn test_build_graph_registers_endpoints() {
        let g = build_graph(vec![
            EdgeRecord::new("PG Block", "LAW", "Take right"),
            EdgeRecord::new("PG Block", "Entrance", "Take right"),
        ])
        .unwrap();
        assert_eq!(g.location_count(), 3);
        assert!(g.contains("LAW"));
        assert_eq!(g.neighbors_by_name("LAW").count(), 0);
    }

    #[test]
    fn test_graph_counts_and_memory() {
        let g = sample();
        assert_eq!(g.location_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.memory_usage() > 0);
    }
}
