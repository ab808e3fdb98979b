use thiserror::Error;

/// Errors raised while assembling a [`Graph`](crate::Graph) from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("location name must not be empty")]
    EmptyName,

    #[error("location name '{0}' has leading or trailing whitespace")]
    PaddedName(String),

    #[error("duplicate edge '{from}' -> '{to}': at most one instruction per destination")]
    DuplicateEdge { from: String, to: String },

    #[error("location count exceeded maximum ({max})")]
    TooManyLocations { max: usize },

    #[error("instruction count exceeded maximum ({max})")]
    TooManyInstructions { max: usize },
}

/// Errors raised by route queries.
///
/// "No path" is not an error: [`find_path`](crate::find_path) returns
/// `Ok(None)` for a valid pair of locations with no directed walk between them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown location '{name}'")]
    InvalidLocation { name: String },

    /// A path hop has no matching edge in the graph. Only reachable when a
    /// path is paired with a graph it was not computed against.
    #[error("internal inconsistency: no edge '{from}' -> '{to}' for a path hop")]
    InternalInconsistency { from: String, to: String },
}
