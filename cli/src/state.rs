use std::sync::OnceLock;
use std::time::Instant;

use campus_nav_core::Graph;

use crate::config::CampusSource;

/// The loaded campus and metadata about its load.
pub struct CampusState {
    pub graph: Graph,
    pub name: Option<String>,
    pub source: CampusSource,
    pub load_time_ms: f64,
    pub loaded_at: Instant,
}

/// Process-wide campus, set once at startup and read-only afterwards.
static CAMPUS: OnceLock<CampusState> = OnceLock::new();

/// Install the campus. Returns the rejected state if one was already set.
pub fn set_campus(state: CampusState) -> Result<(), CampusState> {
    CAMPUS.set(state)
}

/// Execute a closure with a read reference to the loaded campus.
/// Returns None if no campus is loaded.
pub fn with_campus<R, F: FnOnce(&CampusState) -> R>(f: F) -> Option<R> {
    CAMPUS.get().map(f)
}
