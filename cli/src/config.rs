use std::fs;
use std::path::{Path, PathBuf};

use campus_nav_core::{BuildError, Graph, GraphBuilder};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Campus shipped with the binary, used when no file is configured.
pub const DEFAULT_CAMPUS: &str = include_str!("../campus/bmsce.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read campus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid campus file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid campus graph: {0}")]
    Build(#[from] BuildError),
}

/// On-disk campus description.
///
/// `locations` is optional; it fixes listing order and declares locations
/// that have no edges. Edge endpoints are registered automatically.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CampusConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
    pub instruction: String,
}

impl CampusConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CAMPUS)
    }

    /// Build the immutable graph: declared locations first, then edges in
    /// file order.
    pub fn into_graph(self) -> Result<Graph, ConfigError> {
        let mut builder = GraphBuilder::with_capacity(self.locations.len());
        for name in &self.locations {
            builder.add_location(name)?;
        }
        for e in &self.edges {
            builder.add_edge(&e.from, &e.to, &e.instruction)?;
        }
        let graph = builder.build();
        info!(
            campus = self.name.as_deref().unwrap_or("unnamed"),
            locations = graph.location_count(),
            edges = graph.edge_count(),
            "campus loaded"
        );
        Ok(graph)
    }
}

/// Where the campus graph came from, for status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampusSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for CampusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampusSource::Builtin => write!(f, "builtin"),
            CampusSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Load the campus from `path`, or the builtin campus when None.
pub fn load_campus(path: Option<&Path>) -> Result<(CampusConfig, CampusSource), ConfigError> {
    match path {
        Some(p) => Ok((CampusConfig::load(p)?, CampusSource::File(p.to_path_buf()))),
        None => Ok((CampusConfig::builtin()?, CampusSource::Builtin)),
    }
}
