use campus_nav_core::{Graph, Route, RouteError};
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub const NO_PATH_MESSAGE: &str =
    "No path found. The start and end points might not be connected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("please select both start and end points")]
    MissingEndpoint,

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("cannot render route: {0}")]
    Render(#[from] serde_json::Error),
}

impl InputError {
    /// True for mistakes in what the user typed, as opposed to faults.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            InputError::MissingEndpoint | InputError::Route(RouteError::InvalidLocation { .. })
        )
    }
}

/// Outcome of a route query that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(String),
    NoPath,
}

#[derive(Serialize)]
struct RouteJson<'a> {
    path: &'a [String],
    directions: &'a [String],
    hops: usize,
}

/// Trim both endpoints and reject empty input.
pub fn normalize_endpoints<'a>(start: &'a str, end: &'a str) -> Result<(&'a str, &'a str), InputError> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(InputError::MissingEndpoint);
    }
    Ok((start, end))
}

/// Validate input, resolve the route and render it.
pub fn run(graph: &Graph, start: &str, end: &str, format: OutputFormat) -> Result<Outcome, InputError> {
    let (start, end) = normalize_endpoints(start, end)?;

    match campus_nav_core::route(graph, start, end)? {
        Some(route) => {
            info!(start, end, hops = route.hops(), "route resolved");
            let rendered = match format {
                OutputFormat::Text => render_text(&route),
                OutputFormat::Json => render_json(&route)?,
            };
            Ok(Outcome::Found(rendered))
        }
        None => {
            info!(start, end, "no route");
            Ok(Outcome::NoPath)
        }
    }
}

/// One line per hop as "from -> instruction -> to", then the destination.
pub fn render_text(route: &Route) -> String {
    let mut lines = vec!["Path found:".to_string()];
    lines.extend(
        route
            .steps()
            .map(|(from, instruction, to)| format!("{} -> {} -> {}", from, instruction, to)),
    );
    lines.push(route.destination().to_string());
    lines.join("\n")
}

pub fn render_json(route: &Route) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RouteJson {
        path: &route.locations,
        directions: &route.directions,
        hops: route.hops(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CampusConfig;

    fn campus() -> Graph {
        CampusConfig::builtin().unwrap().into_graph().unwrap()
    }

    #[test]
    fn test_text_rendering() {
        let route = Route {
            locations: vec!["A".into(), "B".into(), "C".into()],
            directions: vec!["go".into(), "turn".into()],
        };
        assert_eq!(render_text(&route), "Path found:\nA -> go -> B\nB -> turn -> C\nC");
    }

    #[test]
    fn test_text_rendering_zero_hops() {
        let route = Route {
            locations: vec!["A".into()],
            directions: Vec::new(),
        };
        assert_eq!(render_text(&route), "Path found:\nA");
    }

    #[test]
    fn test_json_rendering() {
        let route = Route {
            locations: vec!["A".into(), "B".into()],
            directions: vec!["go".into()],
        };
        let value: serde_json::Value = serde_json::from_str(&render_json(&route).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"path": ["A", "B"], "directions": ["go"], "hops": 1})
        );
    }

    #[test]
    fn test_campus_route_entrance_to_canteen() {
        let g = campus();
        let out = run(&g, "Entrance", "Canteen", OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            Outcome::Found(
                "Path found:\n\
                 Entrance -> Take left -> Sports complex\n\
                 Sports complex -> Go straight & Take Left -> Hostel\n\
                 Hostel -> Go straight -> Canteen\n\
                 Canteen"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_campus_route_to_dangling_target() {
        let g = campus();
        let route = campus_nav_core::route(&g, "Science Block", "LAW").unwrap().unwrap();
        assert_eq!(route.locations, vec!["Science Block", "PG Block", "LAW"]);
        assert_eq!(route.directions, vec!["Take right", "Take right"]);
        // Nothing leaves "LAW"
        assert_eq!(run(&g, "LAW", "Entrance", OutputFormat::Text).unwrap(), Outcome::NoPath);
    }

    #[test]
    fn test_input_is_trimmed() {
        let g = campus();
        let out = run(&g, "  Bank ", "Bank\n", OutputFormat::Text).unwrap();
        assert_eq!(out, Outcome::Found("Path found:\nBank".to_string()));
    }

    #[test]
    fn test_empty_input_rejected() {
        let g = campus();
        let err = run(&g, "   ", "Bank", OutputFormat::Text).unwrap_err();
        assert!(matches!(err, InputError::MissingEndpoint));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_unknown_location_rejected() {
        let g = campus();
        let err = run(&g, "Library", "Bank", OutputFormat::Json).unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "unknown location 'Library'");
    }
}
