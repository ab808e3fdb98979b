use crate::state::CampusState;

/// Summary of the loaded campus, one "key: value" per line.
pub fn render(state: &CampusState) -> String {
    let g = &state.graph;
    let rows = [
        ("campus", state.name.clone().unwrap_or_else(|| "unnamed".to_string())),
        ("source", state.source.to_string()),
        ("locations", g.location_count().to_string()),
        ("edges", g.edge_count().to_string()),
        ("instructions", g.instruction_count().to_string()),
        ("memory_bytes", g.memory_usage().to_string()),
        ("load_time_ms", format!("{:.3}", state.load_time_ms)),
        (
            "loaded_for_ms",
            format!("{:.3}", state.loaded_at.elapsed().as_secs_f64() * 1000.0),
        ),
    ];

    rows.iter()
        .map(|(k, v)| format!("{:<14}{}", format!("{}:", k), v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Location names, one per line, in configuration order.
pub fn render_locations(state: &CampusState) -> String {
    state.graph.locations().collect::<Vec<_>>().join("\n")
}
