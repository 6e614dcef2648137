//! # vendepass-routes
//!
//! Flight route graph.
//!
//! Builds an adjacency list of airports from a flights file and renders it
//! with city names taken from an airports file.

pub mod error;
pub mod graph;
pub mod model;

pub use error::RoutesError;
pub use graph::RouteGraph;
pub use model::{Airport, AirportId, City, Flight};

use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads a JSON document from a file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, RoutesError> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|e| RoutesError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| RoutesError::Parse(path.to_path_buf(), e))
}

/// Loads flights and airports from their files and renders the adjacency listing.
pub fn render_files(
    flights_path: impl AsRef<Path>,
    airports_path: impl AsRef<Path>,
) -> Result<Vec<String>, RoutesError> {
    let flights: Vec<Flight> = read_json(flights_path)?;
    let airports: Vec<Airport> = read_json(airports_path)?;
    tracing::debug!(
        "Loaded {} flights and {} airports",
        flights.len(),
        airports.len()
    );

    let graph = RouteGraph::from_flights(&flights);
    Ok(graph.render(&airports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_json(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_render_files() {
        let flights = temp_json(
            r#"[{"SourceAirportId":1,"DestAirportId":2},{"SourceAirportId":1,"DestAirportId":3}]"#,
        );
        let airports = temp_json(
            r#"[{"Id":1,"City":{"Name":"A"}},{"Id":2,"City":{"Name":"B"}},{"Id":3,"City":{"Name":"C"}}]"#,
        );

        let lines = render_files(flights.path(), airports.path()).unwrap();
        assert_eq!(lines, vec!["A is connected to: B, C".to_string()]);
    }

    #[test]
    fn test_render_files_missing() {
        let airports = temp_json("[]");
        let err = render_files("/nonexistent/flights.json", airports.path()).unwrap_err();
        assert!(matches!(err, RoutesError::Io(..)));
        assert!(err.to_string().contains("flights.json"));
    }

    #[test]
    fn test_render_files_malformed() {
        let flights = temp_json(r#"[{"SourceAirportId":1}]"#);
        let airports = temp_json("[]");
        let err = render_files(flights.path(), airports.path()).unwrap_err();
        assert!(matches!(err, RoutesError::Parse(..)));
    }
}
