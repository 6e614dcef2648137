//! Airport adjacency list.

use crate::model::{Airport, AirportId, Flight};
use std::collections::HashMap;

const UNKNOWN_CITY: &str = "Unknown";

/// Mapping from source airport to the destinations of its flights.
///
/// Sources keep the order in which they first appear; destinations keep
/// flight order, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    order: Vec<AirportId>,
    edges: HashMap<AirportId, Vec<AirportId>>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flights<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> Self {
        let mut graph = Self::new();
        for flight in flights {
            graph.add_route(flight.source.clone(), flight.dest.clone());
        }
        graph
    }

    pub fn add_route(&mut self, source: AirportId, dest: AirportId) {
        if !self.edges.contains_key(&source) {
            self.order.push(source.clone());
        }
        self.edges.entry(source).or_default().push(dest);
    }

    /// Returns the destinations reachable by a direct flight from `source`.
    pub fn neighbors(&self, source: &AirportId) -> &[AirportId] {
        self.edges.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over source airports and their destinations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AirportId, &[AirportId])> {
        self.order
            .iter()
            .map(move |id| (id, self.neighbors(id)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Renders one `"<city> is connected to: <cities>"` line per source airport.
    pub fn render(&self, airports: &[Airport]) -> Vec<String> {
        let names: HashMap<&AirportId, &str> = airports
            .iter()
            .map(|airport| (&airport.id, airport.city.name.as_str()))
            .collect();
        let name_of = |id: &AirportId| names.get(id).copied().unwrap_or(UNKNOWN_CITY);

        self.iter()
            .map(|(source, dests)| {
                let cities: Vec<&str> = dests.iter().map(name_of).collect();
                format!("{} is connected to: {}", name_of(source), cities.join(", "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::City;

    fn flight(source: i64, dest: i64) -> Flight {
        Flight {
            source: source.into(),
            dest: dest.into(),
        }
    }

    fn airport(id: i64, name: &str) -> Airport {
        Airport {
            id: id.into(),
            city: City {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_render_basic() {
        let flights = vec![flight(1, 2), flight(1, 3)];
        let airports = vec![airport(1, "A"), airport(2, "B"), airport(3, "C")];

        let graph = RouteGraph::from_flights(&flights);
        assert_eq!(graph.render(&airports), vec!["A is connected to: B, C"]);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let flights = vec![flight(3, 1), flight(1, 2), flight(3, 2), flight(3, 1)];
        let graph = RouteGraph::from_flights(&flights);

        let sources: Vec<_> = graph.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(sources, vec![AirportId::Number(3), AirportId::Number(1)]);
        assert_eq!(
            graph.neighbors(&AirportId::Number(3)),
            &[
                AirportId::Number(1),
                AirportId::Number(2),
                AirportId::Number(1)
            ]
        );
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_unknown_airports() {
        let flights = vec![flight(1, 9), flight(8, 1)];
        let airports = vec![airport(1, "Recife")];

        let lines = RouteGraph::from_flights(&flights).render(&airports);
        assert_eq!(
            lines,
            vec![
                "Recife is connected to: Unknown",
                "Unknown is connected to: Recife"
            ]
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = RouteGraph::new();
        assert!(graph.is_empty());
        assert!(graph.neighbors(&AirportId::Number(1)).is_empty());
        assert!(graph.render(&[]).is_empty());
    }
}
