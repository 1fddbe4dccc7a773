//! City coordinates and adjacency.

use crate::error::AcoError;

/// City positions plus an optional adjacency restriction.
///
/// Positions are write-once during setup. Edges are symmetric: marking
/// `(i, j)` usable also marks `(j, i)`. A graph with no `connect` calls
/// has no usable edges — the driver typically connects every pair to
/// form a complete graph.
///
/// Distances are derived on demand from the coordinates and never
/// stored: `distance(i, j) == distance(j, i)`, non-negative, zero iff
/// `i == j`.
#[derive(Debug, Clone)]
pub struct CityGraph {
    num_cities: usize,
    positions: Vec<[f64; 2]>,
    adjacency: Vec<bool>,
}

impl CityGraph {
    /// Creates a graph of `num_cities` cities with no positions or edges.
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            positions: vec![[0.0, 0.0]; num_cities],
            adjacency: vec![false; num_cities * num_cities],
        }
    }

    /// Number of cities in the graph.
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    fn check(&self, city: usize) -> Result<(), AcoError> {
        if city >= self.num_cities {
            return Err(AcoError::CityOutOfBounds {
                city,
                num_cities: self.num_cities,
            });
        }
        Ok(())
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.num_cities + j
    }

    /// Sets a city's 2D coordinate.
    pub fn set_position(&mut self, city: usize, x: f64, y: f64) -> Result<(), AcoError> {
        self.check(city)?;
        self.positions[city] = [x, y];
        Ok(())
    }

    /// Returns a city's coordinate as `(x, y)`.
    pub fn position(&self, city: usize) -> (f64, f64) {
        let [x, y] = self.positions[city];
        (x, y)
    }

    /// Marks the edge between two cities usable, mirrored onto both
    /// orientations.
    ///
    /// Returns `true` if the edge was newly connected and `false` if it
    /// was already usable, so the caller can guard one-time edge
    /// initialization (the initial pheromone draw) against the mirrored
    /// call.
    pub fn connect(&mut self, i: usize, j: usize) -> Result<bool, AcoError> {
        self.check(i)?;
        self.check(j)?;
        if self.adjacency[self.index(i, j)] {
            return Ok(false);
        }
        let ij = self.index(i, j);
        let ji = self.index(j, i);
        self.adjacency[ij] = true;
        self.adjacency[ji] = true;
        Ok(true)
    }

    /// Whether the edge between two cities is usable.
    pub fn is_connected(&self, i: usize, j: usize) -> bool {
        self.adjacency[self.index(i, j)]
    }

    /// Euclidean distance between two cities.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let [xi, yi] = self.positions[i];
        let [xj, yj] = self.positions[j];
        (xi - xj).hypot(yi - yj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetric_and_zero_on_diagonal() {
        let mut graph = CityGraph::new(3);
        graph.set_position(0, 0.0, 0.0).unwrap();
        graph.set_position(1, 3.0, 4.0).unwrap();
        graph.set_position(2, -1.0, 2.0).unwrap();
        assert!((graph.distance(0, 1) - 5.0).abs() < 1e-12);
        assert_eq!(graph.distance(1, 2).to_bits(), graph.distance(2, 1).to_bits());
        assert_eq!(graph.distance(2, 2), 0.0);
    }

    #[test]
    fn test_connect_is_mirrored() {
        let mut graph = CityGraph::new(4);
        assert!(graph.connect(1, 3).unwrap());
        assert!(graph.is_connected(1, 3));
        assert!(graph.is_connected(3, 1));
        assert!(!graph.is_connected(0, 1));
    }

    #[test]
    fn test_connect_reports_double_initialization() {
        let mut graph = CityGraph::new(4);
        assert!(graph.connect(0, 2).unwrap());
        // The mirrored call must not look like a fresh edge.
        assert!(!graph.connect(2, 0).unwrap());
        assert!(!graph.connect(0, 2).unwrap());
    }

    #[test]
    fn test_out_of_bounds_city() {
        let mut graph = CityGraph::new(2);
        assert!(matches!(
            graph.set_position(2, 0.0, 0.0),
            Err(AcoError::CityOutOfBounds { city: 2, num_cities: 2 })
        ));
        assert!(graph.connect(0, 5).is_err());
    }
}
