//! Probabilistic tour construction for a single ant.

use super::graph::CityGraph;
use super::pheromone::PheromoneField;
use super::route::Route;
use crate::random::MinstdRng;

/// Builds one ant's route by repeated probabilistic next-city selection.
///
/// From the current city, every unvisited reachable city is a candidate
/// weighted by `(1/distance)^β · τ^α` — inverse distance biases toward
/// short edges, trail intensity toward reinforced ones. The next city
/// is drawn by inverse-CDF sampling over the candidates in enumeration
/// order.
pub(crate) struct TourBuilder<'a> {
    pub graph: &'a CityGraph,
    pub pheromone: &'a PheromoneField,
    /// Trail-influence exponent α.
    pub pheromone_weight: f64,
    /// Attractiveness exponent β.
    pub distance_weight: f64,
    pub start_city: usize,
}

impl TourBuilder<'_> {
    /// One construction attempt into recycled route storage.
    ///
    /// On a dead end (no unvisited reachable candidate before the tour
    /// is complete — only possible under a restricted adjacency) the
    /// attempt is abandoned with unfilled slots left behind; the
    /// validator rejects it and the optimizer retries.
    pub fn build_into(&self, route: &mut Route, rng: &mut MinstdRng) {
        let n = self.graph.num_cities();
        route.reset();
        route.set(0, self.start_city);

        let mut visited = vec![false; n];
        visited[self.start_city] = true;
        let mut current = self.start_city;
        let mut candidates: Vec<(usize, f64)> = Vec::with_capacity(n);

        for position in 1..n {
            candidates.clear();
            let mut total_weight = 0.0;
            for city in 0..n {
                if city == current || visited[city] || !self.graph.is_connected(current, city) {
                    continue;
                }
                let attractiveness =
                    (1.0 / self.graph.distance(current, city)).powf(self.distance_weight);
                let trail = self.pheromone.get(current, city).powf(self.pheromone_weight);
                let weight = attractiveness * trail;
                candidates.push((city, weight));
                total_weight += weight;
            }
            if candidates.is_empty() {
                return;
            }

            let next = self.select(&candidates, total_weight, rng);
            route.set(position, next);
            visited[next] = true;
            current = next;
        }
    }

    /// Inverse-CDF draw over the candidate list.
    ///
    /// Walks the candidates accumulating normalized mass until it
    /// reaches the uniform draw. Floating-point drift can leave the
    /// cumulative sum fractionally below the draw at the end of the
    /// list; the walk clamps to the last candidate rather than running
    /// past it.
    fn select(&self, candidates: &[(usize, f64)], total_weight: f64, rng: &mut MinstdRng) -> usize {
        let u = rng.next_uniform();
        let mut cumulative = 0.0;
        let mut chosen = candidates[candidates.len() - 1].0;
        for &(city, weight) in candidates {
            cumulative += weight / total_weight;
            if cumulative >= u {
                chosen = city;
                break;
            }
        }
        chosen
    }
}
