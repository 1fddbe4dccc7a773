//! Route storage, validation, and tour length.

use super::graph::CityGraph;

/// Marks a slot not yet filled during construction.
pub const UNFILLED: i32 = -1;

/// One ant's tour: an ordered sequence of city slots.
///
/// Storage is recycled across iterations: [`reset`](Self::reset) puts
/// every slot back to [`UNFILLED`] and construction fills them in
/// order. A valid route is a permutation of all cities starting at the
/// configured start city.
#[derive(Debug, Clone)]
pub struct Route {
    slots: Vec<i32>,
}

impl Route {
    /// Creates an all-unfilled route over `num_cities` slots.
    pub fn new(num_cities: usize) -> Self {
        Self {
            slots: vec![UNFILLED; num_cities],
        }
    }

    /// Number of slots (equals the city count).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the route has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Puts every slot back to [`UNFILLED`].
    pub fn reset(&mut self) {
        self.slots.fill(UNFILLED);
    }

    /// Fills one slot.
    pub fn set(&mut self, position: usize, city: usize) {
        self.slots[position] = city as i32;
    }

    /// The city at `position`, or `None` for an unfilled slot.
    pub fn get(&self, position: usize) -> Option<usize> {
        let slot = self.slots[position];
        (slot != UNFILLED).then_some(slot as usize)
    }

    /// Copies a fully filled route into a plain city sequence.
    ///
    /// Returns `None` if any slot is unfilled.
    pub fn to_cities(&self) -> Option<Vec<usize>> {
        self.slots
            .iter()
            .map(|&s| (s != UNFILLED).then_some(s as usize))
            .collect()
    }
}

/// Outcome of checking a constructed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    /// A permutation of all cities with every traversed edge usable.
    Valid,
    /// An unfilled slot remains; construction hit a dead end.
    Incomplete,
    /// A city appears more than once.
    Revisited,
    /// A consecutive pair has no usable edge.
    Disconnected,
    /// The last city has no usable edge back to the first.
    ClosureMissing,
}

/// Checks a route for structural validity against the graph.
///
/// Anything other than [`RouteStatus::Valid`] causes the optimizer to
/// discard the attempt and reconstruct from the start city. A city id
/// outside the graph has no usable edges and reports as
/// [`RouteStatus::Disconnected`].
pub fn validate(route: &Route, graph: &CityGraph) -> RouteStatus {
    let n = route.len();
    let mut seen = vec![false; graph.num_cities()];
    for position in 0..n {
        let Some(city) = route.get(position) else {
            return RouteStatus::Incomplete;
        };
        if city >= seen.len() {
            return RouteStatus::Disconnected;
        }
        if seen[city] {
            return RouteStatus::Revisited;
        }
        seen[city] = true;
    }
    for position in 0..n - 1 {
        let a = route.get(position).unwrap();
        let b = route.get(position + 1).unwrap();
        if !graph.is_connected(a, b) {
            return RouteStatus::Disconnected;
        }
    }
    let first = route.get(0).unwrap();
    let last = route.get(n - 1).unwrap();
    if !graph.is_connected(last, first) {
        return RouteStatus::ClosureMissing;
    }
    RouteStatus::Valid
}

/// Total tour length: consecutive distances plus the closing edge.
pub fn tour_length(route: &Route, graph: &CityGraph) -> f64 {
    let n = route.len();
    let mut sum = 0.0;
    for position in 0..n {
        let a = route.get(position).unwrap_or(0);
        let b = route.get((position + 1) % n).unwrap_or(0);
        sum += graph.distance(a, b);
    }
    sum
}
