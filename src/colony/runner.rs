//! Colony optimization loop.
//!
//! [`Colony`] owns the per-run state — the city graph, the shared
//! pheromone field, one recycled route and one random stream per ant,
//! and the best tour found so far. [`ColonyRunner`] drives a full run
//! of `max_iterations` iterations with the usual cancellation token.

use super::ant::TourBuilder;
use super::config::ColonyConfig;
use super::graph::CityGraph;
use super::pheromone::PheromoneField;
use super::route::{tour_length, validate, Route, RouteStatus};
use crate::error::AcoError;
use crate::random::{stream_seed, MinstdRng};
use rayon::prelude::*;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One ant colony over a city graph.
///
/// The driver protocol is: create the colony, place the cities with
/// [`set_position`](Self::set_position), wire the usable edges with
/// [`connect`](Self::connect), then call
/// [`run_iteration`](Self::run_iteration) as many times as desired and
/// read off [`best_tour`](Self::best_tour) /
/// [`best_length`](Self::best_length).
///
/// Within an iteration every ant constructs against the same pheromone
/// snapshot and writes only its own route and random stream; the
/// evaporation/reinforcement pass at the end of `run_iteration` is the
/// single synchronization barrier.
#[derive(Debug)]
pub struct Colony {
    config: ColonyConfig,
    graph: CityGraph,
    pheromone: PheromoneField,
    /// Recycled route storage, one per ant.
    routes: Vec<Route>,
    /// Independent random stream per ant, derived from the run seed.
    streams: Vec<MinstdRng>,
    /// Stream for setup-time draws (initial pheromone at `connect`).
    setup_rng: MinstdRng,
    best_tour: Option<Vec<usize>>,
    best_length: f64,
    iterations_run: usize,
}

impl Colony {
    /// Creates a colony over `num_cities` cities.
    ///
    /// Validates the configuration and derives one random stream per
    /// ant from the run seed, so runs are reproducible and independent
    /// of how ants are scheduled.
    pub fn new(num_cities: usize, config: ColonyConfig) -> Result<Self, AcoError> {
        config.validate().map_err(AcoError::InvalidConfig)?;
        if num_cities < 2 {
            return Err(AcoError::InvalidConfig(format!(
                "need at least 2 cities, got {num_cities}"
            )));
        }
        if config.start_city >= num_cities {
            return Err(AcoError::CityOutOfBounds {
                city: config.start_city,
                num_cities,
            });
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        let streams = (0..config.num_ants)
            .map(|ant| MinstdRng::new(stream_seed(seed, ant as u64)))
            .collect();
        let routes = vec![Route::new(num_cities); config.num_ants];
        Ok(Self {
            graph: CityGraph::new(num_cities),
            pheromone: PheromoneField::new(num_cities),
            routes,
            streams,
            setup_rng: MinstdRng::new(seed),
            best_tour: None,
            best_length: f64::INFINITY,
            iterations_run: 0,
            config,
        })
    }

    /// Sets a city's coordinate.
    pub fn set_position(&mut self, city: usize, x: f64, y: f64) -> Result<(), AcoError> {
        self.graph.set_position(city, x, y)
    }

    /// Marks the edge between two cities usable and assigns its initial
    /// pheromone, mirrored onto both orientations.
    ///
    /// The initial trail is drawn once per edge, uniform in
    /// `[0, max_initial_pheromone)`; the mirrored call is a no-op and
    /// consumes no random draw.
    pub fn connect(&mut self, i: usize, j: usize) -> Result<(), AcoError> {
        if self.graph.connect(i, j)? {
            let trail = self.setup_rng.next_uniform() * self.config.max_initial_pheromone;
            self.pheromone.init_edge(i, j, trail);
        }
        Ok(())
    }

    /// Loads city records from a reader and fully connects the graph.
    ///
    /// Records are whitespace/tab-delimited `id x y` lines, one city
    /// per line (see [`crate::io::load_cities`]). After placement every
    /// city pair is connected, forming a complete graph.
    pub fn load_complete<R: BufRead>(&mut self, reader: R) -> Result<(), AcoError> {
        for record in crate::io::load_cities(reader)? {
            self.set_position(record.id, record.x, record.y)?;
        }
        let n = self.graph.num_cities();
        for i in 0..n {
            for j in i + 1..n {
                self.connect(i, j)?;
            }
        }
        Ok(())
    }

    /// Runs one full colony iteration, barrier included.
    ///
    /// Every ant retries `construct → validate` until it has a valid
    /// tour (or exhausts `max_construction_retries`, which surfaces as
    /// [`AcoError::ConstructionDeadlock`]). Each valid tour is measured
    /// against the best so far and deposits `Q / length` on every edge
    /// it traverses, closing edge included; the deposits land in the
    /// delta accumulator only. After all ants finish, one
    /// evaporation/reinforcement pass folds the deltas into the field
    /// and the route storage is cleared for the next iteration.
    pub fn run_iteration(&mut self) -> Result<(), AcoError> {
        let iteration = self.iterations_run + 1;
        let retries = self.config.max_construction_retries;
        let builder = TourBuilder {
            graph: &self.graph,
            pheromone: &self.pheromone,
            pheromone_weight: self.config.pheromone_weight,
            distance_weight: self.config.distance_weight,
            start_city: self.config.start_city,
        };

        let outcomes: Vec<Result<(f64, Vec<usize>), AcoError>> = if self.config.parallel {
            self.routes
                .par_iter_mut()
                .zip(self.streams.par_iter_mut())
                .enumerate()
                .map(|(ant, (route, rng))| {
                    construct_valid(&builder, route, rng, retries, ant, iteration)
                })
                .collect()
        } else {
            self.routes
                .iter_mut()
                .zip(self.streams.iter_mut())
                .enumerate()
                .map(|(ant, (route, rng))| {
                    construct_valid(&builder, route, rng, retries, ant, iteration)
                })
                .collect()
        };

        let mut completed = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            completed.push(outcome?);
        }

        let n = self.graph.num_cities();
        for (length, cities) in &completed {
            if *length < self.best_length {
                self.best_length = *length;
                self.best_tour = Some(cities.clone());
            }
            let deposit = self.config.pheromone_constant / length;
            for position in 0..n {
                let a = cities[position];
                let b = cities[(position + 1) % n];
                self.pheromone.deposit_delta(a, b, deposit);
            }
        }

        // Barrier: the only point where the shared field mutates.
        self.pheromone
            .apply_evaporation_and_reinforcement(self.config.evaporation_rate);
        for route in &mut self.routes {
            route.reset();
        }
        self.iterations_run = iteration;
        Ok(())
    }

    /// The best tour found so far, if any iteration has completed.
    pub fn best_tour(&self) -> Option<&[usize]> {
        self.best_tour.as_deref()
    }

    /// Length of the best tour, `f64::INFINITY` before the first one.
    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Number of completed iterations.
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// The city graph.
    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    /// The shared pheromone field.
    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    /// The run configuration.
    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }
}

/// Retry `construct → validate` until a valid tour or budget exhaustion.
fn construct_valid(
    builder: &TourBuilder<'_>,
    route: &mut Route,
    rng: &mut MinstdRng,
    retries: usize,
    ant: usize,
    iteration: usize,
) -> Result<(f64, Vec<usize>), AcoError> {
    for _ in 0..retries {
        builder.build_into(route, rng);
        if validate(route, builder.graph) != RouteStatus::Valid {
            continue;
        }
        if let Some(cities) = route.to_cities() {
            return Ok((tour_length(route, builder.graph), cities));
        }
    }
    Err(AcoError::ConstructionDeadlock {
        ant,
        iteration,
        retries,
    })
}

/// Result of a full colony run.
#[derive(Debug, Clone)]
pub struct ColonyResult {
    /// The best tour found. Empty if the run was cancelled before any
    /// iteration completed.
    pub best_tour: Vec<usize>,

    /// Length of the best tour, closing edge included.
    pub best_length: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best length at the end of each iteration.
    pub length_history: Vec<f64>,
}

/// Drives a colony through its configured number of iterations.
pub struct ColonyRunner;

impl ColonyRunner {
    /// Runs `max_iterations` iterations.
    pub fn run(colony: &mut Colony) -> Result<ColonyResult, AcoError> {
        Self::run_with_cancel(colony, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If the flag is set the run stops before the next iteration and
    /// returns the best tour found so far.
    pub fn run_with_cancel(
        colony: &mut Colony,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ColonyResult, AcoError> {
        let mut length_history = Vec::with_capacity(colony.config.max_iterations);
        let mut cancelled = false;

        for _ in 0..colony.config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            colony.run_iteration()?;
            length_history.push(colony.best_length());
        }

        Ok(ColonyResult {
            best_tour: colony.best_tour().map(<[usize]>::to_vec).unwrap_or_default(),
            best_length: colony.best_length(),
            iterations: colony.iterations_run(),
            cancelled,
            length_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UNIT_SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];

    fn complete_colony(points: &[(f64, f64)], config: ColonyConfig) -> Colony {
        let n = points.len();
        let mut colony = Colony::new(n, config).unwrap();
        for (city, (x, y)) in points.iter().enumerate() {
            colony.set_position(city, *x, *y).unwrap();
        }
        for i in 0..n {
            for j in i + 1..n {
                colony.connect(i, j).unwrap();
            }
        }
        colony
    }

    #[test]
    fn test_unit_square_converges_to_perimeter() {
        let config = ColonyConfig::default()
            .with_num_ants(1)
            .with_max_iterations(50)
            .with_seed(21);
        let mut colony = complete_colony(&UNIT_SQUARE, config);
        let result = ColonyRunner::run(&mut colony).unwrap();

        assert!(
            (result.best_length - 4.0).abs() < 1e-9,
            "expected the unit-square perimeter, got {}",
            result.best_length
        );
        // The tour traces the boundary: each hop has length 1.
        assert_eq!(result.best_tour.len(), 4);
        assert_eq!(result.best_tour[0], 0);
        let mut sorted = result.best_tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        for i in 0..4 {
            let a = result.best_tour[i];
            let b = result.best_tour[(i + 1) % 4];
            assert!((colony.graph().distance(a, b) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_best_length_history_non_increasing() {
        let config = ColonyConfig::default()
            .with_num_ants(4)
            .with_max_iterations(30)
            .with_seed(7);
        let points = [
            (0.0, 0.0),
            (3.0, 1.0),
            (1.0, 4.0),
            (5.0, 2.0),
            (2.0, 6.0),
            (6.0, 5.0),
        ];
        let mut colony = complete_colony(&points, config);
        let result = ColonyRunner::run(&mut colony).unwrap();
        assert_eq!(result.length_history.len(), 30);
        for window in result.length_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_fixed_seed_runs_are_identical() {
        let points = [
            (0.0, 0.0),
            (2.0, 1.0),
            (1.0, 3.0),
            (4.0, 0.5),
            (3.0, 2.5),
        ];
        let config = ColonyConfig::default()
            .with_num_ants(3)
            .with_max_iterations(20)
            .with_seed(12345);
        let a = ColonyRunner::run(&mut complete_colony(&points, config.clone())).unwrap();
        let b = ColonyRunner::run(&mut complete_colony(&points, config)).unwrap();
        assert_eq!(a.best_tour, b.best_tour);
        let bits = |h: &[f64]| h.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.length_history), bits(&b.length_history));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let points = [
            (0.0, 0.0),
            (2.0, 1.0),
            (1.0, 3.0),
            (4.0, 0.5),
            (3.0, 2.5),
            (0.5, 4.0),
        ];
        let config = ColonyConfig::default()
            .with_num_ants(6)
            .with_max_iterations(15)
            .with_seed(99);
        let sequential =
            ColonyRunner::run(&mut complete_colony(&points, config.clone())).unwrap();
        let parallel =
            ColonyRunner::run(&mut complete_colony(&points, config.with_parallel(true))).unwrap();
        assert_eq!(sequential.best_tour, parallel.best_tour);
        assert_eq!(
            sequential.best_length.to_bits(),
            parallel.best_length.to_bits()
        );
    }

    #[test]
    fn test_unreachable_city_raises_deadlock() {
        let config = ColonyConfig::default()
            .with_num_ants(1)
            .with_max_construction_retries(50)
            .with_seed(21);
        let mut colony = Colony::new(4, config).unwrap();
        for (city, (x, y)) in UNIT_SQUARE.iter().enumerate() {
            colony.set_position(city, *x, *y).unwrap();
        }
        // City 3 has no edges at all.
        for i in 0..3 {
            for j in i + 1..3 {
                colony.connect(i, j).unwrap();
            }
        }
        match colony.run_iteration() {
            Err(AcoError::ConstructionDeadlock {
                ant,
                iteration,
                retries,
            }) => {
                assert_eq!(ant, 0);
                assert_eq!(iteration, 1);
                assert_eq!(retries, 50);
            }
            other => panic!("expected ConstructionDeadlock, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_iteration_is_not_counted() {
        let config = ColonyConfig::default()
            .with_num_ants(1)
            .with_max_construction_retries(10)
            .with_seed(21);
        let mut colony = Colony::new(4, config).unwrap();
        for (city, (x, y)) in UNIT_SQUARE.iter().enumerate() {
            colony.set_position(city, *x, *y).unwrap();
        }
        for i in 0..3 {
            for j in i + 1..3 {
                colony.connect(i, j).unwrap();
            }
        }
        assert!(colony.run_iteration().is_err());
        // Only completed iterations count; the deadlocked one does not.
        assert_eq!(colony.iterations_run(), 0);
        // The city becomes reachable; the next attempt is still
        // reported as iteration 1 and completes as such.
        colony.connect(0, 3).unwrap();
        colony.connect(2, 3).unwrap();
        colony.run_iteration().unwrap();
        assert_eq!(colony.iterations_run(), 1);
    }

    #[test]
    fn test_pheromone_stays_symmetric_and_non_negative() {
        let config = ColonyConfig::default()
            .with_num_ants(3)
            .with_max_iterations(25)
            .with_seed(5);
        let mut colony = complete_colony(&UNIT_SQUARE, config);
        for _ in 0..25 {
            colony.run_iteration().unwrap();
            assert!(colony.pheromone().is_symmetric());
            for i in 0..4 {
                for j in 0..4 {
                    assert!(colony.pheromone().get(i, j) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_connect_mirror_consumes_one_draw() {
        let config = ColonyConfig::default().with_seed(21);
        let mut a = Colony::new(3, config.clone()).unwrap();
        let mut b = Colony::new(3, config).unwrap();
        a.connect(0, 1).unwrap();
        a.connect(1, 0).unwrap(); // mirrored call, no draw
        a.connect(1, 2).unwrap();
        b.connect(0, 1).unwrap();
        b.connect(1, 2).unwrap();
        assert_eq!(a.pheromone().get(1, 2).to_bits(), b.pheromone().get(1, 2).to_bits());
    }

    #[test]
    fn test_cancellation_before_first_iteration() {
        let config = ColonyConfig::default().with_seed(1);
        let mut colony = complete_colony(&UNIT_SQUARE, config);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = ColonyRunner::run_with_cancel(&mut colony, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.best_tour.is_empty());
    }

    #[test]
    fn test_rejects_invalid_setup() {
        assert!(matches!(
            Colony::new(1, ColonyConfig::default()),
            Err(AcoError::InvalidConfig(_))
        ));
        assert!(matches!(
            Colony::new(4, ColonyConfig::default().with_start_city(4)),
            Err(AcoError::CityOutOfBounds { .. })
        ));
        assert!(matches!(
            Colony::new(4, ColonyConfig::default().with_num_ants(0)),
            Err(AcoError::InvalidConfig(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_best_tour_is_valid_permutation_with_matching_length(
            coords in prop::collection::hash_set((0u32..60, 0u32..60), 4..9),
            seed in 1i64..5000,
        ) {
            let points: Vec<(f64, f64)> =
                coords.into_iter().map(|(x, y)| (f64::from(x), f64::from(y))).collect();
            let n = points.len();
            let config = ColonyConfig::default()
                .with_num_ants(3)
                .with_max_iterations(5)
                .with_seed(seed);
            let mut colony = complete_colony(&points, config);
            let result = ColonyRunner::run(&mut colony).unwrap();

            // Permutation of all cities starting at the start city.
            prop_assert_eq!(result.best_tour.len(), n);
            prop_assert_eq!(result.best_tour[0], 0);
            let mut sorted = result.best_tour.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());

            // Reported length matches an independent recomputation.
            let mut recomputed = 0.0;
            for i in 0..n {
                let (xa, ya) = points[result.best_tour[i]];
                let (xb, yb) = points[result.best_tour[(i + 1) % n]];
                recomputed += (xa - xb).hypot(ya - yb);
            }
            prop_assert!((recomputed - result.best_length).abs() < 1e-9);

            // Field invariants survive the run.
            prop_assert!(colony.pheromone().is_symmetric());
            for i in 0..n {
                for j in 0..n {
                    prop_assert!(colony.pheromone().get(i, j) >= 0.0);
                }
            }
        }
    }
}
