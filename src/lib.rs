//! Ant Colony Optimization engine for the Traveling Salesman Problem.
//!
//! A colony of stochastic ants constructs candidate tours over a city
//! graph, guided by a shared pheromone field that is reinforced and
//! decayed according to tour quality. Everything stochastic draws from
//! a deterministic seeded generator, one independent stream per ant,
//! so runs are reproducible regardless of scheduling.
//!
//! # Architecture
//!
//! The crate is the algorithmic core plus a single-process driver
//! surface. Deployment concerns — partitioning ants across workers,
//! broadcasting pheromone state, aggregating results — belong to an
//! external iteration driver that calls
//! [`Colony::run_iteration`](colony::Colony::run_iteration) and reads
//! the best tour back.
//!
//! # Example
//!
//! ```
//! use aco_tsp::colony::{render, Colony, ColonyConfig, ColonyRunner};
//!
//! let config = ColonyConfig::default()
//!     .with_num_ants(4)
//!     .with_max_iterations(100)
//!     .with_seed(21);
//! let mut colony = Colony::new(4, config).unwrap();
//! for (city, (x, y)) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
//!     .into_iter()
//!     .enumerate()
//! {
//!     colony.set_position(city, x, y).unwrap();
//! }
//! for i in 0..4 {
//!     for j in i + 1..4 {
//!         colony.connect(i, j).unwrap();
//!     }
//! }
//! let result = ColonyRunner::run(&mut colony).unwrap();
//! println!("{}", render(&result.best_tour, result.best_length, 0));
//! ```

pub mod colony;
pub mod error;
pub mod io;
pub mod random;
