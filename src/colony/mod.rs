//! Ant Colony Optimization over a city graph.
//!
//! A population of stochastic ants repeatedly constructs candidate
//! tours guided by a shared pheromone field; after each iteration the
//! field evaporates and is reinforced in proportion to tour quality,
//! biasing later construction toward the edges of good tours.
//!
//! The algorithm is embarrassingly parallel within one iteration:
//! every ant reads the same pheromone snapshot and writes only its own
//! route and random stream. The end-of-iteration
//! evaporation/reinforcement pass is the single barrier.
//!
//! # References
//!
//! - Dorigo & Gambardella (1997), "Ant Colony System"
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"

mod ant;
mod config;
mod graph;
mod pheromone;
mod report;
mod route;
mod runner;

pub use config::ColonyConfig;
pub use graph::CityGraph;
pub use pheromone::PheromoneField;
pub use report::render;
pub use route::{tour_length, validate, Route, RouteStatus, UNFILLED};
pub use runner::{Colony, ColonyResult, ColonyRunner};
