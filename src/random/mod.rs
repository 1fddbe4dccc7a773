//! Deterministic random number engine.
//!
//! Every stochastic decision in the colony draws from a [`MinstdRng`],
//! a seeded minimal-standard linear congruential generator with a
//! Bays–Durham shuffle table. Given the same seed it reproduces the
//! same stream of uniform and Gaussian deviates on every platform,
//! which makes whole optimization runs replayable.
//!
//! Each ant owns an independent stream derived from the run seed and
//! the ant's index via [`stream_seed`], so constructing ants
//! concurrently does not perturb reproducibility.

mod minstd;

pub use minstd::{stream_seed, MinstdRng};
