//! Colony configuration.

/// Configuration for one ACO run.
///
/// All tunables are explicit here — the engine bakes in no process-wide
/// constants. Defaults follow the classic small-instance setup:
/// α = 0.5, β = 0.8, Q = 1000, ρ = 0.5, τmax = 2.0, 4 ants,
/// 1000 iterations, start city 0.
///
/// # Examples
///
/// ```
/// use aco_tsp::colony::ColonyConfig;
///
/// let config = ColonyConfig::default()
///     .with_num_ants(8)
///     .with_max_iterations(200)
///     .with_seed(21);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColonyConfig {
    /// Number of ants constructing tours each iteration.
    pub num_ants: usize,

    /// Number of iterations a full run executes.
    pub max_iterations: usize,

    /// Evaporation rate ρ in (0, 1): fraction of trail decayed per
    /// iteration.
    pub evaporation_rate: f64,

    /// Deposit constant Q: each ant deposits `Q / tour_length` on every
    /// edge its tour traverses.
    pub pheromone_constant: f64,

    /// Trail-influence exponent α.
    pub pheromone_weight: f64,

    /// Attractiveness (inverse-distance) exponent β.
    pub distance_weight: f64,

    /// Scale for the initial trail drawn per edge at `connect` time:
    /// uniform in `[0, max_initial_pheromone)`.
    pub max_initial_pheromone: f64,

    /// City every tour starts from.
    pub start_city: usize,

    /// Seed for the deterministic random engine. `None` draws a fresh
    /// seed per run.
    pub seed: Option<i64>,

    /// Construction retry budget per ant per iteration. Exceeding it
    /// raises [`AcoError::ConstructionDeadlock`](crate::error::AcoError::ConstructionDeadlock)
    /// instead of looping forever on an unreachable city.
    pub max_construction_retries: usize,

    /// Whether to construct the ants of one iteration in parallel using
    /// rayon. Results are identical either way: every ant owns its own
    /// random stream.
    pub parallel: bool,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            num_ants: 4,
            max_iterations: 1000,
            evaporation_rate: 0.5,
            pheromone_constant: 1000.0,
            pheromone_weight: 0.5,
            distance_weight: 0.8,
            max_initial_pheromone: 2.0,
            start_city: 0,
            seed: None,
            max_construction_retries: 10_000,
            parallel: false,
        }
    }
}

impl ColonyConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rho: f64) -> Self {
        self.evaporation_rate = rho;
        self
    }

    pub fn with_pheromone_constant(mut self, q: f64) -> Self {
        self.pheromone_constant = q;
        self
    }

    pub fn with_pheromone_weight(mut self, alpha: f64) -> Self {
        self.pheromone_weight = alpha;
        self
    }

    pub fn with_distance_weight(mut self, beta: f64) -> Self {
        self.distance_weight = beta;
        self
    }

    pub fn with_max_initial_pheromone(mut self, tau_max: f64) -> Self {
        self.max_initial_pheromone = tau_max;
        self
    }

    pub fn with_start_city(mut self, city: usize) -> Self {
        self.start_city = city;
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_construction_retries(mut self, n: usize) -> Self {
        self.max_construction_retries = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_ants == 0 {
            return Err("num_ants must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) || self.evaporation_rate == 0.0 {
            return Err(format!(
                "evaporation_rate must be in (0, 1), got {}",
                self.evaporation_rate
            ));
        }
        if self.pheromone_constant <= 0.0 || !self.pheromone_constant.is_finite() {
            return Err(format!(
                "pheromone_constant must be positive, got {}",
                self.pheromone_constant
            ));
        }
        if self.pheromone_weight < 0.0 || !self.pheromone_weight.is_finite() {
            return Err(format!(
                "pheromone_weight must be non-negative, got {}",
                self.pheromone_weight
            ));
        }
        if self.distance_weight < 0.0 || !self.distance_weight.is_finite() {
            return Err(format!(
                "distance_weight must be non-negative, got {}",
                self.distance_weight
            ));
        }
        if self.max_initial_pheromone <= 0.0 || !self.max_initial_pheromone.is_finite() {
            return Err(format!(
                "max_initial_pheromone must be positive, got {}",
                self.max_initial_pheromone
            ));
        }
        if self.max_construction_retries == 0 {
            return Err("max_construction_retries must be at least 1".into());
        }
        Ok(())
    }
}
