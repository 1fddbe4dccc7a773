//! Pheromone trail matrix and per-iteration delta accumulator.

/// Symmetric matrix of trail intensities over city pairs.
///
/// Every write lands on both `(i, j)` and `(j, i)`, so symmetry holds
/// by construction. The delta accumulator collects this iteration's
/// deposits separately from the live field; the two are folded together
/// exactly once per iteration by
/// [`apply_evaporation_and_reinforcement`](Self::apply_evaporation_and_reinforcement),
/// which also clears the accumulator.
#[derive(Debug, Clone)]
pub struct PheromoneField {
    num_cities: usize,
    tau: Vec<f64>,
    delta: Vec<f64>,
}

impl PheromoneField {
    /// Creates a zeroed field over `num_cities` cities.
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            tau: vec![0.0; num_cities * num_cities],
            delta: vec![0.0; num_cities * num_cities],
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.num_cities + j
    }

    /// Current trail intensity on the edge `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.tau[self.index(i, j)]
    }

    /// Sets the initial trail on a freshly connected edge, mirrored.
    ///
    /// Called once per edge at setup; the caller guards against the
    /// mirrored `connect` re-initializing it.
    pub(crate) fn init_edge(&mut self, i: usize, j: usize, value: f64) {
        let ij = self.index(i, j);
        let ji = self.index(j, i);
        self.tau[ij] = value;
        self.tau[ji] = value;
    }

    /// Adds `amount` to the delta accumulator for `(i, j)` and `(j, i)`.
    ///
    /// The live field is untouched until the end-of-iteration pass.
    pub fn deposit_delta(&mut self, i: usize, j: usize, amount: f64) {
        let ij = self.index(i, j);
        let ji = self.index(j, i);
        self.delta[ij] += amount;
        self.delta[ji] += amount;
    }

    /// End-of-iteration barrier pass.
    ///
    /// For every pair: `τ ← (1 − rho)·τ + Δ`, then `Δ ← 0`. Must run
    /// exactly once per completed iteration, after every ant has
    /// deposited and before any ant of the next iteration reads `τ`.
    pub fn apply_evaporation_and_reinforcement(&mut self, rho: f64) {
        for (tau, delta) in self.tau.iter_mut().zip(self.delta.iter_mut()) {
            *tau = (1.0 - rho) * *tau + *delta;
            *delta = 0.0;
        }
    }

    /// Whether `τ[i][j] == τ[j][i]` holds for every pair.
    #[cfg(test)]
    pub(crate) fn is_symmetric(&self) -> bool {
        (0..self.num_cities).all(|i| {
            (0..self.num_cities).all(|j| self.get(i, j).to_bits() == self.get(j, i).to_bits())
        })
    }
}
