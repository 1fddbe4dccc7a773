//! Minimal-standard LCG with Bays–Durham shuffle (Numerical Recipes `ran1`).

use rand::RngCore;

/// Park–Miller multiplier.
const MULTIPLIER: i64 = 16807;
/// Modulus 2^31 − 1 (a Mersenne prime).
const MODULUS: i64 = 2_147_483_647;
/// Scale factor mapping the register into [0, 1).
const SCALE: f64 = 1.0 / MODULUS as f64;
/// Schrage decomposition quotient.
const QUOTIENT: i64 = 127_773;
/// Schrage decomposition remainder.
const REMAINDER: i64 = 2836;
/// Number of shuffle table slots.
const TABLE_SIZE: usize = 32;
/// Divisor mapping register values onto table indices.
const DIVISOR: i64 = 1 + (MODULUS - 1) / TABLE_SIZE as i64;
/// Largest value `next_uniform` may return, strictly below 1.0.
const MAX_UNIFORM: f64 = 1.0 - 1.2e-7;

/// Deterministic generator of uniform and Gaussian deviates.
///
/// The uniform stream is the minimal-standard linear congruential
/// generator (multiplier 16807, modulus 2^31 − 1) stepped with
/// Schrage's decomposition to avoid overflow, passed through a
/// 32-slot Bays–Durham shuffle table to break serial correlation.
/// Gaussian deviates come from the polar Box–Muller method, which
/// produces two deviates per round; one is cached and returned on
/// the following call.
///
/// A non-positive seed is auto-corrected to a positive state on the
/// first draw, so every seed yields a usable stream; seeds `0` and
/// negative seeds collapse onto the same default stream.
///
/// # Examples
///
/// ```
/// use aco_tsp::random::MinstdRng;
///
/// let mut a = MinstdRng::new(21);
/// let mut b = MinstdRng::new(21);
/// assert_eq!(a.next_uniform(), b.next_uniform());
/// ```
#[derive(Debug, Clone)]
pub struct MinstdRng {
    /// The congruential register. Negative until the first draw.
    state: i64,
    /// Last value drawn from the shuffle table.
    last: i64,
    /// Bays–Durham shuffle table.
    table: [i64; TABLE_SIZE],
    /// Second Box–Muller deviate, pending return.
    gauss_cache: Option<f64>,
}

impl MinstdRng {
    /// Creates a generator from a 64-bit seed.
    ///
    /// The seed is negated internally so the first draw triggers table
    /// initialization, matching the classic `ran1` seeding protocol.
    pub fn new(seed: i64) -> Self {
        Self {
            state: 0i64.wrapping_sub(seed),
            last: 0,
            table: [0; TABLE_SIZE],
            gauss_cache: None,
        }
    }

    /// One Schrage-decomposed congruential step.
    fn step(&mut self) {
        let k = self.state / QUOTIENT;
        self.state = MULTIPLIER * (self.state - k * QUOTIENT) - REMAINDER * k;
        if self.state < 0 {
            self.state += MODULUS;
        }
    }

    /// (Re)initializes the shuffle table: coerce the register positive,
    /// discard 8 steps, then fill the 32 slots.
    fn warm_up(&mut self) {
        self.state = self.state.checked_neg().filter(|s| *s >= 1).unwrap_or(1);
        for j in (0..TABLE_SIZE + 8).rev() {
            self.step();
            if j < TABLE_SIZE {
                self.table[j] = self.state;
            }
        }
        self.last = self.table[0];
    }

    /// Draws the next shuffled register value in `[1, MODULUS)`.
    fn next_raw(&mut self) -> i64 {
        if self.state <= 0 || self.last == 0 {
            self.warm_up();
        }
        self.step();
        let slot = (self.last / DIVISOR) as usize;
        self.last = self.table[slot];
        self.table[slot] = self.state;
        self.last
    }

    /// Returns the next uniform deviate in `[0, 1)`.
    ///
    /// Values are clamped just below 1.0 so the boundary is never
    /// reached exactly.
    pub fn next_uniform(&mut self) -> f64 {
        (SCALE * self.next_raw() as f64).min(MAX_UNIFORM)
    }

    /// Returns the next standard-normal deviate.
    ///
    /// Polar Box–Muller: every other call performs the rejection loop
    /// and computes two deviates; the spare is cached and returned by
    /// the next call. The cache is dropped whenever the uniform stream
    /// is due for (re)initialization.
    pub fn next_gaussian(&mut self) -> f64 {
        if self.state < 0 {
            self.gauss_cache = None;
        }
        if let Some(cached) = self.gauss_cache.take() {
            return cached;
        }
        loop {
            let v1 = 2.0 * self.next_uniform() - 1.0;
            let v2 = 2.0 * self.next_uniform() - 1.0;
            let square_sum = v1 * v1 + v2 * v2;
            if square_sum < 1.0 && square_sum != 0.0 {
                let factor = (-2.0 * square_sum.ln() / square_sum).sqrt();
                self.gauss_cache = Some(v1 * factor);
                return v2 * factor;
            }
        }
    }

    /// Returns a normal deviate with the given mean and standard deviation.
    pub fn next_normal(&mut self, mean: f64, sigma: f64) -> f64 {
        mean + sigma * self.next_gaussian()
    }
}

impl RngCore for MinstdRng {
    fn next_u32(&mut self) -> u32 {
        // Two 31-bit draws cover the full 32-bit range.
        let hi = self.next_raw() as u32;
        let lo = self.next_raw() as u32;
        (hi << 16) ^ lo
    }

    fn next_u64(&mut self) -> u64 {
        rand::rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dest)
    }
}

/// Derives the seed for one ant's independent stream.
///
/// SplitMix64 finalization over the run seed offset by the ant index,
/// folded into a positive odd value so the `ran1` seeding protocol
/// never collapses distinct indices onto the default stream.
pub fn stream_seed(run_seed: i64, index: u64) -> i64 {
    let mut z = (run_seed as u64).wrapping_add(0x9E37_79B9_7F4A_7C15u64.wrapping_mul(index.wrapping_add(1)));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    ((z >> 1) | 1) as i64
}
