//! Seeded uniform random source.
//!
//! [`Mt19937`] is the 32-bit Mersenne Twister (Matsumoto & Nishimura, 1998)
//! with the reference `init_genrand` seeding and output tempering. It
//! implements [`RngCore`] and [`SeedableRng`], so the `rand` distribution
//! machinery drives it directly.
//!
//! [`UniformRandomSource`] owns one engine and turns it into uniform `f64`
//! draws on `[lower, upper)`. Every instance is an independent stream, and
//! two instances built from the same seed produce bit-identical draws.

use std::time::{SystemTime, UNIX_EPOCH};

use dk_common::{Error, Result};
use rand::distr::{Distribution as _, Uniform};
use rand::rand_core::impls;
use rand::{Rng, RngCore, SeedableRng};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const INIT_MULTIPLIER: u32 = 1_812_433_253;

/// Seed used by the reference implementation when none is given.
pub const DEFAULT_MT_SEED: u32 = 5489;

/// 32-bit Mersenne Twister engine.
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937").field("index", &self.index).finish_non_exhaustive()
    }
}

impl Mt19937 {
    pub fn new(seed: u32) -> Self {
        let mut engine = Self {
            state: [0; N],
            index: N,
        };
        engine.reseed(seed);
        engine
    }

    /// Reinitialize the state as if freshly constructed with `seed`.
    pub fn reseed(&mut self, seed: u32) {
        self.state[0] = seed;
        for i in 1..N {
            let prev = self.state[i - 1];
            self.state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = N;
    }

    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }

    /// Next tempered 32-bit output.
    pub fn next_raw(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::new(DEFAULT_MT_SEED)
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Uniform `f64` draws on `[lower, upper)` from a private MT19937 stream.
///
/// Drawing takes `&mut self`; share a source across threads by giving each
/// thread its own instance.
#[derive(Debug, Clone)]
pub struct UniformRandomSource {
    engine: Mt19937,
    /// `None` on the unit interval, which samples the engine's 53-bit floats
    /// directly.
    uniform: Option<Uniform<f64>>,
    seed: u32,
    lower: f64,
    upper: f64,
}

impl UniformRandomSource {
    /// Source on `[0, 1)`.
    pub fn new(seed: u32) -> Self {
        Self {
            engine: Mt19937::new(seed),
            uniform: None,
            seed,
            lower: 0.0,
            upper: 1.0,
        }
    }

    /// Source on `[lower, upper)`.
    ///
    /// # Errors
    /// [`Error::Domain`] unless both bounds are finite and `lower < upper`.
    pub fn with_bounds(lower: f64, upper: f64, seed: u32) -> Result<Self> {
        if !lower.is_finite() {
            return Err(Error::domain("uniform lower bound", lower, "finite"));
        }
        if !upper.is_finite() || upper <= lower {
            return Err(Error::domain(
                "uniform upper bound",
                upper,
                "finite and > lower bound",
            ));
        }
        let uniform = Uniform::new(lower, upper).map_err(|e| {
            Error::InvalidInput(format!("uniform range [{lower}, {upper}): {e}"))
        })?;
        Ok(Self {
            engine: Mt19937::new(seed),
            uniform: Some(uniform),
            seed,
            lower,
            upper,
        })
    }

    /// Source on `[0, 1)` seeded from the wall clock mixed with OS entropy.
    ///
    /// Not reproducible. Use [`UniformRandomSource::new`] wherever a run has
    /// to be repeatable.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    /// Next draw on `[lower, upper)`.
    pub fn random_uniform(&mut self) -> f64 {
        match &self.uniform {
            Some(uniform) => uniform.sample(&mut self.engine),
            None => self.engine.random::<f64>(),
        }
    }

    /// Restart the stream from `seed`, keeping the bounds.
    pub fn reseed(&mut self, seed: u32) {
        self.engine.reseed(seed);
        self.seed = seed;
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether draws land on the unit interval `[0, 1)`.
    pub fn is_unit(&self) -> bool {
        self.lower == 0.0 && self.upper == 1.0
    }
}

fn entropy_seed() -> u32 {
    let clock = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(0);
    clock ^ rand::random::<u32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_first_outputs() {
        // First outputs of init_genrand(5489).
        let mut mt = Mt19937::default();
        assert_eq!(mt.next_raw(), 3_499_211_612);
        assert_eq!(mt.next_raw(), 581_869_302);
        assert_eq!(mt.next_raw(), 3_890_346_734);
    }

    #[test]
    fn ten_thousandth_output_matches_reference() {
        let mut mt = Mt19937::new(5489);
        let mut last = 0;
        for _ in 0..10_000 {
            last = mt.next_u32();
        }
        assert_eq!(last, 4_123_659_995);
    }

    #[test]
    fn seedable_from_le_bytes() {
        let mut a = Mt19937::from_seed(42u32.to_le_bytes());
        let mut b = Mt19937::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = UniformRandomSource::new(7);
        let mut b = UniformRandomSource::new(7);
        for _ in 0..1000 {
            assert_eq!(a.random_uniform().to_bits(), b.random_uniform().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = UniformRandomSource::new(1);
        let mut b = UniformRandomSource::new(2);
        let xs: Vec<f64> = (0..8).map(|_| a.random_uniform()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.random_uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut fresh = UniformRandomSource::new(11);
        let expected: Vec<f64> = (0..50).map(|_| fresh.random_uniform()).collect();

        let mut source = UniformRandomSource::new(3);
        for _ in 0..17 {
            source.random_uniform();
        }
        source.reseed(11);
        let got: Vec<f64> = (0..50).map(|_| source.random_uniform()).collect();
        assert_eq!(got, expected);
        assert_eq!(source.seed(), 11);
    }

    #[test]
    fn draws_respect_bounds() {
        let mut unit = UniformRandomSource::new(5);
        let mut ranged = UniformRandomSource::with_bounds(-3.0, 2.5, 5).unwrap();
        assert!(unit.is_unit());
        assert!(!ranged.is_unit());
        for _ in 0..10_000 {
            let u = unit.random_uniform();
            assert!((0.0..1.0).contains(&u));
            let r = ranged.random_uniform();
            assert!((-3.0..2.5).contains(&r));
        }
    }

    #[test]
    fn invalid_bounds_rejected() {
        assert!(matches!(
            UniformRandomSource::with_bounds(1.0, 1.0, 0),
            Err(Error::Domain { .. })
        ));
        assert!(UniformRandomSource::with_bounds(2.0, 1.0, 0).is_err());
        assert!(UniformRandomSource::with_bounds(f64::NEG_INFINITY, 1.0, 0).is_err());
        assert!(UniformRandomSource::with_bounds(0.0, f64::NAN, 0).is_err());
    }

    #[test]
    fn entropy_sources_draw_on_unit_interval() {
        let mut source = UniformRandomSource::from_entropy();
        let u = source.random_uniform();
        assert!((0.0..1.0).contains(&u));
    }
}
