use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Largest bound [`Jitter::offset`] will sample from
///
/// The sampled span is `2 * bound`, which must stay finite.
pub const MAX_JITTER_BOUND: f64 = f64::MAX / 4.0;

/// Injectable randomness for visual de-cluttering
///
/// Jitter never influences which level, ring or block a node lands in, only
/// small bounded offsets inside it. Tests use [`Jitter::disabled`] or a
/// fixed seed; interactive callers may use [`Jitter::from_entropy`].
pub struct Jitter {
    rng: Option<Box<dyn RngCore + Send>>,
}

impl Jitter {
    /// No offsets at all: layouts become fully deterministic
    pub fn disabled() -> Self {
        Self { rng: None }
    }

    /// Reproducible offsets
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible offsets
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Caller-supplied source
    pub fn from_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Some(Box::new(rng)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.rng.is_some()
    }

    /// Uniform offset in `[-bound, bound]`, or 0 when disabled
    ///
    /// Bounds that are not positive, not finite or above
    /// [`MAX_JITTER_BOUND`] yield 0.
    pub fn offset(&mut self, bound: f64) -> f64 {
        match self.rng.as_mut() {
            Some(rng) if bound.is_finite() && bound > 0.0 && bound <= MAX_JITTER_BOUND => {
                rng.gen_range(-bound..=bound)
            }
            _ => 0.0,
        }
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Jitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_zero() {
        let mut jitter = Jitter::disabled();
        assert_eq!(jitter.offset(30.0), 0.0);
    }

    #[test]
    fn test_offsets_are_bounded() {
        let mut jitter = Jitter::seeded(7);
        for _ in 0..1000 {
            let dx = jitter.offset(30.0);
            assert!((-30.0..=30.0).contains(&dx));
        }
        assert_eq!(jitter.offset(0.0), 0.0);
    }

    #[test]
    fn test_unusable_bounds_yield_zero() {
        let mut jitter = Jitter::seeded(3);
        assert_eq!(jitter.offset(f64::INFINITY), 0.0);
        assert_eq!(jitter.offset(f64::NAN), 0.0);
        assert_eq!(jitter.offset(1e308), 0.0);
        assert_eq!(jitter.offset(-5.0), 0.0);

        let dx = jitter.offset(MAX_JITTER_BOUND);
        assert!(dx.is_finite());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Jitter::seeded(42);
        let mut b = Jitter::seeded(42);
        let xs: Vec<f64> = (0..16).map(|_| a.offset(10.0)).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.offset(10.0)).collect();
        assert_eq!(xs, ys);
    }
}
