//! Random source capability consumed by the simulation
//!
//! The core never owns a global generator. Callers pass one in, so a fixed seed
//! reproduces a run exactly. Any [`rand::Rng`] works out of the box.

use rand::Rng;

/// Randomness requested by initialization and stepping
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// `true` with probability `p`
    ///
    /// Exactly one [`uniform`](Self::uniform) draw per call, so `p = 0` never
    /// fires but still advances the generator.
    #[inline]
    fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}
