//! Covariance-matrix-adaptive candidate sampling.
//!
//! Each call to [`CmaSampler::sample`] builds a fresh [`SearchState`] centred
//! on the current vector and draws one generation from it. Nothing learned
//! in one step (covariance, step size) carries over to the next, so every
//! step is statistically independent given the RNG stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{SamplerConfig, StateVector};
use crate::domain::ports::CandidateSampler;

/// Search distribution `N(mean, sigma² · C)` for a single generation.
///
/// A freshly initialised state has `C = I`, so a draw is
/// `mean + sigma · z` with `z ~ N(0, I)`.
#[derive(Debug, Clone)]
pub struct SearchState {
    mean: StateVector,
    sigma: f64,
}

impl SearchState {
    /// Identity covariance centred on `mean`.
    pub fn fresh(mean: StateVector, sigma: f64) -> Self {
        Self { mean, sigma }
    }

    pub fn mean(&self) -> &StateVector {
        &self.mean
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Draw `lambda` candidates.
    pub fn ask<R: Rng + ?Sized>(&self, rng: &mut R, lambda: usize) -> Vec<StateVector> {
        (0..lambda)
            .map(|_| {
                let components = self
                    .mean
                    .as_slice()
                    .iter()
                    .map(|&m| {
                        let z: f64 = rng.sample(StandardNormal);
                        m + self.sigma * z
                    })
                    .collect();
                StateVector::new(components)
            })
            .collect()
    }
}

/// Candidate sampler backed by a per-step [`SearchState`].
#[derive(Debug, Clone)]
pub struct CmaSampler {
    population_size: usize,
    sigma: f64,
    rng: StdRng,
}

impl CmaSampler {
    /// Build a sampler, rejecting degenerate parameters.
    ///
    /// Without a seed the RNG is seeded from OS entropy.
    pub fn new(population_size: usize, sigma: f64, seed: Option<u64>) -> DomainResult<Self> {
        if population_size < 1 {
            return Err(DomainError::InvalidConfiguration(format!(
                "population_size must be at least 1, got {population_size}"
            )));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(DomainError::InvalidConfiguration(format!(
                "sigma must be a positive finite number, got {sigma}"
            )));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            population_size,
            sigma,
            rng,
        })
    }

    pub fn from_config(config: &SamplerConfig) -> DomainResult<Self> {
        Self::new(config.population_size, config.sigma, config.seed)
    }

    /// Candidates drawn per step.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl CandidateSampler for CmaSampler {
    fn sample(&mut self, current: &StateVector) -> DomainResult<Vec<StateVector>> {
        let state = SearchState::fresh(current.clone(), self.sigma);
        Ok(state.ask(&mut self.rng, self.population_size))
    }
}
