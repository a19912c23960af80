//! Synthetic Heston price paths.
//!
//! Produces realistic observation series for exercising a filter built on
//! the state-space models. Uses Euler full truncation: the diffusion and the
//! drift of the log-price see `v⁺ = max(v, 0)`, so reported variances are
//! never negative.
//!
//! ```text
//! x_{t+1} = x_t - 0.5 v⁺ dt + sqrt(v⁺ dt) dW_x
//! v_{t+1} = v_t + kappa (theta - v⁺) dt + sigma sqrt(v⁺ dt) dW_v
//! dW_v = z1,  dW_x = rho z1 + sqrt(1 - rho²) z2
//! ```
//! With all draws zero the variance path coincides with repeated
//! [`StateSpaceModel::predict`](crate::models::StateSpaceModel::predict)
//! and each log-return equals the predicted auxiliary component.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use volcal_core::types::{ModelError, TimeStep};

use crate::models::ModelParameters;

/// Standard normal pairs `(z1, z2)`, one per step.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SimulationDraws {
    pairs: Vec<[f64; 2]>,
}

impl SimulationDraws {
    /// Wrap pre-generated draws.
    pub fn new(pairs: Vec<[f64; 2]>) -> Self {
        Self { pairs }
    }

    /// All-zero draws (deterministic drift-only path).
    pub fn zeros(steps: usize) -> Self {
        Self::new(vec![[0.0; 2]; steps])
    }

    /// Reproducible draws from a seeded `StdRng`.
    ///
    /// ```
    /// use volcal_models::simulation::SimulationDraws;
    ///
    /// let a = SimulationDraws::seeded(7, 100);
    /// let b = SimulationDraws::seeded(7, 100);
    /// assert_eq!(a, b);
    /// assert_eq!(a.len(), 100);
    /// ```
    pub fn seeded(seed: u64, steps: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pairs = (0..steps)
            .map(|_| {
                [
                    StandardNormal.sample(&mut rng),
                    StandardNormal.sample(&mut rng),
                ]
            })
            .collect();
        Self::new(pairs)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Borrow the draws.
    pub fn pairs(&self) -> &[[f64; 2]] {
        &self.pairs
    }
}

/// Simulated prices and variances, both of length `steps + 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulatedPath {
    /// Prices, starting at the spot
    pub prices: Vec<f64>,
    /// Non-negative variances, starting at `v0`
    pub variances: Vec<f64>,
}

impl SimulatedPath {
    /// Log-returns of the simulated prices.
    pub fn log_returns(&self) -> Vec<f64> {
        self.prices
            .windows(2)
            .map(|w| w[1].ln() - w[0].ln())
            .collect()
    }
}

/// Simulate a Heston path.
///
/// # Errors
///
/// `InvalidParameter` if `spot` is not positive and finite or `v0` is
/// negative or not finite.
///
/// # Example
///
/// ```
/// use volcal_core::types::TimeStep;
/// use volcal_models::models::ModelParameters;
/// use volcal_models::simulation::{simulate_path, SimulationDraws};
///
/// let params = ModelParameters::new(2.0_f64, 0.04, 0.3).unwrap().with_rho(-0.7).unwrap();
/// let dt = TimeStep::new(1.0 / 8760.0).unwrap();
/// let path = simulate_path(&params, dt, 0.04, 100.0, &SimulationDraws::seeded(1, 500)).unwrap();
///
/// assert_eq!(path.prices.len(), 501);
/// assert!(path.variances.iter().all(|v| *v >= 0.0));
/// ```
pub fn simulate_path(
    params: &ModelParameters<f64>,
    dt: TimeStep<f64>,
    v0: f64,
    spot: f64,
    draws: &SimulationDraws,
) -> Result<SimulatedPath, ModelError> {
    if !spot.is_finite() || spot <= 0.0 {
        return Err(ModelError::invalid_parameter("spot", spot));
    }
    if !v0.is_finite() || v0 < 0.0 {
        return Err(ModelError::invalid_parameter("v0", v0));
    }

    let dt = dt.value();
    let kappa = params.kappa();
    let theta = params.theta();
    let sigma = params.sigma();
    let rho = params.rho_or_zero();
    let rho_bar = (1.0 - rho * rho).max(0.0).sqrt();

    let mut prices = Vec::with_capacity(draws.len() + 1);
    let mut variances = Vec::with_capacity(draws.len() + 1);
    prices.push(spot);
    variances.push(v0);

    let mut log_price = spot.ln();
    let mut v = v0;

    for &[z1, z2] in draws.pairs() {
        let v_plus = v.max(0.0);
        let diffusion = (v_plus * dt).sqrt();
        let dw_x = rho * z1 + rho_bar * z2;

        log_price += -0.5 * v_plus * dt + diffusion * dw_x;
        v += kappa * (theta - v_plus) * dt + sigma * diffusion * z1;

        prices.push(log_price.exp());
        variances.push(v.max(0.0));
    }

    Ok(SimulatedPath { prices, variances })
}
