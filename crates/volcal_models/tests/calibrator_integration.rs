//! Integration tests for the state-space calibrator.
//!
//! Exercises the public API the way a filter loop would: build from raw
//! parameters, evaluate predict/jacobian/process_noise at arbitrary states,
//! and feed it log-returns extracted from a price series.

use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use volcal_core::market_data::PriceSeries;
use volcal_core::math::Matrix2;
use volcal_core::types::{ModelError, SamplingFrequency, TimeStep};
use volcal_models::calibration::StateSpaceCalibrator;
use volcal_models::models::{
    HestonModel, ModelKind, ModelParameters, StateSpaceModel, VarianceState, VolatilityModelEnum,
};
use volcal_models::simulation::{simulate_path, SimulationDraws};

const HOURLY: f64 = 1.0 / 8760.0;

#[test]
fn test_hourly_scenario() {
    let dt = TimeStep::<f64>::from_frequency(SamplingFrequency::OneHour);
    assert_relative_eq!(dt.value(), HOURLY, max_relative = 1e-15);

    let cal = StateSpaceCalibrator::heston(HOURLY, 0.5).unwrap();
    let x0 = cal.initial_state();
    assert_eq!(x0, VarianceState::new(0.25, 0.0));
    assert_eq!(cal.model().params().theta(), 0.25);

    // x0 sits at theta, so the variance is a fixed point of the drift
    let x1 = cal.predict(&x0);
    assert_eq!(x1.variance, 0.25);
    assert_relative_eq!(x1.auxiliary, -0.5 * 0.25 / 8760.0, max_relative = 1e-15);

    let j = cal.jacobian(&x0);
    assert_relative_eq!(j[(0, 0)], 1.0 - 1.0 / 8760.0, max_relative = 1e-15);
    assert_eq!(j[(0, 1)], 0.0);
    assert_relative_eq!(j[(1, 0)], -0.5 / 8760.0, max_relative = 1e-15);
    assert_eq!(j[(1, 1)], 0.0);
}

#[test]
fn test_construction_errors() {
    let dt = TimeStep::new(HOURLY).unwrap();

    assert_eq!(
        ModelParameters::new(-1.0, 0.25, 0.5),
        Err(ModelError::InvalidParameter {
            name: "kappa",
            value: -1.0
        })
    );
    assert_eq!(
        ModelParameters::new(1.0, -0.01, 0.5),
        Err(ModelError::InvalidParameter {
            name: "theta",
            value: -0.01
        })
    );
    assert_eq!(
        HestonModel::try_new(1.0, 0.25, 0.5, Some(1.5), HOURLY),
        Err(ModelError::InvalidParameter {
            name: "rho",
            value: 1.5
        })
    );
    assert_eq!(TimeStep::new(0.0), Err(ModelError::InvalidTimeStep(0.0)));
    assert_eq!(TimeStep::new(-0.01), Err(ModelError::InvalidTimeStep(-0.01)));

    // Valid pieces still assemble after the failures above
    let params = ModelParameters::new(1.0, 0.25, 0.5).unwrap();
    assert!(VolatilityModelEnum::build(ModelKind::Heston, params, dt).is_ok());
}

#[test]
fn test_zero_kappa_freezes_variance() {
    let model = HestonModel::try_new(0.0, 0.25, 0.5, None, HOURLY).unwrap();
    for v in [0.0, 0.01, 0.3, 2.0] {
        let x = VarianceState::new(v, 0.7);
        assert_eq!(model.predict(&x).variance, v);
    }
    assert_eq!(model.jacobian(&VarianceState::new(0.1, 0.0))[(0, 0)], 1.0);
}

#[test]
fn test_concurrent_evaluations_agree() {
    let cal = StateSpaceCalibrator::heston(HOURLY, 0.5).unwrap();
    let states: Vec<_> = (0..64)
        .map(|i| VarianceState::new(i as f64 * 0.01, -(i as f64) * 1e-4))
        .collect();

    let serial: Vec<_> = states
        .iter()
        .map(|x| (cal.predict(x), cal.jacobian(x), cal.process_noise(x)))
        .collect();

    let parallel: Vec<Vec<_>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    states
                        .iter()
                        .map(|x| (cal.predict(x), cal.jacobian(x), cal.process_noise(x)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in parallel {
        assert_eq!(result, serial);
    }
}

#[test]
fn test_residuals_on_simulated_series() {
    let params = ModelParameters::new(2.0, 0.09, 0.4)
        .unwrap()
        .with_rho(-0.6)
        .unwrap();
    let dt = TimeStep::new(HOURLY).unwrap();
    let steps = 5_000;
    let path = simulate_path(&params, dt, 0.09, 30_000.0, &SimulationDraws::seeded(2024, steps))
        .unwrap();

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps = (0..=steps as i64)
        .map(|h| start + Duration::hours(h))
        .collect();
    let series = PriceSeries::from_closes(timestamps, path.prices.clone()).unwrap();
    let returns = series.log_returns();
    assert_eq!(returns.len(), steps);

    let cal = StateSpaceCalibrator::new(HestonModel::new(params, dt), 0.3);
    let x0 = cal.initial_state();
    assert_relative_eq!(x0.variance, 0.09, max_relative = 1e-12);

    // Residuals are martingale increments: their mean is tiny relative to
    // the per-step standard deviation sqrt(theta * dt)
    let mean_residual = returns
        .iter()
        .map(|z| cal.observation_residual(&x0, *z))
        .sum::<f64>()
        / steps as f64;
    let step_sd = (0.09 * HOURLY).sqrt();
    assert!(mean_residual.abs() < step_sd * 0.1, "mean residual {}", mean_residual);

    // Realised variance tracks the average latent variance along the path
    let rv = series.realized_variance(HOURLY).unwrap();
    let latent = path.variances[..steps].iter().sum::<f64>() / steps as f64;
    assert!((rv - latent).abs() < 0.01, "realised {} vs latent {}", rv, latent);
}

#[test]
fn test_filter_covariance_propagation() {
    // One Kalman prediction step P' = J P Jᵀ + Q stays symmetric
    let cal = StateSpaceCalibrator::heston(HOURLY, 0.5).unwrap();
    let x = cal.initial_state();
    let j = cal.jacobian(&x);
    let p = Matrix2::new([[0.01, 0.0], [0.0, 1e-6]]);

    let p_next = j.matmul(&p).matmul(&j.transpose()).add_matrix(&cal.process_noise(&x));
    assert!(p_next.is_symmetric());
    assert!(p_next.determinant() >= 0.0);
    assert!(p_next[(0, 0)] > 0.0);
}

proptest! {
    #[test]
    fn prop_jacobian_independent_of_state(
        kappa in 0.0..10.0_f64,
        theta in 0.0..1.0_f64,
        v1 in -1.0..5.0_f64,
        v2 in -1.0..5.0_f64,
        a in -1.0..1.0_f64,
    ) {
        let model = HestonModel::try_new(kappa, theta, 0.5, Some(-0.3), HOURLY).unwrap();
        let j1 = model.jacobian(&VarianceState::new(v1, a));
        let j2 = model.jacobian(&VarianceState::new(v2, -a));
        prop_assert_eq!(j1, j2);
        prop_assert_eq!(j1[(0, 0)], 1.0 - kappa * HOURLY);
        prop_assert_eq!(j1[(1, 0)], -0.5 * HOURLY);
    }

    #[test]
    fn prop_predict_matches_formula(
        kappa in 0.0..10.0_f64,
        theta in 0.0..1.0_f64,
        v in 0.0..2.0_f64,
    ) {
        let model = HestonModel::try_new(kappa, theta, 0.5, None, HOURLY).unwrap();
        let x = VarianceState::new(v, 0.0);
        let next = model.predict(&x);
        prop_assert_eq!(next.variance, v + kappa * (theta - v) * HOURLY);
        prop_assert_eq!(next.auxiliary, -0.5 * v * HOURLY);
        prop_assert_eq!(model.predict(&x), next);
    }
}
