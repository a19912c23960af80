//! End-to-end workflow: configure, simulate to CSV, load it back, inspect.

use std::io::Write;

use service_cli::commands::inspect::build_report;
use service_cli::commands::simulate::{simulate_series, SimulateOptions};
use service_cli::config::{build_settings_with_env, CliArgs};
use service_cli::market_data::{write_csv, CsvPriceSource, PriceSource};
use volcal_core::types::SamplingFrequency;

fn no_env(_: &str) -> Option<String> {
    None
}

#[tokio::test]
async fn test_simulate_then_inspect() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config,
        "initial_volatility = 0.6\nkappa = 3.0\nsigma = 0.4\nrho = -0.5\nfrequency = \"1hour\""
    )
    .unwrap();

    let cli = CliArgs {
        config_file: Some(config.path().to_path_buf()),
        ..Default::default()
    };
    let settings = build_settings_with_env(&cli, no_env).unwrap();
    assert_eq!(settings.rho, Some(-0.5));

    let options = SimulateOptions {
        steps: 4000,
        seed: 17,
        spot: 25_000.0,
        ..Default::default()
    };
    let simulated = simulate_series(&settings, &options).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    write_csv(&path, &simulated).await.unwrap();

    let loaded = CsvPriceSource::new(&path)
        .fetch(&settings.symbol, SamplingFrequency::OneHour)
        .await
        .unwrap();
    assert_eq!(loaded.len(), 4001);

    let report = build_report(&settings, &loaded).unwrap();
    assert_eq!(report.observations, 4000);
    assert_eq!(report.initial_state, [0.36, 0.0]);
    assert!(report.realized_variance > 0.0);

    // Per-step return sd is sqrt(0.36 / 8760) ~ 6.4e-3; the mean residual
    // should be well inside that
    assert!(report.mean_residual.abs() < 1e-3, "{}", report.mean_residual);
}

#[test]
fn test_cli_overrides_file_and_env() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "model = \"cir\"\nsymbol = \"ETHUSD\"").unwrap();

    let cli = CliArgs {
        config_file: Some(config.path().to_path_buf()),
        model: Some("heston".to_string()),
        ..Default::default()
    };
    let env = |key: &str| (key == "VOLCAL_SYMBOL").then(|| "SOLUSD".to_string());
    let settings = build_settings_with_env(&cli, env).unwrap();

    assert_eq!(settings.model.name(), "heston");
    assert_eq!(settings.symbol, "SOLUSD");
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "model = \"cir\"\nrho = -0.3").unwrap();

    let cli = CliArgs {
        config_file: Some(config.path().to_path_buf()),
        ..Default::default()
    };
    assert!(build_settings_with_env(&cli, no_env).is_err());
}
