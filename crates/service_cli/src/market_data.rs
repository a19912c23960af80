//! Price-source boundary.
//!
//! Fetching is asynchronous and lives here; the model crates are handed a
//! fully materialised [`PriceSeries`].
//!
//! CSV layout (header required, RFC 3339 timestamps):
//! ```text
//! timestamp,close
//! 2024-01-01T00:00:00Z,42000.5
//! 2024-01-01T01:00:00Z,42110.0
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use volcal_core::market_data::{PricePoint, PriceSeries};
use volcal_core::types::SamplingFrequency;

use crate::{CliError, Result};

/// Trait for price providers
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the close series for `symbol` sampled at `frequency`.
    async fn fetch(&self, symbol: &str, frequency: SamplingFrequency) -> Result<PriceSeries>;
}

/// Reads a single-symbol CSV file.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Source backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl PriceSource for CsvPriceSource {
    async fn fetch(&self, symbol: &str, frequency: SamplingFrequency) -> Result<PriceSeries> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(CliError::FileNotFound(self.path.display().to_string()));
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let series = parse_csv(&content)?;

        debug!(
            symbol,
            path = %self.path.display(),
            observations = series.len(),
            "Loaded price series"
        );

        if let Some(spacing) = median_spacing_minutes(&series) {
            if spacing != i64::from(frequency.minutes()) {
                warn!(
                    symbol,
                    expected_minutes = frequency.minutes(),
                    observed_minutes = spacing,
                    "Price spacing does not match configured frequency"
                );
            }
        }

        Ok(series)
    }
}

/// Parse CSV text into a validated series.
pub fn parse_csv(content: &str) -> Result<PriceSeries> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let points = reader
        .deserialize::<PricePoint>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(PriceSeries::new(points)?)
}

/// Render a series as CSV text.
pub fn to_csv(series: &PriceSeries) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in series.points() {
        writer.serialize(point)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Write a series to `path`.
pub async fn write_csv(path: &Path, series: &PriceSeries) -> Result<()> {
    let content = to_csv(series)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

/// Median gap between consecutive timestamps, in whole minutes.
fn median_spacing_minutes(series: &PriceSeries) -> Option<i64> {
    let mut gaps: Vec<i64> = series
        .points()
        .windows(2)
        .map(|w| (w[1].timestamp - w[0].timestamp).num_minutes())
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_unstable();
    Some(gaps[gaps.len() / 2])
}
