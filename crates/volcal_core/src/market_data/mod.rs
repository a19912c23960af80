//! Observed market data.
//!
//! The model layer never fetches data itself: it is handed an already
//! materialised [`PriceSeries`] and consumes its log-return increments.
//!
//! - `series`: `PricePoint`, `PriceSeries` and log-return extraction
//! - `error`: `MarketDataError`

pub mod error;
pub mod series;

pub use error::MarketDataError;
pub use series::{PricePoint, PriceSeries};
