pub mod sarima;
pub mod seasonal_naive;
pub mod store;

pub use sarima::SarimaModel;
pub use seasonal_naive::SeasonalNaiveModel;
pub use store::ModelStore;

use anyhow::Result;

use crate::domain::ForecastPoint;

/// A fitted model able to project its series forward. Implementations are
/// pure functions of their fitted parameters, so repeated calls with the
/// same horizon return identical output.
pub trait Forecaster: Send + Sync {
    /// Project `periods` steps past the last training observation, one point
    /// per native frequency step, in chronological order.
    fn forecast(&self, periods: usize) -> Result<Vec<ForecastPoint>>;
}
