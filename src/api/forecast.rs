use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::{api::error::ApiError, domain::ForecastPoint, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct ForecastRequest {
    #[validate(length(min = 1, message = "variable must be non-empty"))]
    pub variable: String,
    /// Horizon in native model steps. Zero is rejected; the upper bound
    /// comes from `forecast.max_periods` in the configuration.
    #[validate(range(min = 1, message = "periods must be a positive integer"))]
    pub periods: u32,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub variable: String,
    pub forecast: Vec<ForecastPoint>,
}

/// POST /forecast - N-step-ahead forecast for a named series
pub async fn create_forecast(
    State(st): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, ApiError> {
    req.validate()?;
    let max_periods = st.cfg.forecast.max_periods;
    if req.periods > max_periods {
        return Err(ApiError::BadRequest(format!(
            "periods must be at most {max_periods}"
        )));
    }

    let model = st
        .store
        .get(&req.variable)
        .ok_or_else(|| ApiError::variable_not_found(&req.variable))?;

    let forecast = model.forecast(req.periods as usize)?;
    debug!(variable = %req.variable, periods = req.periods, "forecast served");

    Ok(Json(ForecastResponse {
        variable: req.variable,
        forecast,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation_rejects_zero_periods() {
        let req = ForecastRequest { variable: "sales".to_string(), periods: 0 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_validation_rejects_empty_variable() {
        let req = ForecastRequest { variable: String::new(), periods: 3 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_validation_accepts_well_formed_input() {
        let req = ForecastRequest { variable: "sales".to_string(), periods: 3 };
        assert!(req.validate().is_ok());
    }
}
