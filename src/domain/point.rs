use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecasted observation. `date` serializes in ISO calendar form
/// (YYYY-MM-DD) via chrono's serde impl.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serialization() {
        let point = ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            value: 42.5,
        };

        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-31","value":42.5}"#);
    }
}
