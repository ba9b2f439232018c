use anyhow::{ensure, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Forecaster;
use crate::domain::{ForecastPoint, Frequency};

/// Baseline model: repeat the last full season verbatim. Useful as a
/// fallback entry in the artifact for series where a SARIMA fit was not
/// worth keeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalNaiveModel {
    pub period: usize,
    pub observations: Vec<f64>,
    pub last_observation: NaiveDate,
    pub frequency: Frequency,
}

impl SeasonalNaiveModel {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.period >= 1, "season length must be at least 1");
        ensure!(
            self.observations.len() >= self.period,
            "observation tail holds {} values, shorter than one season of {}",
            self.observations.len(),
            self.period
        );
        ensure!(
            self.observations.iter().all(|v| v.is_finite()),
            "observation tail contains non-finite values"
        );
        Ok(())
    }
}

impl Forecaster for SeasonalNaiveModel {
    fn forecast(&self, periods: usize) -> Result<Vec<ForecastPoint>> {
        let season = &self.observations[self.observations.len() - self.period..];
        let out = (1..=periods)
            .map(|step| ForecastPoint {
                date: self.frequency.advance(self.last_observation, step as u32),
                value: season[(step - 1) % self.period],
            })
            .collect();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_fixture() -> SeasonalNaiveModel {
        SeasonalNaiveModel {
            period: 12,
            observations: (1..=12).map(f64::from).collect(),
            last_observation: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            frequency: Frequency::Monthly,
        }
    }

    #[test]
    fn test_repeats_last_season() {
        let model = monthly_fixture();
        model.validate().unwrap();

        let fc = model.forecast(14).unwrap();
        assert_eq!(fc.len(), 14);
        assert_eq!(fc[0].value, 1.0);
        assert_eq!(fc[11].value, 12.0);
        assert_eq!(fc[12].value, 1.0);
    }

    #[test]
    fn test_monthly_dates_follow_calendar() {
        let fc = monthly_fixture().forecast(3).unwrap();
        let dates: Vec<String> = fc.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-31", "2024-02-29", "2024-03-31"]);
    }

    #[test]
    fn test_validate_rejects_partial_season() {
        let model = SeasonalNaiveModel {
            observations: vec![1.0, 2.0, 3.0],
            ..monthly_fixture()
        };
        assert!(model.validate().is_err());
    }
}
