use anyhow::{ensure, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Forecaster;
use crate::domain::{ForecastPoint, Frequency};

/// Non-seasonal (p, d, q) order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Order {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

/// Seasonal (P, D, Q)m order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeasonalOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub period: usize,
}

impl Default for SeasonalOrder {
    fn default() -> Self {
        Self { p: 0, d: 0, q: 0, period: 1 }
    }
}

/// A fitted SARIMA(p,d,q)(P,D,Q)m model as exported by the training
/// pipeline: coefficient vectors, innovation variance, and a tail of the
/// training series long enough to seed the forecast recursion.
///
/// `observations` are in the original scale, oldest first, ending at
/// `last_observation`. `residuals` are the fitted one-step innovations
/// aligned with the end of the differenced series; a short or absent tail
/// is padded with zeros (the innovation mean).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarimaModel {
    pub order: Order,
    #[serde(default)]
    pub seasonal_order: SeasonalOrder,
    #[serde(default)]
    pub phi: Vec<f64>,
    #[serde(default)]
    pub theta: Vec<f64>,
    #[serde(default)]
    pub seasonal_phi: Vec<f64>,
    #[serde(default)]
    pub seasonal_theta: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub sigma2: f64,
    pub observations: Vec<f64>,
    #[serde(default)]
    pub residuals: Vec<f64>,
    pub last_observation: NaiveDate,
    pub frequency: Frequency,
}

impl SarimaModel {
    /// Check parameter/history consistency. Called once at artifact load so
    /// malformed models fail startup instead of a request.
    pub fn validate(&self) -> Result<()> {
        let m = self.seasonal_order.period;
        ensure!(m >= 1, "seasonal period must be at least 1");
        if self.seasonal_order.p > 0 || self.seasonal_order.d > 0 || self.seasonal_order.q > 0 {
            ensure!(m >= 2, "seasonal terms require a period of at least 2");
        }
        ensure!(
            self.phi.len() == self.order.p,
            "expected {} AR coefficients, found {}",
            self.order.p,
            self.phi.len()
        );
        ensure!(
            self.theta.len() == self.order.q,
            "expected {} MA coefficients, found {}",
            self.order.q,
            self.theta.len()
        );
        ensure!(
            self.seasonal_phi.len() == self.seasonal_order.p,
            "expected {} seasonal AR coefficients, found {}",
            self.seasonal_order.p,
            self.seasonal_phi.len()
        );
        ensure!(
            self.seasonal_theta.len() == self.seasonal_order.q,
            "expected {} seasonal MA coefficients, found {}",
            self.seasonal_order.q,
            self.seasonal_theta.len()
        );
        ensure!(
            self.sigma2.is_finite() && self.sigma2 >= 0.0,
            "innovation variance must be finite and non-negative"
        );
        ensure!(
            self.observations.iter().all(|v| v.is_finite()),
            "observation tail contains non-finite values"
        );

        let depth = self.seasonal_order.d * m + self.order.d;
        let needed = self.order.p.max(self.seasonal_order.p * m).max(1);
        ensure!(
            self.observations.len() >= depth + needed,
            "observation tail too short: {} values cannot support differencing depth {} plus {} lagged terms",
            self.observations.len(),
            depth,
            needed
        );
        Ok(())
    }

    /// Apply the differencing chain: D seasonal passes at lag m, then d
    /// regular passes at lag 1. Returns each intermediate level (the
    /// original series first, the fully differenced series last) together
    /// with the lag used to produce each level from its parent.
    fn difference_chain(&self) -> (Vec<Vec<f64>>, Vec<usize>) {
        let m = self.seasonal_order.period;
        let mut levels = vec![self.observations.clone()];
        let mut lags = Vec::with_capacity(self.seasonal_order.d + self.order.d);

        for _ in 0..self.seasonal_order.d {
            lags.push(m);
            let prev = levels.last().expect("chain is non-empty");
            levels.push(diff_at_lag(prev, m));
        }
        for _ in 0..self.order.d {
            lags.push(1);
            let prev = levels.last().expect("chain is non-empty");
            levels.push(diff_at_lag(prev, 1));
        }
        (levels, lags)
    }
}

impl Forecaster for SarimaModel {
    fn forecast(&self, periods: usize) -> Result<Vec<ForecastPoint>> {
        let m = self.seasonal_order.period;
        let (mut levels, lags) = self.difference_chain();

        // Innovation history, zero-padded on the left so every MA lag is
        // addressable. Future innovations enter at their zero mean.
        let needed_e = self.order.q.max(self.seasonal_order.q * m);
        let mut innovations = vec![0.0; needed_e.saturating_sub(self.residuals.len())];
        innovations.extend_from_slice(&self.residuals);

        let mut out = Vec::with_capacity(periods);
        for step in 1..=periods {
            let deepest = levels.last().expect("chain is non-empty");
            let n = deepest.len();
            let e_n = innovations.len();

            let mut x = self.intercept;
            for (i, phi) in self.phi.iter().enumerate() {
                x += phi * deepest[n - 1 - i];
            }
            for (i, sphi) in self.seasonal_phi.iter().enumerate() {
                x += sphi * deepest[n - (i + 1) * m];
            }
            for (i, theta) in self.theta.iter().enumerate() {
                x += theta * innovations[e_n - 1 - i];
            }
            for (i, stheta) in self.seasonal_theta.iter().enumerate() {
                x += stheta * innovations[e_n - (i + 1) * m];
            }

            // Undo the differencing, deepest level back up to the original
            // scale, extending every level as we go.
            let last = levels.len() - 1;
            levels[last].push(x);
            let mut value = x;
            for (k, lag) in lags.iter().enumerate().rev() {
                let parent = &levels[k];
                value += parent[parent.len() - lag];
                levels[k].push(value);
            }

            innovations.push(0.0);
            out.push(ForecastPoint {
                date: self.frequency.advance(self.last_observation, step as u32),
                value,
            });
        }
        Ok(out)
    }
}

fn diff_at_lag(series: &[f64], lag: usize) -> Vec<f64> {
    series
        .iter()
        .skip(lag)
        .zip(series.iter())
        .map(|(cur, prev)| cur - prev)
        .collect()
}
