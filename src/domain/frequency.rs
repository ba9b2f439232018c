use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Native observation interval of a fitted model. Forecast dates advance by
/// this interval from the last training observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl Frequency {
    /// Date of the k-th step after `origin`.
    ///
    /// Month-based frequencies step from the origin each time rather than
    /// cumulatively, so a month-end anchor stays on month-end (2023-12-31 ->
    /// 2024-01-31 -> 2024-02-29 -> 2024-03-31).
    pub fn advance(&self, origin: NaiveDate, k: u32) -> NaiveDate {
        match self {
            Self::Daily => origin + Days::new(u64::from(k)),
            Self::Weekly => origin + Days::new(u64::from(k) * 7),
            Self::Monthly => origin + Months::new(k),
            Self::Quarterly => origin + Months::new(k * 3),
            Self::Yearly => origin + Months::new(k * 12),
        }
    }
}
