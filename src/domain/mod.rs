pub mod frequency;
pub mod point;

pub use frequency::Frequency;
pub use point::ForecastPoint;
