//! Technical indicators computed over whole OHLCV columns.

pub mod directional;
pub mod parabolic_sar;
pub mod rolling;
pub mod stochastic;
pub mod volatility;

pub use directional::{DirectionalIndex, average_directional_index, directional_movement};
pub use parabolic_sar::{ExtendedParabolicSar, SarParameters, SarPoint, SarTrend, extended_sar};
pub use stochastic::{Stochastic, stochastic};
pub use volatility::{atr_percent, average_true_range, true_range};
