// Market data domain
pub mod agent_kind;
pub mod candle;
pub mod feature_table;
pub mod ohlcv;
pub mod signal;
