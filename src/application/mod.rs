// Signal agents and their factory
pub mod agents;

// Technical indicators over OHLCV columns
pub mod indicators;

// Feature scaling and classifiers
pub mod ml;
