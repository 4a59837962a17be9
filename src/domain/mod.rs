// Market data and derived features
pub mod market;

// Classifier contracts and feature layouts
pub mod ml;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
