//! Configuration for the signal agents.
//!
//! Hyperparameters come from environment variables (optionally seeded from a
//! `.env` file by the binary) or from a TOML file.

mod agents_config;

pub use agents_config::AgentsConfig;
