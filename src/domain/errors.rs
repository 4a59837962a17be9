use crate::domain::market::ohlcv::Column;
use thiserror::Error;

/// Errors raised by indicator computation, feature building and agent training
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent}: DataFrame must include columns {}", format_columns(.missing))]
    MissingColumns { agent: String, missing: Vec<Column> },

    #[error("{agent}: not enough rows after feature warm-up ({rows} usable, {required} required)")]
    InsufficientData {
        agent: String,
        rows: usize,
        required: usize,
    },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid market data: {reason}")]
    InvalidData { reason: String },

    #[error("Model failure: {reason}")]
    Model { reason: String },
}

impl AgentError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        AgentError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn model(reason: impl std::fmt::Display) -> Self {
        AgentError::Model {
            reason: reason.to_string(),
        }
    }
}

fn format_columns(columns: &[Column]) -> String {
    let names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
    format!("{{{}}}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_formatting() {
        let error = AgentError::MissingColumns {
            agent: "SAREXT".to_string(),
            missing: vec![Column::High, Column::Low],
        };

        let msg = error.to_string();
        assert!(msg.contains("SAREXT"));
        assert!(msg.contains("{high, low}"));
    }

    #[test]
    fn test_insufficient_data_formatting() {
        let error = AgentError::InsufficientData {
            agent: "ATR".to_string(),
            rows: 12,
            required: 24,
        };

        let msg = error.to_string();
        assert!(msg.contains("12 usable"));
        assert!(msg.contains("24 required"));
    }
}
