use crate::domain::errors::AgentError;
use statrs::statistics::{Data, Distribution};

/// Per-column standardisation to zero mean and unit variance.
///
/// Columns with zero (or undefined) spread keep a unit scale so constant
/// features map to 0 instead of dividing by zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(x: &[Vec<f64>]) -> Result<Self, AgentError> {
        let width = x.first().map(Vec::len).ok_or_else(|| AgentError::InvalidData {
            reason: "cannot fit scaler on an empty matrix".to_string(),
        })?;

        let mut means = Vec::with_capacity(width);
        let mut scales = Vec::with_capacity(width);
        for j in 0..width {
            let column: Vec<f64> = x.iter().map(|row| row[j]).collect();
            // f64 boundary for statistical library
            let data = Data::new(column);
            means.push(data.mean().unwrap_or(0.0));
            scales.push(
                data.std_dev()
                    .filter(|s| s.is_finite() && *s > 1e-12)
                    .unwrap_or(1.0),
            );
        }

        Ok(Self { means, scales })
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, AgentError> {
        if row.len() != self.width() {
            return Err(AgentError::InvalidData {
                reason: format!(
                    "row has {} features, scaler was fit on {}",
                    row.len(),
                    self.width()
                ),
            });
        }
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn transform(&self, x: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, AgentError> {
        x.iter().map(|row| self.transform_row(row)).collect()
    }
}
