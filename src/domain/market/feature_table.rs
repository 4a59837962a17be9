//! Derived feature columns aligned with the bars they were computed from.
//!
//! Values are `Option<f64>`: `None` marks an undefined value (indicator warm-up,
//! division by zero, non-finite arithmetic). The usual pipeline is
//! build → [`FeatureTable::forward_fill`] → [`FeatureTable::drop_incomplete`].

use crate::domain::errors::AgentError;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    timestamps: Vec<i64>,
    close: Vec<f64>,
    names: Vec<&'static str>,
    columns: Vec<Vec<Option<f64>>>,
}

impl FeatureTable {
    pub fn new(timestamps: Vec<i64>, close: Vec<f64>) -> Result<Self, AgentError> {
        if timestamps.len() != close.len() {
            return Err(AgentError::InvalidData {
                reason: format!(
                    "close has {} values but the index has {} rows",
                    close.len(),
                    timestamps.len()
                ),
            });
        }
        Ok(Self {
            timestamps,
            close,
            names: Vec::new(),
            columns: Vec::new(),
        })
    }

    /// Add a named column. Non-finite values are stored as undefined.
    pub fn with_column(
        mut self,
        name: &'static str,
        values: Vec<Option<f64>>,
    ) -> Result<Self, AgentError> {
        if values.len() != self.timestamps.len() {
            return Err(AgentError::InvalidData {
                reason: format!(
                    "feature '{}' has {} values but the index has {} rows",
                    name,
                    values.len(),
                    self.timestamps.len()
                ),
            });
        }
        if self.names.contains(&name) {
            return Err(AgentError::InvalidData {
                reason: format!("feature '{}' added twice", name),
            });
        }
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        self.names.push(name);
        self.columns.push(values);
        Ok(self)
    }

    /// Carry the last defined value forward over undefined gaps.
    /// Leading undefined values (warm-up) are left as they are.
    pub fn forward_fill(mut self) -> Self {
        for column in &mut self.columns {
            let mut last = None;
            for value in column.iter_mut() {
                if let Some(v) = *value {
                    last = Some(v);
                } else {
                    *value = last;
                }
            }
        }
        self
    }

    /// Keep only rows where every feature is defined.
    pub fn drop_incomplete(self) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.columns.iter().all(|c| c[i].is_some()))
            .collect();

        Self {
            timestamps: keep.iter().map(|&i| self.timestamps[i]).collect(),
            close: keep.iter().map(|&i| self.close[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| keep.iter().map(|&i| c[i]).collect())
                .collect(),
            names: self.names,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Feature vector of row `index`, or `None` if any feature is undefined.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.len() {
            return None;
        }
        self.columns.iter().map(|c| c[index]).collect()
    }

    pub fn last_row(&self) -> Option<Vec<f64>> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }

    /// Design matrix and labels for next-bar direction.
    ///
    /// Every row except the last is used; its label is 1 when the next close
    /// is strictly higher than the current close, else 0.
    pub fn training_set(&self) -> (Vec<Vec<f64>>, Vec<i32>) {
        let mut x = Vec::with_capacity(self.len().saturating_sub(1));
        let mut y = Vec::with_capacity(self.len().saturating_sub(1));
        for i in 0..self.len().saturating_sub(1) {
            if let Some(row) = self.row(i) {
                x.push(row);
                y.push(i32::from(self.close[i + 1] > self.close[i]));
            }
        }
        (x, y)
    }
}
