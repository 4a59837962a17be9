use crate::domain::errors::AgentError;

/// Interface for binary probabilistic classifiers
pub trait ProbabilisticClassifier: Send {
    /// Fit on a design matrix (one row per sample) and 0/1 labels.
    fn fit(&mut self, x: &[Vec<f64>], y: &[i32]) -> Result<(), AgentError>;

    /// Probability (0.0 to 1.0) that `row` belongs to class 1.
    fn predict_proba(&self, row: &[f64]) -> Result<f64, AgentError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
