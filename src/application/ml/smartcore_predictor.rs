use crate::domain::errors::AgentError;
use crate::domain::ml::classifier::ProbabilisticClassifier;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
enum FittedModel {
    Logistic { weights: Vec<f64>, intercept: f64 },
    /// Every training label was the same class; carries P(class 1)
    Prior(f64),
}

/// Binary logistic regression fit with SmartCore.
///
/// Only the learned weights and intercept are kept; class-1 probability is
/// `sigmoid(w·x + b)`.
#[derive(Debug, Clone)]
pub struct LogisticPredictor {
    alpha: f64,
    model: Option<FittedModel>,
}

impl LogisticPredictor {
    /// `alpha` is the L2 regularisation strength.
    pub fn new(alpha: f64) -> Result<Self, AgentError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(AgentError::invalid_parameter("alpha", "must be >= 0"));
        }
        Ok(Self { alpha, model: None })
    }
}

impl Default for LogisticPredictor {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            model: None,
        }
    }
}

impl ProbabilisticClassifier for LogisticPredictor {
    fn fit(&mut self, x: &[Vec<f64>], y: &[i32]) -> Result<(), AgentError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(AgentError::InvalidData {
                reason: format!("{} samples but {} labels", x.len(), y.len()),
            });
        }

        let positives = y.iter().filter(|&&label| label == 1).count();
        if positives == 0 || positives == y.len() {
            let prior = positives as f64 / y.len() as f64;
            warn!(
                "Single-class training labels ({} samples); using class prior {:.1}",
                y.len(),
                prior
            );
            self.model = Some(FittedModel::Prior(prior));
            return Ok(());
        }

        let matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(AgentError::model)?;
        let labels = y.to_vec();
        let params = LogisticRegressionParameters::default().with_alpha(self.alpha);
        let fitted: LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>> =
            LogisticRegression::fit(&matrix, &labels, params).map_err(AgentError::model)?;

        let coefficients = fitted.coefficients();
        let (_, n_features) = coefficients.shape();
        let weights: Vec<f64> = (0..n_features).map(|j| *coefficients.get((0, j))).collect();
        let intercept = *fitted.intercept().get((0, 0));

        debug!(
            "Logistic fit on {} samples: weights={:?}, intercept={:.4}",
            y.len(),
            weights,
            intercept
        );
        self.model = Some(FittedModel::Logistic { weights, intercept });
        Ok(())
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64, AgentError> {
        match &self.model {
            Some(FittedModel::Logistic { weights, intercept }) => {
                if row.len() != weights.len() {
                    return Err(AgentError::InvalidData {
                        reason: format!(
                            "row has {} features, model was fit on {}",
                            row.len(),
                            weights.len()
                        ),
                    });
                }
                let z: f64 = intercept + row.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>();
                Ok(1.0 / (1.0 + (-z).exp()))
            }
            Some(FittedModel::Prior(p)) => Ok(*p),
            None => Err(AgentError::model("predict called before fit")),
        }
    }

    fn name(&self) -> &str {
        "SmartCore Logistic Regression"
    }
}
