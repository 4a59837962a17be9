//! Label → scale → fit → score stages shared by every agent.

use crate::application::ml::{LogisticPredictor, StandardScaler};
use crate::domain::errors::AgentError;
use crate::domain::market::feature_table::FeatureTable;
use crate::domain::market::signal::probability_to_score;
use crate::domain::market::ohlcv::OhlcvFrame;
use crate::domain::ml::classifier::ProbabilisticClassifier;
use crate::domain::ports::SignalAgent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Classifier hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// L2 regularisation strength of the logistic regression
    pub alpha: f64,
    /// Standardise features before fitting and scoring
    pub scale_features: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            scale_features: true,
        }
    }
}

pub struct ClassifierPipeline {
    agent: &'static str,
    min_rows: usize,
    scale_features: bool,
    scaler: Option<StandardScaler>,
    classifier: Box<dyn ProbabilisticClassifier>,
    fitted: bool,
}

impl ClassifierPipeline {
    pub fn new(
        agent: &'static str,
        min_rows: usize,
        config: &ModelConfig,
    ) -> Result<Self, AgentError> {
        let classifier = LogisticPredictor::new(config.alpha)?;
        Ok(Self::with_classifier(
            agent,
            min_rows,
            config.scale_features,
            Box::new(classifier),
        ))
    }

    pub fn with_classifier(
        agent: &'static str,
        min_rows: usize,
        scale_features: bool,
        classifier: Box<dyn ProbabilisticClassifier>,
    ) -> Self {
        Self {
            agent,
            min_rows,
            scale_features,
            scaler: None,
            classifier,
            fitted: false,
        }
    }

    /// Default logistic model with feature scaling.
    pub fn with_defaults(agent: &'static str, min_rows: usize) -> Self {
        Self::with_classifier(agent, min_rows, true, Box::<LogisticPredictor>::default())
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    pub fn agent(&self) -> &'static str {
        self.agent
    }

    /// Train on a cleaned feature table (warm-up rows already dropped).
    pub fn fit(&mut self, table: &FeatureTable) -> Result<(), AgentError> {
        if table.len() < self.min_rows {
            return Err(AgentError::InsufficientData {
                agent: self.agent.to_string(),
                rows: table.len(),
                required: self.min_rows,
            });
        }

        let (x, y) = table.training_set();
        let (scaler, x) = if self.scale_features {
            let scaler = StandardScaler::fit(&x)?;
            let scaled = scaler.transform(&x)?;
            (Some(scaler), scaled)
        } else {
            (None, x)
        };

        self.classifier.fit(&x, &y)?;
        self.scaler = scaler;
        self.fitted = true;

        let ups = y.iter().filter(|&&label| label == 1).count();
        info!(
            "{}: fitted {} on {} rows ({} up / {} down)",
            self.agent,
            self.classifier.name(),
            y.len(),
            ups,
            y.len() - ups
        );
        Ok(())
    }

    /// Score the last row of `table` as `2 * P(up) - 1`.
    pub fn score_latest(&self, table: &FeatureTable) -> Result<f64, AgentError> {
        if !self.fitted {
            return Err(AgentError::model(format!("{} is not fitted", self.agent)));
        }
        let row = table.last_row().ok_or_else(|| AgentError::InsufficientData {
            agent: self.agent.to_string(),
            rows: 0,
            required: 1,
        })?;
        let row = match &self.scaler {
            Some(scaler) => scaler.transform_row(&row)?,
            None => row,
        };

        let prob_up = self.classifier.predict_proba(&row)?;
        let score = probability_to_score(prob_up);
        debug!("{}: P(up)={:.4} score={:+.4}", self.agent, prob_up, score);
        Ok(score)
    }
}

/// An agent defined by its feature layout over a shared [`ClassifierPipeline`].
///
/// Every implementor is a [`SignalAgent`]: `fit` trains on the features of
/// the given frame and `predict` fits lazily before scoring the last row.
pub trait FeatureAgent: Send {
    fn features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError>;

    fn pipeline(&self) -> &ClassifierPipeline;

    fn pipeline_mut(&mut self) -> &mut ClassifierPipeline;
}

impl<A: FeatureAgent> SignalAgent for A {
    fn name(&self) -> &str {
        self.pipeline().agent()
    }

    fn is_fitted(&self) -> bool {
        self.pipeline().is_fitted()
    }

    fn fit(&mut self, ohlcv: &OhlcvFrame) -> Result<(), AgentError> {
        let table = self.features(ohlcv)?;
        self.pipeline_mut().fit(&table)
    }

    fn predict(&mut self, current_price: f64, historical: &OhlcvFrame) -> Result<f64, AgentError> {
        if !self.is_fitted() {
            self.fit(historical)?;
        }
        let table = self.features(historical)?;
        let score = self.pipeline().score_latest(&table)?;
        debug!("{} @ {:.4}: score {:+.4}", self.name(), current_price, score);
        Ok(score)
    }
}
