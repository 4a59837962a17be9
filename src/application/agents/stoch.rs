//! Stochastic oscillator agent.
//!
//! Features: %K / 100, %D / 100 and the K - D spread.

use super::pipeline::{ClassifierPipeline, FeatureAgent, ModelConfig};
use crate::application::indicators::stochastic;
use crate::domain::errors::AgentError;
use crate::domain::market::feature_table::FeatureTable;
use crate::domain::market::ohlcv::OhlcvFrame;
use crate::domain::ml::feature_registry::STOCH_FEATURES;

pub struct StochAgent {
    period: usize,
    smoothing: usize,
    pipeline: ClassifierPipeline,
}

impl StochAgent {
    pub const NAME: &'static str = "STOCH";
    pub const DEFAULT_PERIOD: usize = 14;
    pub const DEFAULT_SMOOTHING: usize = 3;

    pub fn new(period: usize, smoothing: usize, model: &ModelConfig) -> Result<Self, AgentError> {
        if period == 0 {
            return Err(AgentError::invalid_parameter("stoch_period", "must be > 0"));
        }
        if smoothing == 0 {
            return Err(AgentError::invalid_parameter("stoch_smoothing", "must be > 0"));
        }
        Ok(Self {
            period,
            smoothing,
            pipeline: ClassifierPipeline::new(Self::NAME, period + 10, model)?,
        })
    }

    pub fn build_features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError> {
        let (high, low, close) = ohlcv.hlc(Self::NAME)?;
        let lines = stochastic(high, low, close, self.period, self.smoothing)?;

        let k: Vec<Option<f64>> = lines.k.iter().map(|v| v.map(|x| x / 100.0)).collect();
        let d: Vec<Option<f64>> = lines.d.iter().map(|v| v.map(|x| x / 100.0)).collect();
        let spread = k
            .iter()
            .zip(&d)
            .map(|(k, d)| Some((*k)? - (*d)?))
            .collect();

        let [k_name, d_name, spread_name] = STOCH_FEATURES;
        Ok(
            FeatureTable::new(ohlcv.timestamps().to_vec(), close.to_vec())?
                .with_column(k_name, k)?
                .with_column(d_name, d)?
                .with_column(spread_name, spread)?
                .forward_fill()
                .drop_incomplete(),
        )
    }
}

impl Default for StochAgent {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
            smoothing: Self::DEFAULT_SMOOTHING,
            pipeline: ClassifierPipeline::with_defaults(Self::NAME, Self::DEFAULT_PERIOD + 10),
        }
    }
}

impl FeatureAgent for StochAgent {
    fn features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError> {
        self.build_features(ohlcv)
    }

    fn pipeline(&self) -> &ClassifierPipeline {
        &self.pipeline
    }

    fn pipeline_mut(&mut self) -> &mut ClassifierPipeline {
        &mut self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SignalAgent;
    use crate::domain::market::ohlcv::Column;

    fn frame(n: usize) -> OhlcvFrame {
        let close: Vec<f64> = (0..n).map(|i| 30.0 + 3.0 * ((i as f64) / 5.0).sin()).collect();
        let high = close.iter().map(|c| c + 0.4).collect();
        let low = close.iter().map(|c| c - 0.4).collect();
        OhlcvFrame::new((0..n as i64).collect())
            .with_column(Column::High, high)
            .unwrap()
            .with_column(Column::Low, low)
            .unwrap()
            .with_column(Column::Close, close)
            .unwrap()
    }

    #[test]
    fn test_features_are_scaled_to_unit_range() {
        let agent = StochAgent::default();
        let table = agent.build_features(&frame(80)).unwrap();

        // %D needs 14 + 3 - 1 bars
        assert_eq!(table.len(), 80 - 15);
        for name in ["k", "d"] {
            assert!(table.column(name).unwrap().iter().flatten().all(|v| (0.0..=1.0).contains(v)));
        }
        let spread = table.column("spread").unwrap();
        assert!(spread.iter().flatten().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_zero_smoothing_rejected() {
        assert!(StochAgent::new(14, 0, &ModelConfig::default()).is_err());
    }

    #[test]
    fn test_refit_gives_same_prediction() {
        let history = frame(120);
        let mut agent = StochAgent::default();
        agent.fit(&history).unwrap();
        let first = agent.predict(30.0, &history).unwrap();
        agent.fit(&history).unwrap();
        let second = agent.predict(30.0, &history).unwrap();
        assert_eq!(first, second);
    }
}
