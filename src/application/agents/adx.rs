//! Average Directional Index agent.
//!
//! Features: ADX / 100, (+DI - -DI) / 100 and single-bar DX / 100.

use super::pipeline::{ClassifierPipeline, FeatureAgent, ModelConfig};
use crate::application::indicators::average_directional_index;
use crate::domain::errors::AgentError;
use crate::domain::market::feature_table::FeatureTable;
use crate::domain::market::ohlcv::OhlcvFrame;
use crate::domain::ml::feature_registry::ADX_FEATURES;

pub struct AdxAgent {
    period: usize,
    pipeline: ClassifierPipeline,
}

impl AdxAgent {
    pub const NAME: &'static str = "ADX";
    pub const DEFAULT_PERIOD: usize = 14;

    pub fn new(period: usize, model: &ModelConfig) -> Result<Self, AgentError> {
        if period == 0 {
            return Err(AgentError::invalid_parameter("adx_period", "must be > 0"));
        }
        Ok(Self {
            period,
            pipeline: ClassifierPipeline::new(Self::NAME, period + 10, model)?,
        })
    }

    pub fn build_features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError> {
        let (high, low, close) = ohlcv.hlc(Self::NAME)?;
        let dmi = average_directional_index(high, low, close, self.period)?;

        let scale = |values: &[Option<f64>]| -> Vec<Option<f64>> {
            values.iter().map(|v| v.map(|x| x / 100.0)).collect()
        };
        let di_spread = dmi
            .plus_di
            .iter()
            .zip(&dmi.minus_di)
            .map(|(p, m)| Some(((*p)? - (*m)?) / 100.0))
            .collect();

        let [adx_name, spread_name, dx_name] = ADX_FEATURES;
        Ok(
            FeatureTable::new(ohlcv.timestamps().to_vec(), close.to_vec())?
                .with_column(adx_name, scale(dmi.adx.as_slice()))?
                .with_column(spread_name, di_spread)?
                .with_column(dx_name, scale(dmi.dx.as_slice()))?
                .forward_fill()
                .drop_incomplete(),
        )
    }
}

impl Default for AdxAgent {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
            pipeline: ClassifierPipeline::with_defaults(Self::NAME, Self::DEFAULT_PERIOD + 10),
        }
    }
}

impl FeatureAgent for AdxAgent {
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

    fn frame(close: Vec<f64>) -> OhlcvFrame {
        let n = close.len();
        let high = close.iter().map(|c| c + 0.5).collect();
        let low = close.iter().map(|c| c - 0.5).collect();
        OhlcvFrame::new((0..n as i64).collect())
            .with_column(Column::High, high)
            .unwrap()
            .with_column(Column::Low, low)
            .unwrap()
            .with_column(Column::Close, close)
            .unwrap()
    }

    #[test]
    fn test_uptrend_has_positive_di_spread() {
        let close: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let agent = AdxAgent::default();
        let table = agent.build_features(&frame(close)).unwrap();

        assert!(!table.is_empty());
        let spread = table.column("di_spread").unwrap();
        assert!(spread.iter().flatten().all(|v| *v > 0.0));
        let adx = table.column("adx").unwrap();
        assert!(adx.iter().flatten().all(|v| (*v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_uptrend_fit_uses_class_prior() {
        // every label is "up", the model falls back to P(up) = 1
        let close: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let history = frame(close);
        let mut agent = AdxAgent::default();
        let score = agent.predict(180.0, &history).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_missing_close_column() {
        let frame = OhlcvFrame::new(vec![1])
            .with_column(Column::High, vec![2.0])
            .unwrap()
            .with_column(Column::Low, vec![1.0])
            .unwrap();
        let mut agent = AdxAgent::default();
        assert!(matches!(
            agent.fit(&frame),
            Err(AgentError::MissingColumns { .. })
        ));
    }
}
