//! Average True Range agent.
//!
//! Features: ATR / close, its 1-bar slope and the 3-bar price rate of change.

use super::pipeline::{ClassifierPipeline, FeatureAgent, ModelConfig};
use crate::application::indicators::atr_percent;
use crate::application::indicators::rolling::pct_change;
use crate::domain::errors::AgentError;
use crate::domain::market::feature_table::FeatureTable;
use crate::domain::market::ohlcv::OhlcvFrame;
use crate::domain::ml::feature_registry::ATR_FEATURES;

const ROC_PERIODS: usize = 3;

pub struct AtrAgent {
    period: usize,
    pipeline: ClassifierPipeline,
}

impl AtrAgent {
    pub const NAME: &'static str = "ATR";
    pub const DEFAULT_PERIOD: usize = 14;

    pub fn new(period: usize, model: &ModelConfig) -> Result<Self, AgentError> {
        if period == 0 {
            return Err(AgentError::invalid_parameter("atr_period", "must be > 0"));
        }
        Ok(Self {
            period,
            pipeline: ClassifierPipeline::new(Self::NAME, period + 10, model)?,
        })
    }

    pub fn build_features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError> {
        let (high, low, close) = ohlcv.hlc(Self::NAME)?;
        let atr_pct = atr_percent(high, low, close, self.period)?;
        let slope = pct_change(&atr_pct, 1);
        let closes: Vec<Option<f64>> = close.iter().copied().map(Some).collect();
        let roc = pct_change(&closes, ROC_PERIODS);

        let [atr_name, slope_name, roc_name] = ATR_FEATURES;
        Ok(
            FeatureTable::new(ohlcv.timestamps().to_vec(), close.to_vec())?
                .with_column(atr_name, atr_pct)?
                .with_column(slope_name, slope)?
                .with_column(roc_name, roc)?
                .forward_fill()
                .drop_incomplete(),
        )
    }
}

impl Default for AtrAgent {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
            pipeline: ClassifierPipeline::with_defaults(Self::NAME, Self::DEFAULT_PERIOD + 10),
        }
    }
}

impl FeatureAgent for AtrAgent {
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
        let close: Vec<f64> = (0..n)
            .map(|i| 20.0 + 2.0 * ((i as f64) / 3.0).cos() + (i % 4) as f64 * 0.3)
            .collect();
        let high = close.iter().map(|c| c + 0.6).collect();
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
    fn test_warmup_rows_dropped() {
        let agent = AtrAgent::default();
        let table = agent.build_features(&frame(60)).unwrap();
        // ATR from bar 13, slope from bar 14
        assert_eq!(table.len(), 60 - 14);
        assert!(table.column("atr_pct").unwrap().iter().flatten().all(|v| *v > 0.0));
    }

    #[test]
    fn test_needs_period_plus_ten_rows() {
        let mut agent = AtrAgent::new(14, &ModelConfig::default()).unwrap();
        // 30 bars leave 16 usable rows, 24 required
        let result = agent.fit(&frame(30));
        assert!(matches!(
            result,
            Err(AgentError::InsufficientData { rows: 16, required: 24, .. })
        ));
    }

    #[test]
    fn test_predict_in_range() {
        let mut agent = AtrAgent::default();
        let score = agent.predict(21.0, &frame(100)).unwrap();
        assert!((-1.0..=1.0).contains(&score));
    }
}
