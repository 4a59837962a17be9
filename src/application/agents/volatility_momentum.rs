//! Combined volatility + momentum agent: ATR%, stochastic %K/%D and ADX.

use super::pipeline::{ClassifierPipeline, FeatureAgent, ModelConfig};
use crate::application::indicators::{atr_percent, average_directional_index, stochastic};
use crate::domain::errors::AgentError;
use crate::domain::market::feature_table::FeatureTable;
use crate::domain::market::ohlcv::OhlcvFrame;
use crate::domain::ml::feature_registry::VOLATILITY_MOMENTUM_FEATURES;
use tracing::debug;

/// Indicator windows, in bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatilityMomentumPeriods {
    pub atr: usize,
    pub stoch: usize,
    pub stoch_smoothing: usize,
    pub adx: usize,
}

impl Default for VolatilityMomentumPeriods {
    fn default() -> Self {
        Self {
            atr: 14,
            stoch: 14,
            stoch_smoothing: 3,
            adx: 14,
        }
    }
}

impl VolatilityMomentumPeriods {
    pub fn validate(&self) -> Result<(), AgentError> {
        for (name, value) in [
            ("atr_period", self.atr),
            ("stoch_period", self.stoch),
            ("stoch_smoothing", self.stoch_smoothing),
            ("adx_period", self.adx),
        ] {
            if value == 0 {
                return Err(AgentError::invalid_parameter(name, "must be > 0"));
            }
        }
        Ok(())
    }

    /// Usable rows needed to fit: longest window plus ten.
    pub fn min_rows(&self) -> usize {
        self.atr.max(self.stoch).max(self.adx) + 10
    }
}

pub struct VolatilityMomentumAgent {
    periods: VolatilityMomentumPeriods,
    pipeline: ClassifierPipeline,
}

impl VolatilityMomentumAgent {
    pub const NAME: &'static str = "VOLATILITY_MOMENTUM";

    pub fn new(periods: VolatilityMomentumPeriods, model: &ModelConfig) -> Result<Self, AgentError> {
        periods.validate()?;
        Ok(Self {
            periods,
            pipeline: ClassifierPipeline::new(Self::NAME, periods.min_rows(), model)?,
        })
    }

    pub fn build_features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError> {
        let (high, low, close) = ohlcv.hlc(Self::NAME)?;
        let atr_pct = atr_percent(high, low, close, self.periods.atr)?;
        let stoch = stochastic(high, low, close, self.periods.stoch, self.periods.stoch_smoothing)?;
        let dmi = average_directional_index(high, low, close, self.periods.adx)?;

        let percent = |values: Vec<Option<f64>>| -> Vec<Option<f64>> {
            values.into_iter().map(|v| v.map(|x| x / 100.0)).collect()
        };

        let [atr_name, k_name, d_name, adx_name] = VOLATILITY_MOMENTUM_FEATURES;
        let table = FeatureTable::new(ohlcv.timestamps().to_vec(), close.to_vec())?
            .with_column(atr_name, atr_pct)?
            .with_column(k_name, percent(stoch.k))?
            .with_column(d_name, percent(stoch.d))?
            .with_column(adx_name, percent(dmi.adx))?
            .forward_fill()
            .drop_incomplete();

        debug!(
            "{}: {} feature rows from {} bars",
            Self::NAME,
            table.len(),
            ohlcv.len()
        );
        Ok(table)
    }
}

impl Default for VolatilityMomentumAgent {
    fn default() -> Self {
        let periods = VolatilityMomentumPeriods::default();
        Self {
            periods,
            pipeline: ClassifierPipeline::with_defaults(Self::NAME, periods.min_rows()),
        }
    }
}

impl FeatureAgent for VolatilityMomentumAgent {
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

    fn wave(n: usize) -> OhlcvFrame {
        let close: Vec<f64> = (0..n)
            .map(|i| 50.0 + 5.0 * ((i as f64) / 4.0).sin() + 0.1 * i as f64)
            .collect();
        let high = close.iter().map(|c| c + 0.8).collect();
        let low = close.iter().map(|c| c - 0.6).collect();
        OhlcvFrame::new((0..n as i64).collect())
            .with_column(Column::High, high)
            .unwrap()
            .with_column(Column::Low, low)
            .unwrap()
            .with_column(Column::Close, close)
            .unwrap()
    }

    #[test]
    fn test_min_rows_tracks_longest_window() {
        let periods = VolatilityMomentumPeriods {
            atr: 10,
            stoch: 21,
            stoch_smoothing: 3,
            adx: 14,
        };
        assert_eq!(periods.min_rows(), 31);
        assert_eq!(VolatilityMomentumPeriods::default().min_rows(), 24);
    }

    #[test]
    fn test_zero_period_rejected() {
        let periods = VolatilityMomentumPeriods {
            adx: 0,
            ..Default::default()
        };
        assert!(VolatilityMomentumAgent::new(periods, &ModelConfig::default()).is_err());
    }

    #[test]
    fn test_feature_ranges() {
        let agent = VolatilityMomentumAgent::default();
        let table = agent.build_features(&wave(100)).unwrap();

        // ADX needs 2 * 14 - 1 bars before its first value
        assert_eq!(table.len(), 100 - 26);
        for name in ["stoch_k", "stoch_d", "adx"] {
            let column = table.column(name).unwrap();
            assert!(column.iter().flatten().all(|v| (0.0..=1.0).contains(v)));
        }
        assert!(table.column("atr_pct").unwrap().iter().flatten().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_predict_in_range() {
        let mut agent = VolatilityMomentumAgent::default();
        let history = wave(150);
        let score = agent.strategy(&history).unwrap();
        assert!((-1.0..=1.0).contains(&score));
        assert!(agent.is_fitted());
    }
}
