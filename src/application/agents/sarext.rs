//! Extended Parabolic SAR agent.
//!
//! Features:
//! - `sarx_div`: (close - SAR) / close
//! - `sarx_slope`: 1-bar percentage change of the SAR
//! - `trend_flag`: +1 when the SAR sits below the close, -1 otherwise

use super::pipeline::{ClassifierPipeline, FeatureAgent, ModelConfig};
use crate::application::indicators::parabolic_sar::{SarParameters, extended_sar};
use crate::application::indicators::rolling::pct_change;
use crate::domain::errors::AgentError;
use crate::domain::market::feature_table::FeatureTable;
use crate::domain::market::ohlcv::OhlcvFrame;
use crate::domain::ml::feature_registry::SAREXT_FEATURES;
use tracing::debug;

pub struct SarExtAgent {
    params: SarParameters,
    pipeline: ClassifierPipeline,
}

impl SarExtAgent {
    pub const NAME: &'static str = "SAREXT";
    pub const MIN_ROWS: usize = 50;

    pub fn new(params: SarParameters, model: &ModelConfig) -> Result<Self, AgentError> {
        params.validate()?;
        Ok(Self {
            params,
            pipeline: ClassifierPipeline::new(Self::NAME, Self::MIN_ROWS, model)?,
        })
    }

    pub fn build_features(&self, ohlcv: &OhlcvFrame) -> Result<FeatureTable, AgentError> {
        let (high, low, close) = ohlcv.hlc(Self::NAME)?;
        let points = extended_sar(high, low, self.params)?;
        let sar: Vec<Option<f64>> = points.iter().map(|p| Some(p.sar)).collect();

        let div = sar
            .iter()
            .zip(close)
            .map(|(s, &c)| s.filter(|_| c != 0.0).map(|s| (c - s) / c))
            .collect();
        let slope = pct_change(&sar, 1);
        let trend_flag = points
            .iter()
            .zip(close)
            .map(|(p, &c)| Some(if p.sar < c { 1.0 } else { -1.0 }))
            .collect();

        let [div_name, slope_name, flag_name] = SAREXT_FEATURES;
        let table = FeatureTable::new(ohlcv.timestamps().to_vec(), close.to_vec())?
            .with_column(div_name, div)?
            .with_column(slope_name, slope)?
            .with_column(flag_name, trend_flag)?
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

impl Default for SarExtAgent {
    fn default() -> Self {
        Self {
            params: SarParameters::default(),
            pipeline: ClassifierPipeline::with_defaults(Self::NAME, Self::MIN_ROWS),
        }
    }
}

impl FeatureAgent for SarExtAgent {
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
