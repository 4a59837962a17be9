//! Extended Parabolic SAR (Stop-And-Reverse) with configurable acceleration.
//!
//! [`ExtendedParabolicSar`] is the streaming state machine; [`extended_sar`]
//! runs it over whole high/low columns.

use crate::domain::errors::AgentError;
use serde::{Deserialize, Serialize};

/// Acceleration factor settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarParameters {
    /// Initial AF, also the value AF resets to on reversal
    pub start_af: f64,
    /// AF increment on every new extreme
    pub inc_af: f64,
    /// AF cap
    pub max_af: f64,
}

impl Default for SarParameters {
    fn default() -> Self {
        Self {
            start_af: 0.02,
            inc_af: 0.02,
            max_af: 0.2,
        }
    }
}

impl SarParameters {
    pub fn new(start_af: f64, inc_af: f64, max_af: f64) -> Result<Self, AgentError> {
        let params = Self {
            start_af,
            inc_af,
            max_af,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if !self.start_af.is_finite() || self.start_af <= 0.0 {
            return Err(AgentError::invalid_parameter("start_af", "must be > 0"));
        }
        if !self.inc_af.is_finite() || self.inc_af < 0.0 {
            return Err(AgentError::invalid_parameter("inc_af", "must be >= 0"));
        }
        if !self.max_af.is_finite() || self.max_af < self.start_af {
            return Err(AgentError::invalid_parameter(
                "max_af",
                format!("must be >= start_af ({})", self.start_af),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SarTrend {
    Bull,
    Bear,
}

/// State after processing one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarPoint {
    pub sar: f64,
    pub trend: SarTrend,
    pub af: f64,
    pub extreme: f64,
    /// True when this bar flipped the trend
    pub reversed: bool,
}

pub struct ExtendedParabolicSar {
    params: SarParameters,
    trend: SarTrend,
    af: f64,
    extreme: f64,
    sar: f64,
    prev_bar: Option<(f64, f64)>,
    prev_prev_bar: Option<(f64, f64)>,
}

impl ExtendedParabolicSar {
    pub fn new(params: SarParameters) -> Result<Self, AgentError> {
        params.validate()?;
        Ok(Self {
            params,
            trend: SarTrend::Bull,
            af: params.start_af,
            extreme: 0.0,
            sar: 0.0,
            prev_bar: None,
            prev_prev_bar: None,
        })
    }

    /// Feed one bar's high and low.
    ///
    /// The first bar seeds a bull trend with SAR and extreme at its low.
    pub fn next(&mut self, high: f64, low: f64) -> SarPoint {
        let Some((prev_high, prev_low)) = self.prev_bar else {
            self.trend = SarTrend::Bull;
            self.af = self.params.start_af;
            self.extreme = low;
            self.sar = low;
            self.prev_bar = Some((high, low));
            return self.point(false);
        };
        let (prev2_high, prev2_low) = self.prev_prev_bar.unwrap_or((prev_high, prev_low));

        let mut sar = self.sar + self.af * (self.extreme - self.sar);

        // SAR may not penetrate the prior two bars
        sar = match self.trend {
            SarTrend::Bull => sar.min(prev_low).min(prev2_low),
            SarTrend::Bear => sar.max(prev_high).max(prev2_high),
        };

        let reversed = match self.trend {
            SarTrend::Bull if low < sar => {
                self.trend = SarTrend::Bear;
                sar = self.extreme;
                self.extreme = high;
                self.af = self.params.start_af;
                true
            }
            SarTrend::Bear if high > sar => {
                self.trend = SarTrend::Bull;
                sar = self.extreme;
                self.extreme = low;
                self.af = self.params.start_af;
                true
            }
            _ => false,
        };

        if !reversed {
            let new_extreme = match self.trend {
                SarTrend::Bull => high > self.extreme,
                SarTrend::Bear => low < self.extreme,
            };
            if new_extreme {
                self.extreme = match self.trend {
                    SarTrend::Bull => high,
                    SarTrend::Bear => low,
                };
                self.af = (self.af + self.params.inc_af).min(self.params.max_af);
            }
        }

        self.sar = sar;
        self.prev_prev_bar = self.prev_bar;
        self.prev_bar = Some((high, low));
        self.point(reversed)
    }

    fn point(&self, reversed: bool) -> SarPoint {
        SarPoint {
            sar: self.sar,
            trend: self.trend,
            af: self.af,
            extreme: self.extreme,
            reversed,
        }
    }
}

/// One [`SarPoint`] per bar, same index as the input.
pub fn extended_sar(
    high: &[f64],
    low: &[f64],
    params: SarParameters,
) -> Result<Vec<SarPoint>, AgentError> {
    if high.len() != low.len() {
        return Err(AgentError::InvalidData {
            reason: format!(
                "series lengths differ: high={}, low={}",
                high.len(),
                low.len()
            ),
        });
    }

    let mut indicator = ExtendedParabolicSar::new(params)?;
    Ok(high
        .iter()
        .zip(low)
        .map(|(&h, &l)| indicator.next(h, l))
        .collect())
}
