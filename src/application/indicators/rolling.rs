//! Rolling-window primitives shared by the indicators.
//!
//! Complete input series go through `ta` and have their warm-up masked so that
//! a value is only defined once a full window has been seen. Series with gaps
//! use [`rolling_mean_opt`], where any gap inside the window makes it undefined.

use crate::domain::errors::AgentError;
use std::collections::VecDeque;
use ta::Next;
use ta::indicators::{Maximum, Minimum, SimpleMovingAverage};

fn ta_error(name: &str, e: ta::errors::TaError) -> AgentError {
    AgentError::invalid_parameter(name, format!("{:?}", e))
}

fn masked<I>(period: usize, outputs: I) -> Vec<Option<f64>>
where
    I: Iterator<Item = f64>,
{
    outputs
        .enumerate()
        .map(|(i, v)| (i + 1 >= period).then_some(v))
        .collect()
}

/// Simple moving average over `period` bars.
pub fn sma(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, AgentError> {
    let mut indicator = SimpleMovingAverage::new(period).map_err(|e| ta_error("period", e))?;
    Ok(masked(period, values.iter().map(|&v| indicator.next(v))))
}

/// Highest value over the last `period` bars.
pub fn rolling_max(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, AgentError> {
    let mut indicator = Maximum::new(period).map_err(|e| ta_error("period", e))?;
    Ok(masked(period, values.iter().map(|&v| indicator.next(v))))
}

/// Lowest value over the last `period` bars.
pub fn rolling_min(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, AgentError> {
    let mut indicator = Minimum::new(period).map_err(|e| ta_error("period", e))?;
    Ok(masked(period, values.iter().map(|&v| indicator.next(v))))
}

pub fn rolling_mean_opt(
    values: &[Option<f64>],
    period: usize,
) -> Result<Vec<Option<f64>>, AgentError> {
    if period == 0 {
        return Err(AgentError::invalid_parameter("period", "must be > 0"));
    }

    let mut window: VecDeque<Option<f64>> = VecDeque::with_capacity(period + 1);
    Ok(values
        .iter()
        .map(|&v| {
            window.push_back(v);
            if window.len() > period {
                window.pop_front();
            }
            if window.len() < period {
                return None;
            }
            window
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|s| s / period as f64)
        })
        .collect())
}

/// Percentage change against the value `periods` bars earlier.
/// Undefined when either value is undefined or the base is zero.
pub fn pct_change(values: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let prev = values[i.checked_sub(periods)?]?;
            let curr = values[i]?;
            if prev == 0.0 || periods == 0 {
                None
            } else {
                Some(curr / prev - 1.0)
            }
        })
        .collect()
}

pub(crate) fn check_lengths(high: &[f64], low: &[f64], close: &[f64]) -> Result<(), AgentError> {
    if high.len() != low.len() || high.len() != close.len() {
        return Err(AgentError::InvalidData {
            reason: format!(
                "series lengths differ: high={}, low={}, close={}",
                high.len(),
                low.len(),
                close.len()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_masks_warmup() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!((out[2].unwrap() - 2.0).abs() < 1e-12);
        assert!((out[3].unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sma_rejects_zero_period() {
        assert!(sma(&[1.0], 0).is_err());
    }

    #[test]
    fn test_rolling_extremes() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let max = rolling_max(&values, 2).unwrap();
        let min = rolling_min(&values, 2).unwrap();
        assert_eq!(max, vec![None, Some(3.0), Some(4.0), Some(4.0), Some(5.0)]);
        assert_eq!(min, vec![None, Some(1.0), Some(1.0), Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_rolling_mean_opt_propagates_gaps() {
        let values = [Some(1.0), None, Some(3.0), Some(5.0), Some(7.0)];
        let out = rolling_mean_opt(&values, 2).unwrap();
        assert_eq!(out, vec![None, None, None, Some(4.0), Some(6.0)]);
    }

    #[test]
    fn test_pct_change() {
        let values = [Some(0.0), Some(2.0), Some(3.0), None, Some(6.0)];
        let out = pct_change(&values, 1);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None); // zero base
        assert_eq!(out[2], Some(0.5));
        assert_eq!(out[3], None);
        assert_eq!(out[4], None);
    }
}
