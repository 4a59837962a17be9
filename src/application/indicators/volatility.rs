use super::rolling::{check_lengths, sma};
use crate::domain::errors::AgentError;

/// True range per bar: max(high - low, |high - prev close|, |low - prev close|).
/// The first bar has no previous close and uses high - low.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Result<Vec<f64>, AgentError> {
    check_lengths(high, low, close)?;

    Ok((0..high.len())
        .map(|i| {
            let range = high[i] - low[i];
            match i.checked_sub(1).map(|p| close[p]) {
                Some(prev_close) => range
                    .max((high[i] - prev_close).abs())
                    .max((low[i] - prev_close).abs()),
                None => range,
            }
        })
        .collect())
}

/// Average true range as a simple rolling mean of [`true_range`].
pub fn average_true_range(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<Option<f64>>, AgentError> {
    let tr = true_range(high, low, close)?;
    sma(&tr, period)
}

/// ATR divided by close. Undefined where close is not positive.
pub fn atr_percent(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<Vec<Option<f64>>, AgentError> {
    let atr = average_true_range(high, low, close, period)?;
    Ok(atr
        .into_iter()
        .zip(close)
        .map(|(a, &c)| a.filter(|_| c > 0.0).map(|a| a / c))
        .collect())
}
