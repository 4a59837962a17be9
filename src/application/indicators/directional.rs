use super::rolling::{check_lengths, rolling_mean_opt, sma};
use super::volatility::average_true_range;
use crate::domain::errors::AgentError;

/// Directional movement system, all lines on a 0..100 scale
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalIndex {
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub dx: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

/// +DM and -DM per bar from consecutive high/low differences.
///
/// +DM is the up move when it beats the down move and is positive, -DM the
/// reverse. The first bar has no movement.
pub fn directional_movement(high: &[f64], low: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = high.len().min(low.len());
    let mut plus_dm = Vec::with_capacity(n);
    let mut minus_dm = Vec::with_capacity(n);

    for i in 0..n {
        if i == 0 {
            plus_dm.push(0.0);
            minus_dm.push(0.0);
            continue;
        }
        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];
        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }
    (plus_dm, minus_dm)
}

/// ADX with rolling-mean smoothing.
///
/// DI lines are undefined while ATR is zero; DX is 0 when both DI lines are 0.
pub fn average_directional_index(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> Result<DirectionalIndex, AgentError> {
    check_lengths(high, low, close)?;
    let atr = average_true_range(high, low, close, period)?;
    let (plus_dm, minus_dm) = directional_movement(high, low);
    let plus_smooth = sma(&plus_dm, period)?;
    let minus_smooth = sma(&minus_dm, period)?;

    let di = |smooth: &[Option<f64>]| -> Vec<Option<f64>> {
        smooth
            .iter()
            .zip(&atr)
            .map(|(dm, tr)| match (*dm, *tr) {
                (Some(dm), Some(tr)) if tr > 0.0 => Some(100.0 * dm / tr),
                _ => None,
            })
            .collect()
    };
    let plus_di = di(plus_smooth.as_slice());
    let minus_di = di(minus_smooth.as_slice());

    let dx: Vec<Option<f64>> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| match (*p, *m) {
            (Some(p), Some(m)) => {
                let sum = p + m;
                if sum == 0.0 {
                    Some(0.0)
                } else {
                    Some(100.0 * (p - m).abs() / sum)
                }
            }
            _ => None,
        })
        .collect();
    let adx = rolling_mean_opt(&dx, period)?;

    Ok(DirectionalIndex {
        plus_di,
        minus_di,
        dx,
        adx,
    })
}
