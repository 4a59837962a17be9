use super::rolling::{check_lengths, rolling_max, rolling_mean_opt, rolling_min};
use crate::domain::errors::AgentError;

/// Stochastic oscillator lines, both on a 0..100 scale
#[derive(Debug, Clone, PartialEq)]
pub struct Stochastic {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// %K = 100 * (close - lowest low) / (highest high - lowest low) over `period` bars,
/// %D = `smoothing`-bar mean of %K.
///
/// %K is undefined for a flat window and clamped to [0, 100] otherwise.
pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    smoothing: usize,
) -> Result<Stochastic, AgentError> {
    check_lengths(high, low, close)?;
    let highest = rolling_max(high, period)?;
    let lowest = rolling_min(low, period)?;

    let k: Vec<Option<f64>> = highest
        .iter()
        .zip(&lowest)
        .zip(close)
        .map(|((h, l), &c)| match (*h, *l) {
            (Some(h), Some(l)) if h > l => Some((100.0 * (c - l) / (h - l)).clamp(0.0, 100.0)),
            _ => None,
        })
        .collect();
    let d = rolling_mean_opt(&k, smoothing)?;

    Ok(Stochastic { k, d })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_at_high_is_100() {
        let high: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 2.0).collect();
        let close = high.clone();

        let s = stochastic(&high, &low, &close, 14, 3).unwrap();
        assert!(s.k[..13].iter().all(Option::is_none));
        assert_eq!(s.k[13], Some(100.0));
        assert_eq!(s.d[15], Some(100.0));
        assert_eq!(s.d[14], None);
    }

    #[test]
    fn test_flat_window_is_undefined() {
        let flat = vec![5.0; 20];
        let s = stochastic(&flat, &flat, &flat, 14, 3).unwrap();
        assert!(s.k.iter().all(Option::is_none));
        assert!(s.d.iter().all(Option::is_none));
    }

    #[test]
    fn test_midpoint() {
        let high = vec![12.0; 5];
        let low = vec![8.0; 5];
        let close = vec![10.0; 5];
        let s = stochastic(&high, &low, &close, 3, 2).unwrap();
        assert_eq!(s.k[2], Some(50.0));
        assert_eq!(s.d[3], Some(50.0));
    }
}
