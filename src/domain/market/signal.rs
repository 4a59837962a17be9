use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative reading of an agent score in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalBias {
    StrongSell,
    WeakSell,
    Neutral,
    WeakBuy,
    StrongBuy,
}

impl SignalBias {
    pub fn from_score(score: f64) -> Self {
        if score <= -0.5 {
            SignalBias::StrongSell
        } else if score < 0.0 {
            SignalBias::WeakSell
        } else if score >= 0.5 {
            SignalBias::StrongBuy
        } else if score > 0.0 {
            SignalBias::WeakBuy
        } else {
            SignalBias::Neutral
        }
    }
}

impl fmt::Display for SignalBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalBias::StrongSell => "Strong Sell",
            SignalBias::WeakSell => "Weak Sell",
            SignalBias::Neutral => "Neutral",
            SignalBias::WeakBuy => "Weak Buy",
            SignalBias::StrongBuy => "Strong Buy",
        };
        write!(f, "{}", label)
    }
}

/// Map a class-1 probability to a score: `2p - 1`, clamped to [-1, 1].
/// A non-finite probability maps to the neutral score.
pub fn probability_to_score(prob_up: f64) -> f64 {
    if !prob_up.is_finite() {
        return 0.0;
    }
    (2.0 * prob_up - 1.0).clamp(-1.0, 1.0)
}
