use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registered signal agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    SarExt,
    VolatilityMomentum,
    Atr,
    Stoch,
    Adx,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::SarExt,
        AgentKind::VolatilityMomentum,
        AgentKind::Atr,
        AgentKind::Stoch,
        AgentKind::Adx,
    ];

    /// Recommended history window in days when pulling data for this agent.
    pub fn ideal_lookback_days(&self) -> u32 {
        match self {
            AgentKind::SarExt => 1,
            AgentKind::VolatilityMomentum
            | AgentKind::Atr
            | AgentKind::Stoch
            | AgentKind::Adx => 14,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::SarExt => "sarext",
            AgentKind::VolatilityMomentum => "volatility_momentum",
            AgentKind::Atr => "atr",
            AgentKind::Stoch => "stoch",
            AgentKind::Adx => "adx",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sarext" | "sar" => Ok(AgentKind::SarExt),
            "volatility_momentum" | "volmom" => Ok(AgentKind::VolatilityMomentum),
            "atr" => Ok(AgentKind::Atr),
            "stoch" | "stochastic" => Ok(AgentKind::Stoch),
            "adx" => Ok(AgentKind::Adx),
            _ => anyhow::bail!(
                "Invalid agent: {}. Valid: sarext, volatility_momentum, atr, stoch, adx",
                s
            ),
        }
    }
}
