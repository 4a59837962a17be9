//! Ordered feature layouts per agent.
//!
//! The order here is the column order of the design matrix the classifier is
//! trained on. Reordering invalidates fitted models.

pub const SAREXT_FEATURES: [&str; 3] = ["sarx_div", "sarx_slope", "trend_flag"];

pub const VOLATILITY_MOMENTUM_FEATURES: [&str; 4] = ["atr_pct", "stoch_k", "stoch_d", "adx"];

pub const ATR_FEATURES: [&str; 3] = ["atr_pct", "atr_slope", "roc3"];

pub const STOCH_FEATURES: [&str; 3] = ["k", "d", "spread"];

pub const ADX_FEATURES: [&str; 3] = ["adx", "di_spread", "dx"];
