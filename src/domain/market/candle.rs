use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One OHLCV bar as delivered by a data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    pub fn open_f64(&self) -> f64 {
        self.open.to_f64().unwrap_or(0.0)
    }

    pub fn high_f64(&self) -> f64 {
        self.high.to_f64().unwrap_or(0.0)
    }

    pub fn low_f64(&self) -> f64 {
        self.low.to_f64().unwrap_or(0.0)
    }

    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(0.0)
    }

    pub fn volume_f64(&self) -> f64 {
        self.volume.to_f64().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_candle_f64_accessors() {
        let candle = Candle {
            timestamp: 1_700_000_000,
            open: dec!(100.5),
            high: dec!(101.25),
            low: dec!(99.75),
            close: dec!(100.0),
            volume: dec!(1500),
        };

        assert_eq!(candle.open_f64(), 100.5);
        assert_eq!(candle.high_f64(), 101.25);
        assert_eq!(candle.low_f64(), 99.75);
        assert_eq!(candle.close_f64(), 100.0);
        assert_eq!(candle.volume_f64(), 1500.0);
    }
}
