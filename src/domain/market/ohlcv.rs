use super::candle::Candle;
use crate::domain::errors::AgentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named price/volume column of an OHLCV table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::Volume => "volume",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Column {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "o" => Ok(Column::Open),
            "high" | "h" => Ok(Column::High),
            "low" | "l" => Ok(Column::Low),
            "close" | "c" => Ok(Column::Close),
            "volume" | "vol" | "v" => Ok(Column::Volume),
            other => Err(AgentError::InvalidData {
                reason: format!("unknown OHLCV column '{}'", other),
            }),
        }
    }
}

/// Ordered, append-only OHLCV table with a time index.
///
/// Columns are optional so that sources carrying only `high/low/close` can be
/// represented; agents check for the columns they need with [`OhlcvFrame::require`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhlcvFrame {
    timestamps: Vec<i64>,
    open: Option<Vec<f64>>,
    high: Option<Vec<f64>>,
    low: Option<Vec<f64>>,
    close: Option<Vec<f64>>,
    volume: Option<Vec<f64>>,
}

impl OhlcvFrame {
    pub fn new(timestamps: Vec<i64>) -> Self {
        Self {
            timestamps,
            ..Default::default()
        }
    }

    /// Attach a column. Its length must match the time index and every value must be finite.
    pub fn with_column(mut self, column: Column, values: Vec<f64>) -> Result<Self, AgentError> {
        if values.len() != self.timestamps.len() {
            return Err(AgentError::InvalidData {
                reason: format!(
                    "column '{}' has {} values but the index has {} rows",
                    column,
                    values.len(),
                    self.timestamps.len()
                ),
            });
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(AgentError::InvalidData {
                reason: format!("column '{}' has a non-finite value at row {}", column, pos),
            });
        }
        *self.slot_mut(column) = Some(values);
        Ok(self)
    }

    pub fn from_candles(candles: &[Candle]) -> Self {
        Self {
            timestamps: candles.iter().map(|c| c.timestamp).collect(),
            open: Some(candles.iter().map(Candle::open_f64).collect()),
            high: Some(candles.iter().map(Candle::high_f64).collect()),
            low: Some(candles.iter().map(Candle::low_f64).collect()),
            close: Some(candles.iter().map(Candle::close_f64).collect()),
            volume: Some(candles.iter().map(Candle::volume_f64).collect()),
        }
    }

    /// Append one bar. The timestamp must be later than the last row.
    ///
    /// An empty frame without columns adopts all five columns on the first push.
    pub fn push(&mut self, candle: &Candle) -> Result<(), AgentError> {
        if let Some(&last) = self.timestamps.last() {
            if candle.timestamp <= last {
                return Err(AgentError::InvalidData {
                    reason: format!(
                        "bar at {} does not follow last bar at {}",
                        candle.timestamp, last
                    ),
                });
            }
        }

        if self.timestamps.is_empty() && self.columns().is_empty() {
            for column in Column::ALL {
                *self.slot_mut(column) = Some(Vec::new());
            }
        }

        let values = [
            candle.open_f64(),
            candle.high_f64(),
            candle.low_f64(),
            candle.close_f64(),
            candle.volume_f64(),
        ];
        for (column, value) in Column::ALL.into_iter().zip(values) {
            if let Some(series) = self.slot_mut(column) {
                series.push(value);
            }
        }
        self.timestamps.push(candle.timestamp);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn column(&self, column: Column) -> Option<&[f64]> {
        self.slot(column).as_deref()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.slot(column).is_some()
    }

    /// Columns present in this frame, in canonical order.
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| self.has_column(*c))
            .collect()
    }

    /// Fails with [`AgentError::MissingColumns`] naming every absent column.
    pub fn require(&self, agent: &str, required: &[Column]) -> Result<(), AgentError> {
        let missing: Vec<Column> = required
            .iter()
            .copied()
            .filter(|c| !self.has_column(*c))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AgentError::MissingColumns {
                agent: agent.to_string(),
                missing,
            })
        }
    }

    /// Borrow `(high, low, close)` after checking they are present.
    pub fn hlc(&self, agent: &str) -> Result<(&[f64], &[f64], &[f64]), AgentError> {
        self.require(agent, &[Column::High, Column::Low, Column::Close])?;
        match (
            self.column(Column::High),
            self.column(Column::Low),
            self.column(Column::Close),
        ) {
            (Some(high), Some(low), Some(close)) => Ok((high, low, close)),
            _ => Err(AgentError::MissingColumns {
                agent: agent.to_string(),
                missing: vec![Column::High, Column::Low, Column::Close],
            }),
        }
    }

    pub fn last_close(&self) -> Option<f64> {
        self.column(Column::Close).and_then(|c| c.last().copied())
    }

    /// The most recent `n` rows (all rows if the frame is shorter).
    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        let slice = |col: &Option<Vec<f64>>| col.as_ref().map(|v| v[start..].to_vec());
        Self {
            timestamps: self.timestamps[start..].to_vec(),
            open: slice(&self.open),
            high: slice(&self.high),
            low: slice(&self.low),
            close: slice(&self.close),
            volume: slice(&self.volume),
        }
    }

    fn slot(&self, column: Column) -> &Option<Vec<f64>> {
        match column {
            Column::Open => &self.open,
            Column::High => &self.high,
            Column::Low => &self.low,
            Column::Close => &self.close,
            Column::Volume => &self.volume,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<Vec<f64>> {
        match column {
            Column::Open => &mut self.open,
            Column::High => &mut self.high,
            Column::Low => &mut self.low,
            Column::Close => &mut self.close,
            Column::Volume => &mut self.volume,
        }
    }
}
