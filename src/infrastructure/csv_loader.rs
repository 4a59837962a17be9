//! OHLCV loading from CSV files.
//!
//! Headers are matched case-insensitively. The time column may be named
//! `timestamp`, `date`, `datetime` or `time` and hold epoch seconds, RFC 3339
//! datetimes, `YYYY-MM-DD HH:MM:SS` or plain `YYYY-MM-DD` dates (UTC).
//! Price columns that are absent from the file stay absent from the frame.

use crate::domain::market::ohlcv::{Column, OhlcvFrame};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

const TIME_HEADERS: [&str; 4] = ["timestamp", "date", "datetime", "time"];

pub fn load_ohlcv_csv(path: &Path) -> Result<OhlcvFrame> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let frame = read_ohlcv(BufReader::new(file))
        .with_context(|| format!("Failed to load OHLCV data from {}", path.display()))?;
    info!(
        "Loaded {} bars with columns {:?} from {}",
        frame.len(),
        frame.columns(),
        path.display()
    );
    Ok(frame)
}

pub fn read_ohlcv<R: Read>(reader: R) -> Result<OhlcvFrame> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().context("Failed to read CSV header")?.clone();

    let mut time_idx = None;
    let mut column_idx: Vec<(Column, usize)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let name = header.trim().to_lowercase();
        if TIME_HEADERS.contains(&name.as_str()) {
            time_idx.get_or_insert(idx);
        } else if let Ok(column) = name.parse::<Column>() {
            if !column_idx.iter().any(|(c, _)| *c == column) {
                column_idx.push((column, idx));
            }
        }
    }
    if time_idx.is_none() {
        warn!("No time column found; using row numbers as the time index");
    }

    let mut timestamps: Vec<i64> = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); column_idx.len()];
    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record at row {}", row + 1))?;

        let timestamp = match time_idx {
            Some(idx) => {
                let raw = record.get(idx).unwrap_or_default();
                parse_timestamp(raw).with_context(|| format!("Row {}: bad timestamp '{}'", row + 1, raw))?
            }
            None => row as i64,
        };
        if let Some(&last) = timestamps.last() {
            if timestamp <= last {
                anyhow::bail!(
                    "Row {}: timestamp {} does not follow {}; rows must be in ascending time order",
                    row + 1,
                    timestamp,
                    last
                );
            }
        }
        timestamps.push(timestamp);

        for ((column, idx), series) in column_idx.iter().zip(values.iter_mut()) {
            let raw = record.get(*idx).unwrap_or_default().trim();
            let value = raw
                .parse::<f64>()
                .with_context(|| format!("Row {}: cannot parse {} value '{}'", row + 1, column, raw))?;
            series.push(value);
        }
    }

    let mut frame = OhlcvFrame::new(timestamps);
    for ((column, _), series) in column_idx.into_iter().zip(values) {
        frame = frame.with_column(column, series)?;
    }
    Ok(frame)
}

/// Seconds since the Unix epoch.
pub fn parse_timestamp(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if let Ok(seconds) = raw.parse::<i64>() {
        return Ok(seconds);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc().timestamp());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .context("expected epoch seconds, RFC 3339, or YYYY-MM-DD")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("invalid midnight for date")?;
    Ok(midnight.and_utc().timestamp())
}
