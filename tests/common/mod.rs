#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustsignal::domain::market::ohlcv::{Column, OhlcvFrame};

/// Seeded geometric random walk with intrabar ranges.
pub fn random_walk(seed: u64, bars: usize) -> OhlcvFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut open = Vec::with_capacity(bars);
    let mut high = Vec::with_capacity(bars);
    let mut low = Vec::with_capacity(bars);
    let mut close = Vec::with_capacity(bars);
    let mut volume = Vec::with_capacity(bars);

    let mut price: f64 = 100.0;
    for _ in 0..bars {
        let o = price;
        let c = o * (1.0 + rng.random_range(-0.02..0.02));
        let h = o.max(c) * (1.0 + rng.random_range(0.0..0.01));
        let l = o.min(c) * (1.0 - rng.random_range(0.0..0.01));
        open.push(o);
        high.push(h);
        low.push(l);
        close.push(c);
        volume.push(rng.random_range(1_000.0..5_000.0));
        price = c;
    }

    frame(open, high, low, close, volume)
}

/// Strictly rising closes, one point per bar.
pub fn uptrend(bars: usize) -> OhlcvFrame {
    let close: Vec<f64> = (0..bars).map(|i| 100.0 + i as f64).collect();
    let open = close.iter().map(|c| c - 0.5).collect();
    let high = close.iter().map(|c| c + 0.5).collect();
    let low = close.iter().map(|c| c - 1.0).collect();
    let volume = vec![1_000.0; bars];
    frame(open, high, low, close, volume)
}

pub fn constant(level: f64, bars: usize) -> OhlcvFrame {
    frame(
        vec![level; bars],
        vec![level; bars],
        vec![level; bars],
        vec![level; bars],
        vec![0.0; bars],
    )
}

fn frame(
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
) -> OhlcvFrame {
    let timestamps = (0..close.len() as i64).map(|i| 1_700_000_000 + i * 60).collect();
    OhlcvFrame::new(timestamps)
        .with_column(Column::Open, open)
        .unwrap()
        .with_column(Column::High, high)
        .unwrap()
        .with_column(Column::Low, low)
        .unwrap()
        .with_column(Column::Close, close)
        .unwrap()
        .with_column(Column::Volume, volume)
        .unwrap()
}
