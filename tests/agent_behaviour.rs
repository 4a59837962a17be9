mod common;

use rust_decimal_macros::dec;
use rustsignal::application::agents::{
    AdxAgent, AgentFactory, AtrAgent, ModelConfig, SarExtAgent, StochAgent,
    VolatilityMomentumAgent,
};
use rustsignal::config::AgentsConfig;
use rustsignal::domain::errors::AgentError;
use rustsignal::domain::market::agent_kind::AgentKind;
use rustsignal::domain::market::candle::Candle;
use rustsignal::domain::market::ohlcv::{Column, OhlcvFrame};
use rustsignal::domain::market::signal::SignalBias;
use rustsignal::domain::ports::SignalAgent;

fn all_agents() -> Vec<Box<dyn SignalAgent>> {
    let config = AgentsConfig::default();
    AgentKind::ALL
        .into_iter()
        .map(|kind| AgentFactory::create(kind, &config).unwrap())
        .collect()
}

#[test]
fn test_predictions_stay_in_range() {
    for seed in [1, 2, 3, 42] {
        let history = common::random_walk(seed, 300);
        for mut agent in all_agents() {
            let price = history.last_close().unwrap();
            let score = agent.predict(price, &history).unwrap();
            assert!(
                (-1.0..=1.0).contains(&score),
                "{} produced {} on seed {}",
                agent.name(),
                score,
                seed
            );
        }
    }
}

#[test]
fn test_refit_on_same_data_is_idempotent() {
    let history = common::random_walk(11, 250);
    for mut agent in all_agents() {
        agent.fit(&history).unwrap();
        let first = agent.strategy(&history).unwrap();
        agent.fit(&history).unwrap();
        let second = agent.strategy(&history).unwrap();
        assert_eq!(first, second, "{} changed after refit", agent.name());
    }
}

#[test]
fn test_predict_fits_lazily() {
    let history = common::random_walk(5, 200);
    for mut agent in all_agents() {
        assert!(!agent.is_fitted());
        agent.strategy(&history).unwrap();
        assert!(agent.is_fitted(), "{} did not fit on first predict", agent.name());
    }
}

#[test]
fn test_missing_columns_are_reported() {
    let history = common::random_walk(3, 200);
    let close_only = OhlcvFrame::new(history.timestamps().to_vec())
        .with_column(Column::Close, history.column(Column::Close).unwrap().to_vec())
        .unwrap();

    for mut agent in all_agents() {
        match agent.fit(&close_only) {
            Err(AgentError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec![Column::High, Column::Low]);
            }
            other => panic!("{}: expected MissingColumns, got {:?}", agent.name(), other),
        }
    }
}

#[test]
fn test_short_history_is_insufficient() {
    let history = common::random_walk(9, 30);
    for mut agent in all_agents() {
        let result = agent.predict(100.0, &history);
        assert!(
            matches!(result, Err(AgentError::InsufficientData { .. })),
            "{}: expected InsufficientData, got {:?}",
            agent.name(),
            result
        );
        assert!(!agent.is_fitted());
    }
}

#[test]
fn test_uptrend_scores_as_buy() {
    // every next-bar label is "up", so each agent falls back to P(up) = 1
    let history = common::uptrend(150);
    for mut agent in all_agents() {
        let score = agent.strategy(&history).unwrap();
        assert_eq!(score, 1.0, "{}", agent.name());
        assert_eq!(SignalBias::from_score(score), SignalBias::StrongBuy);
    }

    let table = SarExtAgent::default().build_features(&history).unwrap();
    let flags = table.column("trend_flag").unwrap();
    assert!(flags.iter().all(|f| *f == Some(1.0)));
}

#[test]
fn test_unscaled_model_config() {
    let history = common::random_walk(21, 250);
    let model = ModelConfig {
        alpha: 0.1,
        scale_features: false,
    };
    let mut agents: Vec<Box<dyn SignalAgent>> = vec![
        Box::new(AtrAgent::new(10, &model).unwrap()),
        Box::new(StochAgent::new(9, 3, &model).unwrap()),
        Box::new(AdxAgent::new(20, &model).unwrap()),
    ];
    for agent in agents.iter_mut() {
        let score = agent.strategy(&history).unwrap();
        assert!((-1.0..=1.0).contains(&score));
    }
}

#[test]
fn test_streamed_candles_feed_agents() {
    let mut history = OhlcvFrame::default();
    let mut price = dec!(50.00);
    for i in 0..120i64 {
        let step = if i % 5 < 3 { dec!(0.40) } else { dec!(-0.55) };
        let close = price + step;
        history
            .push(&Candle {
                timestamp: 1_700_000_000 + i * 86_400,
                open: price,
                high: price.max(close) + dec!(0.10),
                low: price.min(close) - dec!(0.10),
                close,
                volume: dec!(1500),
            })
            .unwrap();
        price = close;
    }

    let mut agent = VolatilityMomentumAgent::default();
    let score = agent.strategy(&history).unwrap();
    assert!((-1.0..=1.0).contains(&score));
    assert_eq!(history.columns(), Column::ALL.to_vec());
}
