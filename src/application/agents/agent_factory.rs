use crate::application::agents::{
    AdxAgent, AtrAgent, SarExtAgent, StochAgent, VolatilityMomentumAgent,
    VolatilityMomentumPeriods,
};
use crate::config::AgentsConfig;
use crate::domain::errors::AgentError;
use crate::domain::market::agent_kind::AgentKind;
use crate::domain::ports::SignalAgent;

pub struct AgentFactory;

impl AgentFactory {
    pub fn create(kind: AgentKind, config: &AgentsConfig) -> Result<Box<dyn SignalAgent>, AgentError> {
        let model = &config.model;
        let agent: Box<dyn SignalAgent> = match kind {
            AgentKind::SarExt => Box::new(SarExtAgent::new(config.sar, model)?),
            AgentKind::VolatilityMomentum => Box::new(VolatilityMomentumAgent::new(
                VolatilityMomentumPeriods {
                    atr: config.atr_period,
                    stoch: config.stoch_period,
                    stoch_smoothing: config.stoch_smoothing,
                    adx: config.adx_period,
                },
                model,
            )?),
            AgentKind::Atr => Box::new(AtrAgent::new(config.atr_period, model)?),
            AgentKind::Stoch => Box::new(StochAgent::new(
                config.stoch_period,
                config.stoch_smoothing,
                model,
            )?),
            AgentKind::Adx => Box::new(AdxAgent::new(config.adx_period, model)?),
        };
        Ok(agent)
    }
}
