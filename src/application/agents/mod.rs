// Signal agents: indicator features + logistic classifier
pub mod adx;
pub mod agent_factory;
pub mod atr;
pub mod pipeline;
pub mod sarext;
pub mod stoch;
pub mod volatility_momentum;

pub use adx::AdxAgent;
pub use agent_factory::AgentFactory;
pub use atr::AtrAgent;
pub use pipeline::{ClassifierPipeline, FeatureAgent, ModelConfig};
pub use sarext::SarExtAgent;
pub use stoch::StochAgent;
pub use volatility_momentum::{VolatilityMomentumAgent, VolatilityMomentumPeriods};
