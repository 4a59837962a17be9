pub mod scaler;
pub mod smartcore_predictor;

pub use scaler::StandardScaler;
pub use smartcore_predictor::LogisticPredictor;
