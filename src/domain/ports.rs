use crate::domain::errors::AgentError;
use crate::domain::market::ohlcv::OhlcvFrame;

/// A trained-on-demand signal generator.
///
/// Scores are in [-1.0, 1.0]:
///   -1.0 = strong sell, 0.0 = neutral, 1.0 = strong buy
pub trait SignalAgent: Send {
    fn name(&self) -> &str;

    fn is_fitted(&self) -> bool;

    /// Compute features on `ohlcv`, label next-bar direction and train the classifier.
    fn fit(&mut self, ohlcv: &OhlcvFrame) -> Result<(), AgentError>;

    /// Score the latest bar of `historical`, fitting on it first if needed.
    fn predict(&mut self, current_price: f64, historical: &OhlcvFrame) -> Result<f64, AgentError>;

    /// Score using the last close of `historical` as the current price.
    fn strategy(&mut self, historical: &OhlcvFrame) -> Result<f64, AgentError> {
        let current_price = historical.last_close().ok_or_else(|| AgentError::InvalidData {
            reason: "historical data has no close prices".to_string(),
        })?;
        self.predict(current_price, historical)
    }
}
