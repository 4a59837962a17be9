pub mod csv_loader;
pub mod observability;

pub use csv_loader::{load_ohlcv_csv, read_ohlcv};
pub use observability::init_logging;
