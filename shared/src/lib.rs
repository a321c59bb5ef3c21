pub mod config;
pub mod csv;
pub mod error;
pub mod models;
pub mod partition;
pub mod query;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{Candle, FetchRequest, Interval, Level, Symbol};
pub use partition::PartitionKey;
pub use query::AnalyticsQuery;
