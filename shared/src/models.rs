//! Domain types: symbols, intervals, partition levels, and candles.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Trading pairs the service accepts. Tokens round-trip verbatim as the
/// exchange spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    BTCUSDT,
    ETHUSDT,
    DOGEUSDT,
}

impl Symbol {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BTCUSDT => "BTCUSDT",
            Self::ETHUSDT => "ETHUSDT",
            Self::DOGEUSDT => "DOGEUSDT",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BTCUSDT" => Ok(Self::BTCUSDT),
            "ETHUSDT" => Ok(Self::ETHUSDT),
            "DOGEUSDT" => Ok(Self::DOGEUSDT),
            other => Err(Error::Validation(format!("unknown symbol '{other}'"))),
        }
    }
}

/// Kline granularity requested from the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
        }
    }

    /// The storage aggregation level candles of this granularity land in.
    pub const fn level(&self) -> Level {
        match self {
            Self::OneMinute => Level::Daily,
            Self::OneHour => Level::Weekly,
            Self::OneDay => Level::Monthly,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1m" => Ok(Self::OneMinute),
            "1h" => Ok(Self::OneHour),
            "1d" => Ok(Self::OneDay),
            other => Err(Error::UnsupportedInterval(other.to_string())),
        }
    }
}

/// Storage aggregation level. Doubles as the allow-list for the analytics
/// table names, so nothing outside this set ever reaches a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Daily,
    Weekly,
    Monthly,
}

impl Level {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Partition directory name for this level.
    pub const fn partition_type(&self) -> &'static str {
        match self {
            Self::Daily => "date",
            Self::Weekly => "week",
            Self::Monthly => "month",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(Error::Validation(format!("unknown partition level '{other}'"))),
        }
    }
}

/// One OHLCV kline. Price and volume fields stay verbatim as the exchange
/// returned them; the service never re-parses them as numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time in epoch milliseconds.
    pub open_time: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl Candle {
    /// Build a candle from a raw exchange kline row. Only the first six
    /// fields are consumed; the trailing fields are ignored.
    pub fn from_row(row: &[Value]) -> Result<Self> {
        let open_time = row
            .first()
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::Fetch("kline row missing open time".to_string()))?;
        let field = |index: usize, name: &str| -> Result<String> {
            row.get(index)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| Error::Fetch(format!("kline row missing {name} field")))
        };
        Ok(Self {
            open_time,
            open: field(1, "open")?,
            high: field(2, "high")?,
            low: field(3, "low")?,
            close: field(4, "close")?,
            volume: field(5, "volume")?,
        })
    }
}

/// Inbound body of `POST /data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    pub symbol: Symbol,
    /// Reference time; calendar fields drive partitioning, and the epoch
    /// milliseconds (naive time read as UTC) bound the exchange query.
    pub time: NaiveDateTime,
    pub interval: Interval,
    pub limit: u32,
}

impl FetchRequest {
    /// Exchange-side cap on rows per klines request.
    pub const MAX_LIMIT: u32 = 1000;

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > Self::MAX_LIMIT {
            return Err(Error::Validation(format!(
                "limit must be between 1 and {}, got {}",
                Self::MAX_LIMIT,
                self.limit
            )));
        }
        Ok(())
    }

    /// End-time bound for the exchange query, in epoch milliseconds.
    pub fn end_time_millis(&self) -> i64 {
        self.time.and_utc().timestamp_millis()
    }
}
