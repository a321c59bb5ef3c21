//! Partition key derivation for the object store layout.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{Interval, Level, Symbol};

/// Hive-style partition coordinates for one upload. Recomputed per
/// request; nothing here is persisted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    pub level: Level,
    pub partition_type: &'static str,
    pub value: String,
}

impl PartitionKey {
    /// Full object key under the bucket:
    /// `crypto/level=<level>/symbol=<lowercased>/<type>=<value>/<SYMBOL>.csv`
    pub fn object_key(&self, symbol: Symbol) -> String {
        format!(
            "crypto/level={}/symbol={}/{}={}/{}.csv",
            self.level,
            symbol.as_str().to_lowercase(),
            self.partition_type,
            self.value,
            symbol
        )
    }
}

/// Maps an interval and reference time to partition coordinates.
///
/// 1m klines land in a daily partition keyed by date, 1h in a weekly
/// partition keyed by week-of-month, 1d in a monthly partition. The week
/// index counts calendar rows of a Sunday-first month grid: day 1 of a
/// month starting on Sunday is week 1, day 8 is week 2.
pub fn derive(interval: Interval, reference: NaiveDateTime) -> PartitionKey {
    let date = reference.date();
    let level = interval.level();
    let value = match interval {
        Interval::OneMinute => date.format("%Y-%m-%d").to_string(),
        Interval::OneHour => {
            // day 1 exists in every month
            let first = date.with_day(1).unwrap_or(date);
            let offset = first.weekday().num_days_from_sunday();
            let week_index = (date.day() + offset - 1) / 7 + 1;
            format!("{:04}-{:02}-{}", date.year(), date.month(), week_index)
        }
        Interval::OneDay => date.format("%Y-%m").to_string(),
    };
    PartitionKey {
        level,
        partition_type: level.partition_type(),
        value,
    }
}
