//! End-to-end tests for the pure upload pipeline: derive a partition,
//! encode candles, and build the matching analytics query.

use shared::{csv, partition, query, Candle, Interval, Level, Symbol};

fn reference(year: i32, month: u32, day: u32) -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[test]
fn test_daily_upload_pipeline() {
    let candles = vec![Candle {
        open_time: 1_718_409_600_000,
        open: "65000.00".to_string(),
        high: "66000.00".to_string(),
        low: "64000.00".to_string(),
        close: "65500.00".to_string(),
        volume: "1234.56".to_string(),
    }];

    let body = csv::to_csv(&candles).unwrap();
    assert!(body.starts_with("date,open,high,low,close,volume\n2024-06-15T00:00:00.000Z,"));

    let key = partition::derive(Interval::OneMinute, reference(2024, 6, 15));
    assert_eq!(
        key.object_key(Symbol::BTCUSDT),
        "crypto/level=daily/symbol=btcusdt/date=2024-06-15/BTCUSDT.csv"
    );
}

#[test]
fn test_each_interval_has_one_partition_level() {
    let time = reference(2024, 6, 15);
    let expected = [
        (Interval::OneMinute, Level::Daily, "date"),
        (Interval::OneHour, Level::Weekly, "week"),
        (Interval::OneDay, Level::Monthly, "month"),
    ];
    for (interval, level, partition_type) in expected {
        let key = partition::derive(interval, time);
        assert_eq!(key.level, level);
        assert_eq!(key.partition_type, partition_type);
    }
}

#[test]
fn test_analytics_query_matches_partition_table() {
    let level = partition::derive(Interval::OneHour, reference(2024, 6, 15)).level;
    let query = query::highest_price(level, Symbol::BTCUSDT);
    assert!(query.sql.contains("crypto_level_weekly"));
}
