//! CSV encoding for candle uploads.
//!
//! No quoting or escaping is performed: exchange price/volume fields are
//! plain decimal strings and never contain the delimiter. Encoding keeps
//! them verbatim rather than re-parsing them as numbers.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};
use crate::models::Candle;

/// Fixed header line of every upload.
pub const HEADER: &str = "date,open,high,low,close,volume";

/// Renders candles as CSV text. Empty input produces the header only.
pub fn to_csv(candles: &[Candle]) -> Result<String> {
    let mut out = String::with_capacity(HEADER.len() + candles.len() * 64);
    out.push_str(HEADER);
    for candle in candles {
        let date = DateTime::<Utc>::from_timestamp_millis(candle.open_time)
            .ok_or_else(|| {
                Error::Fetch(format!("kline open time {} out of range", candle.open_time))
            })?
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        out.push('\n');
        out.push_str(&date);
        for field in [
            &candle.open,
            &candle.high,
            &candle.low,
            &candle.close,
            &candle.volume,
        ] {
            out.push(',');
            out.push_str(field);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open_time: i64) -> Candle {
        Candle {
            open_time,
            open: "100.0".to_string(),
            high: "110.0".to_string(),
            low: "95.0".to_string(),
            close: "105.0".to_string(),
            volume: "1000.0".to_string(),
        }
    }

    #[test]
    fn test_empty_input_is_header_only() {
        assert_eq!(to_csv(&[]).unwrap(), "date,open,high,low,close,volume");
    }

    #[test]
    fn test_epoch_zero_renders_iso_utc() {
        let csv = to_csv(&[candle(0)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(
            lines.next(),
            Some("1970-01-01T00:00:00.000Z,100.0,110.0,95.0,105.0,1000.0")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_multiple_rows_keep_order() {
        let csv = to_csv(&[candle(0), candle(60_000)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("1970-01-01T00:01:00.000Z,"));
    }

    #[test]
    fn test_out_of_range_open_time_fails() {
        assert!(to_csv(&[candle(i64::MAX)]).is_err());
    }
}
