//! SQL builders for the three fixed analytics queries.
//!
//! Table names come only from the [`Level`] allow-list and the symbol is
//! bound as an execution parameter, so no request-supplied text ever
//! reaches the query string.

use crate::models::{Level, Symbol};

/// A query string plus its positional execution parameters, ready to be
/// submitted to the query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub sql: String,
    pub parameters: Vec<String>,
}

fn table(level: Level) -> String {
    format!("crypto_level_{level}")
}

/// Athena string parameters are substituted literally, quotes included.
fn bound(symbol: Symbol) -> Vec<String> {
    vec![format!("'{}'", symbol.as_str())]
}

/// Single row holding the date with the highest high.
pub fn highest_price(level: Level, symbol: Symbol) -> AnalyticsQuery {
    AnalyticsQuery {
        sql: format!(
            "SELECT date, high FROM {} WHERE symbol = ? \
             ORDER BY CAST(high AS DOUBLE) DESC LIMIT 1",
            table(level)
        ),
        parameters: bound(symbol),
    }
}

/// Top five dates by traded volume.
pub fn top_volume(level: Level, symbol: Symbol) -> AnalyticsQuery {
    AnalyticsQuery {
        sql: format!(
            "SELECT date, volume FROM {} WHERE symbol = ? \
             ORDER BY CAST(volume AS DOUBLE) DESC LIMIT 5",
            table(level)
        ),
        parameters: bound(symbol),
    }
}

/// Top five dates by high-low spread.
pub fn top_volatility(level: Level, symbol: Symbol) -> AnalyticsQuery {
    AnalyticsQuery {
        sql: format!(
            "SELECT date, CAST(high AS DOUBLE) - CAST(low AS DOUBLE) AS volatility \
             FROM {} WHERE symbol = ? ORDER BY volatility DESC LIMIT 5",
            table(level)
        ),
        parameters: bound(symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_price_weekly() {
        let query = highest_price(Level::Weekly, Symbol::BTCUSDT);
        assert!(query.sql.contains("FROM crypto_level_weekly"));
        assert!(query.sql.contains("WHERE symbol = ?"));
        assert!(query.sql.contains("ORDER BY CAST(high AS DOUBLE) DESC"));
        assert!(query.sql.ends_with("LIMIT 1"));
        assert_eq!(query.parameters, vec!["'BTCUSDT'".to_string()]);
    }

    #[test]
    fn test_top_volume_limit_five() {
        let query = top_volume(Level::Monthly, Symbol::ETHUSDT);
        assert!(query.sql.contains("FROM crypto_level_monthly"));
        assert!(query.sql.contains("CAST(volume AS DOUBLE)"));
        assert!(query.sql.ends_with("LIMIT 5"));
        assert_eq!(query.parameters, vec!["'ETHUSDT'".to_string()]);
    }

    #[test]
    fn test_top_volatility_spread() {
        let query = top_volatility(Level::Daily, Symbol::DOGEUSDT);
        assert!(query
            .sql
            .contains("CAST(high AS DOUBLE) - CAST(low AS DOUBLE) AS volatility"));
        assert!(query.sql.contains("ORDER BY volatility DESC"));
        assert_eq!(query.parameters, vec!["'DOGEUSDT'".to_string()]);
    }

    #[test]
    fn test_no_raw_symbol_interpolation() {
        let query = highest_price(Level::Weekly, Symbol::BTCUSDT);
        assert!(!query.sql.contains("BTCUSDT"));
    }
}
