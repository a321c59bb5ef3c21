use dotenv::dotenv;

use crate::error::{Error, Result};

/// Process-wide configuration, read once at startup and passed by
/// reference to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_region: String,
    pub bucket: String,
    pub athena_database: String,
    pub athena_output_location: String,
    pub binance_base_url: String,
    pub bind_addr: String,
}

impl Config {
    /// Reads configuration from the environment (and `.env` if present).
    /// Missing credentials or bucket name fail here, before the server
    /// binds its listener.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let bucket = required("AWS_BUCKET_NAME")?;
        Ok(Config {
            aws_access_key_id: required("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            aws_region: std::env::var("AWS_REGION")
                .unwrap_or_else(|_| "ap-southeast-2".to_string()),
            athena_database: std::env::var("ATHENA_DATABASE")
                .unwrap_or_else(|_| "crypto_db".to_string()),
            athena_output_location: std::env::var("ATHENA_OUTPUT_LOCATION")
                .unwrap_or_else(|_| format!("s3://{bucket}/query-result/")),
            binance_base_url: std::env::var("BINANCE_BASE_URL")
                .unwrap_or_else(|_| "https://api.binance.com".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9999".to_string()),
            bucket,
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("missing required environment variable {name}")))
}
