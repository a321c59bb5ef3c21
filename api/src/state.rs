use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use shared::Config;

/// Clients shared by all request handlers. Everything here is cheaply
/// cloneable; concurrent requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub s3: aws_sdk_s3::Client,
    pub athena: aws_sdk_athena::Client,
    pub http: reqwest::Client,
}

impl AppState {
    pub async fn new(config: Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "environment",
        );
        let aws = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            s3: aws_sdk_s3::Client::new(&aws),
            athena: aws_sdk_athena::Client::new(&aws),
            http: reqwest::Client::new(),
            config,
        }
    }
}
