//! Object store uploads.

use aws_sdk_s3::primitives::ByteStream;
use shared::{Error, Result};
use tracing::info;

/// Writes the CSV blob to `bucket/key` (create-or-overwrite) and returns
/// the canonical `s3://` address. Concurrent writers to the same key race
/// on last-write-wins at the store.
pub async fn upload_csv(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    body: String,
) -> Result<String> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body.into_bytes()))
        .content_type("text/csv")
        .send()
        .await
        .map_err(|e| Error::Upload(e.to_string()))?;

    let location = format!("s3://{bucket}/{key}");
    info!("Uploaded CSV to {}", location);
    Ok(location)
}
