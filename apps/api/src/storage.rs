//! Object storage client — uploads CV files and computes their public
//! retrieval URLs. Backed by S3-compatible storage (MinIO locally, AWS in
//! production).

use aws_config::Region;
use aws_sdk_s3::{config::Credentials, error::SdkError, primitives::ByteStream, Client};
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("an object already exists at '{key}'")]
    Conflict { key: String },

    #[error("storage request failed: {0}")]
    Service(String),
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
pub async fn build_client(config: &Config) -> Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "cvscope-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    Client::new(&s3_config)
}

/// Storage key for an uploaded CV, derived from its original file name.
pub fn object_key(file_name: &str) -> String {
    format!("cvs/{file_name}")
}

/// Public retrieval URL for a stored object.
pub fn public_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{}/object/public/{bucket}/{path}", base.trim_end_matches('/'))
}

/// Uploads a CV under a fixed non-overwrite policy: the key must not exist
/// yet, and a second upload of the same file name fails with `Conflict`.
/// The existence check and the put are two requests; concurrent uploads of
/// the same key can race (accepted — overlapping operations are never
/// serialized).
pub async fn upload(
    s3: &Client,
    bucket: &str,
    key: &str,
    bytes: Bytes,
    content_type: &str,
) -> Result<(), StorageError> {
    match s3.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => {
            return Err(StorageError::Conflict {
                key: key.to_string(),
            })
        }
        Err(SdkError::ServiceError(err)) if err.err().is_not_found() => {}
        Err(e) => return Err(StorageError::Service(e.to_string())),
    }

    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(bytes))
        .content_type(content_type)
        .cache_control("max-age=3600")
        .send()
        .await
        .map_err(|e| StorageError::Service(e.to_string()))?;

    info!("Uploaded CV to s3://{bucket}/{key}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_is_derived_from_file_name() {
        assert_eq!(object_key("resume.pdf"), "cvs/resume.pdf");
    }

    #[test]
    fn test_public_url_joins_base_bucket_and_path() {
        assert_eq!(
            public_url("https://storage.example.com", "cv-uploads", "cvs/resume.pdf"),
            "https://storage.example.com/object/public/cv-uploads/cvs/resume.pdf"
        );
    }

    #[test]
    fn test_public_url_tolerates_trailing_slash_on_base() {
        assert_eq!(
            public_url("https://storage.example.com/", "cv-uploads", "cvs/resume.pdf"),
            "https://storage.example.com/object/public/cv-uploads/cvs/resume.pdf"
        );
    }
}
