//! Artifact staging: upload a local template or code archive into a bucket
//! so a later stack can reference it.

use crate::awscli::AwsCliError;
use crate::client::AwsClient;
use crate::executor::AwsExecutor;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("local artifact not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to upload '{key}' to bucket '{bucket}'")]
    Upload {
        bucket: String,
        key: String,
        source: AwsCliError,
    },
}

/// Upload `local_path` to `bucket` under `key`, overwriting any existing
/// object. Not retried; the caller aborts its stage on failure.
pub async fn stage_file<E: AwsExecutor>(
    client: &AwsClient<E>,
    local_path: &Path,
    bucket: &str,
    key: &str,
) -> Result<(), UploadError> {
    if !local_path.is_file() {
        return Err(UploadError::MissingFile {
            path: local_path.to_path_buf(),
        });
    }

    tracing::debug!(path = %local_path.display(), bucket, key, "staging artifact");

    client
        .put_object(bucket, key, local_path)
        .await
        .map_err(|e| UploadError::Upload {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            source: e,
        })
}
