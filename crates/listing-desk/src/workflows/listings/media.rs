use std::io::Cursor;
use std::str::FromStr;
use std::time::Duration;

use google_drive3::{api::File, api::Scope, DriveHub};
use tokio::runtime::Runtime;

/// Durable blob storage for listing photos. Keys are unique per upload and
/// the returned URL must stay publicly fetchable for the listing's lifetime.
pub trait MediaStore: Send + Sync {
    fn put(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<String, MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("media upload failed: {0}")]
    Backend(String),
    #[error("media upload timed out after {0:?}")]
    Timeout(Duration),
    #[error("media runtime unavailable: {0}")]
    Runtime(String),
}

/// Thin wrapper around the generated google-drive3 client allowing
/// synchronous workflow code to upload photos without exposing async
/// details.
pub struct DriveMediaStore<C>
where
    C: google_drive3::common::Connector + Send + Sync + 'static,
{
    hub: DriveHub<C>,
    runtime: Runtime,
    folder_id: String,
    timeout: Duration,
}

impl<C> DriveMediaStore<C>
where
    C: google_drive3::common::Connector + Send + Sync + 'static,
{
    pub fn new(
        hub: DriveHub<C>,
        runtime: Runtime,
        folder_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            hub,
            runtime,
            folder_id: folder_id.into(),
            timeout,
        }
    }

    pub fn with_runtime(
        hub: DriveHub<C>,
        folder_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MediaStoreError> {
        let runtime = Runtime::new().map_err(|err| MediaStoreError::Runtime(err.to_string()))?;
        Ok(Self::new(hub, runtime, folder_id, timeout))
    }

    fn map_error<E: std::fmt::Display>(err: E) -> MediaStoreError {
        MediaStoreError::Backend(err.to_string())
    }
}

impl<C> std::fmt::Debug for DriveMediaStore<C>
where
    C: google_drive3::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveMediaStore")
            .field("folder_id", &self.folder_id)
            .finish_non_exhaustive()
    }
}

impl<C> MediaStore for DriveMediaStore<C>
where
    C: google_drive3::common::Connector + Send + Sync + 'static,
{
    fn put(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<String, MediaStoreError> {
        let metadata = File {
            name: Some(key.to_string()),
            parents: Some(vec![self.folder_id.clone()]),
            ..File::default()
        };

        let mime_type = mime::Mime::from_str(content_type)
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let cursor = Cursor::new(bytes.to_vec());

        let result = self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, async {
                self.hub
                    .files()
                    .create(metadata)
                    .param("fields", "id,webContentLink,webViewLink")
                    .supports_all_drives(true)
                    .add_scope(Scope::File)
                    .upload(cursor, mime_type)
                    .await
            })
            .await
        });

        let (_, file) = result
            .map_err(|_| MediaStoreError::Timeout(self.timeout))?
            .map_err(DriveMediaStore::<C>::map_error)?;
        file.web_content_link
            .or(file.web_view_link)
            .or_else(|| {
                file.id
                    .map(|id| format!("https://drive.google.com/uc?id={id}"))
            })
            .ok_or_else(|| {
                MediaStoreError::Backend("upload returned no retrievable link".to_string())
            })
    }
}
