use async_trait::async_trait;

use content_studio_core::ingest::{AssetIngestor, IngestError};
use content_studio_core::page::{AssetKind, FileUpload};

use crate::api::ApiClient;

/// [`AssetIngestor`] backed by the backend's upload and fetch-and-localize
/// endpoints. The editing session has already validated the file by the
/// time either method runs.
#[derive(Debug, Clone)]
pub struct HttpIngestor {
    api: ApiClient,
}

impl HttpIngestor {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AssetIngestor for HttpIngestor {
    async fn upload(
        &self,
        kind: AssetKind,
        subfolder: &str,
        file: FileUpload,
    ) -> Result<String, IngestError> {
        tracing::debug!(%kind, subfolder, file = %file.file_name, "uploading asset");
        self.api.upload(kind, subfolder, file).await
    }

    async fn localize_url(
        &self,
        kind: AssetKind,
        subfolder: &str,
        url: &str,
    ) -> Result<String, IngestError> {
        tracing::debug!(%kind, subfolder, url, "localizing external asset");
        self.api.download_from_url(kind, subfolder, url).await
    }
}
