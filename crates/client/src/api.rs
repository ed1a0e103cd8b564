//! Thin typed client over the backend's REST endpoints.
//!
//! All request construction and status handling lives here; callers get
//! domain values and the error taxonomy, never raw responses.

use std::sync::Arc;

use reqwest::multipart;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use content_studio_core::ingest::IngestError;
use content_studio_core::page::{AssetKind, FileUpload};
use content_studio_core::wire::PageWire;

use crate::config::{ClientConfig, ConfigError};
use crate::error::PersistError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base: config.base_url.clone(),
            }),
        })
    }

    /// `GET /page-content/{slug}`; a 404 is a normal "no such page yet".
    pub async fn page_by_slug(&self, slug: &str) -> Result<Option<Value>, PersistError> {
        let url = self.endpoint(&["page-content", slug]);
        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PersistError::LoadFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(PersistError::LoadFailed(error_message(response).await));
        }
        let raw = response
            .json::<Value>()
            .await
            .map_err(|e| PersistError::LoadFailed(e.to_string()))?;
        Ok(Some(raw))
    }

    /// `POST /page-content` — first save of a page with no backend id yet.
    pub async fn create_page(&self, body: &PageWire) -> Result<(), PersistError> {
        let url = self.endpoint(&["page-content"]);
        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| PersistError::SaveFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PersistError::SaveFailed(error_message(response).await));
        }
        Ok(())
    }

    /// `PUT /page-content/{id}` — update of an already-persisted page.
    pub async fn update_page(&self, id: i64, body: &PageWire) -> Result<(), PersistError> {
        let url = self.endpoint(&["page-content", &id.to_string()]);
        let response = self
            .inner
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| PersistError::SaveFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PersistError::SaveFailed(error_message(response).await));
        }
        Ok(())
    }

    /// `DELETE /page-content/{id}`.
    pub async fn delete_page(&self, id: i64) -> Result<(), PersistError> {
        let url = self.endpoint(&["page-content", &id.to_string()]);
        let response = self
            .inner
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| PersistError::DeleteFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PersistError::DeleteFailed(error_message(response).await));
        }
        Ok(())
    }

    /// `POST /upload/{kind}[/{subfolder}]` — multipart upload of one file;
    /// the response carries the hosted path under `<kind>Url`.
    pub async fn upload(
        &self,
        kind: AssetKind,
        subfolder: &str,
        file: FileUpload,
    ) -> Result<String, IngestError> {
        let mut segments = vec!["upload", kind.field_name()];
        if !subfolder.is_empty() {
            segments.push(subfolder);
        }
        let url = self.endpoint(&segments);

        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| IngestError::UploadFailed(e.to_string()))?;
        let form = multipart::Form::new().part(kind.field_name(), part);

        let response = self
            .inner
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| IngestError::UploadFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IngestError::UploadFailed(error_message(response).await));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| IngestError::UploadFailed(e.to_string()))?;
        hosted_path(&body, kind).ok_or_else(|| {
            IngestError::UploadFailed(format!("response is missing {}", kind.url_key()))
        })
    }

    /// `POST /download-{kind}-from-url/{subfolder}` — ask the backend to
    /// fetch an external URL and host a local copy.
    pub async fn download_from_url(
        &self,
        kind: AssetKind,
        subfolder: &str,
        remote_url: &str,
    ) -> Result<String, IngestError> {
        let mut segments = vec![kind.download_endpoint()];
        if !subfolder.is_empty() {
            segments.push(subfolder);
        }
        let url = self.endpoint(&segments);

        let response = self
            .inner
            .http
            .post(url)
            .json(&serde_json::json!({ "url": remote_url }))
            .send()
            .await
            .map_err(|e| IngestError::UrlIngestionFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IngestError::UrlIngestionFailed(
                error_message(response).await,
            ));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| IngestError::UrlIngestionFailed(e.to_string()))?;
        hosted_path(&body, kind).ok_or_else(|| {
            IngestError::UrlIngestionFailed(format!("response is missing {}", kind.url_key()))
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn hosted_path(body: &Value, kind: AssetKind) -> Option<String> {
    body.get(kind.url_key())
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Non-2xx bodies carry `{ "error": "..." }`; fall back to the status line.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("backend returned {status}")),
        Err(_) => format!("backend returned {status}"),
    }
}
