//! Minimal Cloud Storage JSON API client.
//!
//! Vertex AI writes generated videos to a bucket; this client downloads them
//! and checks that the bucket is usable before a run starts.

use crate::VertexAuth;
use lumina_error::{LuminaResult, StorageError, StorageErrorKind};
use reqwest::{Client, StatusCode, Url};
use serde_json::json;
use tracing::{debug, info, instrument};

const STORAGE_API: &str = "https://storage.googleapis.com";

/// Split `gs://bucket/path/to/object` into bucket and object name.
///
/// # Examples
///
/// ```
/// use lumina_models::parse_gcs_uri;
///
/// assert_eq!(
///     parse_gcs_uri("gs://videos/out/clip.mp4"),
///     Some(("videos", "out/clip.mp4"))
/// );
/// assert_eq!(parse_gcs_uri("https://example.org/clip.mp4"), None);
/// ```
pub fn parse_gcs_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("gs://")?;
    let (bucket, object) = rest.split_once('/')?;
    if bucket.is_empty() || object.is_empty() {
        return None;
    }
    Some((bucket, object))
}

/// Bucket name without a `gs://` prefix or trailing slash.
pub(crate) fn bare_bucket(bucket: &str) -> &str {
    bucket
        .trim_start_matches("gs://")
        .trim_end_matches('/')
}

/// Cloud Storage client authenticated through Vertex credentials.
#[derive(Debug, Clone)]
pub struct GcsClient {
    http: Client,
    auth: VertexAuth,
}

impl GcsClient {
    /// Create a client sharing the given credentials.
    pub fn new(http: Client, auth: VertexAuth) -> Self {
        Self { http, auth }
    }

    fn object_url(bucket: &str, object: &str, upload: bool) -> LuminaResult<Url> {
        let invalid = || StorageError::new(StorageErrorKind::InvalidKey(object.to_string()));
        let mut url = Url::parse(STORAGE_API).map_err(|_| invalid())?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| invalid())?;
            segments.pop_if_empty();
            if upload {
                segments.extend(["upload", "storage", "v1", "b", bucket, "o"]);
            } else {
                segments.extend(["storage", "v1", "b", bucket, "o", object]);
            }
        }
        Ok(url)
    }

    /// Download an object addressed by a `gs://` URI.
    #[instrument(skip(self))]
    pub async fn download(&self, uri: &str) -> LuminaResult<Vec<u8>> {
        let (bucket, object) = parse_gcs_uri(uri)
            .ok_or_else(|| StorageError::new(StorageErrorKind::InvalidKey(uri.to_string())))?;
        let mut url = Self::object_url(bucket, object, false)?;
        url.query_pairs_mut().append_pair("alt", "media");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.auth.bearer().await?)
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Read(format!("{}: {}", uri, e))))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::new(StorageErrorKind::ObjectNotFound {
                scope: bucket.to_string(),
                key: object.to_string(),
            })
            .into());
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::new(StorageErrorKind::Read(format!(
                "{}: HTTP {} {}",
                uri, status, body
            )))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Read(format!("{}: {}", uri, e))))?;
        debug!(uri, size = bytes.len(), "Downloaded object");
        Ok(bytes.to_vec())
    }

    /// Whether the bucket exists and is visible to the credentials.
    #[instrument(skip(self))]
    pub async fn bucket_exists(&self, bucket: &str) -> LuminaResult<bool> {
        let url = format!("{}/storage/v1/b/{}", STORAGE_API, bare_bucket(bucket));
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.auth.bearer().await?)
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Unavailable(e.to_string())))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                    "HTTP {} {}",
                    status, body
                )))
                .into())
            }
        }
    }

    /// Create a bucket in the project.
    #[instrument(skip(self))]
    pub async fn create_bucket(
        &self,
        project: &str,
        bucket: &str,
        location: &str,
    ) -> LuminaResult<()> {
        let url = format!("{}/storage/v1/b", STORAGE_API);
        let response = self
            .http
            .post(&url)
            .query(&[("project", project)])
            .bearer_auth(self.auth.bearer().await?)
            .json(&json!({ "name": bare_bucket(bucket), "location": location }))
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::ScopeCreation(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::new(StorageErrorKind::ScopeCreation(format!(
                "HTTP {} {}",
                status, body
            )))
            .into());
        }

        info!(bucket, "Created bucket");
        Ok(())
    }

    /// Write a small object and delete it again.
    #[instrument(skip(self))]
    pub async fn probe_write(&self, bucket: &str) -> LuminaResult<()> {
        let bucket = bare_bucket(bucket);
        let object = "_lumina_validation_test.txt";

        let mut upload = Self::object_url(bucket, object, true)?;
        upload
            .query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", object);

        let response = self
            .http
            .post(upload)
            .bearer_auth(self.auth.bearer().await?)
            .header("Content-Type", "text/plain")
            .body("validation")
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Write(e.to_string())))?;
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Write(format!(
                "HTTP {}",
                response.status()
            )))
            .into());
        }

        let delete = Self::object_url(bucket, object, false)?;
        let response = self
            .http
            .delete(delete)
            .bearer_auth(self.auth.bearer().await?)
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Delete(e.to_string())))?;
        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Delete(format!(
                "HTTP {}",
                response.status()
            )))
            .into());
        }

        Ok(())
    }
}
