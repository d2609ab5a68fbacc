//! S3-compatible object store (MinIO, R2, AWS).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use derive_builder::Builder as DeriveBuilder;
use derive_getters::Getters;
use lumina_error::{LuminaResult, StorageError, StorageErrorKind};
use lumina_interface::ObjectStore;
use tracing::{debug, info, instrument};

/// Maximum keys accepted by one `DeleteObjects` call.
const DELETE_BATCH: usize = 1000;

/// Continuation token for the next listing page, `None` after the last one.
///
/// A truncated page without a token is an error; retrying without one would
/// fetch the first page again.
fn next_page(
    scope: &str,
    truncated: Option<bool>,
    token: Option<&str>,
) -> LuminaResult<Option<String>> {
    match (truncated, token) {
        (Some(true), Some(token)) => Ok(Some(token.to_string())),
        (Some(true), None) => Err(StorageError::new(StorageErrorKind::List(format!(
            "{}: truncated listing without a continuation token",
            scope
        )))
        .into()),
        _ => Ok(None),
    }
}

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Getters, DeriveBuilder)]
#[builder(setter(into))]
pub struct S3StoreConfig {
    /// Endpoint URL, e.g. `http://minio:9000`
    endpoint: String,
    /// Access key id
    access_key: String,
    /// Secret access key
    secret_key: String,
    /// Signing region
    #[builder(default = "\"us-east-1\".to_string()")]
    region: String,
}

impl S3StoreConfig {
    /// Creates a new builder for `S3StoreConfig`.
    pub fn builder() -> S3StoreConfigBuilder {
        S3StoreConfigBuilder::default()
    }
}

/// Object store backed by S3 buckets; each scope is a bucket.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Create a store for the configured endpoint using path-style addressing.
    pub fn new(config: &S3StoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key(),
            config.secret_key(),
            None,
            None,
            "lumina",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint())
            .region(Region::new(config.region().clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        info!(endpoint = %config.endpoint(), "Created S3 object store");
        Self {
            client: Client::from_conf(sdk_config),
        }
    }

    async fn bucket_exists(&self, scope: &str) -> LuminaResult<bool> {
        match self.client.head_bucket().bucket(scope).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                "{}: {}",
                scope,
                DisplayErrorContext(&e)
            )))
            .into()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn backend_name(&self) -> &'static str {
        "s3"
    }

    #[instrument(skip(self))]
    async fn ensure_scope(&self, scope: &str) -> LuminaResult<()> {
        if self.bucket_exists(scope).await? {
            debug!(bucket = scope, "Bucket already exists");
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(scope)
            .send()
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::ScopeCreation(format!(
                    "{}: {}",
                    scope,
                    DisplayErrorContext(&e)
                )))
            })?;

        info!(bucket = scope, "Created bucket");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, scope: &str) -> LuminaResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self.client.list_objects_v2().bucket(scope);
            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                let missing = e
                    .as_service_error()
                    .is_some_and(|se| se.code() == Some("NoSuchBucket"));
                if missing {
                    StorageError::new(StorageErrorKind::ScopeNotFound(scope.to_string()))
                } else {
                    StorageError::new(StorageErrorKind::List(format!(
                        "{}: {}",
                        scope,
                        DisplayErrorContext(&e)
                    )))
                }
            })?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match next_page(
                scope,
                response.is_truncated(),
                response.next_continuation_token(),
            )? {
                Some(token) => continuation_token = Some(token),
                None => break,
            }
        }

        debug!(bucket = scope, count = keys.len(), "Listed bucket");
        Ok(keys)
    }

    #[instrument(skip(self))]
    async fn get(&self, scope: &str, key: &str) -> LuminaResult<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(scope)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StorageError::new(StorageErrorKind::ObjectNotFound {
                        scope: scope.to_string(),
                        key: key.to_string(),
                    })
                } else {
                    StorageError::new(StorageErrorKind::Read(format!(
                        "{}/{}: {}",
                        scope,
                        key,
                        DisplayErrorContext(&e)
                    )))
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Read(format!("{}/{}: {}", scope, key, e)))
            })?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn put(
        &self,
        scope: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> LuminaResult<()> {
        self.client
            .put_object()
            .bucket(scope)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Write(format!(
                    "{}/{}: {}",
                    scope,
                    key,
                    DisplayErrorContext(&e)
                )))
            })?;

        debug!(bucket = scope, key, "Stored object");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn wipe(&self, scope: &str) -> LuminaResult<usize> {
        let keys = self.list(scope).await?;

        for batch in keys.chunks(DELETE_BATCH) {
            let objects = batch
                .iter()
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StorageError::new(StorageErrorKind::Delete(e.to_string())))?;

            let delete = Delete::builder()
                .set_objects(Some(objects))
                .quiet(true)
                .build()
                .map_err(|e| StorageError::new(StorageErrorKind::Delete(e.to_string())))?;

            self.client
                .delete_objects()
                .bucket(scope)
                .delete(delete)
                .send()
                .await
                .map_err(|e| {
                    StorageError::new(StorageErrorKind::Delete(format!(
                        "{}: {}",
                        scope,
                        DisplayErrorContext(&e)
                    )))
                })?;
        }

        info!(bucket = scope, removed = keys.len(), "Wiped bucket");
        Ok(keys.len())
    }
}
