//! Object storage client built on the AWS S3 SDK

use crate::config::AccessKeys;
use crate::error::Result;
use crate::job::{AccessControl, ResolvedUpload, StorageTier};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::{Credentials, SharedCredentialsProvider},
    primitives::ByteStream,
    types::{ObjectCannedAcl, StorageClass},
    Client,
};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Upload seam consumed by the task runner.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload one local file under its resolved key and metadata.
    async fn put_object(&self, bucket: &str, upload: &ResolvedUpload) -> Result<()>;
}

/// S3 client wrapper
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Create a client.
    ///
    /// Static access keys override the SDK's default provider chain
    /// when given. The endpoint, when given, is a hostname from the
    /// region table or a verbatim region string.
    pub async fn new(keys: Option<AccessKeys>, endpoint: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("us-east-1"));

        if let Some(keys) = keys {
            let credentials =
                Credentials::new(keys.access_key, keys.secret_key, None, None, "s3put");
            loader = loader.credentials_provider(SharedCredentialsProvider::new(credentials));
        }

        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(ensure_scheme(endpoint));
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

/// The endpoint table stores bare hostnames; the SDK wants a URL.
fn ensure_scheme(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(&self, bucket: &str, upload: &ResolvedUpload) -> Result<()> {
        let mut file = File::open(&upload.local_path).await?;
        let len = file.metadata().await?.len() as usize;
        let mut body = Vec::with_capacity(len);
        file.read_to_end(&mut body).await?;
        drop(file);

        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(&upload.key)
            .body(ByteStream::from(body))
            .set_content_type(upload.content_type.clone())
            .set_cache_control(upload.cache_control.clone());

        if upload.access_control == AccessControl::PublicRead {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }
        if upload.storage_tier == StorageTier::ReducedRedundancy {
            request = request.storage_class(StorageClass::ReducedRedundancy);
        }

        request.send().await?;

        Ok(())
    }
}
