//! Manifest loading for s3put
//!
//! The manifest is a TOML file describing one upload job: target
//! bucket, destination prefix, metadata rules, file selections, and
//! optionally the access keys to use.

use crate::error::{Error, Result};
use crate::job::{CacheControlRule, ContentTypeRule, FileSelection, UploadJob};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default manifest file name, looked up in the working directory
const DEFAULT_MANIFEST: &str = "s3put.toml";

/// Parsed manifest file
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub job: JobSection,
    #[serde(default, rename = "selection")]
    pub selections: Vec<FileSelection>,
    #[serde(default, rename = "content_type")]
    pub content_type_rules: Vec<ContentTypeRule>,
    #[serde(default, rename = "cache_control")]
    pub cache_control_rules: Vec<CacheControlRule>,
    pub credentials: Option<CredentialsSection>,
}

/// The `[job]` table of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct JobSection {
    #[serde(default)]
    pub bucket: String,
    pub dest: Option<String>,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    #[serde(default)]
    pub public_read: bool,
    #[serde(default)]
    pub reduced_redundancy: bool,
    pub region: Option<String>,
    #[serde(default)]
    pub continue_on_error: bool,
}

/// The optional `[credentials]` table of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsSection {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// Static access keys for the storage service
#[derive(Debug, Clone)]
pub struct AccessKeys {
    pub access_key: String,
    pub secret_key: String,
}

/// Default manifest path
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST)
}

/// Load a manifest from disk
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(Error::ManifestNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::InvalidManifest(format!("Failed to read manifest: {}", e)))?;

    let manifest: Manifest = toml::from_str(&content)
        .map_err(|e| Error::InvalidManifest(format!("Failed to parse manifest: {}", e)))?;

    Ok(manifest)
}

/// Resolve the access keys to use, preferring the manifest's
/// `[credentials]` table and falling back to the standard AWS
/// environment variables. Returns `None` when neither is present, in
/// which case the SDK's default provider chain applies.
pub fn resolve_credentials(manifest: &Manifest) -> Result<Option<AccessKeys>> {
    credentials_from(manifest.credentials.as_ref(), |name| {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    })
}

fn credentials_from(
    section: Option<&CredentialsSection>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Option<AccessKeys>> {
    let access_key = section
        .and_then(|c| c.access_key.clone())
        .or_else(|| env("AWS_ACCESS_KEY_ID"));
    let secret_key = section
        .and_then(|c| c.secret_key.clone())
        .or_else(|| env("AWS_SECRET_ACCESS_KEY"));

    match (access_key, secret_key) {
        (Some(access_key), Some(secret_key)) => Ok(Some(AccessKeys {
            access_key,
            secret_key,
        })),
        (None, None) => Ok(None),
        _ => Err(Error::Config(
            "Incomplete credentials: both access_key and secret_key must be provided".to_string(),
        )),
    }
}

impl Manifest {
    /// Build the upload job from the manifest.
    ///
    /// The cache_control value is integer-checked here, at load time,
    /// so a malformed manifest fails before any network activity.
    pub fn into_job(self) -> Result<UploadJob> {
        let mut job = UploadJob::new(self.job.bucket);
        job.dest = self.job.dest;
        job.content_type = self.job.content_type;
        if let Some(raw) = &self.job.cache_control {
            job.set_cache_control(raw)?;
        }
        job.public_read = self.job.public_read;
        job.reduced_redundancy = self.job.reduced_redundancy;
        job.region = self.job.region;
        job.continue_on_error = self.job.continue_on_error;
        job.selections = self.selections;
        job.content_type_rules = self.content_type_rules;
        job.cache_control_rules = self.cache_control_rules;
        Ok(job)
    }
}
