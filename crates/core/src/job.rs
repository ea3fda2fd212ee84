//! Upload job model and per-file metadata resolution

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Canned access control applied to uploaded objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessControl {
    #[default]
    Private,
    PublicRead,
}

impl AccessControl {
    pub fn as_str(&self) -> &str {
        match self {
            AccessControl::Private => "private",
            AccessControl::PublicRead => "public-read",
        }
    }
}

/// Storage tier for uploaded objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageTier {
    #[default]
    Standard,
    ReducedRedundancy,
}

impl StorageTier {
    pub fn as_str(&self) -> &str {
        match self {
            StorageTier::Standard => "standard",
            StorageTier::ReducedRedundancy => "reduced-redundancy",
        }
    }
}

/// A base directory plus include/exclude glob patterns.
///
/// An empty include list selects every file under the directory.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSelection {
    pub dir: PathBuf,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Filename-suffix rule assigning a Content-Type.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentTypeRule {
    pub ext: String,
    pub value: String,
}

/// Filename-suffix rule assigning a Cache-Control max-age.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheControlRule {
    pub ext: String,
    pub max_age: u64,
}

/// One upload task invocation.
///
/// Constructed once from the manifest and not mutated during execution.
/// Rule lists keep their declaration order; the first matching rule wins
/// and reordering them changes behavior.
#[derive(Debug, Clone, Default)]
pub struct UploadJob {
    /// Target bucket, to which files should be uploaded.
    pub bucket: String,
    /// Destination prefix prepended to every object key.
    pub dest: Option<String>,
    /// Content-Type applied when no rule matches.
    pub content_type: Option<String>,
    /// Whether every uploaded object is made publicly readable.
    pub public_read: bool,
    /// Whether to use reduced redundancy storage.
    pub reduced_redundancy: bool,
    /// Region code or verbatim endpoint, see [`crate::endpoint::resolve_endpoint`].
    pub region: Option<String>,
    /// Keep going after a failed upload instead of aborting the job.
    pub continue_on_error: bool,
    pub selections: Vec<FileSelection>,
    pub content_type_rules: Vec<ContentTypeRule>,
    pub cache_control_rules: Vec<CacheControlRule>,
    cache_control: Option<u64>,
}

impl UploadJob {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    /// Set the global Cache-Control max-age in seconds.
    ///
    /// Fails immediately when the value does not parse as a
    /// non-negative integer, before any upload is attempted.
    pub fn set_cache_control(&mut self, raw: &str) -> Result<()> {
        let secs: u64 = raw.trim().parse().map_err(|_| {
            Error::Config(format!(
                "cache_control must be a non-negative integer of seconds, got '{}'",
                raw
            ))
        })?;
        self.cache_control = Some(secs);
        Ok(())
    }

    /// Global Cache-Control max-age, if one was set.
    pub fn cache_control(&self) -> Option<u64> {
        self.cache_control
    }

    /// Check the job is runnable. Only the bucket is validated; other
    /// fields are deliberately left unchecked.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(Error::Config(
                "Target bucket not given. Cannot upload".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the destination key and metadata for one file.
    ///
    /// `relative` is the `/`-separated path of the file below the
    /// selection's base directory. Rules are scanned in declaration
    /// order against the file name; the job-level global value applies
    /// only when no rule matched.
    pub fn resolve_upload(&self, prefix: &str, base_dir: &Path, relative: &str) -> ResolvedUpload {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);

        let mut content_type = None;
        for rule in &self.content_type_rules {
            if file_name.ends_with(&rule.ext) {
                content_type = Some(rule.value.clone());
                break;
            }
        }
        if content_type.is_none() {
            content_type = self.content_type.clone();
        }

        let mut cache_control = None;
        for rule in &self.cache_control_rules {
            if file_name.ends_with(&rule.ext) {
                cache_control = Some(format!("max-age={}", rule.max_age));
                break;
            }
        }
        if cache_control.is_none() {
            cache_control = self.cache_control.map(|secs| format!("max-age={}", secs));
        }

        ResolvedUpload {
            key: format!("{}{}", prefix, relative),
            local_path: base_dir.join(relative),
            content_type,
            cache_control,
            access_control: if self.public_read {
                AccessControl::PublicRead
            } else {
                AccessControl::Private
            },
            storage_tier: if self.reduced_redundancy {
                StorageTier::ReducedRedundancy
            } else {
                StorageTier::Standard
            },
        }
    }
}

/// Per-file upload record, built transiently and handed straight to the
/// storage client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpload {
    pub key: String,
    pub local_path: PathBuf,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub access_control: AccessControl,
    pub storage_tier: StorageTier,
}

/// Normalize the destination prefix: trimmed, no leading slash, exactly
/// one trailing slash when non-empty.
pub fn normalize_dest_prefix(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let mut path = raw.trim().to_string();
    if let Some(stripped) = path.strip_prefix('/') {
        path = stripped.to_string();
    }
    if !path.is_empty() && !path.ends_with('/') {
        path.push('/');
    }
    path
}
