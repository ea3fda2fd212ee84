//! Upload task orchestration
//!
//! Expands the job's file selections in declaration order, resolves the
//! destination key and metadata for each file, and drives the storage
//! client one file at a time.

use crate::client::ObjectStore;
use crate::error::Result;
use crate::job::{normalize_dest_prefix, FileSelection, ResolvedUpload, UploadJob};
use crate::selection;
use tracing::{error, info};

/// Run the upload job against the given store.
///
/// A selection whose base directory cannot be scanned is logged and
/// skipped; the job continues with the remaining selections. A failed
/// upload aborts the job and leaves later files unprocessed, unless the
/// job opts into `continue_on_error`.
pub async fn run(job: &UploadJob, store: &dyn ObjectStore) -> Result<()> {
    job.validate()?;

    let prefix = normalize_dest_prefix(job.dest.as_deref());

    for sel in &job.selections {
        let uploads = match resolve_selection(job, &prefix, sel) {
            Ok(uploads) => uploads,
            Err(e) => {
                error!("Could not upload file(s) from {}", sel.dir.display());
                error!("{}", e);
                continue;
            }
        };

        if uploads.is_empty() {
            continue;
        }
        info!(
            "Uploading {} file(s) from {}",
            uploads.len(),
            sel.dir.display()
        );

        for upload in uploads {
            match store.put_object(&job.bucket, &upload).await {
                Ok(()) => {
                    info!(
                        "File: {} copied to bucket: {} destination: {}",
                        upload.local_path.display(),
                        job.bucket,
                        upload.key
                    );
                }
                Err(e) if job.continue_on_error => {
                    error!("Upload of {} failed: {}", upload.local_path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(())
}

/// Resolve every upload the job would perform, without any network
/// activity. Unscannable selections are logged and skipped, as in
/// [`run`].
pub fn plan(job: &UploadJob) -> Result<Vec<ResolvedUpload>> {
    job.validate()?;

    let prefix = normalize_dest_prefix(job.dest.as_deref());

    let mut uploads = Vec::new();
    for sel in &job.selections {
        match resolve_selection(job, &prefix, sel) {
            Ok(resolved) => uploads.extend(resolved),
            Err(e) => {
                error!("Could not expand selection {}", sel.dir.display());
                error!("{}", e);
            }
        }
    }
    Ok(uploads)
}

fn resolve_selection(
    job: &UploadJob,
    prefix: &str,
    sel: &FileSelection,
) -> Result<Vec<ResolvedUpload>> {
    let files = selection::expand(sel)?;
    Ok(files
        .iter()
        .map(|relative| job.resolve_upload(prefix, &sel.dir, relative))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::job::{CacheControlRule, ContentTypeRule};
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<(String, ResolvedUpload)>>,
        fail: bool,
    }

    impl RecordingStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn keys(&self) -> BTreeSet<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, u)| u.key.clone())
                .collect()
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn put_object(&self, bucket: &str, upload: &ResolvedUpload) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((bucket.to_string(), upload.clone()));
            if self.fail {
                Err(Error::Transport("injected failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn build_tree(dir: &Path) {
        fs::create_dir_all(dir.join("css")).unwrap();
        fs::create_dir_all(dir.join("js")).unwrap();
        fs::write(dir.join("css/app.css"), "body {}").unwrap();
        fs::write(dir.join("js/app.js"), "let x;").unwrap();
    }

    fn job_for(dir: &Path) -> UploadJob {
        let mut job = UploadJob::new("assets");
        job.dest = Some("v1".to_string());
        job.selections = vec![FileSelection {
            dir: dir.to_path_buf(),
            include: vec!["**/*".to_string()],
            exclude: vec![],
        }];
        job
    }

    #[tokio::test]
    async fn test_uploads_every_selected_file() {
        let tmp = tempfile::tempdir().unwrap();
        build_tree(tmp.path());
        let job = job_for(tmp.path());
        let store = RecordingStore::default();

        run(&job, &store).await.unwrap();

        assert_eq!(
            store.keys(),
            BTreeSet::from(["v1/css/app.css".to_string(), "v1/js/app.js".to_string()])
        );
        let calls = store.calls.lock().unwrap();
        assert!(calls.iter().all(|(bucket, _)| bucket == "assets"));
    }

    #[tokio::test]
    async fn test_missing_bucket_uploads_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        build_tree(tmp.path());
        let mut job = job_for(tmp.path());
        job.bucket = String::new();
        let store = RecordingStore::default();

        let err = run(&job, &store).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_scan_error_does_not_abort_later_selections() {
        let tmp = tempfile::tempdir().unwrap();
        build_tree(tmp.path());
        let mut job = job_for(tmp.path());
        job.selections.insert(
            0,
            FileSelection {
                dir: tmp.path().join("does-not-exist"),
                include: vec![],
                exclude: vec![],
            },
        );
        let store = RecordingStore::default();

        run(&job, &store).await.unwrap();
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_the_job() {
        let tmp = tempfile::tempdir().unwrap();
        build_tree(tmp.path());
        let job = job_for(tmp.path());
        let store = RecordingStore::failing();

        let err = run(&job, &store).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        // first failure stops everything, the second file is never attempted
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn test_continue_on_error_processes_remaining_files() {
        let tmp = tempfile::tempdir().unwrap();
        build_tree(tmp.path());
        let mut job = job_for(tmp.path());
        job.continue_on_error = true;
        let store = RecordingStore::failing();

        run(&job, &store).await.unwrap();
        assert_eq!(store.call_count(), 2);
    }

    #[test]
    fn test_plan_resolves_keys_and_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        build_tree(tmp.path());
        let mut job = job_for(tmp.path());
        job.content_type_rules = vec![ContentTypeRule {
            ext: ".css".to_string(),
            value: "text/css".to_string(),
        }];
        job.cache_control_rules = vec![CacheControlRule {
            ext: ".css".to_string(),
            max_age: 86400,
        }];

        let uploads = plan(&job).unwrap();
        assert_eq!(uploads.len(), 2);

        let css = uploads.iter().find(|u| u.key == "v1/css/app.css").unwrap();
        assert_eq!(css.content_type.as_deref(), Some("text/css"));
        assert_eq!(css.cache_control.as_deref(), Some("max-age=86400"));

        let js = uploads.iter().find(|u| u.key == "v1/js/app.js").unwrap();
        assert_eq!(js.content_type, None);
        assert_eq!(js.cache_control, None);
    }

    #[test]
    fn test_plan_requires_bucket() {
        let job = UploadJob::new("");
        assert!(plan(&job).is_err());
    }
}
