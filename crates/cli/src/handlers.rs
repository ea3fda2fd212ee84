//! Command handlers for the s3put CLI

use anyhow::Result;
use s3put_core::{
    load_manifest, normalize_dest_prefix, plan, resolve_credentials, resolve_endpoint, run,
    S3Client,
};
use std::path::Path;
use tabled::{Table, Tabled};

/// Handle the run command
pub async fn handle_run(manifest_path: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let keys = resolve_credentials(&manifest)?;
    let job = manifest.into_job()?;
    job.validate()?;

    let endpoint = job
        .region
        .as_deref()
        .map(|region| resolve_endpoint(region).to_string());
    let client = S3Client::new(keys, endpoint.as_deref()).await;

    run(&job, &client).await?;

    println!("  ✅ Upload job finished");
    Ok(())
}

/// Handle the check command
pub async fn handle_check(manifest_path: &Path) -> Result<()> {
    println!("Validating manifest {}...", manifest_path.display());

    let manifest = load_manifest(manifest_path)?;
    let job = manifest.into_job()?;
    job.validate()?;

    println!("  ✅ Manifest valid");
    println!();
    println!("Job:");
    println!("  Bucket: {}", job.bucket);
    let prefix = normalize_dest_prefix(job.dest.as_deref());
    println!(
        "  Destination prefix: {}",
        if prefix.is_empty() { "-" } else { prefix.as_str() }
    );
    if let Some(region) = &job.region {
        println!("  Endpoint: {}", resolve_endpoint(region));
    }
    println!("  Public read: {}", job.public_read);
    println!("  Reduced redundancy: {}", job.reduced_redundancy);
    println!("  Selections: {}", job.selections.len());
    println!("  Content-type rules: {}", job.content_type_rules.len());
    println!("  Cache-control rules: {}", job.cache_control_rules.len());

    Ok(())
}

/// Handle the plan command
pub async fn handle_plan(manifest_path: &Path, output: &str) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let job = manifest.into_job()?;
    let uploads = plan(&job)?;

    if uploads.is_empty() {
        println!("Nothing to upload");
        return Ok(());
    }

    match output {
        "json" => {
            let items: Vec<serde_json::Value> = uploads
                .iter()
                .map(|u| {
                    serde_json::json!({
                        "file": u.local_path.display().to_string(),
                        "key": u.key,
                        "content_type": u.content_type,
                        "cache_control": u.cache_control,
                        "acl": u.access_control.as_str(),
                        "storage_tier": u.storage_tier.as_str(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        _ => {
            #[derive(Tabled)]
            struct UploadRow {
                file: String,
                key: String,
                content_type: String,
                cache_control: String,
                acl: String,
                tier: String,
            }

            let rows: Vec<UploadRow> = uploads
                .iter()
                .map(|u| UploadRow {
                    file: u.local_path.display().to_string(),
                    key: u.key.clone(),
                    content_type: display_or(&u.content_type),
                    cache_control: display_or(&u.cache_control),
                    acl: u.access_control.as_str().to_string(),
                    tier: u.storage_tier.as_str().to_string(),
                })
                .collect();

            println!("{}", Table::new(rows));
            println!();
            println!("{} file(s) to upload to bucket {}", uploads.len(), job.bucket);
        }
    }

    Ok(())
}

fn display_or(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}
