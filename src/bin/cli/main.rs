use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use object_replicator::{
    adapters::inbound::http::dto::{ErrorResponseDto, ReplicationRequestDto, SuccessResponseDto},
    app::{create_app_from_env, AppServices, StoreHandle},
    domain::{
        BucketName, BucketStatus, ObjectInfo, ObjectKey, ObjectPayload, ReplicationRequest,
        StorageResult, StoreRole,
    },
    ports::ReplicationService,
};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "object-replicator-cli")]
#[command(about = "Operator tool for the source and target object stores", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Store {
    Source,
    Target,
}

impl From<Store> for StoreRole {
    fn from(store: Store) -> Self {
        match store {
            Store::Source => StoreRole::Source,
            Store::Target => StoreRole::Target,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every bucket with its objects
    List {
        /// Store to inspect
        #[arg(short, long, value_enum, default_value = "source")]
        store: Store,
    },

    /// Upload a local file
    Upload {
        /// Object key
        key: String,
        /// File path to upload
        file: String,
        /// Store to upload into
        #[arg(short, long, value_enum, default_value = "source")]
        store: Store,
    },

    /// Delete every object in the configured bucket, then the bucket itself
    DeleteBucket {
        /// Store holding the bucket
        #[arg(short, long, value_enum, default_value = "target")]
        store: Store,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Copy every source object missing from the target
    ReplicateAll,

    /// Copy one object from source to target
    Replicate {
        /// Object key
        key: String,
    },

    /// Ask a running server to replicate one object
    Trigger {
        /// Object key
        key: String,
        /// Server URL
        #[arg(short, long, env = "OBJECT_REPLICATOR_URL", default_value = "http://localhost:8000")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::List { store } => {
            let app = load_app().await?;
            let handle = app.store(store.into());
            for (bucket, objects) in list_store(handle).await? {
                match objects {
                    Ok(objects) => {
                        println!("{} ({} objects)", bucket, objects.len());
                        for object in objects {
                            println!("  {} ({} bytes)", object.key, object.size);
                        }
                    }
                    Err(e) => println!("{} (error listing objects: {})", bucket, e),
                }
            }
        }
        Commands::Upload { key, file, store } => {
            let app = load_app().await?;
            let key = ObjectKey::new(key)?;
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file))?;

            let handle = app.store(store.into());
            let size = upload(handle, &key, data).await?;
            println!(
                "Uploaded '{}' to {} bucket {} ({} bytes)",
                key, handle.role, handle.bucket, size
            );
        }
        Commands::DeleteBucket { store, yes } => {
            let app = load_app().await?;
            let handle = app.store(store.into());
            if !yes {
                bail!(
                    "Refusing to delete {} bucket {} without --yes",
                    handle.role,
                    handle.bucket
                );
            }

            match delete_bucket(handle).await? {
                Some(removed) => println!(
                    "Deleted {} objects and {} bucket {}",
                    removed, handle.role, handle.bucket
                ),
                None => println!("{} bucket {} does not exist", handle.role, handle.bucket),
            }
        }
        Commands::ReplicateAll => {
            let app = load_app().await?;
            let report = app.replication_service.replicate_all().await?;

            for outcome in report.outcomes.iter().filter(|o| !o.is_success()) {
                println!("{}: {}", outcome.label(), outcome.message());
            }
            println!(
                "Found {} objects: {} replicated ({} bytes), {} already present, {} not found, {} failed",
                report.source_total,
                report.replicated(),
                report.bytes_transferred(),
                report.skipped(),
                report.not_found(),
                report.failed()
            );

            if report.has_failures() {
                bail!("{} objects failed to replicate", report.failed());
            }
        }
        Commands::Replicate { key } => {
            let request = ReplicationRequest::new(ObjectKey::new(key)?);
            let app = load_app().await?;
            let outcome = app.replication_service.replicate(request).await?;
            println!("{}", outcome.message());
        }
        // Talks HTTP only and needs no store credentials
        Commands::Trigger { key, url } => trigger(&url, &key).await?,
    }

    Ok(())
}

async fn load_app() -> Result<AppServices> {
    create_app_from_env()
        .await
        .context("Failed to configure stores from the environment")
}

/// Every bucket with its objects; a bucket that cannot be listed keeps its error
async fn list_store(
    handle: &StoreHandle,
) -> Result<Vec<(BucketName, StorageResult<Vec<ObjectInfo>>)>> {
    let mut listing = Vec::new();
    for bucket in handle.store.list_buckets().await? {
        let objects = handle.store.list_keys(&bucket).await;
        if let Err(e) = &objects {
            warn!(bucket = %bucket, error = %e, "failed to list objects");
        }
        listing.push((bucket, objects));
    }
    Ok(listing)
}

async fn upload(handle: &StoreHandle, key: &ObjectKey, data: Vec<u8>) -> Result<u64> {
    if handle.store.ensure_bucket(&handle.bucket).await? == BucketStatus::Created {
        println!("Created {} bucket {}", handle.role, handle.bucket);
    }

    let payload = ObjectPayload::from(data);
    let size = payload.size();
    handle.store.put_object(&handle.bucket, key, payload).await?;
    Ok(size)
}

/// Returns the number of objects removed, or `None` when the bucket is absent
async fn delete_bucket(handle: &StoreHandle) -> Result<Option<usize>> {
    if !handle.store.bucket_exists(&handle.bucket).await? {
        return Ok(None);
    }

    let objects = handle.store.list_keys(&handle.bucket).await?;
    for object in &objects {
        handle.store.delete_object(&handle.bucket, &object.key).await?;
    }
    handle.store.delete_bucket(&handle.bucket).await?;

    Ok(Some(objects.len()))
}

async fn trigger(url: &str, key: &str) -> Result<()> {
    let endpoint = format!("{}/v1/replicate", url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&ReplicationRequestDto {
            s3_key: key.to_string(),
        })
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", endpoint))?;

    let status = response.status();
    if status.is_success() {
        let body: SuccessResponseDto = response.json().await?;
        println!("{}", body.message);
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        bail!(failure_message(status, &body))
    }
}

/// Describe a non-2xx reply; axum's extractor rejections are plain text
fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponseDto>(body) {
        Ok(error) => format!("{} ({}): {}", error.error, status, error.detail),
        Err(_) if body.trim().is_empty() => format!("Request failed ({})", status),
        Err(_) => format!("Request failed ({}): {}", status, body.trim()),
    }
}
