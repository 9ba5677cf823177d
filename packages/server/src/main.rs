use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::ObjectStore;
use common::storage::filesystem::FilesystemObjectStore;
use common::storage::s3::S3ObjectStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database;
use server::seed;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::connect(&config.database.url).await?;
    // Duplicate emails must be merged before the sync lands the unique index.
    seed::merge_duplicate_users(&db).await?;
    database::sync_schema(&db).await?;
    seed::seed_role_permissions(&db).await?;
    seed::ensure_indexes(&db).await?;

    let objects = build_object_store(&config).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState {
        db,
        objects,
        config: Arc::new(config),
    };
    let app = server::build_router(state);

    info!("Sijill server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_object_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    match config.storage.backend.as_str() {
        "filesystem" => {
            let store = FilesystemObjectStore::new(
                config.storage.root.clone(),
                config.storage.max_object_size,
            )
            .await?;
            Ok(Arc::new(store))
        }
        "s3" => {
            let s3 = config
                .storage
                .s3
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("storage.s3 section is required for the s3 backend"))?;
            let store = S3ObjectStore::new(
                &s3.bucket,
                &s3.region,
                s3.endpoint.as_deref(),
                &s3.access_key,
                &s3.secret_key,
                config.storage.max_object_size,
            )?;
            Ok(Arc::new(store))
        }
        other => anyhow::bail!("unknown storage backend '{other}'"),
    }
}
