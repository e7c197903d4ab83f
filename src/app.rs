//! Application bootstrap: connect, migrate, run the module lifecycle, serve.

use std::sync::Arc;

use anyhow::Context;
use posterboard_db::DbPool;
use posterboard_kernel::settings::Settings;
use posterboard_kernel::{InitCtx, ModuleRegistry};

use crate::modules;
use crate::modules::posters::repository::{InMemoryPosterRepository, SqlPosterRepository};

/// Registry with every module wired to the given database pool.
pub fn registry(settings: &Settings, pool: &DbPool) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(
        &mut registry,
        settings,
        Arc::new(SqlPosterRepository::new(pool.clone())),
    );
    registry
}

/// Apply pending migrations from every module to `pool`.
pub async fn migrate_pool(registry: &ModuleRegistry, pool: &DbPool) -> anyhow::Result<usize> {
    let migrations = registry.collect_migrations();
    posterboard_db::run_migrations(pool, &migrations).await
}

/// Connect and apply pending migrations; returns how many were applied.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let pool = connect(settings).await?;
    let registry = registry(settings, &pool);

    let applied = migrate_pool(&registry, &pool).await?;
    tracing::info!(applied, "migrations complete");

    pool.close().await;
    Ok(applied)
}

/// Merged OpenAPI document. Needs no database.
pub fn openapi_document(settings: &Settings) -> serde_json::Value {
    let mut registry = ModuleRegistry::new();
    modules::register_all(
        &mut registry,
        settings,
        Arc::new(InMemoryPosterRepository::new()),
    );
    posterboard_http::openapi::document(&registry)
}

/// Connect, migrate, start every module and serve until shutdown.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "posterboard bootstrap starting"
    );

    let pool = connect(settings).await?;
    let registry = registry(settings, &pool);

    let applied = migrate_pool(&registry, &pool).await?;
    tracing::info!(applied, "migrations complete");

    let ctx = InitCtx { settings };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("posterboard bootstrap complete");
    let served = posterboard_http::start_server(&registry, &settings.server).await;

    registry.stop_all().await?;
    pool.close().await;
    tracing::info!("posterboard shut down");

    served
}

async fn connect(settings: &Settings) -> anyhow::Result<DbPool> {
    posterboard_db::create_pool(&settings.database)
        .await
        .with_context(|| format!("failed to connect to {}", settings.database.url))
}
