use anyhow::Context;
use tracing::info;

use crate::database::Database;
use crate::seed;

pub async fn migrate() -> anyhow::Result<()> {
    let (_, db) = super::connect().await?;
    db.migrate().await.context("schema bootstrap failed")?;
    info!("Schema is up to date");
    db.close().await;
    Ok(())
}

pub async fn seed() -> anyhow::Result<()> {
    let (_, db) = super::connect().await?;
    db.migrate().await.context("schema bootstrap failed")?;
    seed_all(&db).await?;
    db.close().await;
    Ok(())
}

/// Users first; demo inventory only after accounts exist
pub(crate) async fn seed_all(db: &Database) -> anyhow::Result<()> {
    if !seed::seed_users(db).await.context("seeding users failed")? {
        info!("Users already present, skipping user seed");
    }
    if !seed::seed_demo_inventory(db)
        .await
        .context("seeding demo inventory failed")?
    {
        info!("Inventory already present, skipping demo inventory");
    }
    Ok(())
}
