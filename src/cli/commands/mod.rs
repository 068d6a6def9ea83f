pub mod db;
pub mod serve;

use anyhow::Context;

use crate::auth::hash_password as argon2_hash;
use crate::config::AppConfig;
use crate::database::Database;

pub fn hash_password(password: &str) -> anyhow::Result<()> {
    let hash = argon2_hash(password).context("failed to hash password")?;
    println!("{}", hash);
    Ok(())
}

/// Load configuration and open the pool shared by every command that touches the store
pub(crate) async fn connect() -> anyhow::Result<(AppConfig, Database)> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    Ok((config, db))
}
