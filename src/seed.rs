//! Bootstrap users and demo inventory for development deployments.

use std::collections::VecDeque;

use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::auth::{hash_password, Role};
use crate::database::models::NodeId;
use crate::database::{Database, DatabaseError, UserRepository};

/// Deepest level that still receives generated children
const DEMO_MAX_DEPTH: u32 = 3;

const DEMO_ROOTS: &[(&str, &str)] = &[
    ("Main office", "Central network hub"),
    ("East branch", "Eastern division"),
    ("West branch", "Western division"),
    ("Server room", "Primary server room"),
    ("Backup data center", "Disaster recovery site"),
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Failed to hash password for '{login}': {reason}")]
    Hashing { login: String, reason: String },
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        SeedError::Database(err.into())
    }
}

/// Create the default admin and viewer accounts when no user exists
pub async fn seed_users(db: &Database) -> Result<bool, SeedError> {
    let users = UserRepository::new(db.clone());
    if users.count().await? > 0 {
        return Ok(false);
    }

    for (login, password, role) in [("admin", "admin123", Role::Admin), ("viewer", "viewer123", Role::Viewer)] {
        let hash = hash_password(password).map_err(|e| SeedError::Hashing {
            login: login.to_string(),
            reason: e.to_string(),
        })?;
        users.create(login, &hash, role.as_str()).await?;
        info!("{} user created (login: {}, password: {})", role, login, password);
    }

    Ok(true)
}

/// Populate a demo hierarchy when both inventory tables are empty. Runs in one transaction.
///
/// Node deletion detaches devices rather than removing them, so an empty node
/// table alone does not mean the fixed demo serials are free.
pub async fn seed_demo_inventory(db: &Database) -> Result<bool, SeedError> {
    let populated: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM network_nodes) OR EXISTS (SELECT 1 FROM devices)",
    )
    .fetch_one(db.pool())
    .await?;
    if populated {
        return Ok(false);
    }

    let mut tx = db.begin().await?;

    let mut roots = Vec::with_capacity(DEMO_ROOTS.len());
    for (name, description) in DEMO_ROOTS {
        let id = insert_node(&mut tx, name, description, None).await?;
        roots.push((id, name.to_string()));
    }

    // (parent id, parent name, depth of the children to create)
    let mut queue: VecDeque<(NodeId, String, u32)> =
        roots.iter().map(|(id, name)| (*id, name.clone(), 1)).collect();

    while let Some((parent_id, parent_name, depth)) = queue.pop_front() {
        if depth > DEMO_MAX_DEPTH {
            continue;
        }
        let child_count = if depth == 1 { 3 } else { 2 };

        for i in 1..=child_count {
            let child_id = insert_node(
                &mut tx,
                &format!("Child node {}-{}", parent_id, i),
                &format!("Child of node {}", parent_name),
                Some(parent_id),
            )
            .await?;

            insert_device(&mut tx, "Computer", "Dell", &format!("OptiPlex {}", i), &format!("DL-{}-{}", parent_id, i), child_id).await?;
            insert_device(&mut tx, "Printer", "HP", &format!("LaserJet {}", i), &format!("HP-{}-{}", parent_id, i), child_id).await?;

            queue.push_back((child_id, format!("Child node {}-{}", parent_id, i), depth + 1));
        }
    }

    for (i, (root_id, _)) in roots.iter().enumerate() {
        insert_device(&mut tx, "Server", "IBM", &format!("System X-{}", i), &format!("IBM-{}", i), *root_id).await?;
    }

    tx.commit().await?;
    info!("Demo inventory seeded");
    Ok(true)
}

async fn insert_node(
    tx: &mut Transaction<'static, Postgres>,
    name: &str,
    description: &str,
    parent_id: Option<NodeId>,
) -> Result<NodeId, SeedError> {
    let id = sqlx::query_scalar("INSERT INTO network_nodes (name, description, parent_id) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(description)
        .bind(parent_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(id)
}

async fn insert_device(
    tx: &mut Transaction<'static, Postgres>,
    device_type: &str,
    vendor: &str,
    model: &str,
    serial: &str,
    node_id: NodeId,
) -> Result<(), SeedError> {
    sqlx::query(
        "INSERT INTO devices (type, vendor, model, serial, location, network_node_id) VALUES ($1, $2, $3, $4, '', $5)",
    )
    .bind(device_type)
    .bind(vendor)
    .bind(model)
    .bind(serial)
    .bind(node_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
