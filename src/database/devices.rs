use crate::database::manager::{Database, DatabaseError};
use crate::database::models::{Device, DeviceChanges, NewDevice, NodeId};

pub(crate) const DEVICE_COLUMNS: &str =
    "id, type, vendor, model, serial, location, status, network_node_id, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct DeviceRepository {
    db: Database,
}

impl DeviceRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, device: &NewDevice) -> Result<Device, DatabaseError> {
        let sql = format!(
            "INSERT INTO devices (type, vendor, model, serial, location, status, network_node_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            DEVICE_COLUMNS
        );

        let created = sqlx::query_as::<_, Device>(&sql)
            .bind(&device.device_type)
            .bind(&device.vendor)
            .bind(&device.model)
            .bind(&device.serial)
            .bind(&device.location)
            .bind(&device.status)
            .bind(device.network_node_id)
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Device, DatabaseError> {
        sqlx::query_as::<_, Device>(&format!("SELECT {} FROM devices WHERE id = $1", DEVICE_COLUMNS))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Device {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Device>, DatabaseError> {
        let devices = sqlx::query_as::<_, Device>(&format!(
            "SELECT {} FROM devices ORDER BY id",
            DEVICE_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        Ok(devices)
    }

    /// Devices attached directly to `node_id`
    pub async fn list_by_node(&self, node_id: NodeId) -> Result<Vec<Device>, DatabaseError> {
        let devices = sqlx::query_as::<_, Device>(&format!(
            "SELECT {} FROM devices WHERE network_node_id = $1 ORDER BY id",
            DEVICE_COLUMNS
        ))
        .bind(node_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(devices)
    }

    /// Apply the fields present in `changes`; absent fields keep their stored value.
    pub async fn update(&self, id: i64, changes: &DeviceChanges) -> Result<Device, DatabaseError> {
        let sql = format!(
            "UPDATE devices SET
                type = COALESCE($2, type),
                vendor = COALESCE($3, vendor),
                model = COALESCE($4, model),
                serial = COALESCE($5, serial),
                location = COALESCE($6, location),
                status = COALESCE($7, status),
                network_node_id = CASE WHEN $8 THEN $9 ELSE network_node_id END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            DEVICE_COLUMNS
        );

        sqlx::query_as::<_, Device>(&sql)
            .bind(id)
            .bind(changes.device_type.as_deref())
            .bind(changes.vendor.as_deref())
            .bind(changes.model.as_deref())
            .bind(changes.serial.as_deref())
            .bind(changes.location.as_deref())
            .bind(changes.status.as_deref())
            .bind(changes.network_node_id.is_some())
            .bind(changes.network_node_id.flatten())
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Device {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Device {} not found", id)));
        }
        Ok(())
    }
}
