use serde::{Deserialize, Serialize};

use super::{nullable, FieldErrors};
use crate::database::models::device::DEFAULT_DEVICE_STATUS;
use crate::database::models::{Device, DeviceChanges, NewDevice, NodeId};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(rename = "type", default)]
    pub device_type: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub location: String,
    pub network_node_id: Option<NodeId>,
}

impl CreateDeviceRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        errors.require("type", &self.device_type);
        errors.require("vendor", &self.vendor);
        errors.require("model", &self.model);
        errors.require("serial", &self.serial);
        errors.require("location", &self.location);
        errors.into_result()
    }

    pub fn into_new_device(self) -> NewDevice {
        NewDevice {
            device_type: self.device_type,
            vendor: self.vendor,
            model: self.model,
            serial: self.serial,
            location: self.location,
            status: DEFAULT_DEVICE_STATUS.to_string(),
            network_node_id: self.network_node_id,
        }
    }
}

/// Patch body: omitted keys are left untouched, `"network_node_id": null` detaches.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeviceRequest {
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub network_node_id: Option<Option<NodeId>>,
}

impl UpdateDeviceRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        errors.non_empty_if_present("type", self.device_type.as_deref());
        errors.non_empty_if_present("serial", self.serial.as_deref());
        errors.non_empty_if_present("status", self.status.as_deref());
        errors.into_result()
    }

    pub fn into_changes(self) -> DeviceChanges {
        DeviceChanges {
            device_type: self.device_type,
            vendor: self.vendor,
            model: self.model,
            serial: self.serial,
            location: self.location,
            status: self.status,
            network_node_id: self.network_node_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub device_type: String,
    pub vendor: String,
    pub model: String,
    pub serial: String,
    pub location: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_node_id: Option<NodeId>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            device_type: device.device_type,
            vendor: device.vendor,
            model: device.model,
            serial: device.serial,
            location: device.location,
            status: device.status,
            network_node_id: device.network_node_id,
            created_at: device.created_at.to_rfc3339(),
            updated_at: device.updated_at.to_rfc3339(),
        }
    }
}
