//! Request and response shapes for the HTTP API.

pub mod auth;
pub mod devices;
pub mod network_nodes;

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use crate::error::ApiError;

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Collects per-field validation failures for a request body
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.insert(field.to_string(), "This field is required".to_string());
        }
    }

    /// A field that may be omitted, but not blanked
    pub fn non_empty_if_present(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if v.trim().is_empty() {
                self.0.insert(field.to_string(), "This field cannot be empty".to_string());
            }
        }
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid request data", Some(self.0)))
        }
    }
}
