use serde::{Deserialize, Serialize};

use super::FieldErrors;
use crate::auth::Role;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        errors.require("login", &self.login);
        errors.require("password", &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}
