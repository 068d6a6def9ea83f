use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{Database, DeviceRepository, NetworkNodeRepository, UserRepository};
use crate::services::{AuthService, DeviceService, NetworkNodeService};

/// Shared handler state. Every component receives the injected `Database` at construction.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub auth: AuthService,
    pub devices: DeviceService,
    pub nodes: NetworkNodeService,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        let device_repo = DeviceRepository::new(db.clone());
        let node_repo = NetworkNodeRepository::new(db.clone());
        let user_repo = UserRepository::new(db.clone());
        let tokens = TokenService::from_config(&config.security);

        Self {
            auth: AuthService::new(user_repo, tokens),
            devices: DeviceService::new(device_repo.clone(), node_repo.clone()),
            nodes: NetworkNodeService::new(node_repo, device_repo),
            config: Arc::new(config),
            db,
        }
    }
}
