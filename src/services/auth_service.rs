use tracing::{info, warn};

use super::ServiceError;
use crate::auth::{verify_password, AuthError, Role, TokenService};
use crate::database::UserRepository;

/// Token plus role returned by a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
}

#[derive(Clone, Debug)]
pub struct AuthService {
    users: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Exchange login + password for a signed token.
    /// Unknown logins and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginOutcome, ServiceError> {
        let Some(user) = self.users.find_by_login(login).await? else {
            warn!("Login failed: unknown login '{}'", login);
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash) {
            warn!("Login failed: bad password for '{}'", login);
            return Err(AuthError::InvalidCredentials.into());
        }

        let role: Role = user.role.parse().map_err(|e: String| {
            warn!("User '{}' has unusable role: {}", login, e);
            AuthError::InvalidCredentials
        })?;

        let token = self.tokens.issue(user.id, role)?;
        info!("User '{}' logged in as {}", login, role);

        Ok(LoginOutcome { token, role })
    }
}
