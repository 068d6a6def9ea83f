use crate::database::manager::{Database, DatabaseError};
use crate::database::models::User;

const USER_COLUMNS: &str = "id, login, password_hash, role, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE login = $1",
            USER_COLUMNS
        ))
        .bind(login)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    pub async fn create(&self, login: &str, password_hash: &str, role: &str) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (login, password_hash, role) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(login)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.db.pool())
        .await?;

        Ok(user)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
