//! PostgreSQL User Store

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, UserRecord};
use crate::domain::repository::UserStore;
use crate::domain::value_object::{credential::Credential, email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user store over the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                password_hash,
                is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_record).transpose()
    }

    async fn create(&self, user: &NewUser) -> AuthResult<UserId> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                email,
                password_hash,
                is_active,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.credential.as_phc_string())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user.user_id),
            // 23505 on users_email_key
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    password_hash: String,
    is_active: bool,
}

impl UserRow {
    fn into_record(self) -> AuthResult<UserRecord> {
        Ok(UserRecord {
            user_id: UserId::from_uuid(self.user_id),
            credential: Credential::from_phc_string(self.password_hash)?,
            active: self.is_active,
        })
    }
}
