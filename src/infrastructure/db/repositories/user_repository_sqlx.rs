use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> anyhow::Result<UserRow> {
        // The UNIQUE constraint on email is the uniqueness check; a concurrent
        // duplicate registration surfaces as a 23505 violation here.
        let row = sqlx::query(
            r#"INSERT INTO users ("_id", "email", "firstName", "lastName", "hashedPassword")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING "_id", "email", "firstName", "lastName", "hashedPassword""#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(UserRow {
            id: row.get("_id"),
            email: row.get("email"),
            first_name: row.get("firstName"),
            last_name: row.get("lastName"),
            password_hash: row.try_get("hashedPassword").ok(),
        })
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT "_id", "email", "firstName", "lastName", "hashedPassword"
               FROM users WHERE "email" = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| UserRow {
            id: r.get("_id"),
            email: r.get("email"),
            first_name: r.get("firstName"),
            last_name: r.get("lastName"),
            password_hash: r.try_get("hashedPassword").ok(),
        }))
    }
}
