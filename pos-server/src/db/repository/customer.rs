//! Customer Repository

use shared::models::{Customer, CustomerUpsert};
use shared::util;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn get(pool: &SqlitePool, mobile: &str) -> RepoResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT mobile, name, address, created_at FROM customers WHERE mobile = ?",
    )
    .bind(mobile)
    .fetch_optional(pool)
    .await?;
    Ok(customer)
}

/// Insert or update by mobile number. The creation timestamp survives
/// updates.
pub async fn upsert(pool: &SqlitePool, data: CustomerUpsert) -> RepoResult<Customer> {
    sqlx::query(
        "INSERT INTO customers (mobile, name, address, created_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(mobile) DO UPDATE SET name = excluded.name, address = excluded.address",
    )
    .bind(&data.mobile)
    .bind(&data.name)
    .bind(&data.address)
    .bind(util::now_stamp())
    .execute(pool)
    .await?;

    get(pool, &data.mobile)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert customer".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        db::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let pool = test_pool().await;

        let created = upsert(
            &pool,
            CustomerUpsert {
                mobile: "9876543210".to_string(),
                name: "Murugan".to_string(),
                address: "Virudhachalam".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(created.name, "Murugan");

        let updated = upsert(
            &pool,
            CustomerUpsert {
                mobile: "9876543210".to_string(),
                name: "Murugan S".to_string(),
                address: String::new(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Murugan S");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let pool = test_pool().await;
        assert!(get(&pool, "0000000000").await.unwrap().is_none());
    }
}
