//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "barcode, name, tamil_name, created_at, measure, quantity, mrp, retail_price";

pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// Search by English or Tamil name, case-insensitive substring.
pub async fn search(pool: &SqlitePool, q: &str, limit: i64) -> RepoResult<Vec<Product>> {
    let pattern = format!("%{}%", q);
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE name LIKE ?1 OR tamil_name LIKE ?1 ORDER BY name LIMIT ?2"
    ))
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn get(pool: &SqlitePool, barcode: &str) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE barcode = ?"
    ))
    .bind(barcode)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

/// Insert a product; the barcode id and creation timestamp are
/// generated here. A Tamil name is stored as supplied, falling back to
/// the English name (transliteration is an upstream concern).
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let barcode = util::short_barcode_id();
    let created_at = util::now_stamp();
    let tamil_name = data
        .tamil_name
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| data.name.clone());

    sqlx::query(
        "INSERT INTO products (barcode, name, tamil_name, created_at, measure, quantity, mrp, retail_price)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(&barcode)
    .bind(&data.name)
    .bind(&tamil_name)
    .bind(&created_at)
    .bind(&data.measure)
    .bind(data.quantity)
    .bind(data.mrp)
    .bind(data.retail_price)
    .execute(pool)
    .await?;

    get(pool, &barcode)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, barcode: &str, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE products SET
            name = COALESCE(?1, name),
            tamil_name = COALESCE(?2, tamil_name),
            measure = COALESCE(?3, measure),
            quantity = COALESCE(?4, quantity),
            mrp = COALESCE(?5, mrp),
            retail_price = COALESCE(?6, retail_price)
         WHERE barcode = ?7",
    )
    .bind(&data.name)
    .bind(&data.tamil_name)
    .bind(&data.measure)
    .bind(data.quantity)
    .bind(data.mrp)
    .bind(data.retail_price)
    .bind(barcode)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {barcode} not found")));
    }

    get(pool, barcode)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {barcode} not found")))
}

pub async fn delete(pool: &SqlitePool, barcode: &str) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE barcode = ?")
        .bind(barcode)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
