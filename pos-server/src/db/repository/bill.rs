//! Bill Repository

use shared::models::{Bill, BillItem, Transaction};
use sqlx::SqlitePool;

use super::RepoResult;

const BILL_COLUMNS: &str = "bill_number, customer_mobile, date, time, total_items, \
    total_unique_products, subtotal, total_savings, payment_type, cash_received, \
    cash_balance, created_at";

/// Persist a bill with its items in one transaction. The bill is
/// durable once this returns - printing happens afterwards and its
/// failure never rolls the record back.
pub async fn create(pool: &SqlitePool, bill: &Bill, items: &[BillItem]) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO bills (bill_number, customer_mobile, date, time, total_items, \
         total_unique_products, subtotal, total_savings, payment_type, cash_received, \
         cash_balance, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .bind(&bill.bill_number)
    .bind(&bill.customer_mobile)
    .bind(&bill.date)
    .bind(&bill.time)
    .bind(bill.total_items)
    .bind(bill.total_unique_products)
    .bind(bill.subtotal)
    .bind(bill.total_savings)
    .bind(&bill.payment_type)
    .bind(bill.cash_received)
    .bind(bill.cash_balance)
    .bind(&bill.created_at)
    .execute(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO bill_items (bill_number, product_name, quantity, unit, mrp, \
             retail_price, total_price) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&item.bill_number)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.mrp)
        .bind(item.retail_price)
        .bind(item.total_price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, bill_number: &str) -> RepoResult<Option<(Bill, Vec<BillItem>)>> {
    let bill = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLUMNS} FROM bills WHERE bill_number = ?"
    ))
    .bind(bill_number)
    .fetch_optional(pool)
    .await?;

    let Some(bill) = bill else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, BillItem>(
        "SELECT id, bill_number, product_name, quantity, unit, mrp, retail_price, total_price \
         FROM bill_items WHERE bill_number = ? ORDER BY id",
    )
    .bind(bill_number)
    .fetch_all(pool)
    .await?;

    Ok(Some((bill, items)))
}

/// Transactions for one calendar day (`dd/mm/YYYY`), newest first.
pub async fn list_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<Transaction>> {
    let rows = sqlx::query_as::<_, Transaction>(
        "SELECT bill_number, customer_mobile, date, time, total_items, subtotal, \
         cash_balance, payment_type FROM bills WHERE date = ? ORDER BY time DESC",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Transactions for one month. `month` is `mm/YYYY`, matched against
/// the tail of the stored `dd/mm/YYYY` date.
pub async fn list_by_month(pool: &SqlitePool, month: &str) -> RepoResult<Vec<Transaction>> {
    let rows = sqlx::query_as::<_, Transaction>(
        "SELECT bill_number, customer_mobile, date, time, total_items, subtotal, \
         cash_balance, payment_type FROM bills WHERE substr(date, 4, 7) = ? \
         ORDER BY date DESC, time DESC",
    )
    .bind(month)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// (items sold, sales total) for one calendar day.
pub async fn totals_for_date(pool: &SqlitePool, date: &str) -> RepoResult<(f64, f64)> {
    let row: (f64, f64) = sqlx::query_as(
        "SELECT IFNULL(SUM(total_items), 0.0), IFNULL(SUM(subtotal), 0.0) FROM bills WHERE date = ?",
    )
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(row)
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

    fn sample_bill(number: &str, date: &str) -> (Bill, Vec<BillItem>) {
        let bill = Bill {
            bill_number: number.to_string(),
            customer_mobile: "N/A".to_string(),
            date: date.to_string(),
            time: "12:00:00".to_string(),
            total_items: 2.0,
            total_unique_products: 1,
            subtotal: 48.0,
            total_savings: 12.0,
            payment_type: "Cash".to_string(),
            cash_received: 50.0,
            cash_balance: 2.0,
            created_at: "2025-01-01 12:00:00".to_string(),
        };
        let items = vec![BillItem {
            id: 0,
            bill_number: number.to_string(),
            product_name: "Perun Seeragam 100g".to_string(),
            quantity: 2.0,
            unit: "count".to_string(),
            mrp: 30.0,
            retail_price: 24.0,
            total_price: 48.0,
        }];
        (bill, items)
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let pool = test_pool().await;
        let (bill, items) = sample_bill("INV1", "01/01/2025");
        create(&pool, &bill, &items).await.unwrap();

        let (fetched, fetched_items) = get(&pool, "INV1").await.unwrap().unwrap();
        assert_eq!(fetched.subtotal, 48.0);
        assert_eq!(fetched_items.len(), 1);
        assert_eq!(fetched_items[0].product_name, "Perun Seeragam 100g");
        assert!(fetched_items[0].id > 0);
    }

    #[tokio::test]
    async fn test_get_missing_bill() {
        let pool = test_pool().await;
        assert!(get(&pool, "INVX").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_daily_and_monthly_listings() {
        let pool = test_pool().await;
        for (n, d) in [
            ("INV1", "01/01/2025"),
            ("INV2", "01/01/2025"),
            ("INV3", "15/02/2025"),
        ] {
            let (bill, items) = sample_bill(n, d);
            create(&pool, &bill, &items).await.unwrap();
        }

        assert_eq!(list_by_date(&pool, "01/01/2025").await.unwrap().len(), 2);
        assert_eq!(list_by_month(&pool, "01/2025").await.unwrap().len(), 2);
        assert_eq!(list_by_month(&pool, "02/2025").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_totals_for_date() {
        let pool = test_pool().await;
        for n in ["INV1", "INV2"] {
            let (bill, items) = sample_bill(n, "01/01/2025");
            create(&pool, &bill, &items).await.unwrap();
        }

        let (items_sold, sales) = totals_for_date(&pool, "01/01/2025").await.unwrap();
        assert_eq!(items_sold, 4.0);
        assert_eq!(sales, 96.0);

        let (none_items, none_sales) = totals_for_date(&pool, "02/01/2025").await.unwrap();
        assert_eq!(none_items, 0.0);
        assert_eq!(none_sales, 0.0);
    }
}
