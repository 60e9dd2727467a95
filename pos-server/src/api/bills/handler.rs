//! Bill API Handlers
//!
//! Bill creation persists first and prints second: the record is
//! authoritative, the paper copy is best-effort. A print failure is
//! returned in the response body alongside the already-saved bill.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::validation::validate_required_text;
use crate::core::ServerState;
use crate::db::repository::{bill, customer};
use crate::{AppError, AppResult};
use pos_layout::{LineItem, ReceiptDoc, ReceiptRenderer, StoreHeader};
use shared::models::{Bill, BillCreate, BillItem, CustomerUpsert, StoreInfo, Transaction};
use shared::util;

/// Receipt name for sales with no registered customer
const WALK_IN_NAME: &str = "பதிவில்லா வாடிக்கையாளர்";

#[derive(Debug, Serialize)]
pub struct BillCreateResponse {
    pub success: bool,
    pub bill_number: String,
    pub bill_string: String,
    pub printed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BillWithItems {
    pub bill: Bill,
    pub items: Vec<BillItem>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionParams {
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub period: String,
    pub count: usize,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct TodayTotals {
    pub date: String,
    pub total_items: f64,
    pub total_sales: f64,
}

/// Compute the persistable bill and item rows from a till submission.
fn build_bill(payload: &BillCreate) -> (Bill, Vec<BillItem>) {
    let bill_number = util::bill_number();

    let total_items: f64 = payload.items.iter().map(|i| i.quantity).sum();
    let subtotal: f64 = payload
        .items
        .iter()
        .map(|i| i.retail_price * i.quantity)
        .sum();
    let total_savings: f64 = payload
        .items
        .iter()
        .map(|i| (i.mrp - i.retail_price) * i.quantity)
        .sum();

    let cash_received = payload.payment.cash_received;
    let cash_balance = cash_received - subtotal;

    let mobile = payload.customer.mobile.trim();
    let bill = Bill {
        bill_number: bill_number.clone(),
        customer_mobile: if mobile.is_empty() {
            "N/A".to_string()
        } else {
            mobile.to_string()
        },
        date: util::bill_date(),
        time: util::bill_time(),
        total_items,
        total_unique_products: payload.items.len() as i64,
        subtotal,
        total_savings,
        payment_type: payload.payment.payment_type.clone(),
        cash_received,
        cash_balance,
        created_at: util::now_stamp(),
    };

    let items = payload
        .items
        .iter()
        .map(|i| BillItem {
            id: 0,
            bill_number: bill_number.clone(),
            product_name: i.display_name().to_string(),
            quantity: i.quantity,
            unit: i.unit.clone().unwrap_or_else(|| "count".to_string()),
            mrp: i.mrp,
            retail_price: i.retail_price,
            total_price: i.retail_price * i.quantity,
        })
        .collect();

    (bill, items)
}

fn money(v: f64) -> Decimal {
    Decimal::from_f64_retain(v).unwrap_or_default()
}

/// Assemble the printable document from persisted rows.
fn receipt_doc(store: &StoreInfo, bill: &Bill, items: &[BillItem], customer_name: &str) -> ReceiptDoc {
    ReceiptDoc {
        store: StoreHeader {
            name: store.name.clone(),
            address_line1: store.address_line1.clone(),
            address_line2: store.address_line2.clone(),
            phone: store.phone.clone(),
            gst: store.gst.clone(),
        },
        bill_number: bill.bill_number.clone(),
        date: bill.date.clone(),
        time: bill.time.clone(),
        customer_name: customer_name.to_string(),
        customer_mobile: (bill.customer_mobile != "N/A").then(|| bill.customer_mobile.clone()),
        items: items
            .iter()
            .map(|i| {
                LineItem::new(
                    i.product_name.clone(),
                    money(i.quantity),
                    i.unit.clone(),
                    money(i.mrp),
                    money(i.retail_price),
                )
            })
            .collect(),
        total_unique_products: bill.total_unique_products,
        total_quantity: money(bill.total_items),
        subtotal: money(bill.subtotal),
        total_savings: money(bill.total_savings),
        payment_type: bill.payment_type.clone(),
        cash_received: money(bill.cash_received),
        cash_balance: money(bill.cash_balance),
    }
}

/// POST /api/bills - persist a bill, then print best-effort
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillCreate>,
) -> AppResult<Json<BillCreateResponse>> {
    if payload.items.is_empty() {
        return Err(AppError::validation("bill must contain at least one item"));
    }
    validate_required_text(&payload.payment.payment_type, "payment_type", 30)?;

    let (bill, items) = build_bill(&payload);

    // Register or refresh the customer record for non-walk-in sales
    let customer_name = if bill.customer_mobile == "N/A" {
        WALK_IN_NAME.to_string()
    } else {
        customer::upsert(
            &state.pool,
            CustomerUpsert {
                mobile: bill.customer_mobile.clone(),
                name: payload.customer.name.clone(),
                address: payload.customer.address.clone(),
            },
        )
        .await?;
        payload.customer.name.clone()
    };

    // The record is durable from here on
    bill::create(&state.pool, &bill, &items).await?;
    info!(bill_number = %bill.bill_number, subtotal = bill.subtotal, "bill saved");

    let doc = receipt_doc(&state.config.store, &bill, &items, &customer_name);
    let bill_string = ReceiptRenderer::new(&doc, state.config.receipt_width).render();

    let (printed, print_error) = match state.printing.print_receipt(&bill_string).await {
        Ok(()) => (true, None),
        Err(e) => {
            warn!(bill_number = %bill.bill_number, error = %e, "receipt print failed");
            (false, Some(e.to_string()))
        }
    };

    Ok(Json(BillCreateResponse {
        success: true,
        bill_number: bill.bill_number,
        bill_string,
        printed,
        print_error,
    }))
}

/// GET /api/bills/:bill_number
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(bill_number): Path<String>,
) -> AppResult<Json<BillWithItems>> {
    let (bill, items) = bill::get(&state.pool, &bill_number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bill {} not found", bill_number)))?;
    Ok(Json(BillWithItems { bill, items }))
}

/// GET /api/transactions?period=today|this_month
pub async fn transactions(
    State(state): State<ServerState>,
    Query(params): Query<TransactionParams>,
) -> AppResult<Json<TransactionsResponse>> {
    let period = params.period.unwrap_or_else(|| "today".to_string());
    let transactions = match period.as_str() {
        "this_month" => bill::list_by_month(&state.pool, &util::month_key()).await?,
        "today" => bill::list_by_date(&state.pool, &util::bill_date()).await?,
        other => {
            return Err(AppError::Invalid(format!(
                "unknown period '{other}', expected today or this_month"
            )));
        }
    };

    Ok(Json(TransactionsResponse {
        period,
        count: transactions.len(),
        transactions,
    }))
}

/// GET /api/bills/today/totals
pub async fn today_totals(State(state): State<ServerState>) -> AppResult<Json<TodayTotals>> {
    let date = util::bill_date();
    let (total_items, total_sales) = bill::totals_for_date(&state.pool, &date).await?;
    Ok(Json(TodayTotals {
        date,
        total_items,
        total_sales,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BillCustomer, BillItemCreate, BillPayment};

    fn payload() -> BillCreate {
        BillCreate {
            customer: BillCustomer::default(),
            items: vec![
                BillItemCreate {
                    name: "Perun Seeragam 100g".to_string(),
                    tamil_name: Some("பெருஞ்சீரகம் 100g".to_string()),
                    quantity: 2.0,
                    unit: None,
                    mrp: 30.0,
                    retail_price: 24.0,
                },
                BillItemCreate {
                    name: "Rice".to_string(),
                    tamil_name: None,
                    quantity: 1.5,
                    unit: Some("kg".to_string()),
                    mrp: 60.0,
                    retail_price: 55.0,
                },
            ],
            payment: BillPayment {
                payment_type: "Cash".to_string(),
                cash_received: 150.0,
            },
        }
    }

    #[test]
    fn test_build_bill_totals() {
        let (bill, items) = build_bill(&payload());

        assert_eq!(bill.total_unique_products, 2);
        assert_eq!(bill.total_items, 3.5);
        // 2*24 + 1.5*55 = 130.5
        assert_eq!(bill.subtotal, 130.5);
        // 2*6 + 1.5*5 = 19.5
        assert_eq!(bill.total_savings, 19.5);
        assert_eq!(bill.cash_balance, 150.0 - 130.5);
        assert_eq!(bill.customer_mobile, "N/A");

        assert_eq!(items.len(), 2);
        // Tamil name preferred on the printed bill
        assert_eq!(items[0].product_name, "பெருஞ்சீரகம் 100g");
        assert_eq!(items[1].unit, "kg");
        assert_eq!(items[1].total_price, 82.5);
    }

    #[test]
    fn test_build_bill_keeps_registered_mobile() {
        let mut p = payload();
        p.customer.mobile = " 9876543210 ".to_string();
        let (bill, _) = build_bill(&p);
        assert_eq!(bill.customer_mobile, "9876543210");
    }

    #[test]
    fn test_receipt_doc_marks_walk_in() {
        let (bill, items) = build_bill(&payload());
        let doc = receipt_doc(&StoreInfo::default(), &bill, &items, WALK_IN_NAME);
        assert!(doc.customer_mobile.is_none());
        assert_eq!(doc.items.len(), 2);
        assert_eq!(pos_layout::format_money(doc.subtotal), "130.50");
    }
}
