//! Bill Model

use serde::{Deserialize, Serialize};

/// Bill header row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Bill {
    pub bill_number: String,
    /// "N/A" marks a walk-in sale with no registered customer
    pub customer_mobile: String,
    /// `dd/mm/YYYY`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    /// Sum of item quantities
    pub total_items: f64,
    pub total_unique_products: i64,
    pub subtotal: f64,
    pub total_savings: f64,
    pub payment_type: String,
    pub cash_received: f64,
    /// Change handed back (negative when short-paid)
    pub cash_balance: f64,
    pub created_at: String,
}

/// Bill line row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BillItem {
    pub id: i64,
    pub bill_number: String,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
    pub mrp: f64,
    pub retail_price: f64,
    pub total_price: f64,
}

/// Item as submitted by the till
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItemCreate {
    pub name: String,
    #[serde(default)]
    pub tamil_name: Option<String>,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    pub mrp: f64,
    pub retail_price: f64,
}

impl BillItemCreate {
    /// Name that goes on the printed bill: Tamil when available.
    pub fn display_name(&self) -> &str {
        match &self.tamil_name {
            Some(t) if !t.is_empty() => t,
            _ => &self.name,
        }
    }
}

/// Customer block of a bill submission (optional; empty mobile = walk-in)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillCustomer {
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Payment block of a bill submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillPayment {
    pub payment_type: String,
    #[serde(default)]
    pub cash_received: f64,
}

/// Create bill payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillCreate {
    #[serde(default)]
    pub customer: BillCustomer,
    pub items: Vec<BillItemCreate>,
    pub payment: BillPayment,
}

/// Transaction summary row for the reporting endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub bill_number: String,
    pub customer_mobile: String,
    pub date: String,
    pub time: String,
    pub total_items: f64,
    pub subtotal: f64,
    pub cash_balance: f64,
    pub payment_type: String,
}
