//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `barcode` is the primary key: a server-generated short id encoded into
/// the printed Code 128 symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub barcode: String,
    pub name: String,
    /// Tamil display name; falls back to `name` when the caller supplies none
    pub tamil_name: String,
    pub created_at: String,
    /// Unit of measure printed on labels (e.g. "KG", "100g")
    pub measure: String,
    pub quantity: f64,
    pub mrp: f64,
    pub retail_price: f64,
}

impl Product {
    /// Name preferred for receipts: Tamil when present, English otherwise.
    pub fn display_name(&self) -> &str {
        if self.tamil_name.is_empty() {
            &self.name
        } else {
            &self.tamil_name
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub tamil_name: Option<String>,
    pub measure: String,
    pub quantity: f64,
    pub mrp: f64,
    pub retail_price: f64,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub tamil_name: Option<String>,
    pub measure: Option<String>,
    pub quantity: Option<f64>,
    pub mrp: Option<f64>,
    pub retail_price: Option<f64>,
}
