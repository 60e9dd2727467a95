//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity, keyed by mobile number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub mobile: String,
    pub name: String,
    pub address: String,
    pub created_at: String,
}

/// Create/update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpsert {
    pub mobile: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
}
