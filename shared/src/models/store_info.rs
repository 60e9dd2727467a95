//! Store identity printed on receipts and labels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub phone: String,
    pub gst: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "SRI VELAVAN SUPERMARKET".to_string(),
            address_line1: "2/136A, Pillaiyar Koil Street".to_string(),
            address_line2: "A.Kottarakuppam, Virudhachalam".to_string(),
            phone: "9626475471".to_string(),
            gst: "33FLEPM3791Q1ZD".to_string(),
        }
    }
}
