//! Small shared utilities: timestamps, barcode ids, bill numbers.

use base64::Engine;

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Local timestamp formatted for persistence (`YYYY-MM-DD HH:MM:SS`).
pub fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Generate a short barcode id: base64url-encoded UUIDv4 bytes.
///
/// 22 characters instead of the 36-character hyphenated form, which keeps
/// Code 128 symbols narrow enough for 40mm labels.
pub fn short_barcode_id() -> String {
    let u = uuid::Uuid::new_v4();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(u.as_bytes())
}

/// Generate a bill number from the current local time: `INV<YYYYmmddHHMMSS>`.
pub fn bill_number() -> String {
    format!("INV{}", chrono::Local::now().format("%Y%m%d%H%M%S"))
}

/// Bill date as printed on receipts (`dd/mm/YYYY`).
pub fn bill_date() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

/// Bill time as printed on receipts (`HH:MM:SS`).
pub fn bill_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Month key used for monthly transaction queries (`mm/YYYY`).
pub fn month_key() -> String {
    chrono::Local::now().format("%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_barcode_id_length() {
        let id = short_barcode_id();
        assert_eq!(id.len(), 22);
        assert!(!id.contains('='));
    }

    #[test]
    fn test_short_barcode_ids_unique() {
        assert_ne!(short_barcode_id(), short_barcode_id());
    }

    #[test]
    fn test_bill_number_shape() {
        let n = bill_number();
        assert!(n.starts_with("INV"));
        assert_eq!(n.len(), 3 + 14);
    }
}
