//! WebAssembly module for the Chocorocks inventory dashboard
//!
//! Runs the same validation in the browser that the data layer re-runs
//! against a fresh snapshot before writing, so forms can reject locally
//! without a round trip. JSON in, JSON out via serde.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::movement::*;
pub use shared::stock::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"chocorocks wasm module initialized".into());
}

/// Today's date from the browser clock
fn browser_today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Validate a movement draft against a stock snapshot
///
/// `draft_json` and `snapshot_json` are the form state and the last fetched
/// snapshot; `batch_json` is the selected batch, when one is in use.
/// Returns the `ValidationOutcome` as JSON.
#[wasm_bindgen]
pub fn validate_movement_draft(
    draft_json: &str,
    snapshot_json: &str,
    batch_json: Option<String>,
) -> Result<String, JsValue> {
    let draft: MovementDraft = serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;
    let snapshot: StockSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid snapshot JSON: {}", e)))?;
    let batch: Option<ProductBatch> = match batch_json.as_deref() {
        Some(json) => Some(
            serde_json::from_str(json)
                .map_err(|e| JsValue::from_str(&format!("Invalid batch JSON: {}", e)))?,
        ),
        None => None,
    };

    let outcome = validate_movement(&draft, &snapshot, batch.as_ref(), browser_today());
    serde_json::to_string(&outcome)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check a batch code field; returns the error message or null when valid
#[wasm_bindgen]
pub fn check_batch_code(code: &str) -> Option<String> {
    validate_batch_code(code).err().map(|msg| msg.to_string())
}

/// Check an initial-quantity field; returns the error message or null
#[wasm_bindgen]
pub fn check_initial_quantity(quantity: i32) -> Option<String> {
    validate_initial_quantity(quantity)
        .err()
        .map(|msg| msg.to_string())
}

/// Whether a batch expiring on `expiration_iso` (YYYY-MM-DD) is already past
#[wasm_bindgen]
pub fn is_expiration_past(expiration_iso: &str) -> bool {
    NaiveDate::parse_from_str(expiration_iso, "%Y-%m-%d")
        .map(|date| date < browser_today())
        .unwrap_or(false)
}

/// Whether a batch expiring on `expiration_iso` falls inside the warning window
#[wasm_bindgen]
pub fn is_expiring_soon(expiration_iso: &str) -> bool {
    let today = browser_today();
    NaiveDate::parse_from_str(expiration_iso, "%Y-%m-%d")
        .map(|date| date >= today && date <= today + chrono::Duration::days(EXPIRY_WARNING_DAYS))
        .unwrap_or(false)
}

/// Format an amount for display as USD
#[wasm_bindgen]
pub fn format_currency(amount: f64) -> String {
    format_usd(Decimal::from_f64_retain(amount).unwrap_or_default())
}
