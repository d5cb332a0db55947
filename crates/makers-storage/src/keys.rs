//! Shared key generation for session stores.
//!
//! Key format: `product-form:{mode}:draft` and `product-form:{mode}:step`, where mode is
//! `create` or `edit:{product_id}`.

use makers_core::models::FormMode;

const PREFIX: &str = "product-form";

/// Key under which the draft for `mode` is stored.
pub fn draft_key(mode: FormMode) -> String {
    format!("{}:{}:draft", PREFIX, mode)
}

/// Key under which the wizard step pointer for `mode` is stored.
pub fn step_key(mode: FormMode) -> String {
    format!("{}:{}:step", PREFIX, mode)
}
