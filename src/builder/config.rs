//! Checkout defaults.

use crate::model::{CheckoutDraft, DEFAULT_COUNTRY};
use serde::{Deserialize, Serialize};

/// Defaults applied to every new draft.
///
/// Missing keys fall back to the storefront defaults, so `{}` is a valid
/// configuration.
///
/// # Example
///
/// ```rust
/// use checkout_flow::builder::CheckoutConfig;
///
/// let config = CheckoutConfig::from_json(r#"{ "defaultCountry": "CAN" }"#).unwrap();
/// assert_eq!(config.default_country, "CAN");
/// assert!(config.billing_same_as_shipping);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// Country preset on the shipping address.
    pub default_country: String,
    /// Initial state of the "billing same as shipping" checkbox.
    pub billing_same_as_shipping: bool,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
            billing_same_as_shipping: true,
        }
    }
}

impl CheckoutConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Fresh draft carrying these defaults.
    pub fn new_draft(&self) -> CheckoutDraft {
        CheckoutDraft::new(self.default_country.clone(), self.billing_same_as_shipping)
    }
}
