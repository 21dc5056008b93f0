//! Builder API for starting checkout sessions.
//!
//! The builder collects configuration and an optional prefilled draft
//! (for example, a returning customer's saved shipping address) and
//! produces a [`CheckoutSession`] on the shipping step.

mod config;

pub use config::CheckoutConfig;

use crate::machine::CheckoutSession;
use crate::model::CheckoutDraft;
use uuid::Uuid;

/// Fluent builder for [`CheckoutSession`].
///
/// # Example
///
/// ```rust
/// use checkout_flow::builder::CheckoutSessionBuilder;
/// use checkout_flow::machine::CheckoutStep;
///
/// let session = CheckoutSessionBuilder::new()
///     .default_country("CAN")
///     .billing_same_as_shipping(false)
///     .build();
///
/// assert_eq!(session.step(), CheckoutStep::Shipping);
/// assert_eq!(session.draft().shipping.country, "CAN");
/// assert!(!session.draft().same_as_shipping);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CheckoutSessionBuilder {
    config: CheckoutConfig,
    draft: Option<CheckoutDraft>,
    id: Option<Uuid>,
}

impl CheckoutSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: CheckoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn default_country(mut self, country: impl Into<String>) -> Self {
        self.config.default_country = country.into();
        self
    }

    pub fn billing_same_as_shipping(mut self, same: bool) -> Self {
        self.config.billing_same_as_shipping = same;
        self
    }

    /// Start from a prefilled draft instead of the configured defaults.
    pub fn draft(mut self, draft: CheckoutDraft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Use a caller-chosen session id instead of a random one.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn build(self) -> CheckoutSession {
        let draft = self.draft.unwrap_or_else(|| self.config.new_draft());
        CheckoutSession::start(self.id.unwrap_or_else(Uuid::new_v4), draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::CheckoutStep;
    use crate::model::Address;

    #[test]
    fn default_builder_matches_new_session() {
        let session = CheckoutSessionBuilder::new().build();
        assert_eq!(session.draft(), &CheckoutDraft::default());
        assert_eq!(session.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn prefilled_draft_wins_over_config() {
        let draft = CheckoutDraft {
            shipping: Address::with_country("DEU"),
            ..CheckoutDraft::default()
        };

        let session = CheckoutSessionBuilder::new()
            .default_country("FRA")
            .draft(draft.clone())
            .build();

        assert_eq!(session.draft(), &draft);
    }

    #[test]
    fn explicit_id_is_used() {
        let id = Uuid::new_v4();
        let session = CheckoutSessionBuilder::new().id(id).build();
        assert_eq!(session.id(), id);
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let first = CheckoutSessionBuilder::new().build();
        let second = CheckoutSessionBuilder::new().build();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn config_replaces_defaults() {
        let config = CheckoutConfig {
            default_country: "JPN".to_string(),
            billing_same_as_shipping: false,
        };

        let session = CheckoutSessionBuilder::new().config(config).build();

        assert_eq!(session.draft().shipping.country, "JPN");
        assert!(!session.draft().same_as_shipping);
    }
}
