//! # Currency Requirements
//!
//! A configured cost after binding: name, amount, enabled flag and the source
//! it resolved to. Immutable once built.

use coffer_shared::types::PlayerId;

use crate::config::CostConfig;
use crate::currency::{BoundSource, CurrencyBinder};

/// One bound entry of a profile's cost list.
#[derive(Clone, Debug)]
pub struct CurrencyRequirement {
    name: String,
    enabled: bool,
    amount: u32,
    source: BoundSource,
}

impl CurrencyRequirement {
    /// Binds a configured cost.
    #[must_use]
    pub fn bind(cost: &CostConfig, binder: &CurrencyBinder) -> Self {
        let source = binder.bind(&cost.name);
        if matches!(source, BoundSource::Unbound) {
            tracing::warn!(
                "Currency '{}' matches no ledger or item; the cost will never be charged",
                cost.name
            );
        }

        Self {
            name: cost.name.clone(),
            enabled: cost.enabled,
            amount: cost.amount,
            source,
        }
    }

    /// Configured currency name (shown to players on shortfall).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured enabled flag.
    #[inline]
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Amount charged per upgrade.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// The bound source.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &BoundSource {
        &self.source
    }

    /// Enabled, bound, and the source is usable right now.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.source.is_valid()
    }

    /// How much the player is missing, or `None` if they can pay.
    ///
    /// Unbound requirements report `None`; callers only ask active ones.
    #[must_use]
    pub fn shortfall(&self, player: PlayerId) -> Option<u32> {
        let source = self.source.as_source()?;
        let balance = source.balance(player);
        (balance < self.amount).then(|| self.amount - balance)
    }

    /// Deducts the amount. Caller has already checked [`Self::shortfall`].
    pub fn settle(&self, player: PlayerId) {
        if let Some(source) = self.source.as_source() {
            source.deduct(player, self.amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_shared::memory::MemoryHost;

    const PLAYER: PlayerId = PlayerId(11);

    #[test]
    fn test_active_requires_enabled_and_valid() {
        let host = MemoryHost::new();
        let binder = CurrencyBinder::new(&host.context());

        assert!(CurrencyRequirement::bind(&CostConfig::new("wood", 10), &binder).is_active());
        assert!(!CurrencyRequirement::bind(&CostConfig::new("wood", 10).enabled(false), &binder).is_active());
        assert!(!CurrencyRequirement::bind(&CostConfig::new("unobtainium", 10), &binder).is_active());

        let points = CurrencyRequirement::bind(&CostConfig::new("point", 10), &binder);
        assert!(points.is_active());
        host.points.set_loaded(false);
        assert!(!points.is_active());
    }

    #[test]
    fn test_shortfall() {
        let host = MemoryHost::new();
        host.items.set_balance(PLAYER, "metal.fragments", 50);
        let binder = CurrencyBinder::new(&host.context());

        let req = CurrencyRequirement::bind(&CostConfig::new("metal.fragments", 100), &binder);
        assert_eq!(req.shortfall(PLAYER), Some(50));

        host.items.set_balance(PLAYER, "metal.fragments", 100);
        assert_eq!(req.shortfall(PLAYER), None);
    }

    #[test]
    fn test_settle_deducts_amount() {
        let host = MemoryHost::new();
        host.coins.set_balance(PLAYER, 1500.0);
        let binder = CurrencyBinder::new(&host.context());

        let req = CurrencyRequirement::bind(&CostConfig::new("coin", 1000), &binder);
        req.settle(PLAYER);
        assert_eq!(req.source().as_source().unwrap().balance(PLAYER), 500);
    }

    #[test]
    fn test_zero_amount_is_always_affordable() {
        let host = MemoryHost::new();
        let binder = CurrencyBinder::new(&host.context());
        let req = CurrencyRequirement::bind(&CostConfig::new("scrap", 0), &binder);
        assert_eq!(req.shortfall(PLAYER), None);
    }
}
