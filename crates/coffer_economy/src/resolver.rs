//! # Upgrade Resolver
//!
//! Turns one hammer strike into one [`UpgradeOutcome`].
//!
//! ## Pipeline
//!
//! Strictly sequential, the first failing step ends the pass:
//!
//! 1. **Target** - storage, not excluded, not an oven
//! 2. **Eligibility** - profile resolved, enabled, container type allowed
//! 3. **Ceiling** - capacity below [`MAX_CAPACITY`]
//! 4. **Affordability** - every active cost, declared order
//! 5. **Settlement** - deduct every active cost, same order
//! 6. **Mutation** - `min(capacity + increase, MAX_CAPACITY)`
//!
//! ## Payment Model
//!
//! Affordability is checked for every cost before anything is deducted, so a
//! failed strike leaves all balances untouched. This is check-then-act, not a
//! reservation: an external ledger that changes between steps 4 and 5 (another
//! plugin spending the same coins) can be over-drawn. Strikes are handled one
//! at a time on the server thread, so in-process state never races.

use std::collections::HashSet;
use std::fmt;

use coffer_shared::constants::MAX_CAPACITY;
use coffer_shared::host::HostContext;
use coffer_shared::lang::MessageKey;
use coffer_shared::types::{EntityClass, PlayerId, StorageTarget};

use crate::config::Configuration;
use crate::profile::UpgradeProfile;
use crate::registry::ProfileRegistry;

/// Result of one upgrade attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Not storage, globally excluded, or an oven.
    NotUpgradeable,
    /// No profile applies, the profile is disabled, or it does not cover this
    /// container type.
    NoPermissionOrIneligible,
    /// Capacity is already at the ceiling.
    AlreadyMaxCapacity,
    /// The first active cost the player cannot cover.
    InsufficientFunds {
        /// Amount still missing.
        shortfall: u32,
        /// Configured currency name.
        currency_name: String,
    },
    /// Capacity was raised.
    Upgraded {
        /// Capacity before the strike.
        old_capacity: u32,
        /// Capacity after the strike.
        new_capacity: u32,
    },
}

impl UpgradeOutcome {
    /// Reply message for this outcome.
    #[must_use]
    pub const fn message_key(&self) -> MessageKey {
        match self {
            Self::NotUpgradeable => MessageKey::CannotUpgrade,
            Self::NoPermissionOrIneligible => MessageKey::NoPermissionOrCannotUpgrade,
            Self::AlreadyMaxCapacity => MessageKey::AlreadyAtMaxCapacity,
            Self::InsufficientFunds { .. } => MessageKey::NeedMoreToUpgrade,
            Self::Upgraded { .. } => MessageKey::UpgradedFromTo,
        }
    }

    /// Positional arguments for the reply template.
    #[must_use]
    pub fn message_args(&self) -> Vec<String> {
        match self {
            Self::InsufficientFunds {
                shortfall,
                currency_name,
            } => vec![shortfall.to_string(), currency_name.clone()],
            Self::Upgraded {
                old_capacity,
                new_capacity,
            } => vec![old_capacity.to_string(), new_capacity.to_string()],
            _ => Vec::new(),
        }
    }

    /// True if the container was upgraded.
    #[inline]
    #[must_use]
    pub const fn is_upgraded(&self) -> bool {
        matches!(self, Self::Upgraded { .. })
    }
}

impl fmt::Display for UpgradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUpgradeable => f.write_str("not upgradeable"),
            Self::NoPermissionOrIneligible => f.write_str("no permission or ineligible"),
            Self::AlreadyMaxCapacity => f.write_str("already at max capacity"),
            Self::InsufficientFunds {
                shortfall,
                currency_name,
            } => write!(f, "insufficient funds: {shortfall} more {currency_name}"),
            Self::Upgraded {
                old_capacity,
                new_capacity,
            } => write!(f, "upgraded {old_capacity} -> {new_capacity}"),
        }
    }
}

/// Runs the upgrade pipeline against a bound registry.
#[derive(Debug)]
pub struct UpgradeResolver {
    registry: ProfileRegistry,
    excluded: HashSet<String>,
}

impl UpgradeResolver {
    /// Initializes the registry and captures the exclusion list.
    #[must_use]
    pub fn new(config: &Configuration, host: &HostContext) -> Self {
        Self::with_registry(
            ProfileRegistry::initialize(config, host),
            config.non_upgradeable_types.iter().cloned(),
        )
    }

    /// Builds a resolver over an already-initialized registry.
    #[must_use]
    pub fn with_registry(registry: ProfileRegistry, excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            registry,
            excluded: excluded.into_iter().collect(),
        }
    }

    /// The bound registry.
    #[must_use]
    pub const fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// True if the container type is on the global exclusion list.
    #[must_use]
    pub fn is_excluded(&self, short_name: &str) -> bool {
        self.excluded.contains(short_name)
    }

    /// Resolves one strike by `player` on `target`.
    ///
    /// On `Upgraded`, every active cost has been deducted and the target's
    /// capacity rewritten. On any other outcome nothing changed.
    pub fn on_upgrade_attempt<T>(&self, player: PlayerId, target: &mut T) -> UpgradeOutcome
    where
        T: StorageTarget + ?Sized,
    {
        if !self.validate_target(target) {
            tracing::debug!("Player {} struck non-upgradeable {}", player, target.short_name());
            return UpgradeOutcome::NotUpgradeable;
        }

        let Some(profile) = self.eligible_profile(player, target.short_name()) else {
            tracing::debug!("Player {} has no profile covering {}", player, target.short_name());
            return UpgradeOutcome::NoPermissionOrIneligible;
        };

        let old_capacity = target.capacity();
        if old_capacity >= MAX_CAPACITY {
            return UpgradeOutcome::AlreadyMaxCapacity;
        }

        let costs = ProfileRegistry::active_requirements(profile);

        if let Some((shortfall, currency_name)) = costs
            .iter()
            .find_map(|req| req.shortfall(player).map(|missing| (missing, req.name())))
        {
            tracing::debug!(
                "Player {} short {} {} for profile '{}'",
                player,
                shortfall,
                currency_name,
                profile.key()
            );
            return UpgradeOutcome::InsufficientFunds {
                shortfall,
                currency_name: currency_name.to_string(),
            };
        }

        for req in &costs {
            req.settle(player);
        }

        let new_capacity = old_capacity
            .saturating_add(profile.capacity_increase())
            .min(MAX_CAPACITY);
        target.set_capacity(new_capacity);

        tracing::info!(
            "Player {} upgraded {} from {} to {} slots (profile '{}')",
            player,
            target.short_name(),
            old_capacity,
            new_capacity,
            profile.key()
        );

        UpgradeOutcome::Upgraded {
            old_capacity,
            new_capacity,
        }
    }

    /// Storage class, not excluded, not an oven.
    fn validate_target<T: StorageTarget + ?Sized>(&self, target: &T) -> bool {
        target.class() == EntityClass::Storage && !self.is_excluded(target.short_name())
    }

    /// Profile for the player, if enabled and covering the container type.
    fn eligible_profile(&self, player: PlayerId, short_name: &str) -> Option<&UpgradeProfile> {
        self.registry
            .resolve_profile_for_player(player)
            .filter(|profile| profile.enabled() && profile.allows(short_name))
    }
}
