//! # Profile Registry
//!
//! Owns every bound profile and answers "which profile applies to this
//! player?".
//!
//! ## Lifecycle
//!
//! ```text
//! Configuration ──initialize()──> ProfileRegistry (immutable) ──drop on unload
//! ```
//!
//! `initialize` is the only constructor, so initialization runs exactly once
//! per registry. A reload builds a fresh registry.
//!
//! ## Resolution Order
//!
//! Profiles are checked in the order they appear in the config file. A player
//! holding several profile permissions always gets the first declared one.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use coffer_shared::constants::PLUGIN_NAME;
use coffer_shared::host::{HostContext, PermissionService};
use coffer_shared::types::PlayerId;

use crate::config::Configuration;
use crate::currency::CurrencyBinder;
use crate::profile::UpgradeProfile;
use crate::requirement::CurrencyRequirement;

/// All bound profiles plus the permissions they claimed.
pub struct ProfileRegistry {
    profiles: Vec<UpgradeProfile>,
    claimed: HashSet<String>,
    permissions: Arc<dyn PermissionService>,
}

impl ProfileRegistry {
    /// Binds every configured profile against the host.
    ///
    /// For each profile in declared order:
    /// 1. compute its permission
    /// 2. skip it if an earlier profile already claimed that permission
    /// 3. claim the permission
    /// 4. skip it if it adds no capacity (the claim is kept)
    /// 5. register the permission and bind its costs
    #[must_use]
    pub fn initialize(config: &Configuration, host: &HostContext) -> Self {
        let binder = CurrencyBinder::new(host);
        let mut profiles = Vec::with_capacity(config.profiles.len());
        let mut claimed = HashSet::with_capacity(config.profiles.len());

        for (key, profile_config) in &config.profiles {
            let permission = UpgradeProfile::permission_for(key);
            if !claimed.insert(permission.clone()) {
                tracing::warn!(
                    "Profile '{}' skipped: permission '{}' already claimed",
                    key,
                    permission
                );
                continue;
            }
            if profile_config.capacity_increase == 0 {
                tracing::warn!(
                    "Profile '{}' skipped: capacity_increase must be positive ('{}' stays claimed)",
                    key,
                    permission
                );
                continue;
            }

            host.permissions.register_permission(&permission, PLUGIN_NAME);
            profiles.push(UpgradeProfile::bind(key, profile_config, &binder));
        }

        tracing::info!(
            "Initialized {} upgrade profile(s) from {} configured",
            profiles.len(),
            config.profiles.len()
        );

        Self {
            profiles,
            claimed,
            permissions: host.permissions.clone(),
        }
    }

    /// First profile, in declared order, whose permission the player holds.
    #[must_use]
    pub fn resolve_profile_for_player(&self, player: PlayerId) -> Option<&UpgradeProfile> {
        self.profiles
            .iter()
            .find(|profile| self.permissions.has_permission(player, profile.permission()))
    }

    /// Active requirements of a profile, in declared order.
    #[must_use]
    pub fn active_requirements(profile: &UpgradeProfile) -> Vec<&CurrencyRequirement> {
        profile.active_requirements().collect()
    }

    /// Looks up a bound profile by key.
    #[must_use]
    pub fn profile(&self, key: &str) -> Option<&UpgradeProfile> {
        self.profiles.iter().find(|profile| profile.key() == key)
    }

    /// Bound profiles in declared order.
    #[must_use]
    pub fn profiles(&self) -> &[UpgradeProfile] {
        &self.profiles
    }

    /// True if some profile claimed this permission.
    #[must_use]
    pub fn is_claimed(&self, permission: &str) -> bool {
        self.claimed.contains(permission)
    }
}

impl fmt::Debug for ProfileRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileRegistry")
            .field("profiles", &self.profiles)
            .field("claimed", &self.claimed)
            .finish_non_exhaustive()
    }
}
