//! # Upgrade Profiles
//!
//! A bound upgrade tier. Built once by the registry from a [`ProfileConfig`];
//! its permission string never changes afterwards.

use std::collections::HashSet;

use coffer_shared::constants::PLUGIN_NAME;

use crate::config::ProfileConfig;
use crate::currency::CurrencyBinder;
use crate::requirement::CurrencyRequirement;

/// A named upgrade tier.
#[derive(Clone, Debug)]
pub struct UpgradeProfile {
    key: String,
    permission: String,
    enabled: bool,
    capacity_increase: u32,
    eligible_types: HashSet<String>,
    requirements: Vec<CurrencyRequirement>,
}

impl UpgradeProfile {
    /// Permission string for a profile key: `lowercase("<plugin>.<key>")`.
    #[must_use]
    pub fn permission_for(key: &str) -> String {
        format!("{PLUGIN_NAME}.{key}").to_lowercase()
    }

    /// Binds a configured profile.
    #[must_use]
    pub fn bind(key: &str, config: &ProfileConfig, binder: &CurrencyBinder) -> Self {
        Self {
            key: key.to_string(),
            permission: Self::permission_for(key),
            enabled: config.enabled,
            capacity_increase: config.capacity_increase,
            eligible_types: config.eligible_types.iter().cloned().collect(),
            requirements: config
                .costs
                .iter()
                .map(|cost| CurrencyRequirement::bind(cost, binder))
                .collect(),
        }
    }

    /// Profile key as written in the config.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Permission that grants this profile.
    #[inline]
    #[must_use]
    pub fn permission(&self) -> &str {
        &self.permission
    }

    /// Whether the profile may upgrade anything.
    #[inline]
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Slots added per upgrade.
    #[inline]
    #[must_use]
    pub const fn capacity_increase(&self) -> u32 {
        self.capacity_increase
    }

    /// True if the container type is on this profile's allow-list.
    #[must_use]
    pub fn allows(&self, short_name: &str) -> bool {
        self.eligible_types.contains(short_name)
    }

    /// Every requirement, active or not, in declared order.
    #[must_use]
    pub fn requirements(&self) -> &[CurrencyRequirement] {
        &self.requirements
    }

    /// Requirements that will actually be charged, in declared order.
    pub fn active_requirements(&self) -> impl Iterator<Item = &CurrencyRequirement> + '_ {
        self.requirements.iter().filter(|req| req.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostConfig;
    use coffer_shared::memory::MemoryHost;

    #[test]
    fn test_permission_is_lowercased() {
        assert_eq!(UpgradeProfile::permission_for("VIP"), "storageupgrade.vip");
        assert_eq!(UpgradeProfile::permission_for("basic"), "storageupgrade.basic");
    }

    #[test]
    fn test_active_requirements_keep_order() {
        let host = MemoryHost::new();
        let binder = CurrencyBinder::new(&host.context());
        let config = ProfileConfig {
            enabled: true,
            capacity_increase: 3,
            eligible_types: vec!["box.wooden.large".to_string()],
            costs: vec![
                CostConfig::new("scrap", 5),
                CostConfig::new("mystery", 5),
                CostConfig::new("coin", 5).enabled(false),
                CostConfig::new("wood", 5),
                CostConfig::new("point", 5),
            ],
        };

        let profile = UpgradeProfile::bind("tier", &config, &binder);
        let active: Vec<&str> = profile.active_requirements().map(CurrencyRequirement::name).collect();
        assert_eq!(active, ["scrap", "wood", "point"]);
        assert_eq!(profile.requirements().len(), 5);
        assert!(profile.allows("box.wooden.large"));
        assert!(!profile.allows("fridge.deployed"));
    }
}
