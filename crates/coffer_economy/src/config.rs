//! # Configuration
//!
//! The TOML document the server operator edits. Parsed as plain data; nothing
//! here touches the host. Binding happens later in
//! [`crate::registry::ProfileRegistry::initialize`].
//!
//! ```toml
//! version = "2.1.0"
//! non_upgradeable_types = ["vending.machine", "furnace"]
//!
//! [profiles.basic]
//! enabled = true
//! capacity_increase = 2
//! eligible_types = ["box.wooden.large"]
//! costs = [
//!     { name = "wood", enabled = true, amount = 100 },
//!     { name = "metal.fragments", enabled = true, amount = 100 },
//! ]
//! ```
//!
//! Profiles keep the order they appear in the document.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use coffer_shared::constants::{CONFIG_VERSION, MIN_CONFIG_VERSION};

use crate::error::{CofferError, CofferResult};

/// One entry of a profile's upgrade cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Currency name: an item short name, or anything containing `coin` or
    /// `point` for the external ledgers.
    pub name: String,
    /// Disabled costs are never charged.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Amount charged per upgrade.
    #[serde(default)]
    pub amount: u32,
}

impl CostConfig {
    /// Creates an enabled cost.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            amount,
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// One upgrade tier as written in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Disabled profiles still claim their permission but never upgrade.
    pub enabled: bool,
    /// Slots added per upgrade. Profiles with 0 are skipped at init.
    pub capacity_increase: u32,
    /// Container short names this profile may upgrade.
    pub eligible_types: Vec<String>,
    /// Cost of one upgrade, charged in order.
    pub costs: Vec<CostConfig>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity_increase: 0,
            eligible_types: Vec::new(),
            costs: Vec::new(),
        }
    }
}

/// The whole config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Version that last wrote this file.
    #[serde(default)]
    pub version: String,
    /// Container short names that can never be upgraded.
    #[serde(default)]
    pub non_upgradeable_types: Vec<String>,
    /// Profiles keyed by name, in document order.
    #[serde(default, with = "ordered_profiles")]
    pub profiles: Vec<(String, ProfileConfig)>,
}

fn default_true() -> bool {
    true
}

/// Containers shipped as never-upgradeable.
const DEFAULT_NON_UPGRADEABLE: [&str; 19] = [
    "vending.machine",
    "furnace",
    "furnace.large",
    "legacyfurnace",
    "electric.igniter",
    "workbench1",
    "workbench2",
    "workbench3",
    "box.repair.bench",
    "research.table",
    "campfire",
    "water.barrel",
    "fishtrophy",
    "huntingtrophylarge",
    "skull.trophy",
    "huntingtrophysmall",
    "small.oil.refinery",
    "recycler_static",
    "dropbox",
];

/// Containers the shipped profiles may upgrade.
const DEFAULT_ELIGIBLE: [&str; 10] = [
    "planter.large.deployed",
    "railroadplanter.deployed",
    "bathtub.planter.deployed",
    "planter.small.deployed",
    "minecart.planter.deployed",
    "fridge.deployed",
    "composter",
    "box.wooden.large",
    "woodbox_deployed",
    "small_stash_deployed",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|&s| s.to_string()).collect()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            non_upgradeable_types: owned(&DEFAULT_NON_UPGRADEABLE),
            profiles: vec![
                (
                    "basic".to_string(),
                    ProfileConfig {
                        enabled: true,
                        capacity_increase: 2,
                        eligible_types: owned(&DEFAULT_ELIGIBLE),
                        costs: vec![
                            CostConfig::new("wood", 100),
                            CostConfig::new("metal.fragments", 100),
                        ],
                    },
                ),
                (
                    "vip".to_string(),
                    ProfileConfig {
                        enabled: true,
                        capacity_increase: 6,
                        eligible_types: owned(&DEFAULT_ELIGIBLE),
                        costs: vec![
                            CostConfig::new("coin", 1000).enabled(false),
                            CostConfig::new("point", 1000).enabled(false),
                        ],
                    },
                ),
            ],
        }
    }
}

impl Configuration {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the text is not valid TOML for this schema.
    pub fn from_toml_str(text: &str) -> CofferResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigSerialize` if the config cannot be represented.
    pub fn to_toml_string(&self) -> CofferResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads the config file, creating it from defaults if missing.
    ///
    /// Files written by an older version are upgraded and saved back.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read or written
    /// - `ConfigParse` if the file is not valid TOML for this schema
    pub fn load_or_default(path: impl AsRef<Path>) -> CofferResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Config {} not found, writing defaults", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let text = fs::read_to_string(path).map_err(|source| CofferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if config.upgrade_version() {
            config.save(path)?;
        }

        Ok(config)
    }

    /// Writes the config file, creating parent directories.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be written
    /// - `ConfigSerialize` if the config cannot be represented
    pub fn save(&self, path: impl AsRef<Path>) -> CofferResult<()> {
        let path = path.as_ref();
        let io_error = |source| CofferError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, self.to_toml_string()?).map_err(io_error)
    }

    /// Brings a config written by an older version up to date.
    ///
    /// Versions below the oldest understood layout are replaced by defaults.
    /// Returns true if anything changed.
    pub fn upgrade_version(&mut self) -> bool {
        if compare_versions(&self.version, CONFIG_VERSION) != Ordering::Less {
            return false;
        }

        tracing::warn!("Config changes detected! Updating...");
        let previous = std::mem::take(&mut self.version);

        if compare_versions(&previous, MIN_CONFIG_VERSION) == Ordering::Less {
            *self = Self::default();
        }

        self.version = CONFIG_VERSION.to_string();
        tracing::warn!(
            "Config update complete! Updated from version {} to {}",
            if previous.is_empty() { "<none>" } else { previous.as_str() },
            CONFIG_VERSION
        );
        true
    }

    /// Looks up a profile by key.
    #[must_use]
    pub fn profile(&self, key: &str) -> Option<&ProfileConfig> {
        self.profiles
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, profile)| profile)
    }

    /// Mutable lookup of a profile by key.
    pub fn profile_mut(&mut self, key: &str) -> Option<&mut ProfileConfig> {
        self.profiles
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, profile)| profile)
    }
}

/// Compares dotted numeric versions. Missing or non-numeric parts count as 0.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u32> {
        v.trim()
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };

    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// Serde adapter that reads a TOML table into an ordered list of entries.
///
/// A profile whose body does not fit [`ProfileConfig`] is dropped with a
/// warning; the rest of the file still loads.
mod ordered_profiles {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt;

    use super::ProfileConfig;

    pub fn serialize<S: Serializer>(
        profiles: &[(String, ProfileConfig)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(profiles.len()))?;
        for (key, profile) in profiles {
            map.serialize_entry(key, profile)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, ProfileConfig)>, D::Error> {
        struct ProfilesVisitor;

        impl<'de> Visitor<'de> for ProfilesVisitor {
            type Value = Vec<(String, ProfileConfig)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of upgrade profiles")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut profiles = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, toml::Value>()? {
                    match ProfileConfig::deserialize(value) {
                        Ok(profile) => profiles.push((key, profile)),
                        Err(e) => {
                            tracing::warn!("Profile '{}' skipped: unparseable ({})", key, e);
                        }
                    }
                }
                Ok(profiles)
            }
        }

        deserializer.deserialize_map(ProfilesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let config = Configuration::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.non_upgradeable_types.len(), 19);

        let basic = config.profile("basic").unwrap();
        assert_eq!(basic.capacity_increase, 2);
        assert_eq!(basic.costs[0], CostConfig::new("wood", 100));
        assert_eq!(basic.costs[1], CostConfig::new("metal.fragments", 100));

        let vip = config.profile("vip").unwrap();
        assert_eq!(vip.capacity_increase, 6);
        assert!(vip.costs.iter().all(|cost| !cost.enabled));
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let text = r#"
            version = "2.1.0"
            non_upgradeable_types = ["furnace"]

            [profiles.zeta]
            capacity_increase = 4
            eligible_types = ["box.wooden.large"]

            [profiles.alpha]
            capacity_increase = 2
            eligible_types = ["box.wooden.large"]
            costs = [{ name = "wood", amount = 50 }]

            [profiles.mid]
            enabled = false
            capacity_increase = 1
        "#;

        let config = Configuration::from_toml_str(text).unwrap();
        let keys: Vec<&str> = config.profiles.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let alpha = config.profile("alpha").unwrap();
        assert!(alpha.enabled, "enabled defaults to true");
        assert_eq!(alpha.costs, vec![CostConfig::new("wood", 50)]);
        assert!(!config.profile("mid").unwrap().enabled);
    }

    #[test]
    fn test_toml_round_trip_preserves_order() {
        let mut config = Configuration::default();
        config.profiles.reverse();

        let text = config.to_toml_string().unwrap();
        let parsed = Configuration::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.profiles[0].0, "vip");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let result = Configuration::from_toml_str("profiles = 5");
        assert!(matches!(result, Err(CofferError::ConfigParse(_))));
    }

    #[test]
    fn test_unparseable_profile_is_skipped() {
        let text = r#"
            version = "2.1.0"

            [profiles.good]
            capacity_increase = 2
            eligible_types = ["box.wooden.large"]

            [profiles.bad]
            capacity_increase = -3

            [profiles.worse]
            costs = "wood"
        "#;

        let config = Configuration::from_toml_str(text).unwrap();
        let keys: Vec<&str> = config.profiles.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["good"]);
        assert_eq!(config.profile("good").unwrap().capacity_increase, 2);
    }

    #[test]
    fn test_version_upgrade_keeps_profiles() {
        let mut config = Configuration::default();
        config.version = "1.5.1".to_string();
        config.profile_mut("basic").unwrap().capacity_increase = 9;

        assert!(config.upgrade_version());
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.profile("basic").unwrap().capacity_increase, 9);
    }

    #[test]
    fn test_ancient_version_resets_to_defaults() {
        let mut config = Configuration {
            version: "0.9.0".to_string(),
            non_upgradeable_types: Vec::new(),
            profiles: Vec::new(),
        };

        assert!(config.upgrade_version());
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_current_version_is_untouched() {
        let mut config = Configuration::default();
        assert!(!config.upgrade_version());

        config.version = "3.0.0".to_string();
        assert!(!config.upgrade_version());
        assert_eq!(config.version, "3.0.0");
    }

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("2.1.0", "2.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("2.1", "2.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.10.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("", "1.0.0"), Ordering::Less);
    }
}
