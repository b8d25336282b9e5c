//! Integration test for the plugin lifecycle: load, strike, reload, unload.

use coffer::{HammerHit, StoragePlugin};
use coffer_economy::{Configuration, CostConfig, UpgradeOutcome};
use coffer_shared::lang::MessageKey;
use coffer_shared::memory::MemoryHost;
use coffer_shared::types::{PlayerId, StorageContainer};
use coffer_shared::CONFIG_VERSION;

const PLAYER: PlayerId = PlayerId(76_561_198_000_000_042);

fn temp_config_path(tag: &str) -> std::path::PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!("coffer_{tag}_{id}"))
        .join("StorageUpgrade.toml")
}

#[test]
fn test_load_writes_default_config() {
    let path = temp_config_path("defaults");
    let host = MemoryHost::new();

    let plugin = StoragePlugin::load(&path, host.context()).unwrap();
    assert!(path.exists());
    assert_eq!(plugin.config(), &Configuration::default());
    assert_eq!(
        host.permissions.registered(),
        ["storageupgrade.basic", "storageupgrade.vip"]
    );

    // A second load reads the file back unchanged.
    let reloaded = Configuration::load_or_default(&path).unwrap();
    assert_eq!(&reloaded, plugin.config());

    plugin.unload();
    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_load_upgrades_old_config_file() {
    let path = temp_config_path("upgrade");
    let mut old = Configuration::default();
    old.version = "1.5.1".to_string();
    old.profile_mut("basic").unwrap().capacity_increase = 4;
    old.save(&path).unwrap();

    let host = MemoryHost::new();
    let plugin = StoragePlugin::load(&path, host.context()).unwrap();
    assert_eq!(plugin.config().version, CONFIG_VERSION);
    assert_eq!(plugin.config().profile("basic").unwrap().capacity_increase, 4);

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains(CONFIG_VERSION));

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_load_rejects_malformed_file() {
    let path = temp_config_path("malformed");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "non_upgradeable_types = \"furnace\"").unwrap();

    let host = MemoryHost::new();
    assert!(StoragePlugin::load(&path, host.context()).is_err());

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_load_skips_unparseable_profile() {
    let path = temp_config_path("badprofile");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        format!(
            r#"
version = "{CONFIG_VERSION}"

[profiles.good]
capacity_increase = 2
eligible_types = ["box.wooden.large"]

[profiles.bad]
capacity_increase = -3
eligible_types = ["box.wooden.large"]
"#
        ),
    )
    .unwrap();

    let host = MemoryHost::new();
    let plugin = StoragePlugin::load(&path, host.context()).unwrap();
    assert_eq!(host.permissions.registered(), ["storageupgrade.good"]);

    host.permissions.grant(PLAYER, "storageupgrade.good");
    let mut container = StorageContainer::new("box.wooden.large", 10);
    let outcome = plugin.on_hammer_hit(HammerHit::upgrade(PLAYER), &mut container);
    assert_eq!(
        outcome,
        Some(UpgradeOutcome::Upgraded {
            old_capacity: 10,
            new_capacity: 12
        })
    );

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[test]
fn test_reload_rebinds_costs() {
    let host = MemoryHost::new();
    let mut plugin = StoragePlugin::from_config(Configuration::default(), host.context());
    host.permissions.grant(PLAYER, "storageupgrade.vip");
    host.coins.set_balance(PLAYER, 400.0);

    // vip ships free (ledger costs disabled)
    let mut container = StorageContainer::new("box.wooden.large", 12);
    let outcome = plugin.on_hammer_hit(HammerHit::upgrade(PLAYER), &mut container);
    assert!(outcome.unwrap().is_upgraded());

    let mut config = plugin.config().clone();
    config.profile_mut("vip").unwrap().costs = vec![CostConfig::new("coin", 1000)];
    plugin.reload(config);

    let outcome = plugin.on_hammer_hit(HammerHit::upgrade(PLAYER), &mut container);
    assert_eq!(
        outcome,
        Some(UpgradeOutcome::InsufficientFunds {
            shortfall: 600,
            currency_name: "coin".to_string()
        })
    );
    assert_eq!(container.capacity, 18);

    let replies = host.chat.take();
    assert_eq!(
        replies.last().unwrap().1,
        "You need <color=#FFA500>600</color> more <color=#FFA500>coin</color> to upgrade."
    );
}

#[test]
fn test_replies_in_registered_language() {
    let host = MemoryHost::new();
    let mut plugin =
        StoragePlugin::from_config(Configuration::default(), host.context()).with_language("es");
    plugin
        .messages_mut()
        .register("es", [(MessageKey::AlreadyAtMaxCapacity, "Este contenedor ya está al máximo.")]);
    host.permissions.grant(PLAYER, "storageupgrade.basic");

    let mut full = StorageContainer::new("box.wooden.large", 48);
    plugin.on_hammer_hit(HammerHit::upgrade(PLAYER), &mut full);

    let mut locked = StorageContainer::new("locker.deployed", 10);
    plugin.on_hammer_hit(HammerHit::upgrade(PLAYER), &mut locked);

    let replies: Vec<String> = host.chat.take().into_iter().map(|(_, text)| text).collect();
    assert_eq!(
        replies,
        [
            "Este contenedor ya está al máximo.",
            "You don't have permission or this container cannot be upgraded.",
        ]
    );
}

#[test]
fn test_sample_config_resolves_vip_first() {
    let config = Configuration::from_toml_str(include_str!("../data/StorageUpgrade.toml")).unwrap();
    assert_eq!(config.version, CONFIG_VERSION);

    let host = MemoryHost::new();
    let plugin = StoragePlugin::from_config(config, host.context());
    host.permissions.grant(PLAYER, "storageupgrade.basic");
    host.permissions.grant(PLAYER, "storageupgrade.vip");

    let profile = plugin
        .resolver()
        .registry()
        .resolve_profile_for_player(PLAYER)
        .unwrap();
    assert_eq!(profile.key(), "vip");
    assert_eq!(profile.active_requirements().count(), 1);
}
