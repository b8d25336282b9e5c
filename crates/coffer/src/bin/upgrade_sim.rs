//! # Upgrade Simulator
//!
//! Replays a scripted session of hammer strikes against the in-memory host
//! and prints every reply.
//!
//! Usage: `upgrade_sim [config.toml]`. Without a path the shipped defaults
//! are used and nothing is written to disk.

use coffer::{HammerHit, StoragePlugin};
use coffer_economy::Configuration;
use coffer_shared::memory::MemoryHost;
use coffer_shared::types::{EntityClass, PlayerId, StorageContainer};

const ALICE: PlayerId = PlayerId(76_561_198_000_000_001);
const BOB: PlayerId = PlayerId(76_561_198_000_000_002);
const CAROL: PlayerId = PlayerId(76_561_198_000_000_003);

// Indices into the simulated container list.
const LARGE_BOX: usize = 0;
const FRIDGE: usize = 1;
const FURNACE: usize = 2;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         COFFER UPGRADE SIMULATOR                                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => {
            println!("Loading config: {path}");
            match Configuration::load_or_default(path) {
                Ok(config) => config,
                Err(e) => {
                    println!("Error: Could not load config: {e}");
                    return;
                }
            }
        }
        None => Configuration::default(),
    };

    let host = MemoryHost::new();
    let plugin = StoragePlugin::from_config(config, host.context());

    println!("┌─ PROFILES ───────────────────────────────────────────────────────┐");
    for profile in plugin.resolver().registry().profiles() {
        println!(
            "│ {:<20} +{:<3} {} cost(s)",
            profile.permission(),
            profile.capacity_increase(),
            profile.active_requirements().count()
        );
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    // Alice: basic tier with enough materials for two upgrades
    host.permissions.grant(ALICE, "storageupgrade.basic");
    host.items.set_balance(ALICE, "wood", 250);
    host.items.set_balance(ALICE, "metal.fragments", 200);

    // Bob: vip tier, coins on hand
    host.permissions.grant(BOB, "storageupgrade.vip");
    host.coins.set_balance(BOB, 2500.0);

    let mut containers = [
        StorageContainer::new("box.wooden.large", 30).at([12.0, 4.0, -8.0]),
        StorageContainer::new("fridge.deployed", 44).at([3.0, 4.0, 1.0]),
        StorageContainer::new("furnace", 6).with_class(EntityClass::Oven),
    ];

    let script = [
        ("Alice upgrades the large box", HammerHit::upgrade(ALICE), LARGE_BOX),
        ("Alice upgrades it again", HammerHit::upgrade(ALICE), LARGE_BOX),
        ("Alice is out of materials", HammerHit::upgrade(ALICE), LARGE_BOX),
        ("Alice repairs instead", HammerHit::plain(ALICE), LARGE_BOX),
        ("Bob tops off the fridge", HammerHit::upgrade(BOB), FRIDGE),
        ("Bob tries again", HammerHit::upgrade(BOB), FRIDGE),
        ("Carol hits a furnace", HammerHit::upgrade(CAROL), FURNACE),
    ];

    let mut upgraded = 0usize;
    for (label, hit, index) in script {
        let target = &mut containers[index];
        println!("┌─ {label} ");
        match plugin.on_hammer_hit(hit, target) {
            Some(outcome) => {
                if outcome.is_upgraded() {
                    upgraded += 1;
                }
                println!("│ Outcome: {outcome}");
                println!("│ Reply:   {}", plugin.render(&outcome));
            }
            None => println!("│ Ignored (secondary fire not held)"),
        }
        println!("│ Capacity: {} slots", target.capacity);
        println!("└──────────────────────────────────────────────────────────────────┘");
    }
    println!();

    println!("Upgrades applied:   {upgraded}");
    println!("Effects played:     {}", host.effects.take().len());
    println!("Replies sent:       {}", host.chat.take().len());
    println!(
        "Alice has left:     {} wood, {} metal.fragments",
        host.items.balance_of(ALICE, "wood"),
        host.items.balance_of(ALICE, "metal.fragments")
    );

    plugin.unload();
}
