//! Benchmark for the upgrade resolver pass.
//!
//! Run with: cargo bench --package coffer_economy --bench resolver_benchmark

// criterion_group! emits an undocumented `pub fn benches`.
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use coffer_economy::{Configuration, CostConfig, ProfileConfig, UpgradeResolver};
use coffer_shared::memory::MemoryHost;
use coffer_shared::types::{PlayerId, StorageContainer};

const PLAYER: PlayerId = PlayerId(1);
const BOX: &str = "box.wooden.large";

fn create_test_config() -> Configuration {
    let mut config = Configuration::default();

    // 50 tiers ahead of the shipped ones so resolution walks the whole list
    for i in 0..50u32 {
        config.profiles.insert(
            0,
            (
                format!("tier_{i}"),
                ProfileConfig {
                    enabled: true,
                    capacity_increase: (i % 6) + 1,
                    eligible_types: vec![BOX.to_string()],
                    costs: vec![CostConfig::new("wood", 10), CostConfig::new("coin", 5)],
                },
            ),
        );
    }

    config
}

fn benchmark_resolve_profile(c: &mut Criterion) {
    let host = MemoryHost::new();
    let resolver = UpgradeResolver::new(&create_test_config(), &host.context());
    host.permissions.grant(PLAYER, "storageupgrade.vip");

    c.bench_function("resolve_profile_52_profiles", |b| {
        b.iter(|| black_box(resolver.registry().resolve_profile_for_player(PLAYER)));
    });
}

fn benchmark_insufficient_funds(c: &mut Criterion) {
    let host = MemoryHost::new();
    let resolver = UpgradeResolver::new(&create_test_config(), &host.context());
    host.permissions.grant(PLAYER, "storageupgrade.basic");

    c.bench_function("upgrade_attempt_insufficient", |b| {
        let mut container = StorageContainer::new(BOX, 10);
        b.iter(|| black_box(resolver.on_upgrade_attempt(PLAYER, &mut container)));
    });
}

fn benchmark_full_upgrade(c: &mut Criterion) {
    let host = MemoryHost::new();
    let resolver = UpgradeResolver::new(&create_test_config(), &host.context());
    host.permissions.grant(PLAYER, "storageupgrade.basic");

    c.bench_function("upgrade_attempt_settled", |b| {
        b.iter(|| {
            host.items.set_balance(PLAYER, "wood", 100);
            host.items.set_balance(PLAYER, "metal.fragments", 100);
            let mut container = StorageContainer::new(BOX, 10);
            black_box(resolver.on_upgrade_attempt(PLAYER, &mut container))
        });
    });
}

criterion_group!(
    benches,
    benchmark_resolve_profile,
    benchmark_insufficient_funds,
    benchmark_full_upgrade
);
criterion_main!(benches);
