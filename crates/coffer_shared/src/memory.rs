//! # In-Memory Host
//!
//! Collaborator implementations backed by plain maps. The simulator binary and
//! every test suite run against these instead of a live game server.
//!
//! All state sits behind `parking_lot` locks so the services can be shared as
//! `Arc<dyn Trait>` exactly like the real host hands them out.

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::host::{ChatSink, EffectSink, ExternalLedger, HostContext, ItemRegistry, PermissionService};
use crate::types::{EffectAnchor, ItemTypeId, PlayerId};

// ============================================================================
// PERMISSIONS
// ============================================================================

/// Map-backed permission system.
#[derive(Debug, Default)]
pub struct MemoryPermissions {
    registered: RwLock<Vec<(String, String)>>,
    grants: RwLock<HashMap<PlayerId, HashSet<String>>>,
}

impl MemoryPermissions {
    /// Grants a permission to a player.
    pub fn grant(&self, player: PlayerId, permission: &str) {
        self.grants
            .write()
            .entry(player)
            .or_default()
            .insert(permission.to_lowercase());
    }

    /// Revokes a permission from a player.
    pub fn revoke(&self, player: PlayerId, permission: &str) {
        if let Some(set) = self.grants.write().get_mut(&player) {
            set.remove(&permission.to_lowercase());
        }
    }

    /// Permissions registered so far, in registration order.
    #[must_use]
    pub fn registered(&self) -> Vec<String> {
        self.registered.read().iter().map(|(perm, _)| perm.clone()).collect()
    }

    /// Clears registrations (the host does this when a plugin unloads).
    pub fn clear_registered(&self) {
        self.registered.write().clear();
    }
}

impl PermissionService for MemoryPermissions {
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool {
        self.grants
            .read()
            .get(&player)
            .is_some_and(|set| set.contains(&permission.to_lowercase()))
    }

    fn register_permission(&self, permission: &str, owner: &str) {
        self.registered
            .write()
            .push((permission.to_string(), owner.to_string()));
    }
}

// ============================================================================
// LEDGERS
// ============================================================================

/// Map-backed external ledger.
#[derive(Debug)]
pub struct MemoryLedger {
    loaded: AtomicBool,
    balances: RwLock<HashMap<PlayerId, f64>>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self {
            loaded: AtomicBool::new(true),
            balances: RwLock::new(HashMap::new()),
        }
    }
}

impl MemoryLedger {
    /// Marks the backing service as loaded or unloaded.
    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::Release);
    }

    /// Overwrites a player's balance.
    pub fn set_balance(&self, player: PlayerId, amount: f64) {
        self.balances.write().insert(player, amount);
    }
}

impl ExternalLedger for MemoryLedger {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    fn balance(&self, player: PlayerId) -> f64 {
        self.balances.read().get(&player).copied().unwrap_or(0.0)
    }

    fn deposit(&self, player: PlayerId, amount: f64) {
        *self.balances.write().entry(player).or_insert(0.0) += amount;
    }

    fn withdraw(&self, player: PlayerId, amount: f64) {
        *self.balances.write().entry(player).or_insert(0.0) -= amount;
    }
}

// ============================================================================
// ITEMS
// ============================================================================

/// Map-backed item catalogue and inventories.
#[derive(Debug, Default)]
pub struct MemoryItems {
    definitions: RwLock<HashMap<String, ItemTypeId>>,
    inventories: RwLock<HashMap<(PlayerId, ItemTypeId), u32>>,
}

impl MemoryItems {
    /// Common resources with their live item ids.
    pub const STANDARD_ITEMS: [(&'static str, i32); 5] = [
        ("wood", -151_838_493),
        ("stones", -2_099_697_608),
        ("metal.fragments", 69_511_070),
        ("scrap", -932_201_673),
        ("cloth", -858_312_878),
    ];

    /// Creates a catalogue holding [`Self::STANDARD_ITEMS`].
    #[must_use]
    pub fn with_standard_items() -> Self {
        let items = Self::default();
        for (name, id) in Self::STANDARD_ITEMS {
            items.define(name, ItemTypeId(id));
        }
        items
    }

    /// Adds an item definition.
    pub fn define(&self, name: &str, id: ItemTypeId) {
        self.definitions.write().insert(name.to_string(), id);
    }

    /// Overwrites a player's holdings of a named item.
    ///
    /// Unknown names are ignored.
    pub fn set_balance(&self, player: PlayerId, name: &str, amount: u32) {
        if let Some(id) = self.resolve_item_type(name) {
            self.inventories.write().insert((player, id), amount);
        }
    }

    /// Holdings of a named item (0 for unknown names).
    #[must_use]
    pub fn balance_of(&self, player: PlayerId, name: &str) -> u32 {
        self.resolve_item_type(name)
            .map_or(0, |id| self.player_item_balance(player, id))
    }
}

impl ItemRegistry for MemoryItems {
    fn resolve_item_type(&self, name: &str) -> Option<ItemTypeId> {
        self.definitions.read().get(name).copied()
    }

    fn player_item_balance(&self, player: PlayerId, item: ItemTypeId) -> u32 {
        self.inventories.read().get(&(player, item)).copied().unwrap_or(0)
    }

    fn give_item(&self, player: PlayerId, item: ItemTypeId, amount: u32) {
        let mut inventories = self.inventories.write();
        let held = inventories.entry((player, item)).or_insert(0);
        *held = held.saturating_add(amount);
    }

    fn take_item(&self, player: PlayerId, item: ItemTypeId, amount: u32) {
        let mut inventories = self.inventories.write();
        let held = inventories.entry((player, item)).or_insert(0);
        *held = held.saturating_sub(amount);
    }
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Records every reply instead of delivering it.
#[derive(Debug, Default)]
pub struct MemoryChat {
    messages: Mutex<Vec<(PlayerId, String)>>,
}

impl MemoryChat {
    /// Drains recorded replies.
    #[must_use]
    pub fn take(&self) -> Vec<(PlayerId, String)> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl ChatSink for MemoryChat {
    fn send_reply(&self, player: PlayerId, message: &str) {
        self.messages.lock().push((player, message.to_string()));
    }
}

/// Records every effect instead of playing it.
#[derive(Debug, Default)]
pub struct MemoryEffects {
    played: Mutex<Vec<(String, EffectAnchor)>>,
}

impl MemoryEffects {
    /// Drains recorded effects.
    #[must_use]
    pub fn take(&self) -> Vec<(String, EffectAnchor)> {
        std::mem::take(&mut *self.played.lock())
    }
}

impl EffectSink for MemoryEffects {
    fn run_effect(&self, prefab: &str, anchor: EffectAnchor) {
        self.played.lock().push((prefab.to_string(), anchor));
    }
}

// ============================================================================
// HOST
// ============================================================================

/// A complete in-memory host.
///
/// Keeps typed handles so tests can seed balances and inspect side effects,
/// and hands out a [`HostContext`] of trait objects for the core.
#[derive(Debug)]
pub struct MemoryHost {
    /// Permission system.
    pub permissions: Arc<MemoryPermissions>,
    /// Item catalogue (standard items pre-defined).
    pub items: Arc<MemoryItems>,
    /// Coin ledger.
    pub coins: Arc<MemoryLedger>,
    /// Reward points ledger.
    pub points: Arc<MemoryLedger>,
    /// Recorded replies.
    pub chat: Arc<MemoryChat>,
    /// Recorded effects.
    pub effects: Arc<MemoryEffects>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            permissions: Arc::new(MemoryPermissions::default()),
            items: Arc::new(MemoryItems::with_standard_items()),
            coins: Arc::new(MemoryLedger::default()),
            points: Arc::new(MemoryLedger::default()),
            chat: Arc::new(MemoryChat::default()),
            effects: Arc::new(MemoryEffects::default()),
        }
    }
}

impl MemoryHost {
    /// Creates a host with both ledgers installed and loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with both ledgers installed.
    #[must_use]
    pub fn context(&self) -> HostContext {
        HostContext {
            permissions: self.permissions.clone(),
            items: self.items.clone(),
            coins: Some(self.coins.clone()),
            points: Some(self.points.clone()),
            chat: self.chat.clone(),
            effects: self.effects.clone(),
        }
    }

    /// Context for a server with neither ledger plugin installed.
    #[must_use]
    pub fn context_without_ledgers(&self) -> HostContext {
        HostContext {
            coins: None,
            points: None,
            ..self.context()
        }
    }
}
