//! # Host Collaborators
//!
//! Traits the host game implements so the upgrade core can ask questions
//! without reaching into engine internals.
//!
//! ```text
//! COFFER defines:        Host implements:
//! ┌──────────────────┐   ┌──────────────────┐
//! │ trait Permission │ ← │ impl Permission  │
//! └──────────────────┘   └──────────────────┘
//! ```
//!
//! Every service is handed over explicitly in a [`HostContext`]. Nothing in
//! COFFER keeps a global pointer to the host.

use std::fmt;
use std::sync::Arc;

use crate::types::{EffectAnchor, ItemTypeId, PlayerId};

// ============================================================================
// PERMISSIONS
// ============================================================================

/// The host permission system.
pub trait PermissionService: Send + Sync {
    /// Returns true if the player holds the permission.
    fn has_permission(&self, player: PlayerId, permission: &str) -> bool;

    /// Registers a permission string on behalf of `owner`.
    fn register_permission(&self, permission: &str, owner: &str);
}

// ============================================================================
// EXTERNAL LEDGERS
// ============================================================================

/// An external economy service (coins, reward points).
///
/// Ledgers speak in floating point amounts; conversion to whole units happens
/// in the currency source bound to the ledger.
pub trait ExternalLedger: Send + Sync {
    /// Returns true while the backing service is loaded and callable.
    fn is_loaded(&self) -> bool;

    /// Current balance.
    fn balance(&self, player: PlayerId) -> f64;

    /// Adds funds.
    fn deposit(&self, player: PlayerId, amount: f64);

    /// Removes funds.
    fn withdraw(&self, player: PlayerId, amount: f64);
}

// ============================================================================
// ITEMS
// ============================================================================

/// The host item catalogue and player inventories.
pub trait ItemRegistry: Send + Sync {
    /// Resolves an item short name to its type id.
    fn resolve_item_type(&self, name: &str) -> Option<ItemTypeId>;

    /// Total amount of an item across the player's inventory.
    fn player_item_balance(&self, player: PlayerId, item: ItemTypeId) -> u32;

    /// Gives items to the player.
    fn give_item(&self, player: PlayerId, item: ItemTypeId, amount: u32);

    /// Takes items from the player.
    fn take_item(&self, player: PlayerId, item: ItemTypeId, amount: u32);
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Delivers chat replies to a player.
pub trait ChatSink: Send + Sync {
    /// Sends an already-localized message.
    fn send_reply(&self, player: PlayerId, message: &str);
}

/// Plays visual/audio effects.
pub trait EffectSink: Send + Sync {
    /// Runs an effect prefab at the anchor.
    fn run_effect(&self, prefab: &str, anchor: EffectAnchor);
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Every host service COFFER talks to, bundled for injection.
///
/// Ledgers are optional: a server without the coin or points plugin installed
/// simply leaves the slot empty, and any cost bound to it stays inactive.
#[derive(Clone)]
pub struct HostContext {
    /// Permission system.
    pub permissions: Arc<dyn PermissionService>,
    /// Item catalogue and inventories.
    pub items: Arc<dyn ItemRegistry>,
    /// Coin ledger, if installed.
    pub coins: Option<Arc<dyn ExternalLedger>>,
    /// Reward points ledger, if installed.
    pub points: Option<Arc<dyn ExternalLedger>>,
    /// Chat delivery.
    pub chat: Arc<dyn ChatSink>,
    /// Effect playback.
    pub effects: Arc<dyn EffectSink>,
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("coins", &self.coins.is_some())
            .field("points", &self.points.is_some())
            .finish_non_exhaustive()
    }
}
