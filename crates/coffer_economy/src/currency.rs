//! # Currency Sources
//!
//! One contract over every balance-bearing store a cost can be paid from:
//!
//! | Variant | Backing store | Valid when |
//! |---------|---------------|------------|
//! | Item    | player inventory, one item type | the item name resolved at bind time |
//! | Coin    | external coin ledger  | the ledger is installed and loaded |
//! | Point   | external reward ledger | the ledger is installed and loaded |
//!
//! Ledger sources exist once per [`CurrencyBinder`] and are shared by every
//! cost bound to them. Item sources are owned by a single requirement.
//!
//! ## Binding
//!
//! ```text
//! "coin" in name  -> Coin
//! "point" in name -> Point
//! item name       -> Item(resolved id)
//! otherwise       -> Unbound (cost is permanently inactive)
//! ```

use std::fmt;
use std::sync::Arc;

use coffer_shared::host::{ExternalLedger, HostContext, ItemRegistry};
use coffer_shared::types::{ItemTypeId, PlayerId};

/// Substring that selects the coin ledger.
pub const COIN_MARKER: &str = "coin";

/// Substring that selects the reward points ledger.
pub const POINT_MARKER: &str = "point";

/// Uniform balance contract over one backing store.
pub trait CurrencySource: Send + Sync {
    /// Current holdings. Never negative, never mutates.
    fn balance(&self, player: PlayerId) -> u32;

    /// Adds `amount` to the player's holdings.
    fn give(&self, player: PlayerId, amount: u32);

    /// Removes `amount` from the player's holdings.
    ///
    /// The caller guarantees `amount <= balance(player)`; sources do not
    /// re-check.
    fn deduct(&self, player: PlayerId, amount: u32);

    /// True while the backing store is usable.
    fn is_valid(&self) -> bool;
}

// ============================================================================
// ITEM SOURCE
// ============================================================================

/// Pays with one item type from the player's inventory.
#[derive(Clone)]
pub struct ItemSource {
    item: ItemTypeId,
    registry: Arc<dyn ItemRegistry>,
}

impl ItemSource {
    /// Creates a source for an already-resolved item type.
    #[must_use]
    pub fn new(item: ItemTypeId, registry: Arc<dyn ItemRegistry>) -> Self {
        Self { item, registry }
    }

    /// The resolved item type.
    #[inline]
    #[must_use]
    pub const fn item(&self) -> ItemTypeId {
        self.item
    }
}

impl fmt::Debug for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSource").field("item", &self.item).finish()
    }
}

impl CurrencySource for ItemSource {
    fn balance(&self, player: PlayerId) -> u32 {
        self.registry.player_item_balance(player, self.item)
    }

    fn give(&self, player: PlayerId, amount: u32) {
        self.registry.give_item(player, self.item, amount);
    }

    fn deduct(&self, player: PlayerId, amount: u32) {
        self.registry.take_item(player, self.item, amount);
    }

    fn is_valid(&self) -> bool {
        true
    }
}

// ============================================================================
// LEDGER SOURCES
// ============================================================================

/// Which external ledger a source talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    /// Server coin economy.
    Coin,
    /// Reward points.
    Point,
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coin => f.write_str("coin"),
            Self::Point => f.write_str("point"),
        }
    }
}

/// Pays from an external ledger service.
///
/// The ledger slot may be empty (plugin not installed). An empty or unloaded
/// ledger makes the source invalid; its balance then reads as zero and writes
/// are dropped.
#[derive(Clone)]
pub struct LedgerSource {
    kind: LedgerKind,
    ledger: Option<Arc<dyn ExternalLedger>>,
}

impl LedgerSource {
    /// Creates a source over an optional ledger.
    #[must_use]
    pub fn new(kind: LedgerKind, ledger: Option<Arc<dyn ExternalLedger>>) -> Self {
        Self { kind, ledger }
    }

    /// Which ledger this is.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> LedgerKind {
        self.kind
    }

    fn loaded(&self) -> Option<&Arc<dyn ExternalLedger>> {
        self.ledger.as_ref().filter(|ledger| ledger.is_loaded())
    }
}

impl fmt::Debug for LedgerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerSource")
            .field("kind", &self.kind)
            .field("installed", &self.ledger.is_some())
            .finish()
    }
}

/// Converts a ledger amount to whole units, rounding down so a fractional
/// balance can never cover more than it holds. Negatives and NaN read as 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_units(amount: f64) -> u32 {
    if amount.is_nan() || amount <= 0.0 {
        0
    } else if amount >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        amount.floor() as u32
    }
}

impl CurrencySource for LedgerSource {
    fn balance(&self, player: PlayerId) -> u32 {
        self.loaded()
            .map_or(0, |ledger| whole_units(ledger.balance(player)))
    }

    fn give(&self, player: PlayerId, amount: u32) {
        if let Some(ledger) = self.loaded() {
            ledger.deposit(player, f64::from(amount));
        }
    }

    fn deduct(&self, player: PlayerId, amount: u32) {
        if let Some(ledger) = self.loaded() {
            ledger.withdraw(player, f64::from(amount));
        }
    }

    fn is_valid(&self) -> bool {
        self.loaded().is_some()
    }
}

// ============================================================================
// BOUND SOURCE
// ============================================================================

/// The source a cost was bound to, chosen once at bind time.
#[derive(Clone, Debug)]
pub enum BoundSource {
    /// An inventory item.
    Item(ItemSource),
    /// The shared coin ledger source.
    Coin(Arc<LedgerSource>),
    /// The shared reward points ledger source.
    Point(Arc<LedgerSource>),
    /// Nothing matched; the cost can never be charged.
    Unbound,
}

impl BoundSource {
    /// The source as a trait object, if bound.
    #[must_use]
    pub fn as_source(&self) -> Option<&dyn CurrencySource> {
        match self {
            Self::Item(source) => Some(source as &dyn CurrencySource),
            Self::Coin(source) | Self::Point(source) => Some(&**source as &dyn CurrencySource),
            Self::Unbound => None,
        }
    }

    /// True if bound to a source that is valid right now.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.as_source().is_some_and(|source| source.is_valid())
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Coin(_) => "coin",
            Self::Point(_) => "point",
            Self::Unbound => "unbound",
        }
    }
}

/// Binds configured currency names to sources.
///
/// Holds the shared ledger sources so every cost naming the same ledger ends
/// up pointing at the same instance.
#[derive(Clone)]
pub struct CurrencyBinder {
    coins: Arc<LedgerSource>,
    points: Arc<LedgerSource>,
    items: Arc<dyn ItemRegistry>,
}

impl CurrencyBinder {
    /// Creates a binder over the host's services.
    #[must_use]
    pub fn new(host: &HostContext) -> Self {
        Self {
            coins: Arc::new(LedgerSource::new(LedgerKind::Coin, host.coins.clone())),
            points: Arc::new(LedgerSource::new(LedgerKind::Point, host.points.clone())),
            items: host.items.clone(),
        }
    }

    /// Picks the source for a configured currency name.
    #[must_use]
    pub fn bind(&self, name: &str) -> BoundSource {
        if name.is_empty() {
            return BoundSource::Unbound;
        }
        if name.contains(COIN_MARKER) {
            return BoundSource::Coin(self.coins.clone());
        }
        if name.contains(POINT_MARKER) {
            return BoundSource::Point(self.points.clone());
        }

        match self.items.resolve_item_type(name) {
            Some(item) => BoundSource::Item(ItemSource::new(item, self.items.clone())),
            None => BoundSource::Unbound,
        }
    }
}

impl fmt::Debug for CurrencyBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyBinder")
            .field("coins", &self.coins)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}
