//! # Boundary Types
//!
//! Identifiers and the struck-container contract.

use std::fmt;

/// Host-assigned player identifier (the 64-bit account id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-assigned item type identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemTypeId(pub i32);

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of entity a strike landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityClass {
    /// A storage container with an item inventory.
    Storage,
    /// A container that cooks or burns its contents (furnaces, grills).
    /// Never upgradeable.
    Oven,
    /// Anything without an inventory (walls, doors, deployables).
    Other,
}

impl EntityClass {
    /// Returns true if the entity has an item inventory at all.
    #[inline]
    #[must_use]
    pub const fn has_inventory(self) -> bool {
        matches!(self, Self::Storage | Self::Oven)
    }
}

/// Where an effect should play.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectAnchor {
    /// A fixed point in the world.
    World {
        /// World position.
        position: [f32; 3],
        /// Facing direction.
        direction: [f32; 3],
    },
    /// Attached to a player bone.
    Player {
        /// Player the effect follows.
        player: PlayerId,
        /// Bone id on the player's skeleton.
        bone: u32,
    },
}

/// A struck entity whose inventory capacity may be upgraded.
///
/// The host implements this over its live entity; capacity writes go straight
/// to the entity's inventory.
pub trait StorageTarget {
    /// Short prefab name (e.g. `box.wooden.large`).
    fn short_name(&self) -> &str;

    /// Entity classification.
    fn class(&self) -> EntityClass;

    /// Current inventory capacity in slots.
    fn capacity(&self) -> u32;

    /// Overwrites the inventory capacity.
    fn set_capacity(&mut self, capacity: u32);

    /// World position of the entity origin.
    fn position(&self) -> [f32; 3];
}

/// Plain-data container used by the simulator and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageContainer {
    /// Short prefab name.
    pub short_name: String,
    /// Entity classification.
    pub class: EntityClass,
    /// Capacity in slots.
    pub capacity: u32,
    /// World position.
    pub position: [f32; 3],
}

impl StorageContainer {
    /// Creates a storage container at the origin.
    #[must_use]
    pub fn new(short_name: impl Into<String>, capacity: u32) -> Self {
        Self {
            short_name: short_name.into(),
            class: EntityClass::Storage,
            capacity,
            position: [0.0; 3],
        }
    }

    /// Sets the entity class.
    #[must_use]
    pub fn with_class(mut self, class: EntityClass) -> Self {
        self.class = class;
        self
    }

    /// Sets the world position.
    #[must_use]
    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }
}

impl StorageTarget for StorageContainer {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn class(&self) -> EntityClass {
        self.class
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
    }

    fn position(&self) -> [f32; 3] {
        self.position
    }
}
