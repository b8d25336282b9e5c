//! # Upgrade Constants
//!
//! Fixed values shared by every COFFER crate.
//!
//! **CRITICAL:** `MAX_CAPACITY` matches the host's largest container grid.
//! Raising it without a host update produces slots the client cannot draw.

// =============================================================================
// IDENTITY
// =============================================================================

/// Plugin name. Permission strings are `lowercase("<PLUGIN_NAME>.<profile key>")`.
pub const PLUGIN_NAME: &str = "StorageUpgrade";

/// Version stamped into freshly written configuration files.
pub const CONFIG_VERSION: &str = "2.1.0";

/// Oldest configuration version whose layout is still understood.
/// Anything older is replaced with defaults.
pub const MIN_CONFIG_VERSION: &str = "1.0.0";

// =============================================================================
// CAPACITY
// =============================================================================

/// Hard ceiling on container capacity (slots).
pub const MAX_CAPACITY: u32 = 48;

// =============================================================================
// EFFECTS
// =============================================================================

/// Sparkle burst played around an upgraded container.
pub const FX_UPGRADE: &str = "assets/prefabs/misc/easter/painted eggs/effects/gold_open.prefab";

/// Completion chime played on the upgrading player.
pub const FX_UPGRADE_COMPLETE: &str =
    "assets/prefabs/missions/effects/mission_objective_complete.prefab";

/// Bone the completion effect attaches to (player head).
pub const FX_PLAYER_BONE: u32 = 698_017_942;

/// Offsets (relative to the container origin) of the four sparkle bursts.
pub const FX_UPGRADE_OFFSETS: [[f32; 3]; 4] = [
    [0.0, 1.0, 0.5],
    [0.0, 1.0, -0.5],
    [-0.5, 1.0, 0.0],
    [0.5, 1.0, 0.0],
];
