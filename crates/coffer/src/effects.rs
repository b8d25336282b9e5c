//! # Upgrade Effects
//!
//! Four sparkle bursts around the container, one completion chime on the
//! player.

use coffer_shared::constants::{FX_PLAYER_BONE, FX_UPGRADE, FX_UPGRADE_COMPLETE, FX_UPGRADE_OFFSETS};
use coffer_shared::host::EffectSink;
use coffer_shared::types::{EffectAnchor, PlayerId};

const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Plays the upgrade effects for a container at `position`.
pub fn play_upgrade_effects(sink: &dyn EffectSink, position: [f32; 3], player: PlayerId) {
    for offset in FX_UPGRADE_OFFSETS {
        let anchor = EffectAnchor::World {
            position: [
                position[0] + offset[0],
                position[1] + offset[1],
                position[2] + offset[2],
            ],
            direction: UP,
        };
        sink.run_effect(FX_UPGRADE, anchor);
    }

    sink.run_effect(
        FX_UPGRADE_COMPLETE,
        EffectAnchor::Player {
            player,
            bone: FX_PLAYER_BONE,
        },
    );
}
