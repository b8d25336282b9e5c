//! # COFFER
//!
//! Hit storage with a hammer to boost its capacity.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         HOST GAME                           │
//! │  hammer hit ──> StoragePlugin::on_hammer_hit()              │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │
//!          ┌─────────────────┼──────────────────┐
//!          ▼                 ▼                  ▼
//!   UpgradeResolver     MessageCatalog      EffectSink
//!   (coffer_economy)    (reply text)        (sparkles)
//! ```
//!
//! The plugin owns configuration and the bound resolver for one load. Reload
//! throws both away and binds again.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod effects;
pub mod plugin;

pub use plugin::{HammerHit, StoragePlugin};
