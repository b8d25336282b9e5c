//! # COFFER Shared
//!
//! Types that sit on the boundary between the upgrade core and the host game.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER contain economy decisions. It only describes:
//! - who is acting (`PlayerId`)
//! - what was struck (`StorageTarget`)
//! - which host services exist (`HostContext`)
//! - how outcomes are worded (`MessageCatalog`)
//!
//! If you need cost or profile logic, put it in `coffer_economy`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod host;
pub mod lang;
pub mod memory;
pub mod types;

pub use constants::{CONFIG_VERSION, MAX_CAPACITY, PLUGIN_NAME};
pub use host::{ChatSink, EffectSink, ExternalLedger, HostContext, ItemRegistry, PermissionService};
pub use lang::{MessageCatalog, MessageKey};
pub use memory::MemoryHost;
pub use types::{EffectAnchor, EntityClass, ItemTypeId, PlayerId, StorageContainer, StorageTarget};
