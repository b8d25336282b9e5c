//! # COFFER Economy
//!
//! Pure upgrade logic for storage containers.
//!
//! ## Design Principles
//!
//! 1. **Two-phase config** - `Configuration` is parsed as plain data, then bound
//!    against the host once, producing immutable profiles
//! 2. **Tagged currencies** - each cost picks its source (item, coins, points)
//!    at bind time, never at request time
//! 3. **All-or-nothing payment** - every active cost is checked before any is
//!    deducted
//! 4. **Outcomes, not errors** - a strike always resolves to an `UpgradeOutcome`
//!
//! ## The Upgrade Pipeline
//!
//! ```text
//! Hammer strike -> UpgradeResolver::on_upgrade_attempt() ->
//!   1. Target validation     (storage? excluded? oven?)
//!   2. Eligibility           (profile for player, enabled, type allowed)
//!   3. Ceiling               (capacity < 48)
//!   4. Affordability         (every active cost, declared order)
//!   5. Settlement            (deduct every active cost, same order)
//!   6. Mutation              (capacity = min(capacity + increase, 48))
//!   7. Upgraded { old, new }
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use coffer_economy::{Configuration, UpgradeResolver};
//!
//! let config = Configuration::load_or_default("config/StorageUpgrade.toml")?;
//! let resolver = UpgradeResolver::new(&config, &host_context);
//!
//! let outcome = resolver.on_upgrade_attempt(player, &mut container);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod currency;
pub mod error;
pub mod profile;
pub mod registry;
pub mod requirement;
pub mod resolver;

pub use config::{Configuration, CostConfig, ProfileConfig};
pub use currency::{BoundSource, CurrencyBinder, CurrencySource, ItemSource, LedgerKind, LedgerSource};
pub use error::{CofferError, CofferResult};
pub use profile::UpgradeProfile;
pub use registry::ProfileRegistry;
pub use requirement::CurrencyRequirement;
pub use resolver::{UpgradeOutcome, UpgradeResolver};
