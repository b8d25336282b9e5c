//! # Storage Upgrade Plugin
//!
//! Lifecycle and hook handling for one plugin load.
//!
//! ```text
//! load() ─> Configuration ─> UpgradeResolver (registry bound once)
//!   │
//!   ├─ on_hammer_hit()  secondary fire only, replies + effects
//!   ├─ reload()         rebind from a new configuration
//!   └─ unload()         drop everything, nothing persisted
//! ```

use std::fmt::Display;
use std::path::Path;

use coffer_economy::{Configuration, CofferResult, UpgradeOutcome, UpgradeResolver};
use coffer_shared::host::HostContext;
use coffer_shared::lang::{MessageCatalog, DEFAULT_LANGUAGE};
use coffer_shared::types::{PlayerId, StorageTarget};

use crate::effects::play_upgrade_effects;

/// A hammer strike as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HammerHit {
    /// Who swung.
    pub player: PlayerId,
    /// Whether the secondary fire input was held during the swing.
    pub secondary_fire: bool,
}

impl HammerHit {
    /// A strike with secondary fire held (an upgrade request).
    #[must_use]
    pub const fn upgrade(player: PlayerId) -> Self {
        Self {
            player,
            secondary_fire: true,
        }
    }

    /// A plain strike (repair / rotate); ignored by the plugin.
    #[must_use]
    pub const fn plain(player: PlayerId) -> Self {
        Self {
            player,
            secondary_fire: false,
        }
    }
}

/// One loaded instance of the plugin.
#[derive(Debug)]
pub struct StoragePlugin {
    host: HostContext,
    config: Configuration,
    resolver: UpgradeResolver,
    messages: MessageCatalog,
    language: String,
}

impl StoragePlugin {
    /// Loads (or creates) the config file and initializes profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, parsed or written.
    pub fn load(config_path: impl AsRef<Path>, host: HostContext) -> CofferResult<Self> {
        let config = Configuration::load_or_default(config_path)?;
        Ok(Self::from_config(config, host))
    }

    /// Initializes profiles from an in-memory configuration.
    #[must_use]
    pub fn from_config(config: Configuration, host: HostContext) -> Self {
        let resolver = UpgradeResolver::new(&config, &host);
        tracing::info!(
            "Storage upgrade loaded: {} profile(s), {} excluded container type(s)",
            resolver.registry().profiles().len(),
            config.non_upgradeable_types.len()
        );

        Self {
            host,
            config,
            resolver,
            messages: MessageCatalog::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets the reply language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Bound resolver.
    #[must_use]
    pub const fn resolver(&self) -> &UpgradeResolver {
        &self.resolver
    }

    /// Reply templates, for registering further languages.
    pub fn messages_mut(&mut self) -> &mut MessageCatalog {
        &mut self.messages
    }

    /// Handles a hammer strike.
    ///
    /// Returns `None` when the strike is not an upgrade request (secondary fire
    /// not held). Otherwise resolves the upgrade, replies to the player and,
    /// on success, plays the upgrade effects.
    pub fn on_hammer_hit<T>(&self, hit: HammerHit, target: &mut T) -> Option<UpgradeOutcome>
    where
        T: StorageTarget + ?Sized,
    {
        if !hit.secondary_fire {
            return None;
        }

        let outcome = self.resolver.on_upgrade_attempt(hit.player, target);
        self.reply(hit.player, &outcome);

        if outcome.is_upgraded() {
            play_upgrade_effects(&*self.host.effects, target.position(), hit.player);
        }

        Some(outcome)
    }

    /// Renders the reply for an outcome in the plugin language.
    #[must_use]
    pub fn render(&self, outcome: &UpgradeOutcome) -> String {
        let args = outcome.message_args();
        let args: Vec<&dyn Display> = args.iter().map(|a| a as &dyn Display).collect();
        self.messages.render(outcome.message_key(), &self.language, &args)
    }

    fn reply(&self, player: PlayerId, outcome: &UpgradeOutcome) {
        self.host.chat.send_reply(player, &self.render(outcome));
    }

    /// Replaces the configuration and rebinds every profile.
    pub fn reload(&mut self, config: Configuration) {
        tracing::info!("Storage upgrade reloading");
        self.resolver = UpgradeResolver::new(&config, &self.host);
        self.config = config;
    }

    /// Drops all plugin state.
    pub fn unload(self) {
        tracing::info!(
            "Storage upgrade unloaded ({} profile(s) released)",
            self.resolver.registry().profiles().len()
        );
    }
}
