//! # Localized Replies
//!
//! Every resolver outcome maps to exactly one [`MessageKey`]. Templates use
//! positional `{0}`, `{1}` placeholders.

use std::collections::HashMap;
use std::fmt::Display;

/// Default language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reply message identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// The struck entity can never be upgraded.
    CannotUpgrade,
    /// No profile applies, or the profile does not cover this container.
    NoPermissionOrCannotUpgrade,
    /// Capacity ceiling reached.
    AlreadyAtMaxCapacity,
    /// Args: shortfall, currency name.
    NeedMoreToUpgrade,
    /// Args: old capacity, new capacity.
    UpgradedFromTo,
}

impl MessageKey {
    /// All keys, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::CannotUpgrade,
        Self::NoPermissionOrCannotUpgrade,
        Self::AlreadyAtMaxCapacity,
        Self::NeedMoreToUpgrade,
        Self::UpgradedFromTo,
    ];

    /// Stable string form, used as the lookup key in language files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CannotUpgrade => "CannotUpgrade",
            Self::NoPermissionOrCannotUpgrade => "NoPermissionOrCannotUpgrade",
            Self::AlreadyAtMaxCapacity => "AlreadyAtMaxCapacity",
            Self::NeedMoreToUpgrade => "NeedMoreToUpgrade",
            Self::UpgradedFromTo => "UpgradedFromTo",
        }
    }

    /// English template.
    #[must_use]
    pub const fn english(self) -> &'static str {
        match self {
            Self::CannotUpgrade => "This container cannot be upgraded.",
            Self::NoPermissionOrCannotUpgrade => {
                "You don't have permission or this container cannot be upgraded."
            }
            Self::AlreadyAtMaxCapacity => "This container is already at maximum capacity.",
            Self::NeedMoreToUpgrade => {
                "You need <color=#FFA500>{0}</color> more <color=#FFA500>{1}</color> to upgrade."
            }
            Self::UpgradedFromTo => {
                "Container upgraded from <color=#FFA500>{0}</color> to <color=#FFA500>{1}</color> slots."
            }
        }
    }
}

/// Per-language message templates.
#[derive(Clone, Debug)]
pub struct MessageCatalog {
    languages: HashMap<String, HashMap<MessageKey, String>>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let english = MessageKey::ALL
            .iter()
            .map(|&key| (key, key.english().to_string()))
            .collect();

        let mut languages = HashMap::new();
        languages.insert(DEFAULT_LANGUAGE.to_string(), english);
        Self { languages }
    }
}

impl MessageCatalog {
    /// Creates a catalog holding the English defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overrides) templates for a language.
    pub fn register<I, S>(&mut self, language: &str, messages: I)
    where
        I: IntoIterator<Item = (MessageKey, S)>,
        S: Into<String>,
    {
        let table = self.languages.entry(language.to_string()).or_default();
        for (key, template) in messages {
            table.insert(key, template.into());
        }
    }

    /// Returns the raw template, falling back to English and then to the key.
    #[must_use]
    pub fn template(&self, key: MessageKey, language: &str) -> &str {
        self.languages
            .get(language)
            .and_then(|table| table.get(&key))
            .or_else(|| {
                self.languages
                    .get(DEFAULT_LANGUAGE)
                    .and_then(|table| table.get(&key))
            })
            .map_or(key.as_str(), String::as_str)
    }

    /// Renders a message with positional arguments.
    #[must_use]
    pub fn render(&self, key: MessageKey, language: &str, args: &[&dyn Display]) -> String {
        let mut message = self.template(key, language).to_string();
        for (index, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), &arg.to_string());
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_positional_args() {
        let catalog = MessageCatalog::new();
        let message = catalog.render(MessageKey::NeedMoreToUpgrade, "en", &[&50, &"metal.fragments"]);
        assert_eq!(
            message,
            "You need <color=#FFA500>50</color> more <color=#FFA500>metal.fragments</color> to upgrade."
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.template(MessageKey::CannotUpgrade, "fr"),
            "This container cannot be upgraded."
        );
    }

    #[test]
    fn test_registered_language_overrides() {
        let mut catalog = MessageCatalog::new();
        catalog.register("de", [(MessageKey::UpgradedFromTo, "Von {0} auf {1} Plätze erweitert.")]);

        assert_eq!(
            catalog.render(MessageKey::UpgradedFromTo, "de", &[&10, &12]),
            "Von 10 auf 12 Plätze erweitert."
        );
        // Keys missing from the language still resolve through English.
        assert_eq!(
            catalog.template(MessageKey::AlreadyAtMaxCapacity, "de"),
            MessageKey::AlreadyAtMaxCapacity.english()
        );
    }

    #[test]
    fn test_message_without_args() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.render(MessageKey::AlreadyAtMaxCapacity, "en", &[]),
            "This container is already at maximum capacity."
        );
    }
}
