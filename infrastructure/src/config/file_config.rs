//! Raw TOML configuration data types.
//!
//! These structs mirror the structure of `waypost.toml` exactly and are
//! deserialized directly.

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Assistant conversation settings
    pub assistant: AssistantConfig,
    /// Store settings
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Override for the built-in system prompt. Empty means default.
    pub system_prompt: String,
    /// User/assistant exchanges kept in the transcript sent to the model.
    pub max_history_turns: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            max_history_turns: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seed the demo inventory on startup.
    pub seed_demo_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FileConfig::default();
        assert!(config.assistant.system_prompt.is_empty());
        assert_eq!(config.assistant.max_history_turns, 20);
        assert!(config.store.seed_demo_data);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [store]
            seed_demo_data = false
            "#,
        )
        .unwrap();
        assert!(!config.store.seed_demo_data);
        assert_eq!(config.assistant.max_history_turns, 20);
    }
}
