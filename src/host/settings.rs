use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterConfiguration, SkipTarget};

pub const REGEX_ENABLED: &str = "regex_enabled";
pub const SKIP_TARGET: &str = "skip_target";
pub const SKIPPED_ARTISTS: &str = "skipped_artists";
pub const SKIPPED_SONGS: &str = "skipped_songs";

/// Read-only view of the host's key/value settings.
pub trait SettingsStore {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_string(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

/// Plain in-memory store, for hosts without their own and for tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    values: HashMap<String, SettingValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.values.insert(key.to_string(), SettingValue::Bool(value));
        self
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.to_string(), SettingValue::Text(value.into()));
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.values.remove(key)
    }
}

impl SettingsStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(SettingValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(SettingValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Take a snapshot of the filter settings. Missing keys mean "off" / "no rule".
pub fn filter_configuration<S: SettingsStore + ?Sized>(store: &S) -> FilterConfiguration {
    FilterConfiguration {
        regex_enabled: store.get_bool(REGEX_ENABLED).unwrap_or(false),
        skip_target: store
            .get_string(SKIP_TARGET)
            .as_deref()
            .and_then(SkipTarget::from_setting),
        skipped_artists: store.get_string(SKIPPED_ARTISTS),
        skipped_songs: store.get_string(SKIPPED_SONGS),
    }
}

/// Settings screen descriptor. The host decides how to draw these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingItem {
    Category {
        title: String,
        key: String,
        items: Vec<SettingItem>,
    },
    Switch {
        title: String,
        key: String,
        summary: String,
        value: bool,
    },
    List {
        title: String,
        key: String,
        summary: String,
        entry_titles: Vec<String>,
        entry_values: Vec<String>,
        selected: usize,
    },
    TextInput {
        title: String,
        key: String,
        summary: String,
        value: String,
    },
}

pub fn setting_items<S: SettingsStore + ?Sized>(store: &S) -> Vec<SettingItem> {
    let targets = [SkipTarget::RemoveFromPlaylist, SkipTarget::SkipToNext];
    // Anything but an explicit "Remove" shows up as "Skip"
    let selected = match store.get_string(SKIP_TARGET).as_deref() {
        Some("Remove") => 0,
        _ => 1,
    };

    vec![SettingItem::Category {
        title: "Skipping Options".to_string(),
        key: "skip_options".to_string(),
        items: vec![
            SettingItem::Switch {
                title: "Enable Regex".to_string(),
                key: REGEX_ENABLED.to_string(),
                summary: "Treat rules as regular expressions matched against the whole value".to_string(),
                value: store.get_bool(REGEX_ENABLED).unwrap_or(false),
            },
            SettingItem::List {
                title: "When to Skip".to_string(),
                key: SKIP_TARGET.to_string(),
                summary: "Remove matching songs from the queue, or skip them when they start".to_string(),
                entry_titles: vec!["Remove from playlist".to_string(), "Skip to next song".to_string()],
                entry_values: targets.iter().map(|t| t.as_setting().to_string()).collect(),
                selected,
            },
            SettingItem::TextInput {
                title: "Skipped Artists".to_string(),
                key: SKIPPED_ARTISTS.to_string(),
                summary: "Artists to skip, comma separated".to_string(),
                value: store.get_string(SKIPPED_ARTISTS).unwrap_or_default(),
            },
            SettingItem::TextInput {
                title: "Skipped Songs".to_string(),
                key: SKIPPED_SONGS.to_string(),
                summary: "Song titles to skip, comma separated (skip mode only)".to_string(),
                value: store.get_string(SKIPPED_SONGS).unwrap_or_default(),
            },
        ],
    }]
}
