//! Configuration module.
//!
//! Settings are plain serde structs with per-field defaults, so a host can
//! deserialize them from its own config file, build them in code, or load
//! overrides from environment variables via [`Settings::from_env`].

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level settings for the use-count core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Ceiling written back when a counted item has none recorded.
    #[serde(default = "default_uses")]
    pub default_uses: i32,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub cache: CacheSettings,
}

/// Display toggles and text fragments for the rendered lore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Marker line identifying a counted item. Always rendered first,
    /// verbatim; the counted-item predicate checks for it.
    #[serde(default = "default_marker_line")]
    pub marker_line: String,

    /// Render the configured decorative lines.
    #[serde(default = "default_true")]
    pub decorative_lore: bool,

    /// Decorative lines, with `&` color codes and optional placeholders.
    #[serde(default)]
    pub decorative_lines: Vec<String>,

    /// Substitute placeholders in decorative lines when an engine is present.
    #[serde(default = "default_true")]
    pub apply_placeholders: bool,

    /// Render the bound-owner line for bound items.
    #[serde(default = "default_true")]
    pub show_bound_owner: bool,

    /// Render the `<remaining>/<max>` usage line.
    #[serde(default = "default_true")]
    pub show_usage_count: bool,

    /// Render the ten-cell progress bar (suppressed for infinite items).
    #[serde(default = "default_true")]
    pub show_progress_bar: bool,

    /// Prefix for the usage line.
    #[serde(default = "default_usage_prefix")]
    pub usage_prefix: String,
}

/// Lore cache behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry time-to-live in milliseconds.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Entry count past which an insert triggers an expiry sweep.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

fn default_uses() -> i32 {
    100
}

fn default_marker_line() -> String {
    "§7[Use-Bound]".to_string()
}

fn default_usage_prefix() -> String {
    "Uses:".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ttl_ms() -> u64 {
    5000
}

fn default_max_size() -> usize {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_uses: default_uses(),
            display: DisplaySettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            marker_line: default_marker_line(),
            decorative_lore: default_true(),
            decorative_lines: Vec::new(),
            apply_placeholders: default_true(),
            show_bound_owner: default_true(),
            show_usage_count: default_true(),
            show_progress_bar: default_true(),
            usage_prefix: default_usage_prefix(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            ttl_ms: default_ttl_ms(),
            max_size: default_max_size(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// Reads a `.env` file first if one is present. A missing or unparsable
    /// variable leaves the default in place.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut settings = Self::default();

        if let Some(v) = env_parse("USEBOUND_DEFAULT_USES") {
            settings.default_uses = v;
        }

        if let Ok(v) = env::var("USEBOUND_MARKER_LINE") {
            if !v.trim().is_empty() {
                settings.display.marker_line = v;
            }
        }
        if let Ok(v) = env::var("USEBOUND_USAGE_PREFIX") {
            if !v.trim().is_empty() {
                settings.display.usage_prefix = v;
            }
        }
        if let Ok(v) = env::var("USEBOUND_DECORATIVE_LINES") {
            settings.display.decorative_lines = v
                .split('|')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(v) = env_flag("USEBOUND_DECORATIVE_LORE") {
            settings.display.decorative_lore = v;
        }
        if let Some(v) = env_flag("USEBOUND_APPLY_PLACEHOLDERS") {
            settings.display.apply_placeholders = v;
        }
        if let Some(v) = env_flag("USEBOUND_SHOW_BOUND_OWNER") {
            settings.display.show_bound_owner = v;
        }
        if let Some(v) = env_flag("USEBOUND_SHOW_USAGE_COUNT") {
            settings.display.show_usage_count = v;
        }
        if let Some(v) = env_flag("USEBOUND_SHOW_PROGRESS_BAR") {
            settings.display.show_progress_bar = v;
        }

        if let Some(v) = env_flag("USEBOUND_CACHE_ENABLED") {
            settings.cache.enabled = v;
        }
        if let Some(v) = env_parse("USEBOUND_CACHE_TTL_MS") {
            settings.cache.ttl_ms = v;
        }
        if let Some(v) = env_parse("USEBOUND_CACHE_MAX_SIZE") {
            settings.cache.max_size = v;
        }

        settings
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .and_then(|v| match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let settings = Settings::default();
        assert_eq!(settings.default_uses, 100);
        assert!(settings.cache.enabled);
        assert_eq!(settings.cache.ttl_ms, 5000);
        assert_eq!(settings.cache.max_size, 1000);
        assert!(settings.display.decorative_lore);
        assert!(settings.display.apply_placeholders);
        assert!(settings.display.show_bound_owner);
        assert!(settings.display.show_usage_count);
        assert!(settings.display.show_progress_bar);
        assert!(settings.display.decorative_lines.is_empty());
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.cache.ttl_ms, 5000);
        assert_eq!(settings.display.marker_line, "§7[Use-Bound]");
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"cache": {"ttl_ms": 250}, "display": {"show_progress_bar": false}}"#)
                .unwrap();
        assert_eq!(settings.cache.ttl_ms, 250);
        assert!(settings.cache.enabled);
        assert!(!settings.display.show_progress_bar);
        assert!(settings.display.show_usage_count);
    }
}
