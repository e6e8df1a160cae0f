//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::surface::CursorUpdateMode;
use crate::unicode::OffsetUnit;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
///
/// Falls back to the embedded defaults if the custom TOML fails to parse.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let custom = CUSTOM_TOML.get().and_then(|s| match parse_settings_toml(s) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "custom settings rejected, using defaults");
                None
            }
        });
        custom.unwrap_or_else(Settings::builtin)
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tracker: TrackerSettings,
    pub caret_sync: CaretSyncSettings,
    pub buffer: BufferSettings,
}

impl Settings {
    /// Settings equal to the embedded TOML, without going through the parser.
    pub fn builtin() -> Self {
        Self {
            tracker: TrackerSettings {
                offset_unit: OffsetUnit::Utf16,
            },
            caret_sync: CaretSyncSettings {
                cursor_update_mode: CursorUpdatePreset::Monitor,
                extract_max_chars: 10_000,
            },
            buffer: BufferSettings { max_length: 0 },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerSettings {
    pub offset_unit: OffsetUnit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaretSyncSettings {
    pub cursor_update_mode: CursorUpdatePreset,
    pub extract_max_chars: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BufferSettings {
    pub max_length: i64,
}

impl BufferSettings {
    /// `None` when unlimited.
    pub fn limit(&self) -> Option<usize> {
        (self.max_length > 0).then_some(self.max_length as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorUpdatePreset {
    None,
    Immediate,
    Monitor,
    Both,
}

impl CursorUpdatePreset {
    pub fn mode(self) -> CursorUpdateMode {
        match self {
            Self::None => CursorUpdateMode::empty(),
            Self::Immediate => CursorUpdateMode::IMMEDIATE,
            Self::Monitor => CursorUpdateMode::MONITOR,
            Self::Both => CursorUpdateMode::IMMEDIATE | CursorUpdateMode::MONITOR,
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(caret_sync.extract_max_chars);
    check_non_negative!(buffer.max_length);

    Ok(())
}
