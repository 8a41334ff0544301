//! Attune Settings
//!
//! Single source of truth for the Attune accessibility widget:
//! - Persisted user preferences (font size, theme, spacing, layout, language)
//! - JSON persistence over a pluggable storage backend
//! - Supported-language detection
//! - Widget visibility state machine with focus-restoration bookkeeping
//! - Document root attribute application for stylesheet consumption

mod language;
mod settings;
mod storage;
mod store;

pub use language::{
    FALLBACK_LANGUAGE, SUPPORTED_LANGUAGES, base_subtag, detect_locale, supported_language,
};
pub use settings::{FontSize, Layout, Settings, SettingsField, SettingsUpdate, Spacing, Theme};
pub use storage::{MemoryStorage, NullStorage, STORAGE_KEY, SharedStorage, StorageBackend};
pub use store::{ATTR_PREFIX, DEFAULT_TRIGGER_ID, SettingsStore};
