//! Accessibility Settings Model
//!
//! Every field holds a member of its option catalog; unknown values from
//! corrupted persisted state fall back to the field default rather than
//! failing deserialization.

use serde::{Deserialize, Serialize};

use crate::language::FALLBACK_LANGUAGE;

/// Font size preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum FontSize {
    #[default]
    Default,
    Large,
    Larger,
    Largest,
}

impl FontSize {
    pub const ALL: [FontSize; 4] = [Self::Default, Self::Large, Self::Larger, Self::Largest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Large => "large",
            Self::Larger => "larger",
            Self::Largest => "largest",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for FontSize {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Theme {
    #[default]
    Default,
    Light,
    Dark,
    HighContrast,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Self::Default, Self::Light, Self::Dark, Self::HighContrast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Text and control spacing preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Spacing {
    Compact,
    #[default]
    Default,
    Comfort,
    ExtraComfort,
}

impl Spacing {
    pub const ALL: [Spacing; 4] = [Self::Compact, Self::Default, Self::Comfort, Self::ExtraComfort];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Default => "default",
            Self::Comfort => "comfort",
            Self::ExtraComfort => "extra-comfort",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for Spacing {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Layout density preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Layout {
    #[default]
    Default,
    SingleColumn,
    Wide,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Self::Default, Self::SingleColumn, Self::Wide];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::SingleColumn => "single-column",
            Self::Wide => "wide",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for Layout {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// The persisted user preference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub font_size: FontSize,
    pub theme: Theme,
    pub spacing: Spacing,
    pub layout: Layout,
    /// ISO-639-1 base subtag
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: FontSize::default(),
            theme: Theme::default(),
            spacing: Spacing::default(),
            layout: Layout::default(),
            language: FALLBACK_LANGUAGE.to_string(),
        }
    }
}

impl Settings {
    /// Shallow-merge a partial update over this record.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(v) = update.font_size {
            self.font_size = v;
        }
        if let Some(v) = update.theme {
            self.theme = v;
        }
        if let Some(v) = update.spacing {
            self.spacing = v;
        }
        if let Some(v) = update.layout {
            self.layout = v;
        }
        if let Some(v) = &update.language {
            self.language = v.clone();
        }
    }
}

/// Partial settings record: present fields win on merge.
///
/// Doubles as the wire shape for reading persisted blobs, so a blob
/// missing fields merges cleanly over computed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub font_size: Option<FontSize>,
    pub theme: Option<Theme>,
    pub spacing: Option<Spacing>,
    pub layout: Option<Layout>,
    pub language: Option<String>,
}

impl SettingsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_size(mut self, value: FontSize) -> Self {
        self.font_size = Some(value);
        self
    }

    pub fn theme(mut self, value: Theme) -> Self {
        self.theme = Some(value);
        self
    }

    pub fn spacing(mut self, value: Spacing) -> Self {
        self.spacing = Some(value);
        self
    }

    pub fn layout(mut self, value: Layout) -> Self {
        self.layout = Some(value);
        self
    }

    pub fn language(mut self, value: &str) -> Self {
        self.language = Some(value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.theme.is_none()
            && self.spacing.is_none()
            && self.layout.is_none()
            && self.language.is_none()
    }
}

/// Names of the individual settings fields, for selective reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    FontSize,
    Theme,
    Spacing,
    Layout,
    Language,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        Self::FontSize,
        Self::Theme,
        Self::Spacing,
        Self::Layout,
        Self::Language,
    ];
}
