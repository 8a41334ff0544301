//! Widget Configuration
//!
//! Layered resolution of the render-ready configuration: factory
//! defaults, then a caller-supplied override object, then individually
//! supplied fields. Recomputed wholesale, never patched.

use std::collections::BTreeMap;
use std::fmt;

use attune_settings::{FontSize, Layout, SUPPORTED_LANGUAGES, Spacing, Theme};

use crate::WidgetError;

/// How the widget presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    #[default]
    Strip,
    Panel,
    Popover,
}

impl DisplayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strip => "strip",
            Self::Panel => "panel",
            Self::Popover => "popover",
        }
    }

    /// Unknown display types are a caller error, surfaced fail-fast.
    pub fn parse(s: &str) -> Result<Self, WidgetError> {
        match s {
            "strip" => Ok(Self::Strip),
            "panel" => Ok(Self::Panel),
            "popover" => Ok(Self::Popover),
            other => Err(WidgetError::UnknownDisplayType(other.to_string())),
        }
    }
}

/// Which edge the widget docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Left,
    Right,
    Start,
    #[default]
    End,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Start => "start",
            Self::End => "end",
        }
    }

    pub fn parse(s: &str) -> Result<Self, WidgetError> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            other => Err(WidgetError::UnknownPosition(other.to_string())),
        }
    }
}

/// One adjustable accessibility dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModuleId {
    FontSize,
    Theme,
    Spacing,
    Layout,
    Language,
}

impl ModuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FontSize => "font-size",
            Self::Theme => "theme",
            Self::Spacing => "spacing",
            Self::Layout => "layout",
            Self::Language => "language",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "font-size" => Some(Self::FontSize),
            "theme" => Some(Self::Theme),
            "spacing" => Some(Self::Spacing),
            "layout" => Some(Self::Layout),
            "language" => Some(Self::Language),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable value inside a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOption {
    pub value: String,
    pub label: String,
}

impl ModuleOption {
    pub fn new(value: &str) -> Self {
        Self { value: value.to_string(), label: humanize(value) }
    }
}

/// Presentational description of one enabled module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub title: String,
    pub description: String,
    pub options: Vec<ModuleOption>,
}

impl ModuleDescriptor {
    pub fn new(title: &str, description: &str, values: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            options: values.iter().map(|v| ModuleOption::new(v)).collect(),
        }
    }
}

/// The effective, fully-resolved display configuration for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfiguration {
    pub display_type: DisplayType,
    pub overlay: bool,
    pub position: Position,
    pub include: Vec<ModuleId>,
    pub title: String,
    pub description: String,
    pub multi_selectable_accordions: bool,
    pub modules: BTreeMap<ModuleId, ModuleDescriptor>,
}

impl WidgetConfiguration {
    /// Built-in factory defaults, seeded from the settings option catalogs.
    pub fn factory() -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(
            ModuleId::FontSize,
            ModuleDescriptor::new(
                "Font size",
                "Adjust the text size of the page",
                &FontSize::ALL.map(|v| v.as_str()),
            ),
        );
        modules.insert(
            ModuleId::Theme,
            ModuleDescriptor::new(
                "Color theme",
                "Choose a color scheme",
                &Theme::ALL.map(|v| v.as_str()),
            ),
        );
        modules.insert(
            ModuleId::Spacing,
            ModuleDescriptor::new(
                "Spacing",
                "Adjust spacing between text and controls",
                &Spacing::ALL.map(|v| v.as_str()),
            ),
        );
        modules.insert(
            ModuleId::Layout,
            ModuleDescriptor::new(
                "Layout",
                "Adjust the page layout",
                &Layout::ALL.map(|v| v.as_str()),
            ),
        );
        modules.insert(
            ModuleId::Language,
            ModuleDescriptor::new("Language", "Choose the page language", SUPPORTED_LANGUAGES),
        );

        Self {
            display_type: DisplayType::default(),
            overlay: false,
            position: Position::default(),
            include: vec![
                ModuleId::FontSize,
                ModuleId::Theme,
                ModuleId::Spacing,
                ModuleId::Layout,
            ],
            title: "Accessibility settings".to_string(),
            description: String::new(),
            multi_selectable_accordions: false,
            modules,
        }
    }
}

/// Caller-supplied configuration object: object-level override layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverride {
    pub display_type: Option<DisplayType>,
    pub overlay: Option<bool>,
    pub position: Option<Position>,
    pub include: Option<Vec<ModuleId>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub multi_selectable_accordions: Option<bool>,
    pub modules: BTreeMap<ModuleId, ModuleDescriptor>,
}

/// Individually supplied caller fields: highest-precedence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub display_type: Option<DisplayType>,
    pub overlay: Option<bool>,
    pub position: Option<Position>,
    pub multi_selectable_accordions: Option<bool>,
    pub font_size: Option<ModuleDescriptor>,
    pub theme: Option<ModuleDescriptor>,
    pub spacing: Option<ModuleDescriptor>,
    pub layout: Option<ModuleDescriptor>,
}

impl FieldOverrides {
    fn module_overrides(&self) -> impl Iterator<Item = (ModuleId, &ModuleDescriptor)> {
        [
            (ModuleId::FontSize, self.font_size.as_ref()),
            (ModuleId::Theme, self.theme.as_ref()),
            (ModuleId::Spacing, self.spacing.as_ref()),
            (ModuleId::Layout, self.layout.as_ref()),
        ]
        .into_iter()
        .filter_map(|(id, desc)| desc.map(|d| (id, d)))
    }
}

/// Resolve the effective configuration from the three layers.
///
/// Deterministic and idempotent: identical inputs yield an identical
/// configuration. A module supplied directly is appended to `include`
/// if missing; the result never contains duplicates, and every included
/// module must end up with a descriptor carrying at least one option.
pub fn resolve(
    config: &ConfigOverride,
    fields: &FieldOverrides,
) -> Result<WidgetConfiguration, WidgetError> {
    let mut resolved = WidgetConfiguration::factory();

    // Layer 2: object-level override, shallow merge.
    if let Some(v) = config.display_type {
        resolved.display_type = v;
    }
    if let Some(v) = config.overlay {
        resolved.overlay = v;
    }
    if let Some(v) = config.position {
        resolved.position = v;
    }
    if let Some(v) = &config.include {
        resolved.include = v.clone();
    }
    if let Some(v) = &config.title {
        resolved.title = v.clone();
    }
    if let Some(v) = &config.description {
        resolved.description = v.clone();
    }
    if let Some(v) = config.multi_selectable_accordions {
        resolved.multi_selectable_accordions = v;
    }
    for (id, descriptor) in &config.modules {
        resolved.modules.insert(*id, descriptor.clone());
    }

    // Layer 3: individual fields win over everything.
    if let Some(v) = &fields.title {
        resolved.title = v.clone();
    }
    if let Some(v) = &fields.description {
        resolved.description = v.clone();
    }
    if let Some(v) = fields.display_type {
        resolved.display_type = v;
    }
    if let Some(v) = fields.overlay {
        resolved.overlay = v;
    }
    if let Some(v) = fields.position {
        resolved.position = v;
    }
    if let Some(v) = fields.multi_selectable_accordions {
        resolved.multi_selectable_accordions = v;
    }
    for (id, descriptor) in fields.module_overrides() {
        resolved.modules.insert(id, descriptor.clone());
        if !resolved.include.contains(&id) {
            resolved.include.push(id);
        }
    }

    // Order-preserving dedup of the include list.
    let mut seen = Vec::new();
    resolved.include.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });

    for id in &resolved.include {
        match resolved.modules.get(id) {
            None => return Err(WidgetError::MissingModule(*id)),
            Some(descriptor) if descriptor.options.is_empty() => {
                return Err(WidgetError::EmptyModuleOptions(*id));
            }
            Some(_) => {}
        }
    }

    Ok(resolved)
}

/// Data handed to presentational children for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderData {
    pub title: String,
    pub description: String,
    pub position: Position,
    pub multi_selectable_accordions: bool,
    /// Included modules with their descriptors, in include order.
    pub modules: Vec<(ModuleId, ModuleDescriptor)>,
}

impl RenderData {
    pub fn from_configuration(config: &WidgetConfiguration) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            position: config.position,
            multi_selectable_accordions: config.multi_selectable_accordions,
            modules: config
                .include
                .iter()
                .filter_map(|id| config.modules.get(id).map(|d| (*id, d.clone())))
                .collect(),
        }
    }
}

/// "extra-comfort" -> "Extra comfort"
fn humanize(value: &str) -> String {
    let spaced = value.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_includes_the_four_visual_modules() {
        let config = WidgetConfiguration::factory();
        assert_eq!(
            config.include,
            vec![ModuleId::FontSize, ModuleId::Theme, ModuleId::Spacing, ModuleId::Layout]
        );
        for id in &config.include {
            assert!(!config.modules[id].options.is_empty());
        }
        assert_eq!(config.title, "Accessibility settings");
    }

    #[test]
    fn test_precedence_fields_over_object_over_defaults() {
        // Individual fields win over the object, which wins over defaults.
        let object = ConfigOverride {
            title: Some("From object".into()),
            position: Some(Position::Left),
            overlay: Some(true),
            ..ConfigOverride::default()
        };
        let fields = FieldOverrides {
            title: Some("From field".into()),
            position: Some(Position::Right),
            ..FieldOverrides::default()
        };

        let resolved = resolve(&object, &fields).unwrap();
        assert_eq!(resolved.title, "From field");
        assert_eq!(resolved.position, Position::Right);
        assert!(resolved.overlay); // object layer survives where no field given
        assert_eq!(resolved.display_type, DisplayType::Strip); // default survives
    }

    #[test]
    fn test_direct_module_is_auto_included_without_duplicates() {
        let object = ConfigOverride {
            include: Some(vec![ModuleId::Theme, ModuleId::Theme]),
            ..ConfigOverride::default()
        };
        let fields = FieldOverrides {
            spacing: Some(ModuleDescriptor::new("Spacing", "", &["compact", "default"])),
            theme: Some(ModuleDescriptor::new("Theme", "", &["default", "dark"])),
            ..FieldOverrides::default()
        };

        let resolved = resolve(&object, &fields).unwrap();
        assert_eq!(resolved.include, vec![ModuleId::Theme, ModuleId::Spacing]);
        assert_eq!(resolved.modules[&ModuleId::Spacing].options.len(), 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let object = ConfigOverride {
            display_type: Some(DisplayType::Panel),
            ..ConfigOverride::default()
        };
        let fields = FieldOverrides {
            font_size: Some(ModuleDescriptor::new("Text size", "", &["default", "largest"])),
            ..FieldOverrides::default()
        };

        let first = resolve(&object, &fields).unwrap();
        let second = resolve(&object, &fields).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_included_module_without_options_fails_fast() {
        let object = ConfigOverride {
            modules: BTreeMap::from([(
                ModuleId::Theme,
                ModuleDescriptor { title: "Theme".into(), description: String::new(), options: vec![] },
            )]),
            ..ConfigOverride::default()
        };

        let err = resolve(&object, &FieldOverrides::default()).unwrap_err();
        assert!(matches!(err, WidgetError::EmptyModuleOptions(ModuleId::Theme)));
    }

    #[test]
    fn test_unknown_display_type_is_an_error() {
        assert!(DisplayType::parse("panel").is_ok());
        assert!(matches!(
            DisplayType::parse("marquee"),
            Err(WidgetError::UnknownDisplayType(_))
        ));
    }

    #[test]
    fn test_position_and_module_id_parse() {
        for position in [Position::Left, Position::Right, Position::Start, Position::End] {
            assert_eq!(Position::parse(position.as_str()).unwrap(), position);
        }
        assert!(matches!(Position::parse("top"), Err(WidgetError::UnknownPosition(_))));

        assert_eq!(ModuleId::parse("font-size"), Some(ModuleId::FontSize));
        assert_eq!(ModuleId::parse(ModuleId::Language.as_str()), Some(ModuleId::Language));
        assert_eq!(ModuleId::parse("contrast"), None);
    }

    #[test]
    fn test_render_data_fallbacks_and_order() {
        let resolved = resolve(&ConfigOverride::default(), &FieldOverrides::default()).unwrap();
        let data = RenderData::from_configuration(&resolved);

        assert_eq!(data.title, "Accessibility settings");
        assert_eq!(data.description, "");
        assert_eq!(data.position, Position::End);
        assert!(!data.multi_selectable_accordions);
        let ids: Vec<ModuleId> = data.modules.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, resolved.include);
    }

    #[test]
    fn test_humanized_option_labels() {
        let option = ModuleOption::new("extra-comfort");
        assert_eq!(option.label, "Extra comfort");
    }
}
