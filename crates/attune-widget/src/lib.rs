//! Attune Widget
//!
//! The widget controller for the Attune accessibility settings panel:
//! - Layered resolution of the render-ready widget configuration
//! - Focus trap over the open widget subtree
//! - Keyboard interaction routing (Tab cycling, Escape, scroll-follow)
//! - Status announcements for assistive technology

mod announce;
mod controller;
mod focus;
mod keyboard;
mod options;

pub use announce::{Politeness, StatusChannel, StatusMessage};
pub use controller::{WidgetController, WidgetInputs};
pub use focus::FocusTrap;
pub use keyboard::{Key, KeyEvent};
pub use options::{
    ConfigOverride, DisplayType, FieldOverrides, ModuleDescriptor, ModuleId, ModuleOption,
    Position, RenderData, WidgetConfiguration, resolve,
};

/// Widget configuration error. Invalid caller configuration fails fast;
/// runtime DOM conditions never produce one.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Unknown display type: {0}")]
    UnknownDisplayType(String),

    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("No descriptor for included module: {0}")]
    MissingModule(ModuleId),

    #[error("Module has no selectable options: {0}")]
    EmptyModuleOptions(ModuleId),
}
