//! Settings Store
//!
//! Single source of truth for persisted accessibility preferences and
//! for the widget's open/closed state. Applies resolved settings as
//! attributes on the host document root.

use attune_core::Observable;
use attune_dom::{NodeId, SharedDocument};

use crate::language::supported_language;
use crate::settings::{Settings, SettingsField, SettingsUpdate};
use crate::storage::{SharedStorage, load_saved, save_settings};

/// Prefix of the data attributes set on the document root.
pub const ATTR_PREFIX: &str = "data-attune";

/// Fallback trigger element looked up when no explicit target resolves.
pub const DEFAULT_TRIGGER_ID: &str = "attune-trigger";

/// One instance per application; controllers and triggers share it.
pub struct SettingsStore {
    document: SharedDocument,
    storage: SharedStorage,
    locale: String,
    settings: Settings,
    visible: bool,
    restore_target: Option<NodeId>,
    visibility: Observable<bool>,
    widget_target_id: String,
    target_id_changes: Observable<String>,
}

impl SettingsStore {
    /// Construct the store: merge any persisted blob over environment
    /// defaults and apply the result to the document once.
    ///
    /// `locale` is the raw environment tag (e.g. `en-US`); see
    /// [`crate::detect_locale`].
    pub fn new(document: SharedDocument, storage: SharedStorage, locale: &str) -> Self {
        let mut settings = Settings {
            language: supported_language(locale),
            ..Settings::default()
        };
        if let Some(saved) = load_saved(&*storage.borrow()) {
            settings.merge(&saved);
        }

        let store = Self {
            document,
            storage,
            locale: locale.to_string(),
            settings,
            visible: false,
            restore_target: None,
            visibility: Observable::new(),
            widget_target_id: "attune-widget".to_string(),
            target_id_changes: Observable::new(),
        };
        store.apply();
        store
    }

    /// Current in-memory snapshot.
    pub fn current(&self) -> Settings {
        self.settings.clone()
    }

    /// Merge a partial update, persist the result, and apply it to the
    /// document. All three happen synchronously; persistence failures
    /// degrade silently.
    pub fn update(&mut self, update: &SettingsUpdate) {
        self.settings.merge(update);
        save_settings(&mut *self.storage.borrow_mut(), &self.settings);
        self.apply();
    }

    /// Restore fields to their defaults. An empty slice resets every
    /// field, recomputing the language from the environment tag.
    pub fn reset(&mut self, fields: &[SettingsField]) {
        let defaults = Settings::default();
        let mut update = SettingsUpdate::new();
        for field in SettingsField::ALL {
            if !fields.is_empty() && !fields.contains(&field) {
                continue;
            }
            match field {
                SettingsField::FontSize => update.font_size = Some(defaults.font_size),
                SettingsField::Theme => update.theme = Some(defaults.theme),
                SettingsField::Spacing => update.spacing = Some(defaults.spacing),
                SettingsField::Layout => update.layout = Some(defaults.layout),
                SettingsField::Language => update.language = Some(self.supported_language()),
            }
        }
        tracing::debug!(
            "resetting {} settings fields",
            if fields.is_empty() { SettingsField::ALL.len() } else { fields.len() }
        );
        self.update(&update);
    }

    /// Flip (or force-close) widget visibility.
    ///
    /// Resolves the restoration target from `target` via its closest
    /// activator ancestor. When the transition lands closed, the resolved
    /// target is focused immediately and the stored reference cleared, so
    /// restoration happens at most once per open cycle.
    pub fn toggle(&mut self, target: Option<NodeId>, force_close: bool) {
        if let Some(node) = target {
            let resolved = self.document.borrow().closest_activator(node);
            if let Some(resolved) = resolved {
                self.restore_target = Some(resolved);
            }
        }

        let next = if force_close { false } else { !self.visible };
        if next == self.visible {
            // Closed + force_close stays closed.
            return;
        }
        self.visible = next;

        if next {
            if self.restore_target.is_none() {
                self.restore_target = self.document.borrow().element_by_id(DEFAULT_TRIGGER_ID);
            }
        } else {
            let restore = self
                .restore_target
                .take()
                .or_else(|| self.document.borrow().element_by_id(DEFAULT_TRIGGER_ID));
            if let Some(node) = restore {
                self.document.borrow_mut().focus(node);
            }
        }

        tracing::debug!("widget {}", if next { "opened" } else { "closed" });
        self.visibility.emit(&next);
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Element pending focus restoration, if an open cycle is active.
    pub fn restore_target(&self) -> Option<NodeId> {
        self.restore_target
    }

    /// Visibility channel. Emits after each open/close transition.
    pub fn visibility(&self) -> Observable<bool> {
        self.visibility.clone()
    }

    /// Element id triggers reference through `aria-controls`.
    pub fn target_id(&self) -> &str {
        &self.widget_target_id
    }

    pub fn set_target_id(&mut self, id: &str) {
        if self.widget_target_id != id {
            self.widget_target_id = id.to_string();
            self.target_id_changes.emit(&self.widget_target_id);
        }
    }

    /// Target-id channel, for trigger wiring shared across triggers.
    pub fn target_id_changes(&self) -> Observable<String> {
        self.target_id_changes.clone()
    }

    /// Normalized environment language, clamped to the supported set.
    pub fn supported_language(&self) -> String {
        supported_language(&self.locale)
    }

    fn apply(&self) {
        let mut doc = self.document.borrow_mut();
        let root = doc.root();
        let s = &self.settings;
        doc.set_attribute(root, &format!("{ATTR_PREFIX}-font-size"), s.font_size.as_str());
        doc.set_attribute(root, &format!("{ATTR_PREFIX}-theme"), s.theme.as_str());
        doc.set_attribute(root, &format!("{ATTR_PREFIX}-spacing"), s.spacing.as_str());
        doc.set_attribute(root, &format!("{ATTR_PREFIX}-language"), &s.language);
        doc.set_attribute(root, &format!("{ATTR_PREFIX}-layout"), s.layout.as_str());
        doc.set_attribute(root, "lang", &s.language);
        doc.set_attribute(root, "dir", if s.language == "ar" { "rtl" } else { "" });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use attune_dom::{HostDocument, MemoryDocument};

    use super::*;
    use crate::settings::{FontSize, Theme};
    use crate::storage::{MemoryStorage, NullStorage, STORAGE_KEY, StorageBackend};

    struct World {
        doc: Rc<RefCell<MemoryDocument>>,
        storage: Rc<RefCell<MemoryStorage>>,
        trigger: NodeId,
    }

    fn world() -> World {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let body = doc.append_element(root, "body");
        let trigger = doc.append_with_id(body, "button", DEFAULT_TRIGGER_ID);
        World {
            doc: Rc::new(RefCell::new(doc)),
            storage: Rc::new(RefCell::new(MemoryStorage::new())),
            trigger,
        }
    }

    fn store_for(world: &World, locale: &str) -> SettingsStore {
        SettingsStore::new(world.doc.clone(), world.storage.clone(), locale)
    }

    #[test]
    fn test_fresh_store_uses_environment_language() {
        // No persisted data, supported environment language.
        let world = world();
        let store = store_for(&world, "es");

        let settings = store.current();
        assert_eq!(settings.language, "es");
        assert_eq!(settings.font_size, FontSize::Default);
        assert_eq!(settings.theme, Theme::Default);
        assert_eq!(settings.spacing.as_str(), "default");
        assert_eq!(settings.layout.as_str(), "default");
    }

    #[test]
    fn test_update_merges_persists_applies() {
        let world = world();
        let mut store = store_for(&world, "en-US");
        store.update(&SettingsUpdate::new().font_size(FontSize::Largest));

        assert_eq!(store.current().font_size, FontSize::Largest);

        let blob = world.storage.borrow().read(STORAGE_KEY).unwrap();
        assert!(blob.contains("\"fontSize\":\"largest\""));

        let doc = world.doc.borrow();
        let root = doc.root();
        assert_eq!(doc.attribute(root, "data-attune-font-size").as_deref(), Some("largest"));

        // A fresh store over the same storage reflects the merged value.
        drop(doc);
        let fresh = store_for(&world, "en-US");
        assert_eq!(fresh.current().font_size, FontSize::Largest);
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        let world = world();
        world.storage.borrow_mut().write(STORAGE_KEY, "][ corrupt");
        let store = store_for(&world, "fr");
        assert_eq!(store.current(), Settings { language: "fr".into(), ..Settings::default() });
    }

    #[test]
    fn test_persistence_failure_still_applies() {
        let world = world();
        let storage: SharedStorage = Rc::new(RefCell::new(NullStorage));
        let mut store = SettingsStore::new(world.doc.clone(), storage, "en");

        store.update(&SettingsUpdate::new().theme(Theme::Dark));
        assert_eq!(store.current().theme, Theme::Dark);
        let doc = world.doc.borrow();
        assert_eq!(doc.attribute(doc.root(), "data-attune-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_reset_is_idempotent_and_selective() {
        // Double reset equals single; selective reset leaves the rest.
        let world = world();
        let mut store = store_for(&world, "es");
        store.update(
            &SettingsUpdate::new()
                .font_size(FontSize::Larger)
                .theme(Theme::Dark)
                .language("fr"),
        );

        store.reset(&[SettingsField::Theme]);
        let after = store.current();
        assert_eq!(after.theme, Theme::Default);
        assert_eq!(after.font_size, FontSize::Larger);
        assert_eq!(after.language, "fr");

        store.reset(&[]);
        let once = store.current();
        store.reset(&[]);
        assert_eq!(store.current(), once);
        assert_eq!(once.language, "es");
        assert_eq!(once.font_size, FontSize::Default);
    }

    #[test]
    fn test_rtl_direction_for_arabic() {
        let world = world();
        let mut store = store_for(&world, "en");
        store.update(&SettingsUpdate::new().language("ar"));
        {
            let doc = world.doc.borrow();
            assert_eq!(doc.attribute(doc.root(), "dir").as_deref(), Some("rtl"));
            assert_eq!(doc.attribute(doc.root(), "lang").as_deref(), Some("ar"));
        }

        store.update(&SettingsUpdate::new().language("en"));
        let doc = world.doc.borrow();
        assert_eq!(doc.attribute(doc.root(), "dir").as_deref(), Some(""));
    }

    #[test]
    fn test_toggle_symmetry() {
        // Closed -> Open -> Closed; force_close always lands Closed.
        let world = world();
        let mut store = store_for(&world, "en");
        assert!(!store.is_open());

        store.toggle(None, false);
        assert!(store.is_open());
        store.toggle(None, false);
        assert!(!store.is_open());

        store.toggle(None, true);
        assert!(!store.is_open());
        store.toggle(None, false);
        store.toggle(None, true);
        assert!(!store.is_open());
    }

    #[test]
    fn test_restore_on_close() {
        let world = world();
        let button_a = {
            let mut doc = world.doc.borrow_mut();
            let body = doc.tree().parent(world.trigger).unwrap();
            doc.append_element(body, "button")
        };
        let mut store = store_for(&world, "en");

        store.toggle(Some(button_a), false);
        assert!(store.is_open());
        assert_eq!(store.restore_target(), Some(button_a));

        store.toggle(None, true);
        assert!(!store.is_open());
        assert_eq!(world.doc.borrow().active_element(), Some(button_a));
        assert_eq!(store.restore_target(), None);
    }

    #[test]
    fn test_restore_resolves_closest_activator() {
        let world = world();
        let (button, icon) = {
            let mut doc = world.doc.borrow_mut();
            let root = doc.root();
            let button = doc.append_element(root, "button");
            let icon = doc.append_element(button, "span");
            (button, icon)
        };
        let mut store = store_for(&world, "en");

        store.toggle(Some(icon), false);
        assert_eq!(store.restore_target(), Some(button));
    }

    #[test]
    fn test_open_without_target_falls_back_to_default_trigger() {
        let world = world();
        let mut store = store_for(&world, "en");

        store.toggle(None, false);
        assert_eq!(store.restore_target(), Some(world.trigger));

        store.toggle(None, true);
        assert_eq!(world.doc.borrow().active_element(), Some(world.trigger));
    }

    #[test]
    fn test_visibility_observable_emits_transitions() {
        let world = world();
        let mut store = store_for(&world, "en");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let _sub = store.visibility().subscribe(move |open| sink.borrow_mut().push(*open));

        store.toggle(None, false);
        store.toggle(None, true);
        store.toggle(None, true); // no transition, no emission
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_target_id_emits_only_on_change() {
        let world = world();
        let mut store = store_for(&world, "en");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let _sub = store
            .target_id_changes()
            .subscribe(move |id: &String| sink.borrow_mut().push(id.clone()));

        store.set_target_id("attune-widget"); // unchanged
        store.set_target_id("sidebar-widget");
        assert_eq!(*seen.borrow(), vec!["sidebar-widget".to_string()]);
        assert_eq!(store.target_id(), "sidebar-widget");
    }
}
