//! Widget Controller
//!
//! Resolves the effective widget configuration from layered inputs,
//! reacts to store visibility by managing the focus trap, and routes
//! keyboard interaction.

use std::cell::RefCell;
use std::rc::Rc;

use attune_core::{Scheduler, Subscription, TaskHandle};
use attune_dom::{NodeId, ScrollBehavior, SharedDocument};
use attune_settings::SettingsStore;

use crate::WidgetError;
use crate::announce::{Politeness, StatusChannel, StatusMessage};
use crate::focus::FocusTrap;
use crate::keyboard::{Key, KeyEvent};
use crate::options::{ConfigOverride, FieldOverrides, RenderData, WidgetConfiguration, resolve};

/// Announced when the widget is closed via Escape.
const CLOSE_STATUS: &str = "Accessibility settings closed";

/// Tracked caller inputs. Any change re-resolves the configuration,
/// exactly once per change set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetInputs {
    pub config: ConfigOverride,
    pub fields: FieldOverrides,
}

/// One controller per rendered widget. The store is shared and
/// application-wide; the controller is torn down with its DOM subtree.
pub struct WidgetController {
    store: Rc<RefCell<SettingsStore>>,
    document: SharedDocument,
    scheduler: Scheduler,
    widget_root: NodeId,
    inputs: WidgetInputs,
    config: WidgetConfiguration,
    trap: Rc<RefCell<FocusTrap>>,
    status: Rc<RefCell<StatusChannel>>,
    subscriptions: Vec<Subscription>,
    pending_scroll: Option<TaskHandle>,
}

impl WidgetController {
    pub fn new(
        store: Rc<RefCell<SettingsStore>>,
        document: SharedDocument,
        scheduler: Scheduler,
        widget_root: NodeId,
        inputs: WidgetInputs,
    ) -> Result<Self, WidgetError> {
        let config = resolve(&inputs.config, &inputs.fields)?;
        Ok(Self {
            store,
            document,
            scheduler,
            widget_root,
            inputs,
            config,
            trap: Rc::new(RefCell::new(FocusTrap::new())),
            status: Rc::new(RefCell::new(StatusChannel::default())),
            subscriptions: Vec::new(),
            pending_scroll: None,
        })
    }

    /// Subscribe to store visibility. Call once after construction; the
    /// subscription lives until [`WidgetController::teardown`].
    pub fn initialize(&mut self) {
        let trap = self.trap.clone();
        let document = self.document.clone();
        let scheduler = self.scheduler.clone();
        let widget_root = self.widget_root;

        let subscription = self.store.borrow().visibility().subscribe(move |open| {
            if *open {
                trap.borrow_mut().activate(&document, &scheduler, widget_root);
            } else {
                trap.borrow_mut().deactivate(&scheduler);
            }
        });
        self.subscriptions.push(subscription);
    }

    /// Re-resolve the configuration when any tracked input changed.
    /// Several simultaneous changes still produce one recomputation.
    /// Returns whether a recomputation happened.
    pub fn on_inputs_changed(&mut self, inputs: WidgetInputs) -> Result<bool, WidgetError> {
        if inputs == self.inputs {
            return Ok(false);
        }
        self.inputs = inputs;
        self.setup_options()?;
        Ok(true)
    }

    /// Recompute the effective configuration from the current inputs.
    pub fn setup_options(&mut self) -> Result<(), WidgetError> {
        self.config = resolve(&self.inputs.config, &self.inputs.fields)?;
        Ok(())
    }

    pub fn configuration(&self) -> &WidgetConfiguration {
        &self.config
    }

    /// Minimal data snapshot for presentational children.
    pub fn render_data(&self) -> RenderData {
        RenderData::from_configuration(&self.config)
    }

    /// The just-revealed subtree has committed: re-derive the trap
    /// boundaries if the widget is open.
    pub fn on_dom_ready(&mut self) {
        if self.store.borrow().is_open() {
            self.trap
                .borrow_mut()
                .activate(&self.document, &self.scheduler, self.widget_root);
        }
    }

    /// Route a keyboard event. No-op while the widget is closed.
    pub fn handle_key(&mut self, event: &mut KeyEvent) {
        if !self.store.borrow().is_open() {
            return;
        }
        match event.key {
            Key::Tab => {
                let wrapped = {
                    let trap = self.trap.borrow();
                    let mut document = self.document.borrow_mut();
                    trap.wrap(&mut *document, event.shift)
                };
                if wrapped.is_some() {
                    event.prevent_default();
                }
                // Keep whichever element ends up focused in center view.
                let target = wrapped.or_else(|| self.document.borrow().active_element());
                if let Some(node) = target {
                    self.document.borrow_mut().scroll_into_view(node, ScrollBehavior::Smooth);
                }
            }
            Key::Escape => {
                self.store.borrow_mut().toggle(None, true);
                self.status.borrow_mut().push(CLOSE_STATUS, Politeness::Polite);
            }
            Key::ArrowUp | Key::ArrowDown => {
                // Scroll-follow once conditional content has rendered.
                self.cancel_pending_scroll();
                let document = self.document.clone();
                let widget_root = self.widget_root;
                self.pending_scroll = Some(self.scheduler.defer(move || {
                    let inside = {
                        let doc = document.borrow();
                        doc.active_element().filter(|node| doc.contains(widget_root, *node))
                    };
                    if let Some(node) = inside {
                        document.borrow_mut().scroll_into_view(node, ScrollBehavior::Smooth);
                    }
                }));
            }
            Key::Other => {}
        }
    }

    /// Relay a status message emitted by a presentational child.
    pub fn relay_status(&self, message: &str) {
        self.status.borrow_mut().push(message, Politeness::Polite);
    }

    /// Next queued assistive-technology announcement.
    pub fn next_status(&self) -> Option<StatusMessage> {
        self.status.borrow_mut().next()
    }

    pub fn focus_boundaries(&self) -> (Option<NodeId>, Option<NodeId>) {
        self.trap.borrow().boundaries()
    }

    /// Release every subscription and cancel pending deferred work.
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        self.subscriptions.clear();
        self.cancel_pending_scroll();
        self.trap.borrow_mut().deactivate(&self.scheduler);
        tracing::debug!("widget controller torn down");
    }

    fn cancel_pending_scroll(&mut self) {
        if let Some(handle) = self.pending_scroll.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl Drop for WidgetController {
    fn drop(&mut self) {
        self.teardown();
    }
}
