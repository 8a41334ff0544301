//! Focus Trap
//!
//! Keeps Tab cycling inside the open widget subtree. Boundaries are
//! derived from a live query when visibility flips to open and cleared
//! when it flips to closed; the initial focus is deferred so a
//! just-revealed subtree has committed to the DOM.

use attune_core::{Scheduler, TaskHandle};
use attune_dom::{HostDocument, NodeId, SharedDocument};

/// Trap state: `Inactive` until the widget opens, `Active` while it
/// holds first/last boundaries.
#[derive(Debug, Default)]
pub struct FocusTrap {
    first: Option<NodeId>,
    last: Option<NodeId>,
    pending_focus: Option<TaskHandle>,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.first.is_some()
    }

    pub fn boundaries(&self) -> (Option<NodeId>, Option<NodeId>) {
        (self.first, self.last)
    }

    /// Query focusable descendants of `widget_root`, record the
    /// boundaries, and defer focusing the first one.
    ///
    /// A widget with zero focusable elements leaves both boundaries
    /// unset; Tab handling then degrades to a no-op.
    pub fn activate(&mut self, document: &SharedDocument, scheduler: &Scheduler, widget_root: NodeId) {
        self.cancel_pending(scheduler);

        let focusable = document.borrow().query_focusable(widget_root);
        self.first = focusable.first().copied();
        self.last = focusable.last().copied();
        tracing::debug!("focus trap active over {} elements", focusable.len());

        if let Some(first) = self.first {
            let document = document.clone();
            self.pending_focus = Some(scheduler.defer(move || {
                document.borrow_mut().focus(first);
            }));
        }
    }

    /// Cancel any still-pending initial focus and clear the boundaries.
    pub fn deactivate(&mut self, scheduler: &Scheduler) {
        self.cancel_pending(scheduler);
        self.first = None;
        self.last = None;
    }

    /// Handle a Tab press at a boundary. Returns the node focus wrapped
    /// to, or `None` when the press should fall through to the host.
    pub fn wrap(&self, document: &mut dyn HostDocument, shift: bool) -> Option<NodeId> {
        let (first, last) = (self.first?, self.last?);
        let active = document.active_element()?;

        let target = if shift && active == first {
            last
        } else if !shift && active == last {
            first
        } else {
            return None;
        };
        document.focus(target);
        Some(target)
    }

    fn cancel_pending(&mut self, scheduler: &Scheduler) {
        if let Some(handle) = self.pending_focus.take() {
            scheduler.cancel(handle);
        }
    }
}
