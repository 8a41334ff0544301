//! Deferred Tasks
//!
//! Cancelable single-shot tasks, drained by the host event loop at the
//! next rendering opportunity. Single-threaded and cooperative.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Default)]
struct Queue {
    tasks: Vec<(u64, Box<dyn FnOnce()>)>,
    next_id: u64,
}

/// Single-shot task queue.
///
/// Clones share the same queue; holders keep a `TaskHandle` so a pending
/// task can be canceled before the host pumps the queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<Queue>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next `run_pending` pass.
    pub fn defer(&self, task: impl FnOnce() + 'static) -> TaskHandle {
        let mut queue = self.inner.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.tasks.push((id, Box::new(task)));
        TaskHandle(id)
    }

    /// Remove a pending task. Canceling an already-run task is a no-op.
    pub fn cancel(&self, handle: TaskHandle) {
        self.inner.borrow_mut().tasks.retain(|(id, _)| *id != handle.0);
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Drain and run every queued task.
    ///
    /// Tasks deferred while draining run on the next pass, matching the
    /// one-macrotask-per-frame model of a UI event loop.
    pub fn run_pending(&self) {
        let tasks = std::mem::take(&mut self.inner.borrow_mut().tasks);
        for (_, task) in tasks {
            task();
        }
    }
}
