//! Deferred, fire-and-forget actions
//!
//! Actions are queued with a due time and run by the owner between ticks.
//! Nothing waits on them; an action that finds its target gone just returns.

use std::cell::RefCell;
use std::rc::Rc;

type Deferred = Box<dyn FnOnce()>;

struct Pending {
    due_at: f32,
    action: Deferred,
}

#[derive(Default)]
struct Queue {
    now: f32,
    pending: Vec<Pending>,
}

/// Queue of actions waiting for their due time
#[derive(Default)]
pub struct DeferredActions {
    queue: Rc<RefCell<Queue>>,
}

/// Cloneable handle for scheduling into a `DeferredActions` queue
#[derive(Clone)]
pub struct DeferredHandle {
    queue: Rc<RefCell<Queue>>,
}

impl DeferredHandle {
    /// Run `action` once `delay` seconds of elapsed time have passed
    pub fn schedule(&self, delay: f32, action: impl FnOnce() + 'static) {
        let mut queue = self.queue.borrow_mut();
        let due_at = queue.now + delay.max(0.0);
        queue.pending.push(Pending {
            due_at,
            action: Box::new(action),
        });
        log::debug!("Deferred action scheduled for t={due_at:.2}s");
    }
}

impl DeferredActions {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for scheduling
    pub fn handle(&self) -> DeferredHandle {
        DeferredHandle {
            queue: Rc::clone(&self.queue),
        }
    }

    /// Number of actions still waiting
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Set the clock that new delays are measured from
    ///
    /// Call before anything schedules during a tick so delays start at the
    /// current frame rather than the previous one.
    pub fn advance_clock(&mut self, elapsed_time: f32) {
        self.queue.borrow_mut().now = elapsed_time;
    }

    /// Advance the clock to `elapsed_time` and run everything due, in due order
    ///
    /// Returns how many actions ran. Actions may schedule further actions;
    /// those run on a later call.
    pub fn run_due(&mut self, elapsed_time: f32) -> usize {
        let mut due = {
            let mut queue = self.queue.borrow_mut();
            queue.now = elapsed_time;
            let (due, waiting): (Vec<_>, Vec<_>) = queue
                .pending
                .drain(..)
                .partition(|pending| pending.due_at <= elapsed_time);
            queue.pending = waiting;
            due
        };
        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at));
        let count = due.len();
        // The queue borrow is released, so actions are free to schedule more work
        for pending in due {
            (pending.action)();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_action_runs_after_delay_only() {
        let mut deferred = DeferredActions::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        deferred.handle().schedule(2.0, move || flag.set(true));

        assert_eq!(deferred.run_due(1.0), 0);
        assert!(!fired.get());
        assert_eq!(deferred.run_due(2.5), 1);
        assert!(fired.get());
        assert_eq!(deferred.pending(), 0);
    }

    #[test]
    fn test_delay_is_relative_to_last_run() {
        let mut deferred = DeferredActions::new();
        deferred.run_due(10.0);
        deferred.handle().schedule(2.0, || {});
        assert_eq!(deferred.run_due(11.0), 0);
        assert_eq!(deferred.run_due(12.0), 1);
    }

    #[test]
    fn test_delay_starts_at_advanced_clock() {
        let mut deferred = DeferredActions::new();
        deferred.run_due(0.9);
        deferred.advance_clock(1.0);
        deferred.handle().schedule(2.0, || {});
        assert_eq!(deferred.run_due(2.95), 0);
        assert_eq!(deferred.run_due(3.0), 1);
    }

    #[test]
    fn test_actions_may_schedule_more() {
        let mut deferred = DeferredActions::new();
        let handle = deferred.handle();
        let count = Rc::new(Cell::new(0));
        let outer = count.clone();
        deferred.handle().schedule(0.0, move || {
            outer.set(outer.get() + 1);
            let inner = outer.clone();
            handle.schedule(0.0, move || inner.set(inner.get() + 1));
        });

        assert_eq!(deferred.run_due(0.0), 1);
        assert_eq!(deferred.run_due(0.1), 1);
        assert_eq!(count.get(), 2);
    }
}
