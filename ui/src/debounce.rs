use std::cell::RefCell;
use std::rc::Rc;

/// Something that can run a task later. Dropping the returned handle must
/// cancel the task if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers; a dropped `Timeout` is cleared.
#[cfg(feature = "web")]
#[derive(Clone, Copy, Default)]
pub struct GlooScheduler;

#[cfg(feature = "web")]
impl Scheduler for GlooScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(delay_ms, task)
    }
}

/// Collapses bursts of triggers into a single run after `delay_ms` of quiet.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    task: Rc<dyn Fn()>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32, task: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            delay_ms,
            task: Rc::new(task),
            pending: RefCell::new(None),
        }
    }

    pub fn trigger(&self) {
        let task = self.task.clone();
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(move || task()));

        // replacing the old handle drops it, which cancels the previous run
        self.pending.replace(Some(handle));
    }

    /// Drops any pending run without scheduling a new one.
    pub fn cancel(&self) {
        self.pending.take();
    }
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::manual::ManualScheduler;
    use super::*;

    fn recording(clock: &ManualScheduler, delay: u32) -> (Debouncer<ManualScheduler>, Rc<RefCell<Vec<u64>>>) {
        let runs = Rc::new(RefCell::new(Vec::new()));
        let (r, c) = (runs.clone(), clock.clone());
        let d = Debouncer::new(clock.clone(), delay, move || r.borrow_mut().push(c.now()));
        (d, runs)
    }

    #[test]
    fn test_single_trigger_runs_after_quiet_window() {
        let clock = ManualScheduler::default();
        let (d, runs) = recording(&clock, 80);

        d.trigger();
        clock.advance(79);
        assert!(runs.borrow().is_empty());
        clock.advance(1);
        assert_eq!(*runs.borrow(), vec![80]);
    }

    #[test]
    fn test_burst_collapses_to_one_run_after_last_trigger() {
        let clock = ManualScheduler::default();
        let (d, runs) = recording(&clock, 150);

        for _ in 0..10 {
            d.trigger();
            clock.advance(20);
        }
        // last trigger at t=180
        clock.advance(1000);
        assert_eq!(*runs.borrow(), vec![180 + 150]);
    }

    #[test]
    fn test_separate_bursts_run_separately() {
        let clock = ManualScheduler::default();
        let (d, runs) = recording(&clock, 80);

        d.trigger();
        clock.advance(100);
        d.trigger();
        d.trigger();
        clock.advance(100);
        assert_eq!(*runs.borrow(), vec![80, 180]);
    }

    #[test]
    fn test_cancel_drops_pending_run() {
        let clock = ManualScheduler::default();
        let (d, runs) = recording(&clock, 80);

        d.trigger();
        d.cancel();
        clock.advance(500);
        assert!(runs.borrow().is_empty());
    }
}
