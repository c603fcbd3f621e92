use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::{Scheduler, TimerId};

#[derive(Default)]
struct Slot {
    timer: Cell<Option<TimerId>>,
    generation: Cell<u64>,
}

/// Collapses bursts of `trigger` calls into one callback, `delay` after the last call.
pub struct Debounced {
    scheduler: Rc<dyn Scheduler>,
    delay: Duration,
    callback: Rc<dyn Fn()>,
    slot: Rc<Slot>,
}

impl Debounced {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        delay: Duration,
        callback: impl Fn() + 'static,
    ) -> Self {
        Self {
            scheduler,
            delay,
            callback: Rc::new(callback),
            slot: Rc::new(Slot::default()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.slot.timer.get().is_some()
    }

    pub fn trigger(&self) {
        self.cancel_pending();
        let generation = self.slot.generation.get();
        let slot = Rc::downgrade(&self.slot);
        let callback = self.callback.clone();
        let id = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                let Some(slot) = slot.upgrade() else {
                    return;
                };
                if slot.generation.get() != generation {
                    return;
                }
                slot.timer.set(None);
                callback();
            }),
        );
        self.slot.timer.set(Some(id));
    }

    pub fn clear(&self) {
        self.cancel_pending();
    }

    fn cancel_pending(&self) {
        // Bumping the generation also disarms a task the scheduler has already dequeued.
        self.slot.generation.set(self.slot.generation.get().wrapping_add(1));
        if let Some(id) = self.slot.timer.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl Drop for Debounced {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
