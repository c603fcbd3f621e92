use std::cell::RefCell;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

pub type Task = Box<dyn FnOnce()>;

/// Deferred execution on the host's update loop.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;
    /// Returns false when the timer already ran or was cancelled.
    fn cancel(&self, id: TimerId) -> bool;
}

struct Pending {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct QueueState {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Virtual-time timer queue. The host advances it from its frame loop; tests advance it by hand.
#[derive(Default)]
pub struct TimerQueue {
    state: RefCell<QueueState>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Moves time forward by `dt`, running every task that falls due, in due order. Tasks may
    /// schedule or cancel timers; anything they schedule inside the window runs as well.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now() + dt;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        self.state.borrow_mut().now = target;
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let (ix, due) = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(ix, p)| (ix, p.due))?;
        let pending = state.pending.remove(ix);
        state.now = due;
        Some(pending.task)
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.push(Pending { id, due, task });
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|p| p.id != id);
        state.pending.len() != before
    }
}
