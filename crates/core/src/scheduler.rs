//! Scheduler - tick timer, pause state, delayed window and one-shot timers
//!
//! Time is a virtual millisecond clock. The host moves it forward with
//! [`Scheduler::pop_due`] and runs whatever comes back; nothing here sleeps or
//! spawns threads.
//!
//! The repeating tick timer can only be created by [`Scheduler::start_ticking`]
//! and removed by [`Scheduler::stop_ticking`], and starting always replaces the
//! previous timer, so at most one tick stream exists at any time.
//!
//! Due timers fire in order of due time; timers due at the same millisecond
//! fire in the order they were armed. The tick timer counts as re-armed each
//! time it fires.

/// Handle of an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Interval {
    id: TimerId,
    period_ms: u64,
    due_ms: u64,
    seq: u64,
}

struct OneShot<T> {
    id: TimerId,
    due_ms: u64,
    seq: u64,
    task: T,
}

/// Something that came due.
pub enum Fired<T> {
    /// The repeating tick timer fired. Whether it has any effect is decided by
    /// [`Scheduler::is_live`].
    Tick,
    /// A one-shot timer fired with its payload.
    Task(T),
}

/// Tick and timer state for one engine instance.
pub struct Scheduler<T> {
    now_ms: u64,
    interval_ms: u64,
    elapsed_ticks: u64,
    paused: bool,
    /// Length of the most recent delayed window while one is open.
    delayed_ms: Option<u64>,
    ticker: Option<Interval>,
    timers: Vec<OneShot<T>>,
    next_id: u64,
    next_seq: u64,
}

impl<T> Scheduler<T> {
    /// Create a stopped scheduler. `interval_ms` must be non-zero.
    pub fn new(interval_ms: u64) -> Self {
        debug_assert!(interval_ms > 0);
        Self {
            now_ms: 0,
            interval_ms: interval_ms.max(1),
            elapsed_ticks: 0,
            paused: false,
            delayed_ms: None,
            ticker: None,
            timers: Vec::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn delayed(&self) -> bool {
        self.delayed_ms.is_some()
    }

    /// Length of the currently open delayed window, if any.
    pub fn delayed_ms(&self) -> Option<u64> {
        self.delayed_ms
    }

    /// Open a delayed window; overwrites the bookkeeping of an open one.
    pub fn begin_delay(&mut self, ms: u64) {
        self.delayed_ms = Some(ms);
    }

    /// Close the delayed window, whichever call opened it.
    pub fn end_delay(&mut self) {
        self.delayed_ms = None;
    }

    /// A tick has effect only when neither paused nor delayed.
    pub fn is_live(&self) -> bool {
        !self.paused && self.delayed_ms.is_none()
    }

    /// Count a live tick.
    pub fn record_tick(&mut self) -> u64 {
        self.elapsed_ticks += 1;
        self.elapsed_ticks
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Id of the active tick timer.
    pub fn ticker_id(&self) -> Option<TimerId> {
        self.ticker.map(|t| t.id)
    }

    /// Start the tick timer at the current interval, cancelling any running one.
    pub fn start_ticking(&mut self) -> TimerId {
        let id = self.alloc_id();
        let seq = self.alloc_seq();
        self.ticker = Some(Interval {
            id,
            period_ms: self.interval_ms,
            due_ms: self.now_ms.saturating_add(self.interval_ms),
            seq,
        });
        id
    }

    pub fn stop_ticking(&mut self) {
        self.ticker = None;
    }

    /// Replace the tick interval and restart the tick timer from now.
    pub fn set_interval(&mut self, interval_ms: u64) -> TimerId {
        self.interval_ms = interval_ms.max(1);
        self.stop_ticking();
        self.start_ticking()
    }

    /// Arm a one-shot timer `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = self.alloc_id();
        let seq = self.alloc_seq();
        self.timers.push(OneShot {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            task,
        });
        id
    }

    /// Disarm a one-shot timer. Returns false if it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Returns `None` (and moves the clock to `until_ms`) when
    /// nothing else is due.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let next_shot = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, t)| (i, t.due_ms, t.seq));
        let tick = self
            .ticker
            .filter(|t| t.due_ms <= until_ms)
            .map(|t| (t.due_ms, t.seq));

        let tick_first = match (tick, next_shot) {
            (Some(tick), Some((_, due, seq))) => tick < (due, seq),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => {
                self.now_ms = self.now_ms.max(until_ms);
                return None;
            }
        };

        if tick_first {
            let seq = self.alloc_seq();
            let ticker = self.ticker.as_mut()?;
            self.now_ms = ticker.due_ms;
            ticker.seq = seq;
            match ticker.due_ms.checked_add(ticker.period_ms) {
                Some(next) => ticker.due_ms = next,
                // The clock cannot move past u64::MAX, so no further tick can come due.
                None => self.ticker = None,
            }
            Some(Fired::Tick)
        } else {
            let (i, due, _) = next_shot?;
            self.now_ms = due;
            Some(Fired::Task(self.timers.swap_remove(i).task))
        }
    }

    fn alloc_id(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }

    fn alloc_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
