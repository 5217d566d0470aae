use foundation::time::Time;

/// Deterministic one-shot timer queue.
///
/// Ordering contract:
/// - Due timers fire in `(due_time, insertion_order)` order.
/// - Two timers due at the same instant fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_order: u64,
    timers: Vec<(Time, u64, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_order: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Time, payload: T) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.timers.push((due, order, payload));
    }

    /// Cancels every pending timer whose payload matches.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|(_, _, payload)| !pred(payload));
        before - self.timers.len()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Removes and returns every timer due at or before `now`, in firing order.
    pub fn pop_due(&mut self, now: Time) -> Vec<(Time, T)> {
        self.timers
            .sort_by(|(da, oa, _), (db, ob, _)| da.0.total_cmp(&db.0).then_with(|| oa.cmp(ob)));

        let split = self.timers.partition_point(|(due, _, _)| *due <= now);
        self.timers
            .drain(..split)
            .map(|(due, _, payload)| (due, payload))
            .collect()
    }
}
