/// A published event with its position in the bus' history.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<E> {
    pub seq: u64,
    pub payload: E,
}

/// Append-only, drainable event log.
///
/// Producers `emit`; the host drains once per frame and forwards to whatever
/// paints or persists the events.
#[derive(Debug, Clone)]
pub struct EventBus<E> {
    next_seq: u64,
    events: Vec<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            events: Vec::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, payload: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event { seq, payload });
    }

    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    pub fn payloads(&self) -> impl Iterator<Item = &E> {
        self.events.iter().map(|e| &e.payload)
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        std::mem::take(&mut self.events)
    }
}
