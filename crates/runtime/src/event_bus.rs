use std::collections::VecDeque;

/// An event tagged with the order it was emitted in.
#[derive(Debug, Clone, PartialEq)]
pub struct Queued<E> {
    pub seq: u64,
    pub event: E,
}

/// FIFO queue between event producers (map widget, host UI) and the
/// single-threaded consumer that routes them.
///
/// Sequence numbers keep increasing across drains, so consumers can tell
/// whether an event is older than one they already handled.
#[derive(Debug)]
pub struct EventBus<E> {
    next_seq: u64,
    events: VecDeque<Queued<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            events: VecDeque::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event` and returns its sequence number.
    pub fn emit(&mut self, event: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push_back(Queued { seq, event });
        seq
    }

    pub fn pop(&mut self) -> Option<Queued<E>> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
