//! Shared event log for simulated hardware
//!
//! One log is shared by every simulated component of a test, giving a
//! single timeline of hardware operations.

use core::cell::RefCell;

use heapless::Vec;

/// Maximum events one test timeline can hold
pub const LOG_CAPACITY: usize = 256;

/// One recorded hardware operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimEvent {
    /// Baud divisor programmed
    BaudDivisorSet(u16),
    /// 9-bit mode enabled or disabled
    NineBitModeSet(bool),
    /// Receiver enable cycled on
    ReceiverEnabled,
    /// Receiver enable cycled off
    ReceiverDisabled,
    /// Transmitter armed
    TransmitterEnabled,
    /// Transmitter disarmed
    TransmitterDisabled,
    /// Ninth bit loaded for the next transmission
    NinthBitLoaded(bool),
    /// Transmit data register written
    DataWritten(u8),
    /// Receive data register read
    DataRead(u8),
    /// Transceiver switched into transmit mode
    TransceiverTxEnabled,
    /// Transceiver switched out of transmit mode
    TransceiverTxDisabled,
    /// Transceiver switched into receive mode
    TransceiverRxEnabled,
    /// Transceiver switched out of receive mode
    TransceiverRxDisabled,
    /// Busy-spin of the given unit count
    Spun(u32),
}

/// Append-only timeline of simulated hardware operations
#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<SimEvent, LOG_CAPACITY>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event; silently drops once the timeline is full
    pub fn record(&self, event: SimEvent) {
        let _ = self.events.borrow_mut().push(event);
    }

    /// Copy of the timeline so far
    pub fn snapshot(&self) -> Vec<SimEvent, LOG_CAPACITY> {
        self.events.borrow().clone()
    }

    /// Index of the first occurrence of `event` at or after `from`
    pub fn position_from(&self, from: usize, event: SimEvent) -> Option<usize> {
        self.events
            .borrow()
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, &e)| e == event)
            .map(|(i, _)| i)
    }

    /// Whether `events` occur in the log in the given relative order
    ///
    /// Other events may be interleaved between them.
    pub fn contains_in_order(&self, events: &[SimEvent]) -> bool {
        let mut from = 0;
        for &event in events {
            match self.position_from(from, event) {
                Some(at) => from = at + 1,
                None => return false,
            }
        }
        true
    }

    /// Number of occurrences of `event`
    pub fn count(&self, event: SimEvent) -> usize {
        self.events.borrow().iter().filter(|&&e| e == event).count()
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_order() {
        let log = EventLog::new();
        log.record(SimEvent::TransceiverTxEnabled);
        log.record(SimEvent::Spun(100));
        log.record(SimEvent::DataWritten(0x42));
        log.record(SimEvent::TransceiverTxDisabled);

        assert!(log.contains_in_order(&[
            SimEvent::TransceiverTxEnabled,
            SimEvent::DataWritten(0x42),
            SimEvent::TransceiverTxDisabled,
        ]));
        assert!(!log.contains_in_order(&[
            SimEvent::DataWritten(0x42),
            SimEvent::Spun(100),
        ]));
    }

    #[test]
    fn test_count() {
        let log = EventLog::new();
        log.record(SimEvent::Spun(7));
        log.record(SimEvent::Spun(7));
        assert_eq!(log.count(SimEvent::Spun(7)), 2);
        assert_eq!(log.count(SimEvent::Spun(8)), 0);
    }
}
