//! Digital demultiplexer
//!
//! Turns the incoming word stream into discrete logic outputs. Each
//! fault-free word does two independent jobs:
//!
//! 1. **Pattern trigger** - the word joins a 4-deep sliding history
//!    (masked to 9 bits, newest first) and the trigger output is asserted
//!    exactly while the three newest entries match the fixed signature.
//! 2. **Bit fan-out** - eight single-bit taps of the raw word, one output
//!    pin per mask in a fixed descending table, refreshed unconditionally
//!    on every word.

use galaxy_hal::gpio::OutputLatch;
use galaxy_protocol::NINE_BIT_MASK;

/// Sliding history depth; the trigger examines the newest three entries
pub const HISTORY_DEPTH: usize = 4;

/// Trigger signature, newest word first
pub const TRIGGER_PATTERN: [u16; 3] = [0x0100, 0x0017, 0x0072];

/// Number of fan-out tap outputs
pub const TAP_COUNT: usize = 8;

/// Mask of the highest tap; each further tap shifts one bit right
const TAP_BASE_MASK: u16 = 0x0800;

/// Demultiplexer state and its output pins
#[derive(Debug)]
pub struct DigitalBreakout<P> {
    /// Received word history, masked to 9 bits, index 0 newest
    history: [u16; HISTORY_DEPTH],
    trigger: P,
    taps: [P; TAP_COUNT],
}

impl<P: OutputLatch> DigitalBreakout<P> {
    /// Take ownership of the output pins with an empty history
    pub fn new(trigger: P, taps: [P; TAP_COUNT]) -> Self {
        Self {
            history: [0; HISTORY_DEPTH],
            trigger,
            taps,
        }
    }

    /// Process one received word and refresh every output
    ///
    /// `raw` is the wire representation (marker in bit 8). Both jobs run
    /// to completion before returning.
    ///
    /// The fan-out masks reach above the 9-bit wire range: taps 0-2
    /// (masks 0x0800, 0x0400, 0x0200) stay low for any word that came
    /// off the bus and only assert for callers feeding raw values with
    /// those upper bits set.
    pub fn update(&mut self, raw: u16) {
        self.history.copy_within(0..HISTORY_DEPTH - 1, 1);
        self.history[0] = raw & NINE_BIT_MASK;

        let matched = self.history[..TRIGGER_PATTERN.len()] == TRIGGER_PATTERN;
        self.trigger.drive(matched);

        for (tap, shift) in self.taps.iter_mut().zip(0..) {
            let mask = TAP_BASE_MASK >> shift;
            tap.drive(raw & mask == mask);
        }
    }

    /// Trigger output pin
    pub fn trigger(&self) -> &P {
        &self.trigger
    }

    /// Fan-out tap pins, highest mask first
    pub fn taps(&self) -> &[P; TAP_COUNT] {
        &self.taps
    }

    /// Current history window, newest first
    pub fn history(&self) -> &[u16; HISTORY_DEPTH] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_hal_sim::SimPin;

    fn breakout() -> DigitalBreakout<SimPin> {
        DigitalBreakout::new(SimPin::new(), [SimPin::new(); TAP_COUNT])
    }

    fn tap_levels<P: OutputLatch>(demux: &DigitalBreakout<P>) -> [bool; TAP_COUNT] {
        core::array::from_fn(|i| demux.taps()[i].is_driven_high())
    }

    #[test]
    fn test_trigger_asserts_on_signature() {
        let mut demux = breakout();
        // Oldest to newest; the masked history must end newest-first
        // as [0x100, 0x017, 0x072]
        for word in [0x0055, 0x01AA, 0x0072, 0x0017, 0x0100] {
            demux.update(word);
        }
        assert!(demux.trigger().is_driven_high());
        assert_eq!(demux.history()[..3], TRIGGER_PATTERN);
    }

    #[test]
    fn test_trigger_deasserts_on_any_other_history() {
        let mut demux = breakout();
        for word in [0x0072, 0x0017, 0x0100] {
            demux.update(word);
        }
        assert!(demux.trigger().is_driven_high());

        // The next word ages the signature out of the newest-three window
        demux.update(0x0000);
        assert!(!demux.trigger().is_driven_high());
    }

    #[test]
    fn test_trigger_needs_exact_order() {
        let mut demux = breakout();
        for word in [0x0100, 0x0017, 0x0072] {
            demux.update(word);
        }
        assert!(!demux.trigger().is_driven_high());
    }

    #[test]
    fn test_history_masks_to_nine_bits() {
        let mut demux = breakout();
        demux.update(0xFE72);
        assert_eq!(demux.history()[0], 0x0072);
    }

    #[test]
    fn test_fanout_all_set() {
        let mut demux = breakout();
        demux.update(0x0FFF);
        assert_eq!(tap_levels(&demux), [true; TAP_COUNT]);
    }

    #[test]
    fn test_fanout_all_clear() {
        let mut demux = breakout();
        demux.update(0x0FFF);
        demux.update(0x0000);
        assert_eq!(tap_levels(&demux), [false; TAP_COUNT]);
    }

    #[test]
    fn test_fanout_highest_tap_only() {
        let mut demux = breakout();
        demux.update(0x0800);
        let mut expected = [false; TAP_COUNT];
        expected[0] = true;
        assert_eq!(tap_levels(&demux), expected);
    }

    #[test]
    fn test_upper_taps_stay_low_for_bus_words() {
        use galaxy_protocol::Word;

        let mut demux = breakout();
        // Every value representable on the 9-bit wire leaves the taps
        // above bit 8 unasserted
        demux.update(Word::address(0xFF).to_raw());
        let levels = tap_levels(&demux);
        assert_eq!(levels[..3], [false; 3]);
        assert_eq!(levels[3..], [true; 5]);
    }

    #[test]
    fn test_fanout_refreshes_every_update() {
        let mut demux = breakout();
        demux.update(0x0010);
        let mut expected = [false; TAP_COUNT];
        expected[TAP_COUNT - 1] = true;
        assert_eq!(tap_levels(&demux), expected);
        // Each pin was driven exactly once so far
        assert!(demux.taps().iter().all(|pin| pin.writes() == 1));

        demux.update(0x0020);
        expected[TAP_COUNT - 1] = false;
        expected[TAP_COUNT - 2] = true;
        assert_eq!(tap_levels(&demux), expected);
    }
}
