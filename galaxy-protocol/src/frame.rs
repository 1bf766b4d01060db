//! Outbound command frame construction
//!
//! The bridge pre-builds every frame it can ever transmit into a
//! [`FrameTable`] at startup: one Disconnect frame, one Choose-Slot frame,
//! and one Poll-Slot frame per slot address. Frames are immutable once
//! built; the transmit scheduler only reads them.

use heapless::Vec;

use crate::crc::crc16;
use crate::word::Word;

/// Address word opening every command frame (marker bit set)
pub const PREAMBLE: u16 = 0x01FF;

/// Maximum words in one frame body (excluding the trailing CRC)
pub const MAX_FRAME_WORDS: usize = 8;

/// Highest slot address the table can hold poll frames for
pub const MAX_SLOT_LIMIT: u8 = 31;

/// Table capacity: Disconnect + Choose-Slot + polls for slots 0..=31
pub const MAX_COMMANDS: usize = 2 + MAX_SLOT_LIMIT as usize + 1;

/// Table index of the Disconnect frame
pub const DISCONNECT_INDEX: usize = 0;

/// Table index of the Choose-Slot frame
pub const CHOOSE_SLOT_INDEX: usize = 1;

/// Table index of the first Poll-Slot frame
pub const FIRST_POLL_INDEX: usize = 2;

/// Command opcodes
pub mod opcode {
    /// Drop the currently connected slot
    pub const DISCONNECT: u16 = 0x0057;
    /// Select the active slot range
    pub const CHOOSE_SLOT: u16 = 0x0043;
    /// Poll one slot for pending traffic
    pub const POLL_SLOT: u16 = 0x0050;
}

/// One pre-built command frame: word sequence plus trailing CRC
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    words: Vec<u16, MAX_FRAME_WORDS>,
    crc: u16,
}

impl Frame {
    /// Disconnect command, fixed 5-word body
    pub fn disconnect() -> Self {
        Self::finalize(&[PREAMBLE, 0x0007, opcode::DISCONNECT, 0x0004, 0x0001])
    }

    /// Choose-Slot command for a bus configured with `max_slots`
    ///
    /// The parameter word on the wire is `max_slots - 1`.
    pub fn choose_slot(max_slots: u8) -> Self {
        let limit = u16::from(max_slots.saturating_sub(1));
        Self::finalize(&[PREAMBLE, 0x0006, opcode::CHOOSE_SLOT, limit])
    }

    /// Poll-Slot command for one slot address
    pub fn poll_slot(slot: u8) -> Self {
        Self::finalize(&[PREAMBLE, 0x0006, opcode::POLL_SLOT, u16::from(slot)])
    }

    /// Store the body and compute its checksum over exactly those words
    fn finalize(body: &[u16]) -> Self {
        let mut words = Vec::new();
        // Body lengths are fixed per command kind and all fit MAX_FRAME_WORDS
        let stored = words.extend_from_slice(body);
        debug_assert!(stored.is_ok(), "frame body exceeds MAX_FRAME_WORDS");
        let crc = crc16(&words);
        Self { words, crc }
    }

    /// Frame body words, preamble first
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Number of words in the frame body
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Checksum over the body words
    pub fn crc(&self) -> u16 {
        self.crc
    }

    /// Complete wire sequence: body words, then CRC high byte, then CRC
    /// low byte, each as one 9-bit symbol
    pub fn wire_words(&self) -> impl Iterator<Item = Word> + '_ {
        let [crc_hi, crc_lo] = self.crc.to_be_bytes();
        self.words
            .iter()
            .map(|&raw| Word::from_raw(raw))
            .chain([Word::data(crc_hi), Word::data(crc_lo)])
    }
}

/// Immutable table of every frame the bridge can transmit
///
/// Built once at startup and read-only afterwards, so it is safe to share
/// across contexts without locking.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameTable {
    frames: Vec<Frame, MAX_COMMANDS>,
}

impl FrameTable {
    /// Build the table for a bus configured with `max_slots`
    ///
    /// Poll frames cover slot addresses 0 through `max_slots` inclusive,
    /// matching the slot range the bus actually polls. Values above
    /// [`MAX_SLOT_LIMIT`] are clamped.
    pub fn build(max_slots: u8) -> Self {
        let max_slots = max_slots.min(MAX_SLOT_LIMIT);
        let mut frames = Vec::new();
        // Capacity covers the full clamped slot range
        let mut stored = frames.push(Frame::disconnect()).is_ok();
        stored &= frames.push(Frame::choose_slot(max_slots)).is_ok();
        for slot in 0..=max_slots {
            stored &= frames.push(Frame::poll_slot(slot)).is_ok();
        }
        debug_assert!(stored, "frame table exceeds MAX_COMMANDS");
        Self { frames }
    }

    /// Frame at `index`, if the table holds one
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of frames in the table
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the table is empty (never true for a built table)
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnect_body() {
        let frame = Frame::disconnect();
        assert_eq!(frame.word_count(), 5);
        assert_eq!(
            frame.words(),
            &[PREAMBLE, 0x0007, opcode::DISCONNECT, 0x0004, 0x0001]
        );
    }

    #[test]
    fn test_checksum_is_pure_function_of_body() {
        // Rebuilding with identical inputs yields an identical checksum
        assert_eq!(Frame::disconnect().crc(), Frame::disconnect().crc());
        assert_eq!(Frame::disconnect().crc(), crc16(Frame::disconnect().words()));
    }

    #[test]
    fn test_choose_slot_parameter() {
        let frame = Frame::choose_slot(8);
        assert_eq!(frame.words()[3], 7);
    }

    #[test]
    fn test_poll_frames_cover_inclusive_slot_range() {
        let table = FrameTable::build(8);
        // Disconnect + Choose-Slot + 9 polls (slots 0..=8)
        assert_eq!(table.len(), FIRST_POLL_INDEX + 9);
        for slot in 0..=8u16 {
            let frame = table.get(FIRST_POLL_INDEX + slot as usize).unwrap();
            assert_eq!(frame.words()[2], opcode::POLL_SLOT);
            assert_eq!(frame.words()[3], slot);
        }
    }

    #[test]
    fn test_poll_frames_have_distinct_checksums() {
        let table = FrameTable::build(4);
        let a = table.get(FIRST_POLL_INDEX).unwrap();
        let b = table.get(FIRST_POLL_INDEX + 1).unwrap();
        assert_ne!(a.crc(), b.crc());
    }

    #[test]
    fn test_wire_sequence_appends_crc_high_then_low() {
        let frame = Frame::poll_slot(3);
        let wire: heapless::Vec<Word, 16> = frame.wire_words().collect();
        assert_eq!(wire.len(), frame.word_count() + 2);
        assert_eq!(wire[0], Word::address(0xFF));
        let [hi, lo] = frame.crc().to_be_bytes();
        assert_eq!(wire[wire.len() - 2], Word::data(hi));
        assert_eq!(wire[wire.len() - 1], Word::data(lo));
    }

    #[test]
    fn test_slot_limit_clamped() {
        let table = FrameTable::build(u8::MAX);
        assert_eq!(table.len(), MAX_COMMANDS);
    }

    #[test]
    fn test_full_table_keeps_complete_bodies() {
        // Even at maximum size every frame retains its whole body and a
        // checksum computed over it
        let table = FrameTable::build(MAX_SLOT_LIMIT);
        assert_eq!(table.len(), MAX_COMMANDS);
        for index in 0..table.len() {
            let frame = table.get(index).unwrap();
            let expected = if index == DISCONNECT_INDEX { 5 } else { 4 };
            assert_eq!(frame.word_count(), expected);
            assert_eq!(frame.crc(), crc16(frame.words()));
        }
    }
}
