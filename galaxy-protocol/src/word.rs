//! 9-bit bus word encoding
//!
//! On the wire a word is 9 bits: 8 payload bits plus the address/data
//! marker in bit 8. [`Word`] keeps the two as separate fields;
//! [`Reception`] adds the per-word receive fault flags as explicit fields
//! instead of borrowing payload bit positions for them.

/// Bit 8 of a raw word carries the address/data marker
pub const MARKER_BIT: u16 = 0x0100;

/// Mask selecting the 9 significant bits of a raw word
pub const NINE_BIT_MASK: u16 = 0x01FF;

/// One 9-bit bus word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Word {
    /// 8 payload bits
    pub data: u8,
    /// Address/data marker (the ninth bit)
    pub marker: bool,
}

impl Word {
    /// Data word with the marker clear
    pub const fn data(data: u8) -> Self {
        Self {
            data,
            marker: false,
        }
    }

    /// Address word with the marker set
    pub const fn address(data: u8) -> Self {
        Self { data, marker: true }
    }

    /// Decode from the wire representation, ignoring bits above bit 8
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            data: (raw & 0x00FF) as u8,
            marker: raw & MARKER_BIT != 0,
        }
    }

    /// Wire representation: marker in bit 8, payload in bits 0-7
    pub const fn to_raw(self) -> u16 {
        let mut raw = self.data as u16;
        if self.marker {
            raw |= MARKER_BIT;
        }
        raw
    }
}

/// One received word together with its fault flags
///
/// Framing and overrun can both be set on a single read; a reception with
/// neither flag is clean and may be handed to the demultiplexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reception {
    /// The received word (payload is valid only when fault-free)
    pub word: Word,
    /// Stop bit arrived at the wrong time
    pub framing_error: bool,
    /// The hardware receive buffer was overwritten before being read
    pub overrun_error: bool,
}

impl Reception {
    /// Fault-free reception of `word`
    pub const fn clean(word: Word) -> Self {
        Self {
            word,
            framing_error: false,
            overrun_error: false,
        }
    }

    /// No fault flag is set
    pub const fn is_clean(&self) -> bool {
        !self.framing_error && !self.overrun_error
    }
}
