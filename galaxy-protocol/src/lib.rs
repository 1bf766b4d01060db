//! Galaxy bus protocol
//!
//! The Galaxy bus is a 9-bit addressed multidrop serial bus: each UART
//! symbol carries 8 data bits plus an address/data marker bit. This crate
//! defines the word encoding, the CRC-16 frame checksum, and the builders
//! for the outbound command frames the bridge can transmit.
//!
//! # Frame format
//!
//! Each command frame is a short word sequence followed by a 16-bit CRC
//! sent as two further 9-bit symbols:
//!
//! ```text
//! ┌──────────┬────────┬────────┬───────────┬────────┬────────┐
//! │ PREAMBLE │ LENGTH │ OPCODE │ PARAMS    │ CRC hi │ CRC lo │
//! │ 0x01FF   │ 1 word │ 1 word │ 0-n words │ 1 word │ 1 word │
//! └──────────┴────────┴────────┴───────────┴────────┴────────┘
//! ```
//!
//! The preamble has the marker bit set; every receiver on the bus uses it
//! to spot the start of a command.

#![no_std]
#![deny(unsafe_code)]

pub mod crc;
pub mod frame;
pub mod word;

pub use crc::crc16;
pub use frame::{Frame, FrameTable, CHOOSE_SLOT_INDEX, DISCONNECT_INDEX, FIRST_POLL_INDEX, PREAMBLE};
pub use word::{Reception, Word, MARKER_BIT, NINE_BIT_MASK};
