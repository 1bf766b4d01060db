//! In-memory implementation of the `galaxy-hal` traits
//!
//! Everything the bridge does to the hardware - register writes, status
//! polls, transceiver switches, turnaround spins - is recorded into a
//! shared [`EventLog`], so tests can assert not just final state but the
//! order of operations (which is what the half-duplex bus actually cares
//! about).
//!
//! # Example
//!
//! ```
//! use galaxy_hal_sim::{EventLog, SimChannel, SimTransceiver};
//!
//! let log = EventLog::new();
//! let mut channel = SimChannel::new(&log);
//! channel.push_rx(0x0172);
//! let _transceiver = SimTransceiver::new(&log);
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod log;
pub mod uart;

pub use gpio::SimPin;
pub use log::{EventLog, SimEvent};
pub use uart::{ScriptedWord, SimChannel, SimDelay, SimTransceiver};
