//! Board-agnostic core logic for the Galaxy bus bridge
//!
//! This crate contains everything with algorithmic content, independent of
//! the target chip:
//!
//! - Lock-free single-producer/single-consumer word FIFO
//! - 9-bit UART transaction layer (transceiver timing, fault recovery)
//! - Digital demultiplexer (pattern trigger + bit fan-out)
//! - Bridge dispatch tying receive, demux and transmit draining together
//! - Configuration type definitions
//!
//! Hardware access goes exclusively through the `galaxy-hal` traits.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bridge;
pub mod config;
pub mod demux;
pub mod fifo;
pub mod uart;
