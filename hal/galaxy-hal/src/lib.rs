//! Hardware abstraction traits for the Galaxy bus bridge
//!
//! This crate defines the register-level interface the bridge logic needs
//! from its target chip. A concrete MCU port implements these traits on
//! top of its serial peripheral and GPIO registers; `galaxy-hal-sim`
//! implements them in memory for host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Bridge logic (galaxy-core)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  galaxy-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  MCU port     │       │ galaxy-hal-   │
//! │  (out of tree)│       │     sim       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::NineBitChannel`] - register-level view of a 9-bit UART channel
//! - [`uart::TxTransceiver`] - half-duplex line driver direction control
//! - [`gpio::OutputLatch`] - digital output pin latch
//! - [`delay::SpinDelay`] - busy-spin timing for bus turnaround

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use delay::{CycleSpin, SpinDelay};
pub use gpio::OutputLatch;
pub use uart::{InterruptMode, NineBitChannel, RxStatus, TtlDirect, TxTransceiver};
