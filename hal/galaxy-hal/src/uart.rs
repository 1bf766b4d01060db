//! 9-bit UART channel abstractions
//!
//! The Galaxy bus runs the UART in 9-bit asynchronous mode: 8 data bits
//! plus an address/data marker bit. [`NineBitChannel`] exposes the
//! hardware at the register level (status flags, data registers, enables)
//! rather than as a byte stream, because the transaction layer in
//! `galaxy-core` needs to sequence those registers itself - the ninth bit
//! must be loaded before the data register, receive status must be read
//! before the receive register, and overrun recovery cycles the receiver
//! enable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interrupt configuration for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterruptMode {
    /// No receive/transmit interrupts; callers poll the status flags
    #[default]
    Disabled,
    /// Receive/transmit interrupts routed to the low-priority vector
    LowPriority,
    /// Receive/transmit interrupts routed to the high-priority vector
    HighPriority,
}

/// Receive status flags, captured before reading the data register
///
/// On the target hardware the framing flag clears itself when the data
/// register is read, so implementations must snapshot the flags first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStatus {
    /// Ninth received bit (address/data marker)
    pub ninth_bit: bool,
    /// Stop bit arrived at the wrong time
    pub framing_error: bool,
    /// A previous word was overwritten before it was read
    pub overrun_error: bool,
}

/// Register-level view of one 9-bit UART channel
///
/// Flag queries mirror the hardware status bits: `rx_ready` is the
/// receive-interrupt flag, `tx_buffer_empty` the transmit-interrupt flag,
/// and `shifter_empty` the transmit-shift-register-empty flag.
pub trait NineBitChannel {
    /// Program the baud rate generator divisor
    fn set_baud_divisor(&mut self, divisor: u16);

    /// Enable or disable 9-bit reception and transmission
    fn set_nine_bit_mode(&mut self, enabled: bool);

    /// Configure receive/transmit interrupt routing
    fn set_interrupt_mode(&mut self, mode: InterruptMode);

    /// Enable continuous reception
    fn enable_receiver(&mut self);

    /// Disable continuous reception
    ///
    /// Cycling the receiver off and back on is the only way to clear an
    /// overrun condition on the target hardware.
    fn disable_receiver(&mut self);

    /// Whether the receiver is currently enabled
    fn receiver_enabled(&self) -> bool;

    /// Arm the transmitter
    fn enable_transmitter(&mut self);

    /// Disarm the transmitter
    fn disable_transmitter(&mut self);

    /// Whether the transmitter is currently armed
    fn transmitter_enabled(&self) -> bool;

    /// A received word is waiting in the receive register
    fn rx_ready(&self) -> bool;

    /// The transmit buffer can accept a new word
    fn tx_buffer_empty(&self) -> bool;

    /// The transmit shift register has pushed out the last bit
    fn shifter_empty(&self) -> bool;

    /// Snapshot receive status flags; call before [`read_data`]
    ///
    /// [`read_data`]: NineBitChannel::read_data
    fn read_status(&self) -> RxStatus;

    /// Read the received data register, consuming the pending word
    fn read_data(&mut self) -> u8;

    /// Load the ninth bit for the next transmission; call before
    /// [`write_data`]
    ///
    /// [`write_data`]: NineBitChannel::write_data
    fn load_ninth_bit(&mut self, high: bool);

    /// Write the transmit data register, which begins shifting
    fn write_data(&mut self, byte: u8);
}

/// Half-duplex transceiver direction control
///
/// Channels wired through an external RS-485-style line driver must
/// switch it between transmit and receive; after each switch the bus
/// needs a turnaround settling delay before traffic is reliable.
pub trait TxTransceiver {
    /// Put the line driver into transmit mode
    fn enable_transmit(&mut self);

    /// Take the line driver out of transmit mode
    fn disable_transmit(&mut self);

    /// Put the line driver into receive mode
    fn enable_receive(&mut self);

    /// Take the line driver out of receive mode
    fn disable_receive(&mut self);
}

/// Direction control for direct TTL-level channels: every operation is a
/// no-op because there is no external line driver to switch.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TtlDirect;

impl TxTransceiver for TtlDirect {
    fn enable_transmit(&mut self) {}
    fn disable_transmit(&mut self) {}
    fn enable_receive(&mut self) {}
    fn disable_receive(&mut self) {}
}
