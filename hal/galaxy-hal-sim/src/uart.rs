//! Simulated 9-bit UART channel, transceiver and turnaround delay

use heapless::Deque;

use galaxy_hal::uart::{InterruptMode, NineBitChannel, RxStatus, TxTransceiver};
use galaxy_hal::delay::SpinDelay;

use crate::log::{EventLog, SimEvent};

/// Maximum scripted receive words
pub const SCRIPT_CAPACITY: usize = 32;

/// Maximum transmitted words the channel retains
pub const SENT_CAPACITY: usize = 64;

/// One scripted incoming word with its hardware status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScriptedWord {
    /// 9-bit wire value (marker in bit 8)
    pub raw: u16,
    /// Present the framing-error status bit with this word
    pub framing_error: bool,
    /// Present the overrun-error status bit with this word
    pub overrun_error: bool,
}

impl ScriptedWord {
    /// Fault-free scripted word
    pub const fn clean(raw: u16) -> Self {
        Self {
            raw,
            framing_error: false,
            overrun_error: false,
        }
    }
}

/// Simulated register-level UART channel
///
/// Incoming traffic is scripted with [`push_rx`]; outgoing words are
/// captured complete with their ninth bit and can be read back with
/// [`sent`]. The transmit-side status flags always report ready, so
/// transaction-layer busy-waits complete immediately.
///
/// [`push_rx`]: SimChannel::push_rx
/// [`sent`]: SimChannel::sent
pub struct SimChannel<'a> {
    log: &'a EventLog,
    script: Deque<ScriptedWord, SCRIPT_CAPACITY>,
    sent: heapless::Vec<u16, SENT_CAPACITY>,
    divisor: u16,
    nine_bit: bool,
    interrupt_mode: InterruptMode,
    receiver_on: bool,
    transmitter_on: bool,
    pending_ninth: bool,
}

impl<'a> SimChannel<'a> {
    /// Create a powered-down channel recording into `log`
    pub fn new(log: &'a EventLog) -> Self {
        Self {
            log,
            script: Deque::new(),
            sent: heapless::Vec::new(),
            divisor: 0,
            nine_bit: false,
            interrupt_mode: InterruptMode::Disabled,
            receiver_on: false,
            transmitter_on: false,
            pending_ninth: false,
        }
    }

    /// Script one fault-free incoming word
    pub fn push_rx(&mut self, raw: u16) {
        let _ = self.script.push_back(ScriptedWord::clean(raw));
    }

    /// Script one incoming word with explicit status flags
    pub fn push_rx_word(&mut self, word: ScriptedWord) {
        let _ = self.script.push_back(word);
    }

    /// Words transmitted so far, ninth bit in bit 8
    pub fn sent(&self) -> &[u16] {
        &self.sent
    }

    /// Programmed baud divisor
    pub fn divisor(&self) -> u16 {
        self.divisor
    }

    /// Whether 9-bit mode is enabled
    pub fn nine_bit_mode(&self) -> bool {
        self.nine_bit
    }

    /// Programmed interrupt routing
    pub fn interrupt_mode(&self) -> InterruptMode {
        self.interrupt_mode
    }
}

impl NineBitChannel for SimChannel<'_> {
    fn set_baud_divisor(&mut self, divisor: u16) {
        self.divisor = divisor;
        self.log.record(SimEvent::BaudDivisorSet(divisor));
    }

    fn set_nine_bit_mode(&mut self, enabled: bool) {
        self.nine_bit = enabled;
        self.log.record(SimEvent::NineBitModeSet(enabled));
    }

    fn set_interrupt_mode(&mut self, mode: InterruptMode) {
        self.interrupt_mode = mode;
    }

    fn enable_receiver(&mut self) {
        self.receiver_on = true;
        self.log.record(SimEvent::ReceiverEnabled);
    }

    fn disable_receiver(&mut self) {
        self.receiver_on = false;
        self.log.record(SimEvent::ReceiverDisabled);
    }

    fn receiver_enabled(&self) -> bool {
        self.receiver_on
    }

    fn enable_transmitter(&mut self) {
        self.transmitter_on = true;
        self.log.record(SimEvent::TransmitterEnabled);
    }

    fn disable_transmitter(&mut self) {
        self.transmitter_on = false;
        self.log.record(SimEvent::TransmitterDisabled);
    }

    fn transmitter_enabled(&self) -> bool {
        self.transmitter_on
    }

    fn rx_ready(&self) -> bool {
        !self.script.is_empty()
    }

    fn tx_buffer_empty(&self) -> bool {
        true
    }

    fn shifter_empty(&self) -> bool {
        true
    }

    fn read_status(&self) -> RxStatus {
        match self.script.front() {
            Some(word) => RxStatus {
                ninth_bit: word.raw & 0x0100 != 0,
                framing_error: word.framing_error,
                overrun_error: word.overrun_error,
            },
            None => RxStatus::default(),
        }
    }

    fn read_data(&mut self) -> u8 {
        let byte = match self.script.pop_front() {
            Some(word) => (word.raw & 0x00FF) as u8,
            None => 0,
        };
        self.log.record(SimEvent::DataRead(byte));
        byte
    }

    fn load_ninth_bit(&mut self, high: bool) {
        self.pending_ninth = high;
        self.log.record(SimEvent::NinthBitLoaded(high));
    }

    fn write_data(&mut self, byte: u8) {
        let mut raw = u16::from(byte);
        if self.pending_ninth {
            raw |= 0x0100;
        }
        let _ = self.sent.push(raw);
        self.log.record(SimEvent::DataWritten(byte));
    }
}

/// Simulated half-duplex transceiver
pub struct SimTransceiver<'a> {
    log: &'a EventLog,
}

impl<'a> SimTransceiver<'a> {
    /// Create a transceiver recording into `log`
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl TxTransceiver for SimTransceiver<'_> {
    fn enable_transmit(&mut self) {
        self.log.record(SimEvent::TransceiverTxEnabled);
    }

    fn disable_transmit(&mut self) {
        self.log.record(SimEvent::TransceiverTxDisabled);
    }

    fn enable_receive(&mut self) {
        self.log.record(SimEvent::TransceiverRxEnabled);
    }

    fn disable_receive(&mut self) {
        self.log.record(SimEvent::TransceiverRxDisabled);
    }
}

/// Simulated turnaround delay; spins are recorded, not executed
pub struct SimDelay<'a> {
    log: &'a EventLog,
}

impl<'a> SimDelay<'a> {
    /// Create a delay recording into `log`
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl SpinDelay for SimDelay<'_> {
    fn spin(&mut self, units: u32) {
        self.log.record(SimEvent::Spun(units));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_receive() {
        let log = EventLog::new();
        let mut channel = SimChannel::new(&log);
        channel.enable_receiver();
        channel.push_rx(0x0142);

        assert!(channel.rx_ready());
        let status = channel.read_status();
        assert!(status.ninth_bit);
        assert!(!status.framing_error);
        assert_eq!(channel.read_data(), 0x42);
        assert!(!channel.rx_ready());
    }

    #[test]
    fn test_transmit_captures_ninth_bit() {
        let log = EventLog::new();
        let mut channel = SimChannel::new(&log);
        channel.load_ninth_bit(true);
        channel.write_data(0xFF);
        channel.load_ninth_bit(false);
        channel.write_data(0x07);

        assert_eq!(channel.sent(), &[0x01FF, 0x0007]);
    }
}
