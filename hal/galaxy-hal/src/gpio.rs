//! Digital output abstractions
//!
//! The bridge drives its output bank as write-only latches: each pin has a
//! direction (forced to output before every write, as the original
//! hardware requires) and a last-driven logic level.

/// Digital output pin latch
///
/// Implementations are responsible for configuring the pin as an output
/// before latching the level, so callers can treat `drive` as a single
/// fire-and-forget operation.
pub trait OutputLatch {
    /// Latch the pin to the given logic level
    fn drive(&mut self, high: bool);

    /// Latch the pin high (logic 1)
    fn drive_high(&mut self) {
        self.drive(true);
    }

    /// Latch the pin low (logic 0)
    fn drive_low(&mut self) {
        self.drive(false);
    }

    /// Last level written to the latch
    fn is_driven_high(&self) -> bool;
}
