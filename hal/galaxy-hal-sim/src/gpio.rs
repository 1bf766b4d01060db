//! Simulated digital output latch

use galaxy_hal::gpio::OutputLatch;

/// Output pin latch backed by a plain bool
///
/// Starts low, counts writes so tests can check a pin was actually
/// driven rather than merely left at its reset level.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimPin {
    level: bool,
    writes: u32,
}

impl SimPin {
    /// Create a pin latched low
    pub const fn new() -> Self {
        Self {
            level: false,
            writes: 0,
        }
    }

    /// Number of times the latch has been written
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl OutputLatch for SimPin {
    fn drive(&mut self, high: bool) {
        self.level = high;
        self.writes += 1;
    }

    fn is_driven_high(&self) -> bool {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch() {
        let mut pin = SimPin::new();
        assert!(!pin.is_driven_high());
        pin.drive_high();
        assert!(pin.is_driven_high());
        pin.drive(false);
        assert!(!pin.is_driven_high());
        assert_eq!(pin.writes(), 2);
    }
}
