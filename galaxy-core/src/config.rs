//! Configuration type definitions
//!
//! Plain data describing how one bridge instance is wired: serial timing,
//! bus geometry and the optional transmit schedule. Constructed once at
//! startup and handed to [`Bridge::new`].
//!
//! [`Bridge::new`]: crate::bridge::Bridge::new

use galaxy_hal::uart::InterruptMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default system clock of the reference target (internal oscillator, 4x PLL)
pub const DEFAULT_CLOCK_HZ: u32 = 64_000_000;

/// Galaxy bus line rate
pub const DEFAULT_BAUD: u32 = 19_200;

/// Transceiver turnaround spin units of the reference target
pub const DEFAULT_TURNAROUND_SPINS: u32 = 100;

/// Highest slot address the reference installation polls
pub const DEFAULT_MAX_SLOTS: u8 = 8;

/// Serial link configuration for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// System clock feeding the baud rate generator
    pub clock_hz: u32,
    /// Target line rate
    pub baud: u32,
    /// 9-bit mode (8 data bits + address/data marker)
    pub nine_bit_mode: bool,
    /// Interrupt routing for the channel
    pub interrupts: InterruptMode,
    /// Bus turnaround delay after switching transceiver direction
    pub turnaround_spins: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            baud: DEFAULT_BAUD,
            nine_bit_mode: true,
            interrupts: InterruptMode::Disabled,
            turnaround_spins: DEFAULT_TURNAROUND_SPINS,
        }
    }
}

impl LinkConfig {
    /// Baud rate generator divisor for the high-speed 16-bit mode
    ///
    /// The reference hardware runs with BRG16 and BRGH set, where the
    /// divisor is `clock / baud / 4 - 1`. A zero baud rate saturates to
    /// the slowest divisor instead of dividing by zero.
    pub fn baud_divisor(&self) -> u16 {
        if self.baud == 0 {
            return u16::MAX;
        }
        let steps = self.clock_hz / self.baud / 4;
        steps.saturating_sub(1).min(u32::from(u16::MAX)) as u16
    }
}

/// Complete bridge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Serial link settings
    pub link: LinkConfig,
    /// Highest slot address to poll (inclusive)
    pub max_slots: u8,
    /// Main-loop iterations between scheduled frame transmissions;
    /// `None` leaves the transmit schedule off
    pub schedule_period: Option<u32>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            max_slots: DEFAULT_MAX_SLOTS,
            schedule_period: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_divisor() {
        // 64 MHz / 19200 baud in high-speed 16-bit mode
        let config = LinkConfig::default();
        assert_eq!(config.baud_divisor(), 832);
    }

    #[test]
    fn test_zero_baud_saturates_divisor() {
        let config = LinkConfig {
            baud: 0,
            ..LinkConfig::default()
        };
        assert_eq!(config.baud_divisor(), u16::MAX);
    }

    #[test]
    fn test_divisor_saturates() {
        let config = LinkConfig {
            clock_hz: u32::MAX,
            baud: 1,
            ..LinkConfig::default()
        };
        assert_eq!(config.baud_divisor(), u16::MAX);
    }
}
