//! Busy-spin timing
//!
//! Bus turnaround timing on the original hardware is an iteration-counted
//! spin, not a clocked delay. The trait keeps that unit so ports can map
//! it onto whatever cheap spin their core provides.

/// Busy-spin for a number of iteration units
pub trait SpinDelay {
    /// Spin for `units` loop iterations
    fn spin(&mut self, units: u32);
}

/// [`SpinDelay`] implementation that burns CPU cycles with a spin hint
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleSpin;

impl SpinDelay for CycleSpin {
    fn spin(&mut self, units: u32) {
        for _ in 0..units {
            core::hint::spin_loop();
        }
    }
}
