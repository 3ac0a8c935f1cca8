//! Light dependent resistor on the low side of a voltage divider.
//!
//! The ADC measures the midpoint between the fixed resistor (to the
//! reference) and the LDR (to ground), so darker means a higher sample.

use embedded_hal::adc::{Channel, OneShot};

use crate::hal::AdcResolution;

#[derive(Clone, Copy, Debug)]
pub struct Ldr {
    fixed_ohms: u32,
    resolution: AdcResolution,
}

impl Ldr {
    pub const fn new(fixed_ohms: u32, resolution: AdcResolution) -> Self {
        Self {
            fixed_ohms,
            resolution,
        }
    }

    /// LDR resistance in ohms. A rail-to-rail sample has no meaningful
    /// divider ratio and reads as 0.
    pub fn ohms(&self, raw: u16) -> u32 {
        let full = u32::from(self.resolution.full_scale());
        let raw = u32::from(raw);
        if raw == 0 || raw >= full {
            return 0;
        }
        self.fixed_ohms * (full - raw) / raw
    }

    /// Sample `pin` and convert to ohms.
    pub fn read<ADC, A, PIN>(&self, adc: &mut A, pin: &mut PIN) -> nb::Result<u32, A::Error>
    where
        A: OneShot<ADC, u16, PIN>,
        PIN: Channel<ADC>,
    {
        adc.read(pin).map(|raw| self.ohms(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::adc::{Mock, MockChan2, Transaction};

    #[test]
    fn divider_ratio() {
        let ldr = Ldr::new(330, AdcResolution::Bits8);
        // 330 * (255 - 51) / 51
        assert_eq!(ldr.ohms(51), 1320);
        assert_eq!(ldr.ohms(128), 327);
        assert_eq!(ldr.ohms(254), 1);
    }

    #[test]
    fn rails_read_as_zero() {
        let ldr = Ldr::new(330, AdcResolution::Bits10);
        assert_eq!(ldr.ohms(0), 0);
        assert_eq!(ldr.ohms(1023), 0);
        assert_eq!(ldr.ohms(4000), 0);
    }

    #[test]
    fn reads_through_one_shot() {
        let expectations = [Transaction::read(2, 11u16)];
        let mut adc = Mock::new(&expectations);
        let ldr = Ldr::new(1000, AdcResolution::Bits10);

        // 1000 * 1012 / 11
        assert_eq!(ldr.read(&mut adc, &mut MockChan2 {}).unwrap(), 92_000);
        adc.done();
    }
}
