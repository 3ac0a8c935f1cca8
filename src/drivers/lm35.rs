//! LM35 analog temperature sensor (10 mV per degree Celsius).

use embedded_hal::adc::{Channel, OneShot};

use crate::hal::AdcResolution;

const MV_PER_DEGREE: u32 = 10;

#[derive(Clone, Copy, Debug)]
pub struct Lm35 {
    vref_mv: u32,
    resolution: AdcResolution,
}

impl Lm35 {
    pub const fn new(vref_mv: u16, resolution: AdcResolution) -> Self {
        Self {
            vref_mv: vref_mv as u32,
            resolution,
        }
    }

    /// Sensor output voltage for a raw sample
    pub fn millivolts(&self, raw: u16) -> u32 {
        let full = self.resolution.full_scale();
        u32::from(raw.min(full)) * self.vref_mv / u32::from(full)
    }

    /// Whole degrees Celsius for a raw sample
    pub fn celsius(&self, raw: u16) -> u16 {
        (self.millivolts(raw) / MV_PER_DEGREE) as u16
    }

    /// Sample `pin` and convert to degrees Celsius.
    pub fn read<ADC, A, PIN>(&self, adc: &mut A, pin: &mut PIN) -> nb::Result<u16, A::Error>
    where
        A: OneShot<ADC, u16, PIN>,
        PIN: Channel<ADC>,
    {
        adc.read(pin).map(|raw| self.celsius(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::adc::{Mock, MockChan0, MockChan1, Transaction};

    #[test]
    fn eight_bit_conversion() {
        let lm35 = Lm35::new(5000, AdcResolution::Bits8);
        assert_eq!(lm35.celsius(0), 0);
        assert_eq!(lm35.millivolts(255), 5000);
        assert_eq!(lm35.celsius(255), 500);
        // 62 * 5000 / 255 = 1215 mV
        assert_eq!(lm35.celsius(62), 121);
        assert_eq!(lm35.celsius(5), 9);
    }

    #[test]
    fn ten_bit_conversion() {
        let lm35 = Lm35::new(5000, AdcResolution::Bits10);
        assert_eq!(lm35.celsius(1023), 500);
        // 51 * 5000 / 1023 = 249 mV
        assert_eq!(lm35.celsius(51), 24);
    }

    #[test]
    fn out_of_range_samples_saturate() {
        let lm35 = Lm35::new(2560, AdcResolution::Bits8);
        assert_eq!(lm35.millivolts(1000), 2560);
    }

    #[test]
    fn reads_through_one_shot() {
        let expectations = [Transaction::read(0, 51u16), Transaction::read(1, 102u16)];
        let mut adc = Mock::new(&expectations);
        let lm35 = Lm35::new(5000, AdcResolution::Bits8);

        assert_eq!(lm35.read(&mut adc, &mut MockChan0 {}).unwrap(), 100);
        assert_eq!(lm35.read(&mut adc, &mut MockChan1 {}).unwrap(), 200);
        adc.done();
    }
}
