use super::registers::{ADATE, ADEN, ADLAR, ADPS_MASK, ADTS_SHIFT, REFS_SHIFT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcReference {
    Aref = 0,          // External AREF
    Avcc = 1,          // AVCC with external cap at AREF
    Internal2_56V = 3, // Internal 2.56V with external cap at AREF
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcResolution {
    /// Left adjusted, only ADCH is used
    Bits8,
    /// Right adjusted, full data register
    Bits10,
}

impl AdcResolution {
    /// Largest value a conversion can report
    pub const fn full_scale(self) -> u16 {
        match self {
            AdcResolution::Bits8 => 0xFF,
            AdcResolution::Bits10 => 0x3FF,
        }
    }

    /// Extract the sample from the raw ADCL/ADCH pair.
    #[inline]
    pub const fn extract(self, data: u16) -> u16 {
        match self {
            AdcResolution::Bits8 => data >> 8,
            AdcResolution::Bits10 => data & 0x3FF,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcPrescaler {
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl AdcPrescaler {
    pub const fn divisor(self) -> u32 {
        1 << (self as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TriggerSource {
    FreeRunning = 0,
    AnalogComparator = 1,
    ExternalInterrupt0 = 2,
    Timer0CompareMatch = 3,
    Timer0Overflow = 4,
    Timer1CompareMatchB = 5,
    Timer1Overflow = 6,
    Timer1CaptureEvent = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionMode {
    /// Every conversion is started by software
    Manual,
    AutoTrigger(TriggerSource),
}

/// Converter setup, fixed for the lifetime of the firmware.
///
/// Built with the `const` methods below and finished with [`validate`],
/// so a bad combination surfaces as a compile error when the result is
/// bound to a `const` item.
///
/// [`validate`]: AdcConfig::validate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdcConfig {
    pub reference: AdcReference,
    pub resolution: AdcResolution,
    pub prescaler: AdcPrescaler,
    pub mode: ConversionMode,
    /// Poll iterations a blocking conversion waits before giving up
    pub timeout: u32,
}

impl AdcConfig {
    pub const DEFAULT_TIMEOUT: u32 = 50_000;

    /// AVCC reference, 8-bit results, manual start, clock divided by 128.
    pub const fn new() -> Self {
        Self {
            reference: AdcReference::Avcc,
            resolution: AdcResolution::Bits8,
            prescaler: AdcPrescaler::Div128,
            mode: ConversionMode::Manual,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub const fn reference(mut self, reference: AdcReference) -> Self {
        self.reference = reference;
        self
    }

    pub const fn resolution(mut self, resolution: AdcResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub const fn prescaler(mut self, prescaler: AdcPrescaler) -> Self {
        self.prescaler = prescaler;
        self
    }

    pub const fn mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject settings the converter cannot honour at `cpu_hz`.
    ///
    /// Full 10-bit accuracy needs an ADC clock of at most 200 kHz; 8-bit
    /// results stay usable up to 1 MHz.
    pub const fn validate(self, cpu_hz: u32) -> Self {
        assert!(self.timeout > 0, "ADC timeout must be non-zero");

        let adc_hz = cpu_hz / self.prescaler.divisor();
        match self.resolution {
            AdcResolution::Bits10 => {
                assert!(adc_hz <= 200_000, "ADC clock too fast for 10-bit resolution")
            }
            AdcResolution::Bits8 => {
                assert!(adc_hz <= 1_000_000, "ADC clock too fast for 8-bit resolution")
            }
        }
        self
    }

    /// ADMUX image without the channel bits
    pub const fn admux_bits(&self) -> u8 {
        let adlar = match self.resolution {
            AdcResolution::Bits8 => ADLAR,
            AdcResolution::Bits10 => 0,
        };
        ((self.reference as u8) << REFS_SHIFT) | adlar
    }

    /// ADCSRA image: enabled, interrupt off, no conversion running
    pub const fn adcsra_bits(&self) -> u8 {
        let adate = match self.mode {
            ConversionMode::Manual => 0,
            ConversionMode::AutoTrigger(_) => ADATE,
        };
        ADEN | adate | ((self.prescaler as u8) & ADPS_MASK)
    }

    /// SFIOR trigger source bits, only used in auto-trigger mode
    pub const fn trigger_bits(&self) -> Option<u8> {
        match self.mode {
            ConversionMode::Manual => None,
            ConversionMode::AutoTrigger(source) => Some((source as u8) << ADTS_SHIFT),
        }
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::adc::registers::{ADIE, ADSC};

    #[test]
    fn default_register_images() {
        let config = AdcConfig::new();
        // AVCC, left adjusted
        assert_eq!(config.admux_bits(), 0b0110_0000);
        // enabled, /128
        assert_eq!(config.adcsra_bits(), 0b1000_0111);
        assert_eq!(config.trigger_bits(), None);
        assert_eq!(config.adcsra_bits() & (ADIE | ADSC), 0);
    }

    #[test]
    fn ten_bit_internal_reference_is_right_adjusted() {
        let config = AdcConfig::new()
            .reference(AdcReference::Internal2_56V)
            .resolution(AdcResolution::Bits10);
        assert_eq!(config.admux_bits(), 0b1100_0000);
    }

    #[test]
    fn auto_trigger_sets_adate_and_source() {
        let config = AdcConfig::new()
            .prescaler(AdcPrescaler::Div64)
            .mode(ConversionMode::AutoTrigger(TriggerSource::Timer0Overflow));
        assert_eq!(config.adcsra_bits(), ADEN | ADATE | 6);
        assert_eq!(config.trigger_bits(), Some(0b1000_0000));
    }

    #[test]
    fn prescaler_divisors() {
        assert_eq!(AdcPrescaler::Div2.divisor(), 2);
        assert_eq!(AdcPrescaler::Div16.divisor(), 16);
        assert_eq!(AdcPrescaler::Div128.divisor(), 128);
    }

    #[test]
    fn extract_respects_resolution() {
        assert_eq!(AdcResolution::Bits8.extract(0x80C0), 0x80);
        assert_eq!(AdcResolution::Bits10.extract(0xFFFF), 0x3FF);
        assert_eq!(AdcResolution::Bits10.extract(0x0200), 0x200);
    }

    #[test]
    fn validate_accepts_slow_clock() {
        const CONFIG: AdcConfig = AdcConfig::new()
            .resolution(AdcResolution::Bits10)
            .validate(16_000_000);
        assert_eq!(CONFIG.prescaler, AdcPrescaler::Div128);
    }

    #[test]
    #[should_panic(expected = "too fast for 10-bit")]
    fn validate_rejects_fast_clock_for_ten_bits() {
        let config = AdcConfig::new()
            .resolution(AdcResolution::Bits10)
            .prescaler(AdcPrescaler::Div2);
        config.validate(16_000_000);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn validate_rejects_zero_timeout() {
        AdcConfig::new().timeout(0).validate(8_000_000);
    }
}
