//! Register-level access to the ADC peripheral.

/// ADMUX: reference selection (bits 7..6), left adjust (bit 5), channel (bits 4..0)
pub const REFS_SHIFT: u8 = 6;
pub const ADLAR: u8 = 1 << 5;
pub const MUX_MASK: u8 = 0x1F;

/// ADCSRA bits
pub const ADEN: u8 = 1 << 7;
pub const ADSC: u8 = 1 << 6;
pub const ADATE: u8 = 1 << 5;
pub const ADIF: u8 = 1 << 4;
pub const ADIE: u8 = 1 << 3;
pub const ADPS_MASK: u8 = 0x07;

/// SFIOR: auto trigger source (bits 7..5)
pub const ADTS_SHIFT: u8 = 5;
pub const ADTS_MASK: u8 = 0xE0;

/// Raw access to the four registers the ADC manager drives.
///
/// Writes follow hardware semantics: writing a one to ADIF clears the
/// flag, writing a one to ADSC starts a conversion and writing a zero to
/// ADSC has no effect.
pub trait AdcRegisters {
    fn read_admux(&self) -> u8;
    fn write_admux(&self, bits: u8);

    fn read_adcsra(&self) -> u8;
    fn write_adcsra(&self, bits: u8);

    fn read_sfior(&self) -> u8;
    fn write_sfior(&self, bits: u8);

    /// ADCL/ADCH as one 16-bit value
    fn read_data(&self) -> u16;

    #[inline]
    fn modify_admux(&self, f: impl FnOnce(u8) -> u8) {
        self.write_admux(f(self.read_admux()));
    }

    #[inline]
    fn modify_adcsra(&self, f: impl FnOnce(u8) -> u8) {
        self.write_adcsra(f(self.read_adcsra()));
    }

    #[inline]
    fn modify_sfior(&self, f: impl FnOnce(u8) -> u8) {
        self.write_sfior(f(self.read_sfior()));
    }
}

impl<T: AdcRegisters + ?Sized> AdcRegisters for &T {
    fn read_admux(&self) -> u8 {
        (**self).read_admux()
    }

    fn write_admux(&self, bits: u8) {
        (**self).write_admux(bits)
    }

    fn read_adcsra(&self) -> u8 {
        (**self).read_adcsra()
    }

    fn write_adcsra(&self, bits: u8) {
        (**self).write_adcsra(bits)
    }

    fn read_sfior(&self) -> u8 {
        (**self).read_sfior()
    }

    fn write_sfior(&self, bits: u8) {
        (**self).write_sfior(bits)
    }

    fn read_data(&self) -> u16 {
        (**self).read_data()
    }
}
