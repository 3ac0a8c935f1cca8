#![allow(unused_unsafe)]

use avr_device::atmega32a::ADC;

use super::registers::AdcRegisters;

// SFIOR is shared by several peripherals in the device description, so it
// is addressed directly (data space).
const SFIOR: *mut u8 = 0x50 as *mut u8;

/// The on-chip converter.
pub struct Atmega32Adc {
    adc: ADC,
}

impl Atmega32Adc {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }
}

impl AdcRegisters for Atmega32Adc {
    #[inline]
    fn read_admux(&self) -> u8 {
        self.adc.admux.read().bits()
    }

    #[inline]
    fn write_admux(&self, bits: u8) {
        self.adc.admux.write(|w| unsafe { w.bits(bits) });
    }

    #[inline]
    fn read_adcsra(&self) -> u8 {
        self.adc.adcsra.read().bits()
    }

    #[inline]
    fn write_adcsra(&self, bits: u8) {
        self.adc.adcsra.write(|w| unsafe { w.bits(bits) });
    }

    #[inline]
    fn read_sfior(&self) -> u8 {
        unsafe { core::ptr::read_volatile(SFIOR) }
    }

    #[inline]
    fn write_sfior(&self, bits: u8) {
        unsafe { core::ptr::write_volatile(SFIOR, bits) }
    }

    #[inline]
    fn read_data(&self) -> u16 {
        // 16-bit access reads ADCL first, which latches ADCH
        self.adc.adc.read().bits()
    }
}
