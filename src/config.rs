//! Configuration constants for ATmega32 firmware

use crate::hal::adc::{AdcConfig, AdcPrescaler, AdcReference, AdcResolution, ConversionMode};

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 8_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// ADC reference voltage in millivolts
pub const ADC_VREF_MV: u16 = 5000;

/// ADC settings, checked while compiling. A setting the converter cannot
/// honour at `CPU_FREQ_HZ` fails the build instead of misbehaving at runtime.
pub const ADC_CONFIG: AdcConfig = AdcConfig::new()
    .reference(AdcReference::Avcc)
    .resolution(AdcResolution::Bits8)
    .prescaler(AdcPrescaler::Div128)
    .mode(ConversionMode::Manual)
    .timeout(AdcConfig::DEFAULT_TIMEOUT)
    .validate(CPU_FREQ_HZ);

/// LM35 output
pub const TEMP_CHANNEL: u8 = 4;

/// LDR divider midpoint
pub const LIGHT_CHANNEL: u8 = 5;

/// Fixed resistor of the LDR voltage divider in ohms
pub const LDR_FIXED_OHMS: u32 = 330;

/// Temperature above which the fire alarm trips, in degrees Celsius
pub const FIRE_THRESHOLD_C: u16 = 50;

/// Fan hysteresis band in degrees Celsius
pub const FAN_ON_C: u16 = 25;
pub const FAN_OFF_C: u16 = 23;

/// LDR resistance thresholds, darkest first. Each one crossed lights one more LED.
pub const LIGHT_THRESHOLDS_OHMS: [u32; 5] = [2550, 2295, 1530, 1020, 510];
