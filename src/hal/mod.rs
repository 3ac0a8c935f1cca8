pub mod adc;

#[cfg(target_arch = "avr")]
pub mod uart;

// Re-export commonly used types
pub use adc::{AdcConfig, AdcError, AdcManager, AdcPin, AdcResolution, Sample, SharedAdc};

#[cfg(target_arch = "avr")]
pub use adc::Atmega32Adc;
#[cfg(target_arch = "avr")]
pub use uart::Uart;
