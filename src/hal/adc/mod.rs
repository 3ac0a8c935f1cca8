//! Analog-to-digital conversion manager.
//!
//! One converter, one conversion in flight at a time. Conversions are
//! either polled ([`AdcManager::convert_sync`]) or completed from the
//! ADC interrupt ([`AdcManager::convert_async`],
//! [`AdcManager::convert_chain`]).

use core::cell::Cell;
use critical_section::Mutex;

mod config;
mod manager;
pub mod registers;
mod shared;

#[cfg(target_arch = "avr")]
mod avr;

pub use config::{AdcConfig, AdcPrescaler, AdcReference, AdcResolution, ConversionMode, TriggerSource};
pub use manager::{AdcManager, AdcPin, Notify};
pub use registers::AdcRegisters;
pub use shared::SharedAdc;

#[cfg(target_arch = "avr")]
pub use avr::Atmega32Adc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// Another conversion owns the converter
    Busy,
    /// Empty channel list or result buffer of the wrong length
    InvalidArgument,
    /// A blocking conversion did not finish within the configured bound
    Timeout,
    /// The shared converter was used before `init`
    Uninitialized,
}

impl ufmt::uDisplay for AdcError {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> core::result::Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(match self {
            AdcError::Busy => "busy",
            AdcError::InvalidArgument => "invalid argument",
            AdcError::Timeout => "timeout",
            AdcError::Uninitialized => "uninitialized",
        })
    }
}

pub type Result<T> = core::result::Result<T, AdcError>;

/// Result slot written by the conversion-complete interrupt and read by
/// the foreground program.
pub struct Sample(Mutex<Cell<u16>>);

impl Sample {
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(0)))
    }

    pub fn get(&self) -> u16 {
        critical_section::with(|cs| self.0.borrow(cs).get())
    }

    pub(crate) fn store(&self, value: u16) {
        critical_section::with(|cs| self.0.borrow(cs).set(value));
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive `poll` until it yields, giving up after `timeout` attempts.
pub(crate) fn block_for<F>(timeout: u32, mut poll: F) -> Option<Result<u16>>
where
    F: FnMut() -> nb::Result<u16, AdcError>,
{
    for _ in 0..timeout {
        match poll() {
            Ok(sample) => return Some(Ok(sample)),
            Err(nb::Error::Other(e)) => return Some(Err(e)),
            Err(nb::Error::WouldBlock) => {}
        }
    }
    None
}
