//! ATmega32 firmware: interrupt-driven ADC manager, analog sensors and a
//! fire-alarm monitor built on them.
#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod config;
pub mod drivers;
pub mod hal;
pub mod logger;

#[cfg(test)]
mod testing;
