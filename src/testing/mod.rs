//! Host-side stand-in for the ADC peripheral.

use std::sync::{Mutex, MutexGuard};

use crate::hal::adc::registers::{AdcRegisters, ADEN, ADIE, ADIF, ADLAR, ADSC, MUX_MASK};

#[derive(Default)]
struct Hw {
    admux: u8,
    adcsra: u8,
    sfior: u8,
    data: u16,
    started: Vec<u8>,
    aborted: u32,
    auto_complete: Option<u16>,
}

impl Hw {
    fn complete(&mut self, sample: u16) {
        self.data = if self.admux & ADLAR != 0 {
            // left adjusted: ADCH carries the sample, ADCL holds the two
            // discarded low bits
            ((sample & 0xFF) << 8) | 0x00C0
        } else {
            sample & 0x03FF
        };
        self.adcsra = (self.adcsra & !ADSC) | ADIF;
    }
}

/// Register block that behaves like the ATmega32 converter: ADSC starts a
/// conversion, ADIF is cleared by writing one, clearing ADEN aborts.
///
/// Conversions only finish when the test says so, through [`finish`] or
/// [`auto_complete`].
///
/// [`finish`]: SimulatedAdc::finish
/// [`auto_complete`]: SimulatedAdc::auto_complete
#[derive(Default)]
pub struct SimulatedAdc {
    hw: Mutex<Hw>,
}

impl SimulatedAdc {
    pub fn new() -> Self {
        Self::default()
    }

    fn hw(&self) -> MutexGuard<'_, Hw> {
        self.hw.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Finish every conversion the moment it starts, reporting `sample`.
    pub fn auto_complete(&self, sample: Option<u16>) {
        self.hw().auto_complete = sample;
    }

    /// Finish the running conversion with `sample`. Returns whether the
    /// conversion-complete interrupt fires; entering the vector clears ADIF
    /// the way the hardware does.
    pub fn finish(&self, sample: u16) -> bool {
        let mut hw = self.hw();
        assert!(hw.adcsra & ADSC != 0, "no conversion running");
        hw.complete(sample);

        let fires = hw.adcsra & ADIE != 0;
        if fires {
            hw.adcsra &= !ADIF;
        }
        fires
    }

    /// Set ADIF without a conversion, like a completion nobody collected.
    pub fn raise_flag(&self) {
        self.hw().adcsra |= ADIF;
    }

    /// Channels conversions were started on, in order
    pub fn started(&self) -> Vec<u8> {
        self.hw().started.clone()
    }

    pub fn aborted(&self) -> u32 {
        self.hw().aborted
    }

    pub fn is_converting(&self) -> bool {
        self.hw().adcsra & ADSC != 0
    }

    pub fn admux(&self) -> u8 {
        self.hw().admux
    }

    pub fn adcsra(&self) -> u8 {
        self.hw().adcsra
    }

    pub fn sfior(&self) -> u8 {
        self.hw().sfior
    }
}

impl AdcRegisters for SimulatedAdc {
    fn read_admux(&self) -> u8 {
        self.hw().admux
    }

    fn write_admux(&self, bits: u8) {
        self.hw().admux = bits;
    }

    fn read_adcsra(&self) -> u8 {
        self.hw().adcsra
    }

    fn write_adcsra(&self, bits: u8) {
        let mut hw = self.hw();
        let old = hw.adcsra;
        let mut next = bits & !(ADIF | ADSC);

        if old & ADIF != 0 && bits & ADIF == 0 {
            next |= ADIF;
        }

        let enabled = bits & ADEN != 0;
        let mut started = false;
        if old & ADSC != 0 {
            if enabled {
                next |= ADSC;
            } else {
                hw.aborted += 1;
            }
        } else if bits & ADSC != 0 && enabled {
            next |= ADSC;
            let channel = hw.admux & MUX_MASK;
            hw.started.push(channel);
            started = true;
        }

        hw.adcsra = next;
        if started {
            if let Some(sample) = hw.auto_complete {
                hw.complete(sample);
            }
        }
    }

    fn read_sfior(&self) -> u8 {
        self.hw().sfior
    }

    fn write_sfior(&self, bits: u8) {
        self.hw().sfior = bits;
    }

    fn read_data(&self) -> u16 {
        self.hw().data
    }
}
