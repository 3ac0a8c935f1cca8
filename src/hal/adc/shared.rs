use core::cell::RefCell;
use critical_section::Mutex;

use super::{block_for, AdcConfig, AdcError, AdcManager, AdcRegisters, Notify, Result, Sample};

/// The firmware-wide converter, shared between the main program and the
/// ADC interrupt vector.
///
/// Every access runs inside a critical section. The ISR body is
/// [`on_interrupt`](SharedAdc::on_interrupt); nothing else may reach the
/// manager.
pub struct SharedAdc<R> {
    inner: Mutex<RefCell<Option<AdcManager<'static, R>>>>,
}

impl<R: AdcRegisters> SharedAdc<R> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Take ownership of the registers and program them. Calling it again
    /// replaces the manager with a freshly initialised, idle one.
    pub fn init(&self, registers: R, config: AdcConfig) {
        critical_section::with(|cs| {
            self.inner
                .borrow_ref_mut(cs)
                .replace(AdcManager::new(registers, config));
        });
    }

    pub fn is_busy(&self) -> bool {
        self.lock(|adc| adc.is_busy()).unwrap_or(false)
    }

    /// Blocking conversion. Interrupts are only masked for each poll step,
    /// not for the whole wait.
    pub fn convert_sync(&self, channel: u8) -> Result<u16> {
        let timeout = self
            .lock(|adc| adc.start_single(channel).map(|()| adc.config().timeout))
            .unwrap_or(Err(AdcError::Uninitialized))?;

        let polled = block_for(timeout, || {
            self.lock(AdcManager::poll)
                .unwrap_or(Err(nb::Error::Other(AdcError::Uninitialized)))
        });

        match polled {
            Some(outcome) => outcome,
            None => {
                self.lock(AdcManager::abort);
                Err(AdcError::Timeout)
            }
        }
    }

    pub fn convert_async(&self, channel: u8, slot: &'static Sample, notify: Notify) -> Result<()> {
        self.lock(|adc| adc.convert_async(channel, slot, notify))
            .unwrap_or(Err(AdcError::Uninitialized))
    }

    pub fn convert_chain(
        &self,
        channels: &'static [u8],
        results: &'static [Sample],
        notify: Notify,
    ) -> Result<()> {
        self.lock(|adc| adc.convert_chain(channels, results, notify))
            .unwrap_or(Err(AdcError::Uninitialized))
    }

    /// Body of the conversion-complete interrupt. The callback runs after the
    /// lock is released, so it may start another conversion.
    pub fn on_interrupt(&self) {
        if let Some(notify) = self.lock(AdcManager::on_conversion_complete).flatten() {
            notify();
        }
    }

    fn lock<T>(&self, f: impl FnOnce(&mut AdcManager<'static, R>) -> T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}
