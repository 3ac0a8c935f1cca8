use core::mem;

use embedded_hal::adc::{Channel, OneShot};

use super::registers::{AdcRegisters, ADEN, ADIE, ADIF, ADSC, ADTS_MASK, MUX_MASK};
use super::{block_for, AdcConfig, AdcError, Result, Sample};

/// Completion callback. Runs in interrupt context once the manager is idle again.
pub type Notify = fn();

/// Who currently owns the converter.
enum State<'a> {
    Idle,
    /// Blocking conversion, completion is polled
    Polling { channel: u8 },
    /// One interrupt-driven conversion
    Single { slot: &'a Sample, notify: Notify },
    /// Interrupt-driven conversions over `channels`; both slices shrink by
    /// one per completion, so `channels.len()` is the number still to run
    Chain {
        channels: &'a [u8],
        results: &'a [Sample],
        notify: Notify,
    },
}

/// Owner of the ADC peripheral and of the conversion in flight.
pub struct AdcManager<'a, R> {
    regs: R,
    config: AdcConfig,
    state: State<'a>,
}

impl<'a, R: AdcRegisters> AdcManager<'a, R> {
    pub fn new(regs: R, config: AdcConfig) -> Self {
        let mut adc = Self {
            regs,
            config,
            state: State::Idle,
        };
        adc.init();
        adc
    }

    /// Program reference, alignment, trigger mode and prescaler, then enable
    /// the converter with its interrupt off.
    pub fn init(&mut self) {
        let admux = self.config.admux_bits();
        self.regs.modify_admux(|r| (r & MUX_MASK) | admux);

        if let Some(trigger) = self.config.trigger_bits() {
            self.regs.modify_sfior(|r| (r & !ADTS_MASK) | trigger);
        }

        self.regs.write_adcsra(self.config.adcsra_bits());
        self.state = State::Idle;
    }

    pub fn config(&self) -> &AdcConfig {
        &self.config
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Convert `channel` and wait for the result.
    pub fn convert_sync(&mut self, channel: u8) -> Result<u16> {
        self.start_single(channel)?;
        match block_for(self.config.timeout, || self.poll()) {
            Some(outcome) => outcome,
            None => {
                self.abort();
                Err(AdcError::Timeout)
            }
        }
    }

    /// Convert `channel` in the background. `slot` receives the sample and
    /// `notify` runs from the conversion-complete interrupt.
    pub fn convert_async(&mut self, channel: u8, slot: &'a Sample, notify: Notify) -> Result<()> {
        if self.is_busy() {
            return Err(AdcError::Busy);
        }

        self.state = State::Single { slot, notify };
        self.arm(channel);
        Ok(())
    }

    /// Convert every channel in order, storing into the matching entry of
    /// `results`. `notify` runs once, after the last conversion.
    pub fn convert_chain(
        &mut self,
        channels: &'a [u8],
        results: &'a [Sample],
        notify: Notify,
    ) -> Result<()> {
        let first = match channels.first() {
            Some(&first) if results.len() == channels.len() => first,
            _ => return Err(AdcError::InvalidArgument),
        };
        if self.is_busy() {
            return Err(AdcError::Busy);
        }

        self.state = State::Chain {
            channels,
            results,
            notify,
        };
        self.arm(first);
        Ok(())
    }

    /// Conversion-complete continuation, called from the ADC interrupt.
    ///
    /// Returns the caller's callback once the operation is finished. The
    /// manager is already idle at that point, so the callback may start the
    /// next conversion.
    pub fn on_conversion_complete(&mut self) -> Option<Notify> {
        match mem::replace(&mut self.state, State::Idle) {
            State::Idle => {
                self.clear_control(ADIE);
                None
            }
            State::Polling { channel } => {
                self.clear_control(ADIE);
                self.state = State::Polling { channel };
                None
            }
            State::Single { slot, notify } => {
                slot.store(self.read_sample());
                self.clear_control(ADIE);
                Some(notify)
            }
            State::Chain {
                channels,
                results,
                notify,
            } => {
                if let Some(slot) = results.first() {
                    slot.store(self.read_sample());
                }

                let channels = channels.get(1..).unwrap_or_default();
                let results = results.get(1..).unwrap_or_default();
                match channels.first() {
                    Some(&next) => {
                        self.state = State::Chain {
                            channels,
                            results,
                            notify,
                        };
                        self.arm(next);
                        None
                    }
                    None => {
                        self.clear_control(ADIE);
                        Some(notify)
                    }
                }
            }
        }
    }

    /// Claim the converter and start a polled conversion.
    pub(crate) fn start_single(&mut self, channel: u8) -> Result<()> {
        if self.is_busy() {
            return Err(AdcError::Busy);
        }

        self.state = State::Polling { channel };
        self.clear_flag();
        self.select_channel(channel);
        self.set_control(ADSC);
        Ok(())
    }

    /// Check a polled conversion, releasing the converter once it is done.
    pub(crate) fn poll(&mut self) -> nb::Result<u16, AdcError> {
        match self.state {
            State::Polling { .. } => {}
            State::Idle => return Err(nb::Error::Other(AdcError::InvalidArgument)),
            _ => return Err(nb::Error::Other(AdcError::Busy)),
        }

        if self.regs.read_adcsra() & ADIF == 0 {
            return Err(nb::Error::WouldBlock);
        }

        self.clear_flag();
        let sample = self.read_sample();
        self.state = State::Idle;
        Ok(sample)
    }

    /// Abandon the running conversion. Disabling the converter terminates it,
    /// so no late completion can reach the next owner.
    pub(crate) fn abort(&mut self) {
        self.clear_control(ADIE | ADEN);
        self.set_control(ADEN);
        self.clear_flag();
        self.state = State::Idle;
    }

    fn arm(&mut self, channel: u8) {
        self.clear_flag();
        self.select_channel(channel);
        self.set_control(ADSC);
        self.set_control(ADIE);
    }

    #[inline]
    fn select_channel(&self, channel: u8) {
        self.regs.modify_admux(|r| (r & !MUX_MASK) | (channel & MUX_MASK));
    }

    #[inline]
    fn read_sample(&self) -> u16 {
        self.config.resolution.extract(self.regs.read_data())
    }

    // ADIF is write-one-to-clear: every read-modify-write below masks it out
    // unless the flag is meant to be cleared.

    #[inline]
    fn clear_flag(&self) {
        self.regs.modify_adcsra(|r| (r & !ADSC) | ADIF);
    }

    #[inline]
    fn set_control(&self, bits: u8) {
        self.regs.modify_adcsra(|r| (r & !(ADIF | ADSC)) | bits);
    }

    #[inline]
    fn clear_control(&self, bits: u8) {
        self.regs.modify_adcsra(|r| r & !(ADIF | ADSC | bits));
    }
}

/// An ADC input, `CH` is the multiplexer channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdcPin<const CH: u8>;

impl<'a, R: AdcRegisters, const CH: u8> Channel<AdcManager<'a, R>> for AdcPin<CH> {
    type ID = u8;

    fn channel() -> u8 {
        CH
    }
}

impl<'a, R, PIN> OneShot<AdcManager<'a, R>, u16, PIN> for AdcManager<'a, R>
where
    R: AdcRegisters,
    PIN: Channel<AdcManager<'a, R>, ID = u8>,
{
    type Error = AdcError;

    fn read(&mut self, _pin: &mut PIN) -> nb::Result<u16, AdcError> {
        let channel = PIN::channel();
        match self.state {
            State::Idle => {
                self.start_single(channel)?;
                Err(nb::Error::WouldBlock)
            }
            State::Polling { channel: active } if active == channel => self.poll(),
            _ => Err(nb::Error::Other(AdcError::Busy)),
        }
    }
}
