#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use core::cell::Cell;

    use avr_device::atmega32a::Peripherals;
    use critical_section::Mutex;
    use panic_halt as _;

    use atmega32_firmware::application::FireAlarm;
    use atmega32_firmware::config::{
        ADC_CONFIG, ADC_VREF_MV, LDR_FIXED_OHMS, LIGHT_CHANNEL, TEMP_CHANNEL,
    };
    use atmega32_firmware::drivers::{Ldr, Lm35, SerialConsole};
    use atmega32_firmware::hal::{Atmega32Adc, Sample, SharedAdc};
    use atmega32_firmware::logger::Logger;

    // Converter state shared with the ADC vector
    static CONVERTER: SharedAdc<Atmega32Adc> = SharedAdc::new();

    static CHANNELS: [u8; 2] = [TEMP_CHANNEL, LIGHT_CHANNEL];
    static RESULTS: [Sample; 2] = [Sample::new(), Sample::new()];
    static READY: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

    fn samples_ready() {
        critical_section::with(|cs| READY.borrow(cs).set(true));
    }

    fn take_ready() -> bool {
        critical_section::with(|cs| READY.borrow(cs).replace(false))
    }

    #[avr_device::interrupt(atmega32a)]
    fn ADC() {
        CONVERTER.on_interrupt();
    }

    #[avr_device::entry]
    fn main() -> ! {
        let dp = Peripherals::take().unwrap();

        let mut log = Logger::new(SerialConsole::new(dp.USART));
        CONVERTER.init(Atmega32Adc::new(dp.ADC), ADC_CONFIG);

        // Enable interrupts globally
        unsafe { avr_device::interrupt::enable() };

        log.log_system("ATmega32 fire alarm v0.1.0").ok();

        let lm35 = Lm35::new(ADC_VREF_MV, ADC_CONFIG.resolution);
        let ldr = Ldr::new(LDR_FIXED_OHMS, ADC_CONFIG.resolution);
        let mut alarm = FireAlarm::new();

        if let Err(e) = CONVERTER.convert_chain(&CHANNELS, &RESULTS, samples_ready) {
            log.log_error("chain", e).ok();
        }

        loop {
            if !take_ready() {
                continue;
            }

            let (raw_temp, raw_light) = (RESULTS[0].get(), RESULTS[1].get());
            log.log_debug("raw_temp", raw_temp).ok();
            log.log_debug("raw_light", raw_light).ok();

            alarm.update(lm35.celsius(raw_temp), ldr.ohms(raw_light));
            alarm.report(&mut log).ok();

            if let Err(e) = CONVERTER.convert_chain(&CHANNELS, &RESULTS, samples_ready) {
                log.log_error("chain", e).ok();
            }
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
