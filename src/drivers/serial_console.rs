use core::convert::Infallible;

use avr_device::atmega32a::USART;

use crate::hal::Uart;

pub struct SerialConsole {
    uart: Uart,
}

impl SerialConsole {
    pub fn new(usart: USART) -> Self {
        Self {
            uart: Uart::new(usart),
        }
    }

    pub fn write_line(&mut self, s: &str) {
        self.uart.write_str(s);
        self.uart.write_str("\r\n");
    }
}

impl ufmt::uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.uart.write_str(s);
        Ok(())
    }
}
