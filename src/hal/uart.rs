#![allow(unused_unsafe)]

use avr_device::atmega32a::USART;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

// UCSRA
const UDRE: u8 = 1 << 5;
// UCSRB
const TXEN: u8 = 1 << 3;

const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

/// Transmit-only USART, 8N1 at `UART_BAUD`.
pub struct Uart {
    usart: USART,
}

impl Uart {
    pub fn new(usart: USART) -> Self {
        unsafe {
            // Set baud rate
            usart.ubrrh.write(|w| w.bits((UBRR >> 8) as u8));
            usart.ubrrl.write(|w| w.bits(UBRR as u8));
            // Enable TX only, frame format is the reset default (8N1)
            usart.ucsrb.write(|w| w.bits(TXEN));
        }
        Self { usart }
    }

    pub fn write_byte(&mut self, byte: u8) {
        while self.usart.ucsra.read().bits() & UDRE == 0 {}
        self.usart.udr.write(|w| unsafe { w.bits(byte) });
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }
}
