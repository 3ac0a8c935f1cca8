pub mod ldr;
pub mod lm35;

#[cfg(target_arch = "avr")]
pub mod serial_console;

pub use ldr::Ldr;
pub use lm35::Lm35;

#[cfg(target_arch = "avr")]
pub use serial_console::SerialConsole;
