//! Line-oriented logging over any `ufmt` sink.
//!
//! Each record is one line, prefixed with its kind:
//! `[SYS] ready`, `[SNS] temp=24`, `[ERR] chain: busy`.

use ufmt::{uDisplay, uWrite, uwrite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogType {
    System = 0,
    Sensor = 1,
    Error = 2,
    Debug = 3,
}

impl LogType {
    fn prefix(self) -> &'static str {
        match self {
            LogType::System => "[SYS] ",
            LogType::Sensor => "[SNS] ",
            LogType::Error => "[ERR] ",
            LogType::Debug => "[DBG] ",
        }
    }

    /// Debug records are only built in with the `debug` feature
    fn enabled(self) -> bool {
        match self {
            LogType::Debug => cfg!(feature = "debug"),
            _ => true,
        }
    }
}

pub struct Logger<W> {
    sink: W,
    entries: u32,
    errors: u32,
}

impl<W: uWrite> Logger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            entries: 0,
            errors: 0,
        }
    }

    pub fn log_system(&mut self, msg: &str) -> Result<(), W::Error> {
        self.log_entry(LogType::System, msg, None::<&str>)
    }

    pub fn log_sensor<V: uDisplay>(&mut self, tag: &str, value: V) -> Result<(), W::Error> {
        self.log_entry(LogType::Sensor, tag, Some(value))
    }

    pub fn log_error<E: uDisplay>(&mut self, tag: &str, error: E) -> Result<(), W::Error> {
        self.errors = self.errors.wrapping_add(1);
        self.log_entry(LogType::Error, tag, Some(error))
    }

    pub fn log_debug<V: uDisplay>(&mut self, tag: &str, value: V) -> Result<(), W::Error> {
        self.log_entry(LogType::Debug, tag, Some(value))
    }

    fn log_entry<V: uDisplay>(
        &mut self,
        log_type: LogType,
        text: &str,
        value: Option<V>,
    ) -> Result<(), W::Error> {
        if !log_type.enabled() {
            return Ok(());
        }

        self.sink.write_str(log_type.prefix())?;
        self.sink.write_str(text)?;
        if let Some(value) = value {
            let separator = if log_type == LogType::Error { ": " } else { "=" };
            uwrite!(self.sink, "{}{}", separator, value)?;
        }
        self.sink.write_str("\r\n")?;

        self.entries = self.entries.wrapping_add(1);
        Ok(())
    }

    /// Records written so far
    pub fn entries(&self) -> u32 {
        self.entries
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
