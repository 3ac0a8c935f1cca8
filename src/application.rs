//! Fire-alarm monitor: turns temperature and light readings into alarm,
//! fan and lighting decisions.

use ufmt::uWrite;

use crate::config::{FAN_OFF_C, FAN_ON_C, FIRE_THRESHOLD_C, LIGHT_THRESHOLDS_OHMS};
use crate::logger::Logger;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub celsius: u16,
    pub ldr_ohms: u32,
    pub fire: bool,
    pub fan_on: bool,
    /// Number of lamps to light, 0 (bright room) to 5 (dark)
    pub light_level: u8,
}

#[derive(Default)]
pub struct FireAlarm {
    status: Status,
}

impl FireAlarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, celsius: u16, ldr_ohms: u32) -> Status {
        let fire = celsius > FIRE_THRESHOLD_C;

        // between the two thresholds the fan keeps doing what it did
        let fan_on = if fire || celsius > FAN_ON_C {
            true
        } else if celsius < FAN_OFF_C {
            false
        } else {
            self.status.fan_on
        };

        let light_level = LIGHT_THRESHOLDS_OHMS
            .iter()
            .position(|&threshold| ldr_ohms > threshold)
            .map_or(0, |i| (LIGHT_THRESHOLDS_OHMS.len() - i) as u8);

        self.status = Status {
            celsius,
            ldr_ohms,
            fire,
            fan_on,
            light_level,
        };
        self.status
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn report<W: uWrite>(&self, log: &mut Logger<W>) -> Result<(), W::Error> {
        let status = self.status;
        log.log_sensor("temp", status.celsius)?;
        log.log_sensor("ldr", status.ldr_ohms)?;
        log.log_sensor("light", status.light_level)?;
        log.log_sensor("fan", status.fan_on as u8)?;
        if status.fire {
            log.log_system("FIRE DETECTED")?;
        }
        Ok(())
    }
}
