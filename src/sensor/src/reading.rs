use core::fmt;

use crate::config::Calibration;
use crate::oxygen::{to_millivolts, to_oxygen_percent};

/// One pass through the reading pipeline
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Reading {
    pub sample: i16,
    pub millivolts: f32,
    pub oxygen_percent: f32,
}

impl Reading {
    pub fn from_sample(sample: i16, full_scale_volts: f64, calibration: &Calibration) -> Self {
        let millivolts = to_millivolts(sample, full_scale_volts);
        Reading {
            sample,
            millivolts,
            oxygen_percent: to_oxygen_percent(millivolts, calibration),
        }
    }
}

// Consumers parse this line, keep spacing and precision as is
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Analog Value: {:.2} mV    O2 Percentage: {:.2} %",
            self.millivolts, self.oxygen_percent
        )
    }
}

/// Emit one report line, CRLF terminated
pub fn report(out: &mut impl fmt::Write, reading: &Reading) -> fmt::Result {
    write!(out, "{}\r\n", reading)
}
