#![no_std]

use core::fmt;

use log::*;

pub mod adc;
pub mod bus;
mod config;
mod error;
mod oxygen;
mod reading;
pub mod registers;
pub mod supervisor;

pub use adc::{AdcConfig, Ads1115, Register};
pub use bus::{BusController, Direction, Phase, Transaction, Transport};
pub use config::Calibration;
pub use error::{Error, Step};
pub use oxygen::{to_millivolts, to_oxygen_percent};
pub use reading::{report, Reading};
pub use supervisor::{await_condition, check_acknowledgment, Outcome, Supervisor};

/// Sense loop context: the bus handle, the device and the last reading.
pub struct Analyzer<C> {
    bus: Transport<C>,
    adc: Ads1115,
    calibration: Calibration,
    last: Option<Reading>,
}

impl<C: BusController> Analyzer<C> {
    pub fn new(bus: Transport<C>, adc: Ads1115, calibration: Calibration) -> Self {
        Analyzer {
            bus,
            adc,
            calibration,
            last: None,
        }
    }

    pub fn configure(&mut self) -> Result<(), Error> {
        info!("Configuring ADS1115 at {:#04x}", self.adc.config().address);
        self.adc.write_configuration(&mut self.bus)?;
        info!("Configuration done");
        Ok(())
    }

    /// Start a fresh single-shot conversion and wait for it to finish.
    pub fn trigger(&mut self, max_polls: u32) -> Result<(), Error> {
        self.adc.write_configuration(&mut self.bus)?;
        self.adc.await_conversion(&mut self.bus, max_polls)
    }

    /// Read the conversion register and run it through the pipeline.
    ///
    /// A failed read leaves the previous reading in place.
    pub fn sense(&mut self) -> Result<Reading, Error> {
        let sample = self.adc.read_conversion(&mut self.bus)?;
        let reading = Reading::from_sample(
            sample,
            self.adc.config().gain.full_scale_volts(),
            &self.calibration,
        );
        self.last = Some(reading);
        Ok(reading)
    }

    /// Sense and write the report line to `out`.
    ///
    /// Nothing is written when the read fails. A sink that rejects the line
    /// does not fail the reading.
    pub fn sense_and_report(&mut self, out: &mut impl fmt::Write) -> Result<Reading, Error> {
        let reading = self.sense()?;
        if report(out, &reading).is_err() {
            warn!("Report line dropped");
        }
        Ok(reading)
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last
    }

    pub fn bus(&self) -> &Transport<C> {
        &self.bus
    }
}
