use anyhow::{Context, Result};
use log::*;
use sensor::{Analyzer, BusController, Reading};

use crate::config::Config;
use crate::serial::Serial;

pub fn take_reading<C: BusController>(
    analyzer: &mut Analyzer<C>,
    config: &Config,
    serial: &mut Serial,
) -> Result<Reading> {
    if config.trigger_each_sample {
        analyzer
            .trigger(config.conversion_poll_limit)
            .context("Unable to start a conversion")?;
    }

    let reading = analyzer
        .sense_and_report(serial)
        .context("Unable to read ADS1115")?;
    debug!("Sample {} -> {:?}", reading.sample, reading);

    Ok(reading)
}

/// One sense loop iteration. A failed read is logged and not reported.
pub fn sense_and_report<C: BusController>(
    analyzer: &mut Analyzer<C>,
    config: &Config,
    serial: &mut Serial,
) {
    if let Err(err) = take_reading(analyzer, config, serial) {
        warn!("{:#}", err);
    }
}
