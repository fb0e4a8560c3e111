use core::str::FromStr;

use log::LevelFilter;
use sensor::supervisor::DEFAULT_POLL_BUDGET;
use sensor::{AdcConfig, Calibration};

#[toml_cfg::toml_config]
pub struct TomlConfig {
    #[default(2000)]
    sense_interval_ms: u32,
    #[default(10000)]
    bus_poll_budget: u32,
    #[default(100)]
    conversion_poll_limit: u32,
    #[default(1000.0)]
    baseline_millivolts: f32,
    #[default(20.9)]
    ambient_percent: f32,
    #[default(0x48)]
    adc_address: u8,
    #[default(false)]
    trigger_each_sample: bool,
    #[default("info")]
    log_level: &'static str,
}

pub struct Config {
    pub sense_interval_ms: u32,
    // Status polls per bus phase, not a time unit
    pub bus_poll_budget: u32,
    pub conversion_poll_limit: u32,
    pub trigger_each_sample: bool,
    pub calibration: Calibration,
    pub adc: AdcConfig,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn read() -> Self {
        Config::from(TOML_CONFIG)
    }
}

impl From<TomlConfig> for Config {
    fn from(config: TomlConfig) -> Self {
        let defaults = Config::default();
        Config {
            sense_interval_ms: config.sense_interval_ms,
            bus_poll_budget: config.bus_poll_budget,
            conversion_poll_limit: config.conversion_poll_limit,
            trigger_each_sample: config.trigger_each_sample,
            calibration: Calibration {
                baseline_millivolts: config.baseline_millivolts,
                ambient_percent: config.ambient_percent,
            },
            adc: AdcConfig {
                address: config.adc_address,
                ..defaults.adc
            },
            log_level: LevelFilter::from_str(config.log_level).unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sense_interval_ms: 2000,
            bus_poll_budget: DEFAULT_POLL_BUDGET,
            conversion_poll_limit: 100,
            trigger_each_sample: false,
            calibration: Calibration::default(),
            adc: AdcConfig::default(),
            log_level: LevelFilter::Info,
        }
    }
}
