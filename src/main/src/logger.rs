use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};

use crate::serial::Serial;

/// Writes each record as one CRLF terminated line on USART2
struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Safety: single threaded, no interrupt handler logs
        let mut serial = unsafe { Serial::steal() };
        let _ = write!(
            serial,
            "{} {}: {}\r\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) {
    // Cortex-M0+ has no compare-and-swap, so the racy setter is the only one.
    // Safety: called once before anything logs, nothing else runs concurrently
    unsafe {
        let _ = log::set_logger_racy(&LOGGER);
    }
    log::set_max_level(level);
}
