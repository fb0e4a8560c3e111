use core::fmt;

/// Position in the ADS1115 write or read chain.
///
/// Errors carry the step at which the failure was observed, the step names
/// follow the order in which the bus transaction advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Idle,
    ConfigAddressed,
    ConfigByte0Sent,
    ConfigByte1Sent,
    ConfigByte2Sent,
    ConfigComplete,
    ReadPointerAddressed,
    PointerSent,
    ReadAddressed,
    MsbReceived,
    LsbReceived,
    ReadComplete,
    // Waiting for the operational status bit after a single-shot trigger
    ConversionPending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The bus never went idle, no transaction was started
    BusBusy,
    /// A bounded wait ran out of poll iterations
    Timeout(Step),
    /// The device did not acknowledge the address or a byte
    Rejected(Step),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BusBusy => write!(f, "I2C bus is busy"),
            Error::Timeout(step) => write!(f, "I2C timeout at {:?}", step),
            Error::Rejected(step) => write!(f, "NACK received at {:?}", step),
        }
    }
}

impl core::error::Error for Error {}
