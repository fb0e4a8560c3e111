use log::*;

use crate::bus::{BusController, Direction, Transport};
use crate::error::{Error, Step};
use crate::supervisor::{Condition, Outcome, Supervisor};

mod config;

pub use config::*;

const REG_POINTER_MASK: u8 = 0x03;

/// Config register bit 15 reads 1 once no conversion is in progress
const OPERATIONAL_STATUS: u16 = 1 << 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Conversion = 0x00,
    Config = 0x01,
}

impl Register {
    pub fn pointer(self) -> u8 {
        self as u8 & REG_POINTER_MASK
    }
}

/// ADS1115 command/response protocol.
///
/// Every operation is a linear chain of bus phases. The first phase that times
/// out or is rejected terminates the transaction with a stop condition and
/// the error is returned as is, there are no retries at this level.
pub struct Ads1115 {
    config: AdcConfig,
    supervisor: Supervisor,
}

impl Ads1115 {
    pub fn new(config: AdcConfig, supervisor: Supervisor) -> Self {
        Ads1115 { config, supervisor }
    }

    pub fn config(&self) -> &AdcConfig {
        &self.config
    }

    /// Write pointer, MSB and LSB of the configuration word.
    ///
    /// With the OS bit set in the written word this also starts a single-shot
    /// conversion.
    pub fn write_configuration<C: BusController>(
        &self,
        bus: &mut Transport<C>,
    ) -> Result<(), Error> {
        debug!("Writing configuration to {:#04x}", self.config.address);
        let [msb, lsb] = self.config.to_u8_array(true);
        let payload = [Register::Config.pointer(), msb, lsb];
        let sent = [
            Step::ConfigByte0Sent,
            Step::ConfigByte1Sent,
            Step::ConfigByte2Sent,
        ];

        self.open(bus, Direction::Write, payload.len() as u8)?;
        let mut step = Step::ConfigAddressed;
        for (byte, next) in payload.into_iter().zip(sent) {
            self.gate(bus, Condition::TransmitReady, step)?;
            bus.transmit_byte(byte);
            step = next;
            self.gate(bus, Condition::ByteTransferred, step)?;
            debug!("{:?} ({:#04x})", step, byte);
        }
        self.gate(bus, Condition::TransferComplete, step)?;
        self.supervisor.terminate(bus);

        debug!("{:?}", Step::ConfigComplete);
        Ok(())
    }

    /// Read a 16-bit register, MSB first.
    ///
    /// The pointer is written in its own transfer, then a repeated start
    /// switches to a 2-byte read. A pointer write that does not complete
    /// aborts the read.
    pub fn read_register<C: BusController>(
        &self,
        bus: &mut Transport<C>,
        register: Register,
    ) -> Result<u16, Error> {
        self.open(bus, Direction::Write, 1)?;
        self.gate(bus, Condition::TransmitReady, Step::ReadPointerAddressed)?;
        bus.transmit_byte(register.pointer());
        self.gate(bus, Condition::TransferComplete, Step::PointerSent)?;

        bus.restart(Direction::Read, 2);
        self.gate(bus, Condition::ReceiveReady, Step::ReadAddressed)?;
        let msb = bus.receive_byte();
        self.gate(bus, Condition::ReceiveReady, Step::MsbReceived)?;
        let lsb = bus.receive_byte();
        self.gate(bus, Condition::TransferComplete, Step::LsbReceived)?;
        self.supervisor.terminate(bus);

        let word = u16::from_be_bytes([msb, lsb]);
        trace!("{:?} {:?} = {:#06x}", Step::ReadComplete, register, word);
        Ok(word)
    }

    pub fn read_conversion<C: BusController>(&self, bus: &mut Transport<C>) -> Result<i16, Error> {
        self.read_register(bus, Register::Conversion)
            .map(|word| word as i16)
    }

    /// Poll the operational status bit until the running conversion is done.
    ///
    /// `max_polls` bounds the number of config register reads. Bus errors
    /// during polling are returned immediately.
    pub fn await_conversion<C: BusController>(
        &self,
        bus: &mut Transport<C>,
        max_polls: u32,
    ) -> Result<(), Error> {
        for _ in 0..max_polls {
            let word = self.read_register(bus, Register::Config)?;
            if word & OPERATIONAL_STATUS != 0 {
                return Ok(());
            }
        }
        warn!("Conversion still running after {} polls", max_polls);
        Err(Error::Timeout(Step::ConversionPending))
    }

    fn open<C: BusController>(
        &self,
        bus: &mut Transport<C>,
        direction: Direction,
        byte_count: u8,
    ) -> Result<(), Error> {
        if self.supervisor.wait_idle(bus) != Outcome::Success {
            warn!("I2C bus is busy, transaction not started");
            return Err(Error::BusBusy);
        }
        bus.begin_transaction(self.config.address, direction, byte_count)
    }

    fn gate<C: BusController>(
        &self,
        bus: &mut Transport<C>,
        condition: Condition,
        step: Step,
    ) -> Result<(), Error> {
        let outcome = self.supervisor.gate(bus, condition);
        if outcome != Outcome::Success {
            warn!(
                "{:?} waiting for {:?} at {:?}, stopping",
                outcome, condition, step
            );
            self.supervisor.terminate(bus);
        }
        outcome.into_result(step)
    }
}
