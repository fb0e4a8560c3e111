use tock_registers::fields::FieldValue;
use tock_registers::LocalRegisterCopy;

use crate::error::Error;
use crate::registers::{CR2, ICR, ISR};

#[cfg(test)]
pub mod sim;

/// Register level access to a two-wire bus controller.
///
/// Implemented by the firmware over the memory-mapped I2C block. None of the
/// methods block, waiting on status flags is left to the supervisor.
pub trait BusController {
    fn status(&self) -> LocalRegisterCopy<u32, ISR::Register>;

    /// Overwrite CR2, a set START bit begins the transfer.
    fn control(&mut self, value: FieldValue<u32, CR2::Register>);

    fn request_stop(&mut self);

    fn clear_flags(&mut self, flags: FieldValue<u32, ICR::Register>);

    fn write_data(&mut self, byte: u8);

    fn read_data(&mut self) -> u8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Write,
    Read,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Addressing,
    DataTransfer,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub address: u8,
    pub direction: Direction,
    pub byte_count: u8,
    pub transferred: u8,
    pub phase: Phase,
}

impl Transaction {
    const IDLE: Transaction = Transaction {
        address: 0,
        direction: Direction::Write,
        byte_count: 0,
        transferred: 0,
        phase: Phase::Idle,
    };
}

/// Owned handle on the bus controller.
///
/// Tracks the single outstanding transaction. Each protocol call borrows the
/// transport mutably, so two transactions can never overlap.
pub struct Transport<C> {
    controller: C,
    transaction: Transaction,
}

impl<C: BusController> Transport<C> {
    pub fn new(controller: C) -> Self {
        Transport {
            controller,
            transaction: Transaction::IDLE,
        }
    }

    pub fn status(&self) -> LocalRegisterCopy<u32, ISR::Register> {
        self.controller.status()
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn is_busy(&self) -> bool {
        self.transaction.phase != Phase::Idle || self.status().is_set(ISR::BUSY)
    }

    /// Program target address, direction and byte count, then trigger the
    /// start condition. Nothing is written to the controller when the bus is
    /// busy.
    pub fn begin_transaction(
        &mut self,
        address: u8,
        direction: Direction,
        byte_count: u8,
    ) -> Result<(), Error> {
        if self.is_busy() {
            return Err(Error::BusBusy);
        }
        self.start(address, direction, byte_count);
        Ok(())
    }

    /// Repeated start on the open transaction, keeping the target address.
    pub fn restart(&mut self, direction: Direction, byte_count: u8) {
        debug_assert!(self.transaction.phase != Phase::Idle);
        self.start(self.transaction.address, direction, byte_count);
    }

    fn start(&mut self, address: u8, direction: Direction, byte_count: u8) {
        let rd_wrn = match direction {
            Direction::Write => CR2::RD_WRN::Write,
            Direction::Read => CR2::RD_WRN::Read,
        };
        self.controller.control(
            CR2::SADD.val(u32::from(address & 0x7f) << 1)
                + rd_wrn
                + CR2::NBYTES.val(u32::from(byte_count))
                + CR2::AUTOEND::Software
                + CR2::START::SET,
        );
        self.transaction = Transaction {
            address,
            direction,
            byte_count,
            transferred: 0,
            phase: Phase::Addressing,
        };
    }

    /// Caller must have observed TXIS.
    pub fn transmit_byte(&mut self, value: u8) {
        self.controller.write_data(value);
        self.advance();
    }

    /// Caller must have observed RXNE.
    pub fn receive_byte(&mut self) -> u8 {
        let value = self.controller.read_data();
        self.advance();
        value
    }

    fn advance(&mut self) {
        self.transaction.transferred = self.transaction.transferred.saturating_add(1);
        self.transaction.phase = Phase::DataTransfer;
    }

    pub fn end_transaction(&mut self) {
        self.controller.request_stop();
        self.transaction.phase = Phase::Stop;
    }

    /// Clear the flags a finished transaction leaves behind and return to idle.
    pub fn release(&mut self) {
        self.controller.clear_flags(ICR::NACKCF::SET + ICR::STOPCF::SET);
        self.transaction = Transaction::IDLE;
    }
}

#[cfg(test)]
mod tests {
    use super::sim::SimulatedBus;
    use super::*;

    #[test]
    fn test_begin_programs_address_and_count() {
        let mut bus = Transport::new(SimulatedBus::new());
        bus.begin_transaction(0x48, Direction::Write, 3).unwrap();

        let cr2 = bus.controller().last_control;
        assert_eq!(cr2.read(CR2::SADD), 0x48 << 1);
        assert_eq!(cr2.read(CR2::NBYTES), 3);
        assert!(cr2.is_set(CR2::START));
        assert!(!cr2.is_set(CR2::RD_WRN));
        assert!(!cr2.is_set(CR2::AUTOEND));
        assert_eq!(bus.transaction().phase, Phase::Addressing);
        assert!(bus.status().is_set(ISR::TXIS));
    }

    #[test]
    fn test_begin_refused_while_busy() {
        let mut bus = Transport::new(SimulatedBus::new().stuck_busy());
        assert_eq!(
            bus.begin_transaction(0x48, Direction::Write, 1),
            Err(Error::BusBusy)
        );
        assert_eq!(bus.controller().starts, 0);
        assert_eq!(bus.transaction().phase, Phase::Idle);
    }

    #[test]
    fn test_begin_refused_with_open_transaction() {
        let mut bus = Transport::new(SimulatedBus::new());
        bus.begin_transaction(0x48, Direction::Write, 1).unwrap();
        assert_eq!(
            bus.begin_transaction(0x48, Direction::Write, 1),
            Err(Error::BusBusy)
        );
        assert_eq!(bus.controller().starts, 1);
    }

    #[test]
    fn test_restart_switches_direction() {
        let mut bus = Transport::new(SimulatedBus::new());
        bus.begin_transaction(0x48, Direction::Write, 1).unwrap();
        bus.transmit_byte(0x00);
        bus.restart(Direction::Read, 2);

        let cr2 = bus.controller().last_control;
        assert!(cr2.is_set(CR2::RD_WRN));
        assert_eq!(cr2.read(CR2::NBYTES), 2);
        assert_eq!(bus.transaction().address, 0x48);
        assert_eq!(bus.transaction().transferred, 0);
    }

    #[test]
    fn test_end_and_release_return_to_idle() {
        let mut bus = Transport::new(SimulatedBus::new());
        bus.begin_transaction(0x48, Direction::Write, 1).unwrap();
        bus.transmit_byte(0x01);
        assert_eq!(bus.transaction().phase, Phase::DataTransfer);
        assert_eq!(bus.transaction().transferred, 1);

        bus.end_transaction();
        assert_eq!(bus.transaction().phase, Phase::Stop);
        assert!(bus.status().is_set(ISR::STOPF));

        bus.release();
        assert!(!bus.status().is_set(ISR::STOPF));
        assert!(!bus.is_busy());
        assert_eq!(bus.controller().stops, 1);
    }
}
