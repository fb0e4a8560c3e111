use sensor::registers::{CR1, CR2, ICR, ISR, RXDR, TIMINGR, TXDR};
use sensor::BusController;
use tock_registers::fields::FieldValue;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_structs, LocalRegisterCopy};

use crate::gpio::{OutputType, Port, Pull};
use crate::rcc::{Clock, Rcc};

const I2C1_BASE: usize = 0x4000_5400;

// PB8 SCL, PB9 SDA
const SCL_PIN: usize = 8;
const SDA_PIN: usize = 9;
const I2C1_AF: u32 = 6;

register_structs! {
    I2cRegisters {
        (0x00 => cr1: ReadWrite<u32, CR1::Register>),
        (0x04 => cr2: ReadWrite<u32, CR2::Register>),
        (0x08 => _reserved0),
        (0x10 => timingr: ReadWrite<u32, TIMINGR::Register>),
        (0x14 => _reserved1),
        (0x18 => isr: ReadWrite<u32, ISR::Register>),
        (0x1c => icr: WriteOnly<u32, ICR::Register>),
        (0x20 => _reserved2),
        (0x24 => rxdr: ReadOnly<u32, RXDR::Register>),
        (0x28 => txdr: ReadWrite<u32, TXDR::Register>),
        (0x2c => @END),
    }
}

/// I2C1 master in polling mode
pub struct I2c1 {
    registers: &'static I2cRegisters,
}

impl I2c1 {
    /// # Safety
    ///
    /// Only one handle may drive the controller, the transport relies on
    /// being the sole owner of the bus.
    pub unsafe fn steal() -> Self {
        I2c1 {
            registers: &*(I2C1_BASE as *const I2cRegisters),
        }
    }
}

impl BusController for I2c1 {
    fn status(&self) -> LocalRegisterCopy<u32, ISR::Register> {
        self.registers.isr.extract()
    }

    fn control(&mut self, value: FieldValue<u32, CR2::Register>) {
        self.registers.cr2.write(value);
    }

    fn request_stop(&mut self) {
        self.registers.cr2.modify(CR2::STOP::SET);
    }

    fn clear_flags(&mut self, flags: FieldValue<u32, ICR::Register>) {
        self.registers.icr.write(flags);
    }

    fn write_data(&mut self, byte: u8) {
        self.registers.txdr.write(TXDR::TXDATA.val(u32::from(byte)));
    }

    fn read_data(&mut self) -> u8 {
        self.registers.rxdr.read(RXDR::RXDATA) as u8
    }
}

/// Clocks, pins and 100 kHz timing for I2C1, kernel clock is HSI16.
pub fn init_i2c_driver(rcc: &Rcc) -> I2c1 {
    rcc.enable(Clock::GpioB);
    rcc.enable(Clock::I2c1);

    // Safety: PB8/PB9 belong to I2C1 on this board
    let gpiob = unsafe { Port::gpiob() };
    for pin in [SCL_PIN, SDA_PIN] {
        gpiob.alternate(pin, I2C1_AF, OutputType::OpenDrain, Pull::Up);
    }

    // Safety: called once during startup
    let driver = unsafe { I2c1::steal() };
    let r = driver.registers;
    r.cr1.modify(CR1::PE::CLEAR);
    // RM0444 reference values for standard mode at 16 MHz
    r.timingr.write(
        TIMINGR::PRESC.val(3)
            + TIMINGR::SCLDEL.val(4)
            + TIMINGR::SDADEL.val(2)
            + TIMINGR::SCLH.val(0x0f)
            + TIMINGR::SCLL.val(0x13),
    );
    r.cr1.modify(CR1::PE::SET);
    driver
}
