use tock_registers::interfaces::ReadWriteable;
use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

const RCC_BASE: usize = 0x4002_1000;

register_structs! {
    RccRegisters {
        (0x00 => _reserved0),
        (0x34 => iopenr: ReadWrite<u32, IOPENR::Register>),
        (0x38 => _reserved1),
        (0x3c => apbenr1: ReadWrite<u32, APBENR1::Register>),
        (0x40 => @END),
    }
}

register_bitfields![u32,
    IOPENR [
        GPIOAEN OFFSET(0) NUMBITS(1) [],
        GPIOBEN OFFSET(1) NUMBITS(1) []
    ],
    APBENR1 [
        USART2EN OFFSET(17) NUMBITS(1) [],
        I2C1EN OFFSET(21) NUMBITS(1) []
    ]
];

#[derive(Clone, Copy, Debug)]
pub enum Clock {
    GpioA,
    GpioB,
    Usart2,
    I2c1,
}

/// Reset and clock control, only the enable bits this board uses
pub struct Rcc {
    registers: &'static RccRegisters,
}

impl Rcc {
    /// # Safety
    ///
    /// The caller must be the only owner of the RCC block.
    pub unsafe fn steal() -> Self {
        Rcc {
            registers: &*(RCC_BASE as *const RccRegisters),
        }
    }

    pub fn enable(&self, clock: Clock) {
        match clock {
            Clock::GpioA => self.registers.iopenr.modify(IOPENR::GPIOAEN::SET),
            Clock::GpioB => self.registers.iopenr.modify(IOPENR::GPIOBEN::SET),
            Clock::Usart2 => self.registers.apbenr1.modify(APBENR1::USART2EN::SET),
            Clock::I2c1 => self.registers.apbenr1.modify(APBENR1::I2C1EN::SET),
        }
    }
}
