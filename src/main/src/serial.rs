use core::fmt;

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::gpio::{OutputType, Port, Pull};
use crate::rcc::{Clock, Rcc};

const USART2_BASE: usize = 0x4000_4400;

// PA2 TX, PA3 RX
const TX_PIN: usize = 2;
const RX_PIN: usize = 3;
const USART2_AF: u32 = 1;

register_structs! {
    UsartRegisters {
        (0x00 => cr1: ReadWrite<u32, CR1::Register>),
        (0x04 => _reserved0),
        (0x0c => brr: ReadWrite<u32, BRR::Register>),
        (0x10 => _reserved1),
        (0x1c => isr: ReadOnly<u32, ISR::Register>),
        (0x20 => _reserved2),
        (0x28 => tdr: ReadWrite<u32, TDR::Register>),
        (0x2c => @END),
    }
}

register_bitfields![u32,
    CR1 [
        UE OFFSET(0) NUMBITS(1) [],
        RE OFFSET(2) NUMBITS(1) [],
        TE OFFSET(3) NUMBITS(1) []
    ],
    BRR [
        BRR OFFSET(0) NUMBITS(16) []
    ],
    ISR [
        TC OFFSET(6) NUMBITS(1) [],
        /// Transmit data register empty (TXFNF with the FIFO enabled)
        TXE OFFSET(7) NUMBITS(1) []
    ],
    TDR [
        TDR OFFSET(0) NUMBITS(9) []
    ]
];

/// Blocking transmit on USART2
pub struct Serial {
    registers: &'static UsartRegisters,
}

impl Serial {
    /// # Safety
    ///
    /// Writers must not interleave. The firmware is single threaded and every
    /// write finishes before the next one starts.
    pub unsafe fn steal() -> Self {
        Serial {
            registers: &*(USART2_BASE as *const UsartRegisters),
        }
    }

    pub fn send_byte(&mut self, byte: u8) {
        while !self.registers.isr.is_set(ISR::TXE) {}
        self.registers.tdr.write(TDR::TDR.val(u32::from(byte)));
    }

    pub fn send_text(&mut self, text: &str) {
        for byte in text.bytes() {
            self.send_byte(byte);
        }
    }
}

impl fmt::Write for Serial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_text(s);
        Ok(())
    }
}

pub fn init_serial(rcc: &Rcc, baudrate: u32, kernel_clock_hz: u32) -> Serial {
    rcc.enable(Clock::GpioA);
    rcc.enable(Clock::Usart2);

    // Safety: PA2/PA3 belong to USART2 on this board
    let gpioa = unsafe { Port::gpioa() };
    for pin in [TX_PIN, RX_PIN] {
        gpioa.alternate(pin, USART2_AF, OutputType::PushPull, Pull::None);
    }

    // Safety: the only long-lived handle, the logger steals its own for each line
    let serial = unsafe { Serial::steal() };
    serial
        .registers
        .brr
        .write(BRR::BRR.val(kernel_clock_hz / baudrate));
    serial
        .registers
        .cr1
        .write(CR1::TE::SET + CR1::RE::SET + CR1::UE::SET);
    serial
}
