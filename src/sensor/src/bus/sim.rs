//! Simulated I2C controller with an ADS1115 behind it.
//!
//! Models the STM32 software-end-mode flag sequence closely enough to drive
//! the transport: TXIS after a write start and after each acknowledged byte,
//! RXNE while receive data is pending, TC once NBYTES are done, NACKF when the
//! device rejects, STOPF after a stop request.

use core::cell::Cell;

use heapless::Vec;
use tock_registers::fields::FieldValue;
use tock_registers::LocalRegisterCopy;

use super::BusController;
use crate::registers::{CR2, ICR, ISR};

const CONVERSION: usize = 0;
const CONFIG: usize = 1;

pub struct SimulatedBus {
    isr: LocalRegisterCopy<u32, ISR::Register>,
    pub last_control: LocalRegisterCopy<u32, CR2::Register>,
    pub starts: usize,
    pub stops: usize,
    pub polls: Cell<u32>,
    /// Every byte written to TXDR, across transactions
    pub written: Vec<u8, 64>,

    // Device side
    pub registers: [u16; 4],
    pointer: usize,
    pending_conversion_reads: u32,
    conversion_reads: u32,

    // Transfer in progress
    reading: bool,
    remaining: u32,
    frame: Vec<u8, 4>,
    rx: [u8; 2],
    rx_index: usize,

    // Scripted faults
    absent: bool,
    nack_byte: Option<usize>,
    nack_read_address: bool,
    stall_after_received: Option<usize>,
    stall: bool,
    stuck_busy: bool,
}

impl SimulatedBus {
    pub fn new() -> Self {
        SimulatedBus {
            isr: LocalRegisterCopy::new(0),
            last_control: LocalRegisterCopy::new(0),
            starts: 0,
            stops: 0,
            polls: Cell::new(0),
            written: Vec::new(),
            // Power-on default of the config register
            registers: [0x0000, 0x8583, 0x8000, 0x7fff],
            pointer: CONVERSION,
            pending_conversion_reads: 0,
            conversion_reads: 0,
            reading: false,
            remaining: 0,
            frame: Vec::new(),
            rx: [0; 2],
            rx_index: 0,
            absent: false,
            nack_byte: None,
            nack_read_address: false,
            stall_after_received: None,
            stall: false,
            stuck_busy: false,
        }
    }

    pub fn with_conversion(mut self, sample: i16) -> Self {
        self.registers[CONVERSION] = sample as u16;
        self
    }

    /// Address phase is never acknowledged
    pub fn absent(mut self) -> Self {
        self.absent = true;
        self
    }

    /// NACK the data byte at `index` of the next write transaction, once
    pub fn nack_byte(mut self, index: usize) -> Self {
        self.nack_byte = Some(index);
        self
    }

    /// NACK the address of the next read transaction, once
    pub fn nack_read_address(mut self) -> Self {
        self.nack_read_address = true;
        self
    }

    /// Read transactions go silent once `count` bytes were received
    pub fn stall_after_received(mut self, count: usize) -> Self {
        self.stall_after_received = Some(count);
        self
    }

    /// Controller never raises a phase flag after start
    pub fn stall(mut self) -> Self {
        self.stall = true;
        self
    }

    pub fn stuck_busy(mut self) -> Self {
        self.stuck_busy = true;
        self
    }

    /// Config register reads report a conversion in progress `reads` times
    pub fn converting_for(mut self, reads: u32) -> Self {
        self.conversion_reads = reads;
        self
    }

    pub fn set_stall(&mut self, stall: bool) {
        self.stall = stall;
    }

    fn config_word(&mut self) -> u16 {
        let word = self.registers[CONFIG] & 0x7fff;
        if self.pending_conversion_reads > 0 {
            self.pending_conversion_reads -= 1;
            word
        } else {
            word | 0x8000
        }
    }

    fn complete_write(&mut self) {
        if let Some(pointer) = self.frame.first() {
            self.pointer = usize::from(*pointer & 0x03);
        }
        if self.frame.len() == 3 {
            let word = u16::from_be_bytes([self.frame[1], self.frame[2]]);
            self.registers[self.pointer] = word & 0x7fff;
            if word & 0x8000 != 0 {
                self.pending_conversion_reads = self.conversion_reads;
            }
        }
    }
}

impl BusController for SimulatedBus {
    fn status(&self) -> LocalRegisterCopy<u32, ISR::Register> {
        self.polls.set(self.polls.get() + 1);
        let mut isr = self.isr;
        if self.stuck_busy {
            isr.modify(ISR::BUSY::SET);
        }
        isr
    }

    fn control(&mut self, value: FieldValue<u32, CR2::Register>) {
        let mut cr2 = LocalRegisterCopy::new(0);
        cr2.write(value);
        self.last_control = cr2;
        if !cr2.is_set(CR2::START) {
            return;
        }

        // A repeated start ends the write frame that preceded it
        if !self.reading && !self.frame.is_empty() {
            self.complete_write();
        }
        self.starts += 1;
        self.isr
            .modify(ISR::BUSY::SET + ISR::TC::CLEAR + ISR::TXIS::CLEAR + ISR::RXNE::CLEAR);
        self.reading = cr2.is_set(CR2::RD_WRN);
        self.remaining = cr2.read(CR2::NBYTES);
        self.frame.clear();
        self.rx_index = 0;

        if self.absent {
            self.isr.modify(ISR::NACKF::SET);
            return;
        }
        if self.stall {
            return;
        }
        if self.reading && self.nack_read_address {
            self.nack_read_address = false;
            self.isr.modify(ISR::NACKF::SET);
            return;
        }
        if self.reading {
            let word = if self.pointer == CONFIG {
                self.config_word()
            } else {
                self.registers[self.pointer]
            };
            self.rx = word.to_be_bytes();
            if self.stall_after_received != Some(0) {
                self.isr.modify(ISR::RXNE::SET);
            }
        } else {
            self.isr.modify(ISR::TXIS::SET);
        }
    }

    fn request_stop(&mut self) {
        self.stops += 1;
        if !self.reading && !self.frame.is_empty() && !self.isr.is_set(ISR::NACKF) {
            self.complete_write();
        }
        self.frame.clear();
        self.isr.modify(
            ISR::BUSY::CLEAR
                + ISR::TXIS::CLEAR
                + ISR::RXNE::CLEAR
                + ISR::TC::CLEAR
                + ISR::STOPF::SET,
        );
    }

    fn clear_flags(&mut self, flags: FieldValue<u32, ICR::Register>) {
        let mut icr = LocalRegisterCopy::<u32, ICR::Register>::new(0);
        icr.write(flags);
        if icr.is_set(ICR::NACKCF) {
            self.isr.modify(ISR::NACKF::CLEAR);
        }
        if icr.is_set(ICR::STOPCF) {
            self.isr.modify(ISR::STOPF::CLEAR);
        }
    }

    fn write_data(&mut self, byte: u8) {
        let _ = self.written.push(byte);
        let index = self.frame.len();
        let _ = self.frame.push(byte);
        self.isr.modify(ISR::TXIS::CLEAR);
        self.remaining = self.remaining.saturating_sub(1);

        if self.nack_byte == Some(index) {
            self.nack_byte = None;
            self.isr.modify(ISR::NACKF::SET);
        } else if !self.stall {
            if self.remaining > 0 {
                self.isr.modify(ISR::TXIS::SET);
            } else {
                self.isr.modify(ISR::TC::SET);
            }
        }
    }

    fn read_data(&mut self) -> u8 {
        let byte = self.rx.get(self.rx_index).copied().unwrap_or(0xff);
        self.rx_index += 1;
        self.remaining = self.remaining.saturating_sub(1);
        if self.stall_after_received == Some(self.rx_index) {
            self.isr.modify(ISR::RXNE::CLEAR);
        } else if self.remaining == 0 {
            self.isr.modify(ISR::RXNE::CLEAR + ISR::TC::SET);
        }
        byte
    }
}
