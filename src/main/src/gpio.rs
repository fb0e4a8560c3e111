use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::register_structs;

const GPIOA_BASE: usize = 0x5000_0000;
const GPIOB_BASE: usize = 0x5000_0400;

register_structs! {
    GpioRegisters {
        (0x00 => moder: ReadWrite<u32>),
        (0x04 => otyper: ReadWrite<u32>),
        (0x08 => _reserved0),
        (0x0c => pupdr: ReadWrite<u32>),
        (0x10 => _reserved1),
        (0x20 => afrl: ReadWrite<u32>),
        (0x24 => afrh: ReadWrite<u32>),
        (0x28 => @END),
    }
}

const MODE_ALTERNATE: u32 = 0b10;
const PULL_NONE: u32 = 0b00;
const PULL_UP: u32 = 0b01;

#[derive(Clone, Copy, Debug)]
pub enum OutputType {
    PushPull,
    OpenDrain,
}

#[derive(Clone, Copy, Debug)]
pub enum Pull {
    None,
    Up,
}

pub struct Port {
    registers: &'static GpioRegisters,
}

/// Replace `width` bits at `offset` with `value`
fn update(register: &ReadWrite<u32>, offset: usize, width: usize, value: u32) {
    let mask = ((1 << width) - 1) << offset;
    register.set((register.get() & !mask) | ((value << offset) & mask));
}

impl Port {
    /// # Safety
    ///
    /// Pins touched through this handle must not be driven elsewhere.
    pub unsafe fn gpioa() -> Self {
        Port {
            registers: &*(GPIOA_BASE as *const GpioRegisters),
        }
    }

    /// # Safety
    ///
    /// Pins touched through this handle must not be driven elsewhere.
    pub unsafe fn gpiob() -> Self {
        Port {
            registers: &*(GPIOB_BASE as *const GpioRegisters),
        }
    }

    /// Hand `pin` to a peripheral on alternate function `af`.
    pub fn alternate(&self, pin: usize, af: u32, output: OutputType, pull: Pull) {
        let r = self.registers;
        update(&r.moder, pin * 2, 2, MODE_ALTERNATE);
        let open_drain = match output {
            OutputType::PushPull => 0,
            OutputType::OpenDrain => 1,
        };
        update(&r.otyper, pin, 1, open_drain);
        let pull = match pull {
            Pull::None => PULL_NONE,
            Pull::Up => PULL_UP,
        };
        update(&r.pupdr, pin * 2, 2, pull);
        if pin < 8 {
            update(&r.afrl, pin * 4, 4, af);
        } else {
            update(&r.afrh, (pin - 8) * 4, 4, af);
        }
    }
}
