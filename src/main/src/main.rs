#![no_std]
#![no_main]

extern crate alloc;

use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use embedded_alloc::Heap;
use log::*;
use panic_halt as _;

use sensor::{Ads1115, Analyzer, Supervisor, Transport};

mod config;
mod gpio;
mod i2c;
mod logger;
mod measurement;
mod rcc;
mod serial;

use config::Config;
use rcc::Rcc;

#[global_allocator]
static HEAP: Heap = Heap::empty();

// Only anyhow errors allocate
const HEAP_SIZE: usize = 1024;

// HSI16 after reset, no PLL
const CORE_CLOCK_HZ: u32 = 16_000_000;
const BAUDRATE: u32 = 9600;

#[entry]
fn main() -> ! {
    {
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        unsafe { HEAP.init(addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
    }

    let core = cortex_m::Peripherals::take().unwrap();
    // Safety: taken once, here
    let rcc = unsafe { Rcc::steal() };

    let mut serial = serial::init_serial(&rcc, BAUDRATE, CORE_CLOCK_HZ);
    let config = Config::read();
    logger::init(config.log_level);

    serial.send_text("Oxygen Analyzer\r\n");

    let i2c = i2c::init_i2c_driver(&rcc);
    let adc = Ads1115::new(config.adc, Supervisor::new(config.bus_poll_budget));
    let mut analyzer = Analyzer::new(Transport::new(i2c), adc, config.calibration);

    // The device keeps its power-on defaults if this fails, sensing goes on
    if let Err(err) = analyzer.configure() {
        warn!("ADS1115 configuration incomplete: {}", err);
    }

    let mut delay = Delay::new(core.SYST, CORE_CLOCK_HZ);
    info!("Sensing every {} ms", config.sense_interval_ms);

    loop {
        measurement::sense_and_report(&mut analyzer, &config, &mut serial);
        delay.delay_ms(config.sense_interval_ms);
    }
}
