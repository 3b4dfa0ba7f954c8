#![allow(dead_code)]

use bmp180_i2c::{Bmp180, Bmp180Error, Delay, RegisterBus, SamplingMode};
use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::thread;

/// Calibration block of the datasheet worked example, AC1 first
pub const DATASHEET_WORDS: [u16; 11] = [
    408, 0xFFB8, 0xC7D1, 32741, 32757, 23153, 6190, 4, 0x8001, 0xDDF9, 2868,
];
pub const DATASHEET_UT: u16 = 27898;
pub const DATASHEET_UP: u32 = 23843;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write(u8, Vec<u8>),
    Read(u8, usize),
    Delay(u32),
}

pub type Log = Arc<Mutex<Vec<Event>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &Log) -> Vec<Event> {
    log.lock().unwrap().clone()
}

pub fn clear(log: &Log) {
    log.lock().unwrap().clear();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault(pub u8);

impl fmt::Display for BusFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NACK on register {:#04x}", self.0)
    }
}

impl Error for BusFault {}

/// Bytes the sensor puts at 0xF6 for a raw pressure word in `mode`
pub fn pressure_bytes(up: u32, mode: SamplingMode) -> [u8; 3] {
    let word = (up << mode.pressure_shift()).to_be_bytes();
    [word[1], word[2], word[3]]
}

/// Register map that answers conversion commands with fixed results
pub struct MockBus {
    pub registers: [u8; 256],
    pub raw_temperature: u16,
    pub pressure_data: [u8; 3],
    pub fail_on: Option<u8>,
    log: Log,
}

impl MockBus {
    pub fn new(log: Log) -> Self {
        MockBus {
            registers: [0u8; 256],
            raw_temperature: 0,
            pressure_data: [0u8; 3],
            fail_on: None,
            log,
        }
    }

    /// Datasheet calibration and raw readings for `mode`
    pub fn datasheet(log: Log, mode: SamplingMode) -> Self {
        let mut bus = MockBus::new(log);
        bus.set_calibration(DATASHEET_WORDS);
        bus.raw_temperature = DATASHEET_UT;
        bus.pressure_data = pressure_bytes(DATASHEET_UP, mode);
        bus
    }

    pub fn set_calibration(&mut self, words: [u16; 11]) {
        for (i, word) in words.iter().enumerate() {
            let offset = 0xAA + 2 * i;
            self.registers[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
        }
    }

    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl RegisterBus for MockBus {
    type Error = BusFault;

    fn write_register(&mut self, register: u8, payload: &[u8]) -> Result<(), BusFault> {
        if self.fail_on == Some(register) {
            return Err(BusFault(register));
        }
        self.record(Event::Write(register, payload.to_vec()));
        thread::yield_now();

        let offset = register as usize;
        self.registers[offset..offset + payload.len()].copy_from_slice(payload);
        if register == 0xF4 {
            match payload[0] {
                0x2E => {
                    let bytes = self.raw_temperature.to_be_bytes();
                    self.registers[0xF6..0xF8].copy_from_slice(&bytes);
                }
                cmd if cmd & 0x3F == 0x34 => {
                    let bytes = self.pressure_data;
                    self.registers[0xF6..0xF9].copy_from_slice(&bytes);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn read_register(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), BusFault> {
        if self.fail_on == Some(register) {
            return Err(BusFault(register));
        }
        self.record(Event::Read(register, buffer.len()));
        thread::yield_now();

        let offset = register as usize;
        buffer.copy_from_slice(&self.registers[offset..offset + buffer.len()]);
        Ok(())
    }
}

/// Records waits instead of sleeping
pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: Log) -> Self {
        RecordingDelay { log }
    }
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.lock().unwrap().push(Event::Delay(ms));
        thread::yield_now();
    }
}

pub type MockDriver = Bmp180<MockBus, RecordingDelay>;

/// Driver over `bus` whose waits land in `log`
pub fn attach(
    bus: MockBus,
    mode: SamplingMode,
    log: &Log,
) -> Result<MockDriver, Bmp180Error<BusFault>> {
    Bmp180::with_delay(bus, mode, RecordingDelay::new(log.clone()))
}
