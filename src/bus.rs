// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Register level access to the sensor and blocking waits.

use i2cdev::core::I2CDevice;
use log::trace;
use std::error::Error;
use std::{thread, time};

///
/// Register transactions against the sensor.
///
/// Each call is one uninterruptible unit on the bus: the register
/// address is written and the data phase follows before anything
/// else may use the device.
///
pub trait RegisterBus {
    type Error: Error;

    /// Writes `payload` starting at `register`
    fn write_register(&mut self, register: u8, payload: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buffer` with the bytes starting at `register`
    fn read_register(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Single byte register
    fn read_u8(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.read_register(register, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Big-endian unsigned word
    fn read_u16_be(&mut self, register: u8) -> Result<u16, Self::Error> {
        let mut buffer = [0u8; 2];
        self.read_register(register, &mut buffer)?;
        Ok(u16::from_be_bytes(buffer))
    }

    /// Big-endian two's complement word
    fn read_i16_be(&mut self, register: u8) -> Result<i16, Self::Error> {
        let mut buffer = [0u8; 2];
        self.read_register(register, &mut buffer)?;
        Ok(i16::from_be_bytes(buffer))
    }
}

/// RegisterBus over an i2cdev device, e.g. `LinuxI2CDevice`
pub struct I2cBus<T> {
    pub i2cdev: T,
}

impl<T: I2CDevice> I2cBus<T> {
    pub fn new(i2cdev: T) -> Self {
        I2cBus { i2cdev }
    }

    /// Gives the wrapped device back
    pub fn into_inner(self) -> T {
        self.i2cdev
    }
}

impl<T: I2CDevice> RegisterBus for I2cBus<T> {
    type Error = T::Error;

    fn write_register(&mut self, register: u8, payload: &[u8]) -> Result<(), T::Error> {
        let mut buffer = Vec::with_capacity(payload.len() + 1);
        buffer.push(register);
        buffer.extend_from_slice(payload);
        trace!("write {:#04x} <= {:02x?}", register, payload);
        self.i2cdev.write(&buffer)
    }

    fn read_register(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), T::Error> {
        self.i2cdev.write(&[register])?;
        self.i2cdev.read(buffer)?;
        trace!("read {:#04x} => {:02x?}", register, buffer);
        Ok(())
    }
}

/// Blocking wait between a conversion command and its result
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Sleeps the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(time::Duration::from_millis(u64::from(ms)));
    }
}
