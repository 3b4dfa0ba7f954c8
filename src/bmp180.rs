// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bus::{Delay, I2cBus, RegisterBus, ThreadDelay};
use crate::calibration::CalibrationConstants;
use crate::compensation::{self, STANDARD_SEA_LEVEL_PA};
use crate::error::Bmp180Error;
use crate::registers::{self, SamplingMode};
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::{debug, trace};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where and how to open the sensor on Linux
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// I2C character device, `/dev/i2c-1` by default
    pub bus_path: PathBuf,
    /// 7-bit device address, 0x77 by default
    pub address: u16,
    pub mode: SamplingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus_path: PathBuf::from("/dev/i2c-1"),
            address: registers::DEFAULT_ADDRESS,
            mode: SamplingMode::default(),
        }
    }
}

/// Temperature and pressure taken from one pair of raw readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Degrees Celsius
    pub temperature: f32,
    /// Pascals
    pub pressure: i32,
}

struct Device<B, D> {
    bus: B,
    delay: D,
}

/// BMP180 Struct, owns the bus device and the calibration
/// read from it, and implements the measurement operations.
///
/// Every public read takes the device lock for its whole
/// command, wait and read sequence, so a `Bmp180` shared
/// between threads never interleaves two conversions.
///
pub struct Bmp180<B, D = ThreadDelay> {
    device: Mutex<Device<B, D>>,
    calibration: CalibrationConstants,
    mode: SamplingMode,
}

type Result<T, B> = std::result::Result<T, Bmp180Error<<B as RegisterBus>::Error>>;

impl Bmp180<I2cBus<LinuxI2CDevice>> {
    /// Opens the Linux I2C device described by `config` and
    /// loads the calibration.
    /// If fails, returns the LinuxI2CError wrapped as a bus error,
    /// or a calibration error.
    ///
    pub fn open(config: &Config) -> std::result::Result<Self, Bmp180Error<LinuxI2CError>> {
        debug!(
            "Opening BMP180 at {:#04x} on {}",
            config.address,
            config.bus_path.display()
        );
        let device = LinuxI2CDevice::new(&config.bus_path, config.address)
            .map_err(Bmp180Error::Bus)?;
        Bmp180::new(I2cBus::new(device), config.mode)
    }
}

impl<B: RegisterBus> Bmp180<B, ThreadDelay> {
    /// Create a new BMP180 Struct over `bus`, sleeping the
    /// calling thread for conversion waits
    ///
    pub fn new(bus: B, mode: SamplingMode) -> Result<Self, B> {
        Bmp180::with_delay(bus, mode, ThreadDelay)
    }
}

impl<B: RegisterBus, D: Delay> Bmp180<B, D> {
    /// Create a new BMP180 Struct with a custom wait implementation.
    ///
    /// Reads the calibration block before returning; the driver is
    /// never handed out with partial calibration.
    ///
    pub fn with_delay(mut bus: B, mode: SamplingMode, delay: D) -> Result<Self, B> {
        let calibration = CalibrationConstants::load(&mut bus)?;
        debug!("BMP180 ready in {:?} mode", mode);
        Ok(Bmp180 {
            device: Mutex::new(Device { bus, delay }),
            calibration,
            mode,
        })
    }

    pub fn calibration(&self) -> &CalibrationConstants {
        &self.calibration
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Gives the bus back
    pub fn release(self) -> B {
        self.device
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .bus
    }

    // Nothing under the lock outlives a transaction, so a panic
    // in another caller leaves nothing to repair.
    fn lock(&self) -> MutexGuard<'_, Device<B, D>> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn raw_temperature(device: &mut Device<B, D>) -> Result<u16, B> {
        device
            .bus
            .write_register(registers::CONTROL, &[registers::CMD_READ_TEMPERATURE])
            .map_err(Bmp180Error::Bus)?;
        device.delay.delay_ms(registers::TEMPERATURE_WAIT_MS);
        let raw = device
            .bus
            .read_u16_be(registers::DATA)
            .map_err(Bmp180Error::Bus)?;
        trace!("Raw temperature {}", raw);
        Ok(raw)
    }

    fn raw_pressure(&self, device: &mut Device<B, D>) -> Result<u32, B> {
        device
            .bus
            .write_register(registers::CONTROL, &[self.mode.pressure_command()])
            .map_err(Bmp180Error::Bus)?;
        device.delay.delay_ms(self.mode.settle_time_ms());
        let mut data_buffer = [0u8; 3];
        device
            .bus
            .read_register(registers::DATA, &mut data_buffer)
            .map_err(Bmp180Error::Bus)?;
        let raw = compensation::raw_pressure(data_buffer, self.mode);
        trace!("Raw pressure {}", raw);
        Ok(raw)
    }

    /// Starts a temperature conversion, waits 5 ms and
    /// returns the uncompensated 16-bit reading.
    ///
    pub fn read_raw_temperature(&self) -> Result<u16, B> {
        let mut device = self.lock();
        Self::raw_temperature(&mut device)
    }

    /// Starts a pressure conversion at the configured
    /// oversampling, waits its settle time and returns the
    /// uncompensated reading (up to 19 bits).
    ///
    pub fn read_raw_pressure(&self) -> Result<u32, B> {
        let mut device = self.lock();
        self.raw_pressure(&mut device)
    }

    /// Compensated temperature in degrees Celsius.
    /// Always takes a fresh raw reading.
    ///
    pub fn read_temperature(&self) -> Result<f32, B> {
        let raw = {
            let mut device = self.lock();
            Self::raw_temperature(&mut device)?
        };
        let b5 = compensation::compute_b5(&self.calibration, raw)?;
        Ok(compensation::temperature(b5))
    }

    /// Temperature and pressure from one raw temperature reading
    /// followed by one raw pressure reading.
    ///
    pub fn measure(&self) -> Result<Measurement, B> {
        let (raw_temperature, raw_pressure) = {
            let mut device = self.lock();
            let ut = Self::raw_temperature(&mut device)?;
            let up = self.raw_pressure(&mut device)?;
            (ut, up)
        };
        let b5 = compensation::compute_b5(&self.calibration, raw_temperature)?;
        let pressure = compensation::pressure(&self.calibration, self.mode, b5, raw_pressure)?;
        Ok(Measurement {
            temperature: compensation::temperature(b5),
            pressure,
        })
    }

    /// Compensated pressure in Pa.
    /// Temperature is sampled first, B5 feeds the pressure formula.
    ///
    pub fn read_pressure(&self) -> Result<i32, B> {
        Ok(self.measure()?.pressure)
    }

    /// Altitude in meters relative to `sea_level_pa`
    pub fn read_altitude(&self, sea_level_pa: f64) -> Result<f64, B> {
        let pressure = f64::from(self.read_pressure()?);
        Ok(compensation::altitude(pressure, sea_level_pa))
    }

    /// Altitude in meters relative to the standard 101325 Pa
    pub fn read_altitude_default(&self) -> Result<f64, B> {
        self.read_altitude(STANDARD_SEA_LEVEL_PA)
    }

    /// Sea level pressure in Pa, given the altitude in meters
    /// the sensor sits at
    ///
    pub fn read_sea_level_pressure(&self, altitude_m: f64) -> Result<f64, B> {
        let pressure = f64::from(self.read_pressure()?);
        Ok(compensation::sea_level_pressure(pressure, altitude_m))
    }

    /// Sea level pressure in Pa with the sensor at 0 m
    pub fn read_sea_level_pressure_default(&self) -> Result<f64, B> {
        self.read_sea_level_pressure(0.0)
    }
}
