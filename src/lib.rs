// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! BMP180 barometric pressure and temperature sensor over I2C
//!
//! Compensation taken from the [BMP180 datasheet](https://cdn-shop.adafruit.com/datasheets/BST-BMP180-DS000-09.pdf),
//! section 3.5 (temperature and pressure) and 3.6 (altitude).
//!
//! The factory calibration is read once when the driver is created.
//! Every measurement afterwards issues a fresh conversion command, waits
//! the conversion time for the configured [`SamplingMode`] and runs the
//! fixed point formulas on the result.
//!
//! ## Basic Example
//!
//! Obtaining temperature, pressure and altitude
//!
//!```no_run
//!use bmp180_i2c::{Bmp180, Config, SamplingMode};
//!use std::thread;
//!use std::time::Duration;
//!
//!fn main() {
//!    let config = Config {
//!        mode: SamplingMode::HighRes,
//!        ..Config::default()
//!    };
//!    let bmp = Bmp180::open(&config).unwrap();
//!
//!    loop {
//!        match bmp.measure() {
//!            Ok(m) => {
//!                println!("Temp: {} C Pressure: {} Pa", m.temperature, m.pressure);
//!                println!("Altitude: {:.1} m", bmp.read_altitude_default().unwrap());
//!                thread::sleep(Duration::from_secs(2));
//!            }
//!            Err(e) => {
//!                println!("Error obtaining measurements. More details: {}", e);
//!                thread::sleep(Duration::from_secs(10));
//!            }
//!        }
//!    }
//!}
//!```
//!

/// Driver struct implementing BMP180 measurements
pub mod bmp180;
pub mod bus;
pub mod calibration;
pub mod compensation;
pub mod error;
pub mod registers;

pub use bmp180::{Bmp180, Config, Measurement};
pub use bus::{Delay, I2cBus, RegisterBus, ThreadDelay};
pub use calibration::CalibrationConstants;
pub use error::{ArithmeticError, Bmp180Error};
pub use registers::SamplingMode;
