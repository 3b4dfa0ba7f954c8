// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Fixed point compensation from the BMP180 datasheet, section 3.5.
//!
//! Signed intermediates are carried in `i64` so extreme raw values cannot
//! wrap, `>>` is an arithmetic (flooring) shift and every signed division
//! floors. B4 and B7 stay unsigned 32-bit words exactly as the vendor
//! defines them, so the 0x80000000 test is an unsigned comparison.

use crate::calibration::CalibrationConstants;
use crate::error::ArithmeticError;
use crate::registers::SamplingMode;

/// Sea level pressure in Pa of the standard atmosphere
pub const STANDARD_SEA_LEVEL_PA: f64 = 101325.0;

/// Division rounding toward negative infinity. `b` must not be zero.
pub fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Assembles the MSB, LSB and XLSB bytes into the raw pressure word
pub fn raw_pressure(bytes: [u8; 3], mode: SamplingMode) -> u32 {
    let word = (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
    word >> mode.pressure_shift()
}

/// B5, shared by the temperature and the pressure path
pub fn compute_b5(
    cal: &CalibrationConstants,
    raw_temperature: u16,
) -> Result<i32, ArithmeticError> {
    let x1 = ((i64::from(raw_temperature) - i64::from(cal.ac6)) * i64::from(cal.ac5)) >> 15;
    let divisor = x1 + i64::from(cal.md);
    if divisor == 0 {
        return Err(ArithmeticError::TemperatureDivisor);
    }
    let x2 = floor_div(i64::from(cal.mc) << 11, divisor);
    Ok((x1 + x2) as i32)
}

/// Temperature in degrees Celsius from B5
pub fn temperature(b5: i32) -> f32 {
    ((b5 + 8) >> 4) as f32 / 10.0
}

/// Pressure in Pa from B5 and a raw pressure word read in `mode`
pub fn pressure(
    cal: &CalibrationConstants,
    mode: SamplingMode,
    b5: i32,
    raw_pressure: u32,
) -> Result<i32, ArithmeticError> {
    let oss = u32::from(mode.oversampling());
    let ac1 = i64::from(cal.ac1);
    let ac2 = i64::from(cal.ac2);
    let ac3 = i64::from(cal.ac3);
    let b1 = i64::from(cal.b1);
    let b2 = i64::from(cal.b2);

    let b6 = i64::from(b5) - 4000;
    let b6_sq = (b6 * b6) >> 12;

    let x1 = (b2 * b6_sq) >> 11;
    let x2 = (ac2 * b6) >> 11;
    let x3 = x1 + x2;
    let b3 = floor_div(((ac1 * 4 + x3) << oss) + 2, 4);

    let x1 = (ac3 * b6) >> 13;
    let x2 = (b1 * b6_sq) >> 16;
    let x3 = ((x1 + x2) + 2) >> 2;
    let b4 = u32::from(cal.ac4).wrapping_mul((x3 + 32768) as u32) >> 15;
    if b4 == 0 {
        return Err(ArithmeticError::PressureDivisor);
    }

    let b7 = raw_pressure
        .wrapping_sub(b3 as u32)
        .wrapping_mul(50000u32 >> oss);
    let p = if b7 < 0x8000_0000 {
        (b7 * 2) / b4
    } else {
        (b7 / b4).wrapping_mul(2)
    };
    // p is a signed 32-bit long in the vendor formula
    let p = i64::from(p as i32);

    let x1 = (p >> 8) * (p >> 8);
    let x1 = (x1 * 3038) >> 16;
    let x2 = (-7357 * p) >> 16;
    Ok((p + ((x1 + x2 + 3791) >> 4)) as i32)
}

/// Altitude in meters for `pressure` Pa given the sea level pressure
pub fn altitude(pressure: f64, sea_level_pa: f64) -> f64 {
    44330.0 * (1.0 - (pressure / sea_level_pa).powf(1.0 / 5.255))
}

/// Sea level equivalent of `pressure` Pa measured at `altitude_m`
pub fn sea_level_pressure(pressure: f64, altitude_m: f64) -> f64 {
    pressure / (1.0 - altitude_m / 44330.0).powf(5.255)
}
