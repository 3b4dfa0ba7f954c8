// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! BMP180 register map, command bytes and conversion timings.

use std::fmt;

/// Default 7-bit device address
pub const DEFAULT_ADDRESS: u16 = 0x77;

/// First calibration register (AC1), eleven big-endian words follow up to 0xBE
pub const CAL_AC1: u8 = 0xAA;
pub const CAL_AC2: u8 = 0xAC;
pub const CAL_AC3: u8 = 0xAE;
pub const CAL_AC4: u8 = 0xB0;
pub const CAL_AC5: u8 = 0xB2;
pub const CAL_AC6: u8 = 0xB4;
pub const CAL_B1: u8 = 0xB6;
pub const CAL_B2: u8 = 0xB8;
pub const CAL_MB: u8 = 0xBA;
pub const CAL_MC: u8 = 0xBC;
pub const CAL_MD: u8 = 0xBE;

/// Calibration registers in load order
pub const CALIBRATION_REGISTERS: [u8; 11] = [
    CAL_AC1, CAL_AC2, CAL_AC3, CAL_AC4, CAL_AC5, CAL_AC6, CAL_B1, CAL_B2, CAL_MB, CAL_MC, CAL_MD,
];

/// Control register, conversion commands are written here
pub const CONTROL: u8 = 0xF4;
/// Conversion result, 2 bytes for temperature and 3 bytes for pressure
pub const DATA: u8 = 0xF6;

/// Start a temperature conversion
pub const CMD_READ_TEMPERATURE: u8 = 0x2E;
/// Start a pressure conversion, oversampling goes in bits 6..7
pub const CMD_READ_PRESSURE: u8 = 0x34;

/// Temperature conversion time, the same for every mode
pub const TEMPERATURE_WAIT_MS: u32 = 5;

/// Pressure oversampling setting.
///
/// Higher modes take longer to convert and deliver extra resolution bits
/// in the XLSB byte of the pressure result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplingMode {
    UltraLowPower,
    #[default]
    Standard,
    HighRes,
    UltraHighRes,
}

/// Oversampling value and pressure settle time (ms) per mode
const MODE_TABLE: [(SamplingMode, u8, u32); 4] = [
    (SamplingMode::UltraLowPower, 0, 5),
    (SamplingMode::Standard, 1, 8),
    (SamplingMode::HighRes, 2, 14),
    (SamplingMode::UltraHighRes, 3, 26),
];

impl SamplingMode {
    /// All modes, lowest oversampling first
    pub const ALL: [SamplingMode; 4] = [
        SamplingMode::UltraLowPower,
        SamplingMode::Standard,
        SamplingMode::HighRes,
        SamplingMode::UltraHighRes,
    ];

    fn entry(self) -> (SamplingMode, u8, u32) {
        MODE_TABLE[self as usize]
    }

    /// Oversampling setting `oss` as used by the datasheet formulas (0..=3)
    pub fn oversampling(self) -> u8 {
        self.entry().1
    }

    /// Command byte that starts a pressure conversion in this mode
    pub fn pressure_command(self) -> u8 {
        CMD_READ_PRESSURE + (self.oversampling() << 6)
    }

    /// Time to wait after triggering a pressure conversion
    pub fn settle_time_ms(self) -> u32 {
        self.entry().2
    }

    /// Right shift applied to the 24-bit pressure result.
    ///
    /// UltraLowPower drops the XLSB byte entirely.
    pub fn pressure_shift(self) -> u8 {
        8 - self.oversampling()
    }
}

/// Oversampling value outside 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSamplingMode(pub u8);

impl fmt::Display for InvalidSamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid oversampling setting {}, expected 0..=3", self.0)
    }
}

impl std::error::Error for InvalidSamplingMode {}

impl TryFrom<u8> for SamplingMode {
    type Error = InvalidSamplingMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SamplingMode::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidSamplingMode(value))
    }
}
