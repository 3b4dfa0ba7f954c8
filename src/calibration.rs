// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bus::RegisterBus;
use crate::error::Bmp180Error;
use crate::registers::CALIBRATION_REGISTERS;
use log::{debug, warn};

/// Factory calibration constants from the sensor EEPROM.
///
/// Read once when the driver is created and never written afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConstants {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl CalibrationConstants {
    /// Reads the eleven calibration words, 0xAA..=0xBE.
    ///
    /// Any bus error aborts the load. A block that is entirely 0x0000 or
    /// entirely 0xFFFF means the device did not really answer and gives
    /// [`Bmp180Error::Calibration`].
    pub fn load<B: RegisterBus>(bus: &mut B) -> Result<Self, Bmp180Error<B::Error>> {
        let mut words = [0u16; 11];
        for (word, register) in words.iter_mut().zip(CALIBRATION_REGISTERS.iter()) {
            *word = bus.read_u16_be(*register).map_err(Bmp180Error::Bus)?;
        }

        if Self::is_sentinel(&words) {
            warn!("Rejecting calibration block {:04x?}", words);
            return Err(Bmp180Error::Calibration);
        }

        let calibration = Self::from_words(words);
        debug!("Loaded calibration {:?}", calibration);
        Ok(calibration)
    }

    /// True when every word is 0x0000 or every word is 0xFFFF
    pub fn is_sentinel(words: &[u16; 11]) -> bool {
        words.iter().all(|w| *w == 0x0000) || words.iter().all(|w| *w == 0xFFFF)
    }

    /// Decodes raw register words in register order (AC1 first)
    pub fn from_words(words: [u16; 11]) -> Self {
        CalibrationConstants {
            ac1: words[0] as i16,
            ac2: words[1] as i16,
            ac3: words[2] as i16,
            ac4: words[3],
            ac5: words[4],
            ac6: words[5],
            b1: words[6] as i16,
            b2: words[7] as i16,
            mb: words[8] as i16,
            mc: words[9] as i16,
            md: words[10] as i16,
        }
    }

    /// Words as they appear on the bus, AC1 first
    pub fn to_words(&self) -> [u16; 11] {
        [
            self.ac1 as u16,
            self.ac2 as u16,
            self.ac3 as u16,
            self.ac4,
            self.ac5,
            self.ac6,
            self.b1 as u16,
            self.b2 as u16,
            self.mb as u16,
            self.mc as u16,
            self.md as u16,
        ]
    }
}
