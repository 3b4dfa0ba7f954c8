// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error;
use std::fmt;

///
/// Division by zero inside the compensation formulas.
/// Only degenerate calibration data can produce it.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// X1 + MD evaluated to zero while computing B5
    TemperatureDivisor,
    /// B4 evaluated to zero in the pressure formula
    PressureDivisor,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArithmeticError::TemperatureDivisor => {
                fmt::Display::fmt("Division by zero in temperature compensation", f)
            }
            ArithmeticError::PressureDivisor => {
                fmt::Display::fmt("Division by zero in pressure compensation (B4)", f)
            }
        }
    }
}

impl Error for ArithmeticError {}

///
///BMP180 error enum. Bus wraps the error of the
///underlying transport unchanged. Calibration when the
///calibration block reads back as all zeros or all ones.
///Arithmetic when the calibration constants make the
///compensation formulas divide by zero
///
#[derive(Debug)]
pub enum Bmp180Error<E> {
    /// Transport error: NACK, timeout or missing device
    Bus(E),
    /// The bus answered but the calibration block is implausible
    Calibration,
    /// Degenerate calibration, see [`ArithmeticError`]
    Arithmetic(ArithmeticError),
}

impl<E> From<ArithmeticError> for Bmp180Error<E> {
    fn from(e: ArithmeticError) -> Self {
        Bmp180Error::Arithmetic(e)
    }
}

impl<E: fmt::Display> fmt::Display for Bmp180Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Bmp180Error::Bus(ref e) => fmt::Display::fmt(e, f),
            Bmp180Error::Calibration => {
                fmt::Display::fmt("Calibration data is all zeros or all ones", f)
            }
            Bmp180Error::Arithmetic(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl<E: Error + 'static> Error for Bmp180Error<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Bmp180Error::Bus(ref e) => Some(e),
            Bmp180Error::Calibration => None,
            Bmp180Error::Arithmetic(ref e) => Some(e),
        }
    }
}
