mod common;

use bmp180_i2c::{Bmp180, I2cBus, RegisterBus, SamplingMode};
use common::*;
use i2cdev::mock::MockI2CDevice;

fn datasheet_device() -> MockI2CDevice {
    let mut device = MockI2CDevice::new();
    for (i, word) in DATASHEET_WORDS.iter().enumerate() {
        device.regmap.write_regs(0xAA + 2 * i, &word.to_be_bytes());
    }
    device
}

#[test]
fn calibration_decodes_through_i2cdev() {
    let log = new_log();
    let bus = I2cBus::new(datasheet_device());
    let delay = RecordingDelay::new(log);
    let bmp = Bmp180::with_delay(bus, SamplingMode::Standard, delay).unwrap();

    let cal = bmp.calibration();
    assert_eq!(cal.ac1, 408);
    assert_eq!(cal.ac2, -72);
    assert_eq!(cal.ac3, -14383);
    assert_eq!(cal.ac4, 32741);
    assert_eq!(cal.ac5, 32757);
    assert_eq!(cal.ac6, 23153);
    assert_eq!(cal.b1, 6190);
    assert_eq!(cal.b2, 4);
    assert_eq!(cal.mb, -32767);
    assert_eq!(cal.mc, -8711);
    assert_eq!(cal.md, 2868);
}

#[test]
fn conversion_result_is_read_through_i2cdev() {
    let mut device = datasheet_device();
    device.regmap.write_regs(0xF6, &DATASHEET_UT.to_be_bytes());
    let log = new_log();
    let delay = RecordingDelay::new(log.clone());
    let bmp = Bmp180::with_delay(I2cBus::new(device), SamplingMode::Standard, delay).unwrap();

    assert_eq!(bmp.read_raw_temperature().unwrap(), DATASHEET_UT);
    assert_eq!(bmp.read_temperature().unwrap(), 15.0);
    assert_eq!(events(&log), vec![Event::Delay(5), Event::Delay(5)]);

    // the command byte was written to the control register
    let mut bus = bmp.release();
    assert_eq!(bus.read_u8(0xF4).unwrap(), 0x2E);
}
