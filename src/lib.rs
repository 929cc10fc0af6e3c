//! Platform agnostic driver for the 24C256 (256 kbit, 32 KiB) I2C EEPROM.
//!
//! The blocking driver lives in [`eeprom24c256`], the async one in
//! [`async_version`] (feature `async`, on by default). Both borrow an already
//! configured I2C bus and own a delay provider used to wait out the chip's
//! internal write cycle.
//!
//! ```ignore
//! use eeprom24c256::{Eeprom24c256, DEFAULT_ADDRESS, PAGE_SIZE};
//!
//! let mut eeprom = Eeprom24c256::new(&mut i2c, delay, DEFAULT_ADDRESS);
//! eeprom.write_byte(0x0010, 0xA5)?;
//! assert_eq!(eeprom.read_byte(0x0010)?, 0xA5);
//!
//! let mut page = [0u8; PAGE_SIZE];
//! eeprom.read_page(0x0040, &mut page)?;
//! ```

#![no_std]

#[macro_use]
mod fmt;

pub mod config;
pub mod eeprom24c256;
pub mod error;
pub mod memory_map;

#[cfg(feature = "async")]
pub mod async_version;

pub use config::{Config, WriteCompletion};
pub use eeprom24c256::Eeprom24c256;
pub use error::Error;
pub use memory_map::{CAPACITY, DEFAULT_ADDRESS, PAGE_COUNT, PAGE_SIZE, WRITE_CYCLE_MS};
