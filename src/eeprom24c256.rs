//! Blocking driver.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::config::{Config, WriteCompletion};
use crate::error::Error;
use crate::memory_map::{
	address_bytes, array_chunks, check_array, check_range, is_page_aligned, page_segments, Chunk,
	CAPACITY, PAGE_SIZE,
};

/// 24C256 on a borrowed I2C bus.
///
/// The bus is only borrowed: it stays owned by the caller and has to outlive
/// the driver. Several drivers on one bus need a sharing wrapper such as the
/// ones in `embedded-hal-bus`; the driver itself does no locking.
pub struct Eeprom24c256<'a, I2C, D> {
	i2c: &'a mut I2C,
	delay: D,
	address: u8,
	config: Config,
}

impl<'a, I2C: I2c, D: DelayNs> Eeprom24c256<'a, I2C, D> {
	/// `device_address` is the right-aligned 7-bit address. Waits 10 ms after
	/// every write.
	pub fn new(i2c: &'a mut I2C, delay: D, device_address: u8) -> Self {
		Self::with_config(i2c, delay, device_address, Config::default())
	}

	pub fn with_auto_wait(i2c: &'a mut I2C, delay: D, device_address: u8, auto_wait: bool) -> Self {
		let config = Config { auto_wait, ..Config::default() };
		Self::with_config(i2c, delay, device_address, config)
	}

	pub fn with_config(i2c: &'a mut I2C, delay: D, device_address: u8, config: Config) -> Self {
		Self {
			i2c,
			delay,
			address: device_address,
			config,
		}
	}

	pub fn device_address(&self) -> u8 {
		self.address
	}

	pub fn config(&self) -> Config {
		self.config
	}

	/// Ends the bus borrow and hands back the delay provider.
	pub fn release(self) -> D {
		self.delay
	}

	/// Writes one byte.
	pub fn write_byte(&mut self, address: u16, value: u8) -> Result<(), Error<I2C::Error>> {
		check_range(address, 1)?;
		let [high, low] = address_bytes(address);
		trace!("write_byte {=u16:#x} <- {=u8:#x}", address, value);
		self.write_frame(&[high, low, value])
	}

	/// Writes the first 64 bytes of `data` to the page starting at `address`.
	///
	/// The chip wraps inside a page, so a misaligned page write would land
	/// partly at the start of the same page. That is refused with
	/// [`Error::NotPageAligned`] instead.
	pub fn write_page(&mut self, address: u16, data: &[u8]) -> Result<(), Error<I2C::Error>> {
		if data.len() < PAGE_SIZE {
			return Err(Error::BufferTooSmall);
		}
		if !is_page_aligned(address) {
			return Err(Error::NotPageAligned);
		}
		check_range(address, PAGE_SIZE)?;

		let mut frame = [0u8; PAGE_SIZE + 2];
		frame[..2].copy_from_slice(&address_bytes(address));
		frame[2..].copy_from_slice(&data[..PAGE_SIZE]);
		trace!("write_page {=u16:#x}", address);
		self.write_frame(&frame)
	}

	/// Reads one byte through the current-address pointer.
	pub fn read_byte(&mut self, address: u16) -> Result<u8, Error<I2C::Error>> {
		check_range(address, 1)?;
		let mut buf = [0u8; 1];
		trace!("read_byte {=u16:#x}", address);
		self.i2c
			.write_read(self.address, &address_bytes(address), &mut buf)
			.map_err(Error::I2c)?;
		Ok(buf[0])
	}

	/// Reads 64 bytes into `buffer[..64]` and returns the number of bytes read.
	pub fn read_page(&mut self, address: u16, buffer: &mut [u8]) -> Result<usize, Error<I2C::Error>> {
		if buffer.len() < PAGE_SIZE {
			return Err(Error::BufferTooSmall);
		}
		check_range(address, PAGE_SIZE)?;
		trace!("read_page {=u16:#x}", address);
		self.i2c
			.write_read(self.address, &address_bytes(address), &mut buffer[..PAGE_SIZE])
			.map_err(Error::I2c)?;
		Ok(PAGE_SIZE)
	}

	/// Copies the whole array into `buffer[..CAPACITY]`, one page read at a time.
	///
	/// Stops at the first failing page; pages after it are left untouched.
	pub fn dump(&mut self, buffer: &mut [u8]) -> Result<(), Error<I2C::Error>> {
		if buffer.len() < CAPACITY {
			return Err(Error::BufferTooSmall);
		}
		debug!("dump {=usize} bytes", CAPACITY);
		for (index, page) in buffer[..CAPACITY].chunks_exact_mut(PAGE_SIZE).enumerate() {
			self.read_page((index * PAGE_SIZE) as u16, page)?;
		}
		Ok(())
	}

	/// Writes `data` from `address` in 64-byte strides: page writes for full
	/// strides, byte writes for the tail.
	///
	/// Strides count from `address`, so anything of a page or more must start
	/// page aligned. Use [`write`](Self::write) for arbitrary spans.
	pub fn write_array(&mut self, address: u16, data: &[u8]) -> Result<(), Error<I2C::Error>> {
		check_array(address, data.len())?;
		debug!("write_array {=u16:#x} len {=usize}", address, data.len());
		for chunk in array_chunks(data.len()) {
			match chunk {
				Chunk::Page { offset } => {
					self.write_page(address + offset as u16, &data[offset..offset + PAGE_SIZE])?
				}
				Chunk::Tail { offset, len } => {
					for (i, &byte) in data[offset..offset + len].iter().enumerate() {
						self.write_byte(address + (offset + i) as u16, byte)?;
					}
				}
			}
		}
		Ok(())
	}

	/// Reads `buffer.len()` consecutive bytes in one transfer.
	pub fn read(&mut self, address: u16, buffer: &mut [u8]) -> Result<(), Error<I2C::Error>> {
		if buffer.is_empty() {
			return Ok(());
		}
		check_range(address, buffer.len())?;
		trace!("read {=u16:#x} len {=usize}", address, buffer.len());
		self.i2c
			.write_read(self.address, &address_bytes(address), buffer)
			.map_err(Error::I2c)
	}

	/// Writes any span at any address, splitting it at page boundaries.
	pub fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Error<I2C::Error>> {
		if data.is_empty() {
			return Ok(());
		}
		check_range(address, data.len())?;
		let mut frame = [0u8; PAGE_SIZE + 2];
		for (at, offset, len) in page_segments(address, data.len()) {
			frame[..2].copy_from_slice(&address_bytes(at));
			frame[2..2 + len].copy_from_slice(&data[offset..offset + len]);
			trace!("write {=u16:#x} len {=usize}", at, len);
			self.write_frame(&frame[..2 + len])?;
		}
		Ok(())
	}

	/// Waits until the last write has been programmed, using the configured
	/// [`WriteCompletion`].
	pub fn wait_for_write_cycle(&mut self) -> Result<(), Error<I2C::Error>> {
		match self.config.completion {
			WriteCompletion::FixedDelay { ms } => {
				self.delay.delay_ms(ms);
				Ok(())
			}
			WriteCompletion::AckPolling { interval_us, max_attempts } => {
				let mut probe = [0u8; 1];
				for _ in 0..max_attempts {
					match self.i2c.read(self.address, &mut probe) {
						Ok(()) => return Ok(()),
						Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => {
							self.delay.delay_us(interval_us)
						}
						Err(e) => return Err(Error::I2c(e)),
					}
				}
				debug!("write cycle timed out");
				Err(Error::WriteTimeout)
			}
		}
	}

	fn write_frame(&mut self, frame: &[u8]) -> Result<(), Error<I2C::Error>> {
		self.i2c.write(self.address, frame).map_err(Error::I2c)?;
		if self.config.auto_wait {
			self.wait_for_write_cycle()?;
		}
		Ok(())
	}
}
