use core::fmt;

/// Everything an EEPROM operation can fail with. `E` is the bus error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
	/// The transfer failed, e.g. the chip did not acknowledge.
	I2c(E),
	/// Page write at an address that is not a multiple of the page size.
	NotPageAligned,
	/// The span leaves the physically backed address range.
	OutOfBounds,
	/// The caller's buffer is shorter than the operation needs.
	BufferTooSmall,
	/// Acknowledgment polling ran out of attempts.
	WriteTimeout,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::I2c(e) => write!(f, "i2c transfer failed: {:?}", e),
			Error::NotPageAligned => f.write_str("address is not page aligned"),
			Error::OutOfBounds => f.write_str("address range exceeds eeprom capacity"),
			Error::BufferTooSmall => f.write_str("buffer too small"),
			Error::WriteTimeout => f.write_str("write cycle did not complete"),
		}
	}
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
