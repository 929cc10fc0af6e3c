//! Geometry of the 24C256 and the address arithmetic shared by both drivers.

use crate::error::Error;

/// Bytes per page. A write transaction never advances past the end of its page.
pub const PAGE_SIZE: usize = 64;
/// Number of pages in the array.
pub const PAGE_COUNT: usize = 512;
/// Physically backed bytes, `[0, CAPACITY)`.
pub const CAPACITY: usize = PAGE_SIZE * PAGE_COUNT;
/// Write cycle budget used by the default fixed-delay completion.
pub const WRITE_CYCLE_MS: u32 = 10;
/// 7-bit address with A2..A0 tied to ground.
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Word address as it goes on the wire, high byte first.
#[inline]
pub const fn address_bytes(address: u16) -> [u8; 2] {
	address.to_be_bytes()
}

#[inline]
pub const fn is_page_aligned(address: u16) -> bool {
	address as usize % PAGE_SIZE == 0
}

/// Bytes left in the page containing `address`.
#[inline]
pub const fn page_remaining(address: u16) -> usize {
	PAGE_SIZE - address as usize % PAGE_SIZE
}

/// `[address, address + len)` must lie inside the backed array.
pub fn check_range<E>(address: u16, len: usize) -> Result<(), Error<E>> {
	let start = address as usize;
	if start >= CAPACITY || len > CAPACITY - start {
		return Err(Error::OutOfBounds);
	}
	Ok(())
}

/// One stride of `write_array`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
	/// Full 64 bytes at `offset`, sent as one page write.
	Page { offset: usize },
	/// Trailing `len < 64` bytes at `offset`, sent byte by byte.
	Tail { offset: usize, len: usize },
}

/// Splits `len` bytes into 64-byte strides counted from the start of the data.
///
/// Strides are not realigned to physical pages, so callers writing more than
/// one page have to start on a page boundary.
pub fn array_chunks(len: usize) -> impl Iterator<Item = Chunk> {
	(0..len).step_by(PAGE_SIZE).map(move |offset| {
		let rest = len - offset;
		if rest < PAGE_SIZE {
			Chunk::Tail { offset, len: rest }
		} else {
			Chunk::Page { offset }
		}
	})
}

/// Validation shared by both `write_array` implementations.
pub fn check_array<E>(address: u16, len: usize) -> Result<(), Error<E>> {
	if len == 0 {
		return Ok(());
	}
	check_range(address, len)?;
	if len >= PAGE_SIZE && !is_page_aligned(address) {
		return Err(Error::NotPageAligned);
	}
	Ok(())
}

/// Cuts `[address, address + len)` at physical page boundaries.
///
/// Yields `(address, offset, len)` for each piece; every piece fits in one page.
pub fn page_segments(address: u16, len: usize) -> impl Iterator<Item = (u16, usize, usize)> {
	let mut offset = 0;
	core::iter::from_fn(move || {
		if offset >= len {
			return None;
		}
		let at = address.wrapping_add(offset as u16);
		let n = page_remaining(at).min(len - offset);
		let segment = (at, offset, n);
		offset += n;
		Some(segment)
	})
}
