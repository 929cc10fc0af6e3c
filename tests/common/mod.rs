#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use eeprom24c256::{CAPACITY, PAGE_SIZE};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

pub const ADDRESS: u8 = 0x50;

/// Everything that happened on the bus or the delay, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	Write { address: u16, data: Vec<u8> },
	Read { address: u16, len: usize },
	Nack,
	Delay { ns: u64 },
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// 24C256 model: address pointer, in-page wrap on writes, rollover on reads.
pub struct SimulatedEeprom {
	pub memory: Vec<u8>,
	pub address: u8,
	pointer: usize,
	log: EventLog,
	pub fail_reads: bool,
	pub fail_writes: bool,
	/// NACKs answered after each programmed write.
	pub busy_polls: u32,
	busy_left: u32,
}

impl SimulatedEeprom {
	pub fn new() -> Self {
		Self {
			memory: vec![0xFF; CAPACITY],
			address: ADDRESS,
			pointer: 0,
			log: Rc::new(RefCell::new(Vec::new())),
			fail_reads: false,
			fail_writes: false,
			busy_polls: 0,
			busy_left: 0,
		}
	}

	pub fn log(&self) -> EventLog {
		self.log.clone()
	}

	pub fn events(&self) -> Vec<Event> {
		self.log.borrow().clone()
	}

	pub fn clear_events(&self) {
		self.log.borrow_mut().clear();
	}

	pub fn delay(&self) -> RecordingDelay {
		RecordingDelay { log: self.log.clone() }
	}

	/// Data-carrying writes only.
	pub fn writes(&self) -> Vec<(u16, Vec<u8>)> {
		self.events()
			.into_iter()
			.filter_map(|e| match e {
				Event::Write { address, data } => Some((address, data)),
				_ => None,
			})
			.collect()
	}

	pub fn reads(&self) -> Vec<(u16, usize)> {
		self.events()
			.into_iter()
			.filter_map(|e| match e {
				Event::Read { address, len } => Some((address, len)),
				_ => None,
			})
			.collect()
	}

	fn nack(&self, source: NoAcknowledgeSource) -> ErrorKind {
		self.log.borrow_mut().push(Event::Nack);
		ErrorKind::NoAcknowledge(source)
	}

	fn commit_write(&mut self, bytes: &[u8]) -> Result<(), ErrorKind> {
		if bytes.len() < 2 {
			return Ok(());
		}
		// 24C256 ignores the top address bit.
		let start = u16::from_be_bytes([bytes[0], bytes[1]]) as usize % CAPACITY;
		self.pointer = start;
		let payload = &bytes[2..];
		if payload.is_empty() {
			return Ok(());
		}
		if self.fail_writes {
			return Err(self.nack(NoAcknowledgeSource::Data));
		}
		let page = start - start % PAGE_SIZE;
		for (i, &b) in payload.iter().enumerate() {
			self.memory[page + (start + i) % PAGE_SIZE] = b;
		}
		self.pointer = page + (start + payload.len()) % PAGE_SIZE;
		self.log.borrow_mut().push(Event::Write {
			address: start as u16,
			data: payload.to_vec(),
		});
		self.busy_left = self.busy_polls;
		Ok(())
	}
}

impl ErrorType for SimulatedEeprom {
	type Error = ErrorKind;
}

impl I2c for SimulatedEeprom {
	fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
		if address != self.address {
			return Err(self.nack(NoAcknowledgeSource::Address));
		}
		if self.busy_left > 0 {
			self.busy_left -= 1;
			return Err(self.nack(NoAcknowledgeSource::Address));
		}
		let mut pending: Vec<u8> = Vec::new();
		for op in operations.iter_mut() {
			match op {
				Operation::Write(bytes) => pending.extend_from_slice(bytes),
				Operation::Read(buf) => {
					if !pending.is_empty() {
						self.commit_write(&pending)?;
						pending.clear();
					}
					if self.fail_reads {
						return Err(self.nack(NoAcknowledgeSource::Data));
					}
					self.log.borrow_mut().push(Event::Read {
						address: self.pointer as u16,
						len: buf.len(),
					});
					for b in buf.iter_mut() {
						*b = self.memory[self.pointer];
						self.pointer = (self.pointer + 1) % CAPACITY;
					}
				}
			}
		}
		if !pending.is_empty() {
			self.commit_write(&pending)?;
		}
		Ok(())
	}
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for SimulatedEeprom {
	async fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
		I2c::transaction(self, address, operations)
	}
}

/// Delay that only records how long it was asked to wait.
#[derive(Clone)]
pub struct RecordingDelay {
	log: EventLog,
}

impl RecordingDelay {
	fn record(&mut self, ns: u64) {
		self.log.borrow_mut().push(Event::Delay { ns });
	}
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
	fn delay_ns(&mut self, ns: u32) {
		self.record(ns as u64);
	}

	fn delay_us(&mut self, us: u32) {
		self.record(us as u64 * 1_000);
	}

	fn delay_ms(&mut self, ms: u32) {
		self.record(ms as u64 * 1_000_000);
	}
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for RecordingDelay {
	async fn delay_ns(&mut self, ns: u32) {
		self.record(ns as u64);
	}

	async fn delay_us(&mut self, us: u32) {
		self.record(us as u64 * 1_000);
	}

	async fn delay_ms(&mut self, ms: u32) {
		self.record(ms as u64 * 1_000_000);
	}
}

pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
	(0..len).map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed)).collect()
}

pub fn delays(events: &[Event]) -> usize {
	events.iter().filter(|e| matches!(e, Event::Delay { .. })).count()
}
