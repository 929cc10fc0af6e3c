use crate::memory_map::WRITE_CYCLE_MS;

/// How a write waits for the chip's internal write cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteCompletion {
	/// Sleep for a fixed time.
	FixedDelay { ms: u32 },
	/// Address the chip until it acknowledges again. It NACKs while busy.
	AckPolling { interval_us: u32, max_attempts: u16 },
}

impl Default for WriteCompletion {
	fn default() -> Self {
		WriteCompletion::FixedDelay { ms: WRITE_CYCLE_MS }
	}
}

/// Construction-time settings. Not changeable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
	/// Wait for the write cycle after every write. When off, call
	/// `wait_for_write_cycle` (or delay by hand) before the next transaction.
	pub auto_wait: bool,
	pub completion: WriteCompletion,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			auto_wait: true,
			completion: WriteCompletion::default(),
		}
	}
}

impl Config {
	pub const fn manual_wait() -> Self {
		Self {
			auto_wait: false,
			completion: WriteCompletion::FixedDelay { ms: WRITE_CYCLE_MS },
		}
	}

	pub const fn ack_polling(interval_us: u32, max_attempts: u16) -> Self {
		Self {
			auto_wait: true,
			completion: WriteCompletion::AckPolling { interval_us, max_attempts },
		}
	}
}
