// defmtが無効のときは何も展開しない

#[cfg(feature = "defmt")]
macro_rules! trace {
	($($arg:tt)*) => {
		::defmt::trace!($($arg)*)
	};
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
	($($arg:tt)*) => {{}};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
	($($arg:tt)*) => {
		::defmt::debug!($($arg)*)
	};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
	($($arg:tt)*) => {{}};
}
