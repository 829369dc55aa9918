//! Logging macros.
//!
//! With the `defmt` feature the macros forward to [`defmt`], which is what the
//! firmware logs through. With the `log` feature they forward to the [`log`]
//! facade (host builds and tests). Without either they compile to nothing.
#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => {{ ::defmt::trace!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => {{ ::defmt::debug!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($($arg:tt)*) => {{ ::defmt::info!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => {{ ::defmt::warn!($($arg)*); }};
}

#[cfg(feature = "defmt")]
macro_rules! error {
    ($($arg:tt)*) => {{ ::defmt::error!($($arg)*); }};
}

#[cfg(all(not(feature = "defmt"), feature = "log"))]
macro_rules! trace {
    ($($arg:tt)*) => {{ ::log::trace!($($arg)*); }};
}

#[cfg(all(not(feature = "defmt"), feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {{ ::log::debug!($($arg)*); }};
}

#[cfg(all(not(feature = "defmt"), feature = "log"))]
macro_rules! info {
    ($($arg:tt)*) => {{ ::log::info!($($arg)*); }};
}

#[cfg(all(not(feature = "defmt"), feature = "log"))]
macro_rules! warn {
    ($($arg:tt)*) => {{ ::log::warn!($($arg)*); }};
}

#[cfg(all(not(feature = "defmt"), feature = "log"))]
macro_rules! error {
    ($($arg:tt)*) => {{ ::log::error!($($arg)*); }};
}

// No-op variants: still borrow the arguments so they count as used.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! trace {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}
