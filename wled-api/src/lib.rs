//! Shared types for the WLED bridge crates.
//!
//! The interfaces and types defined in this crate are useful for
//! those writing an alternate transport or hosting the accessory in a
//! different framework. The device logic itself lives in the
//! `wled-bridge` crate.

mod types;

pub mod transport;

pub use types::Error;

/// A specialization of `std::result::Result<>` where the error value
/// is `Error`.

pub type Result<T> = std::result::Result<T, Error>;
