//! An adapter that exposes a WLED device's HTTP control surface as
//! four uniform properties -- power, brightness, hue, saturation --
//! to a hosting accessory framework that gets and sets them one at a
//! time.
//!
//! The interesting parts are the coordination around the HTTP calls,
//! not the calls themselves: a gate serializes every outbound request
//! ([`gate`]), a short-lived cache coalesces repeated reads
//! ([`cache`]), a staged commit turns the hue/saturation/brightness
//! triple into single RGB writes ([`accessory`]), and a suppress-echo
//! flag keeps device-originated notifications from looping back into
//! redundant writes ([`notify`]).
//!
//! This crate installs no logging subscriber; the host owns that.

pub mod accessory;
pub mod cache;
pub mod client;
pub mod color;
pub mod config;
pub mod gate;
pub mod http;
pub mod notify;
pub mod payload;

#[cfg(test)]
pub(crate) mod testutil;

pub use accessory::{
    Accessory, FIRMWARE_REVISION, MANUFACTURER, MODEL, SERIAL_NUMBER,
};
pub use config::Params;
pub use http::HttpTransport;
pub use notify::{handle_notification, Notification};
pub use wled_api::{Error, Result};
