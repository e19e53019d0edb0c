//! Decoding of the device's `/json/state` body.
//!
//! The original adapter scraped the body with regular expressions and
//! assumed every pattern matched. This decoder names the fields it
//! needs and fails with `Error::ParseError` when one is absent, so a
//! firmware change surfaces as a diagnosable error instead of a
//! fault.

use serde::Deserialize;
use wled_api::{Error, Result};

/// The subset of the WLED state report the bridge consumes. Every
/// field is optional at the JSON level; accessors enforce presence.

#[derive(Debug, Deserialize)]
pub struct StateBody {
    on: Option<bool>,
    bri: Option<u16>,

    // One inner array per segment; a segment carries at least R, G
    // and B and possibly a white channel, which is ignored.
    col: Option<Vec<Vec<u8>>>,
}

impl StateBody {
    pub fn decode(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| {
            Error::ParseError(format!("bad state body: {}", e))
        })
    }

    pub fn power(&self) -> Result<bool> {
        self.on.ok_or_else(|| {
            Error::ParseError(String::from(
                "'on' field missing from state report",
            ))
        })
    }

    pub fn brightness(&self) -> Result<u16> {
        self.bri.ok_or_else(|| {
            Error::ParseError(String::from(
                "'bri' field missing from state report",
            ))
        })
    }

    /// Returns the RGB triple of the first segment.

    pub fn rgb(&self) -> Result<(u8, u8, u8)> {
        let segments = self.col.as_deref().ok_or_else(|| {
            Error::ParseError(String::from(
                "'col' field missing from state report",
            ))
        })?;

        match segments.first().map(Vec::as_slice) {
            Some([r, g, b, ..]) => Ok((*r, *g, *b)),
            _ => Err(Error::ParseError(String::from(
                "state report has no RGB triple in 'col'",
            ))),
        }
    }
}
