//! The accessory state machine.
//!
//! This is the caller-facing surface: four property pairs (power,
//! brightness, hue, saturation), an identify blink, and the staging
//! logic that turns three independently-set color properties into a
//! single RGB write. Accessory frameworks set hue and saturation
//! back-to-back, so the first of the pair is staged and the second
//! triggers the commit; brightness changes always commit immediately.

use crate::{
    client::DeviceClient,
    color,
    config::Params,
    http::HttpTransport,
};
use std::sync::Arc;
use tokio::{sync::Mutex, time};
use tracing::{debug, info, warn};
use wled_api::{transport::Transport, Result};

/// Pause between the two transitions of an identify blink.
pub const IDENTIFY_BLINK_DELAY: time::Duration =
    time::Duration::from_millis(250);

// Static accessory information for the hosting framework.

pub const MANUFACTURER: &str = "WLED";
pub const MODEL: &str = env!("CARGO_PKG_NAME");
pub const SERIAL_NUMBER: &str = "001";
pub const FIRMWARE_REVISION: &str = env!("CARGO_PKG_VERSION");

// The logical color state plus the two coordination flags. Guarded by
// one mutex so multi-threaded hosts keep the "single serialized
// caller" invariant the logic depends on.

#[derive(Debug, Default)]
struct State {
    hue: u16,
    saturation: u8,
    brightness: u8,
    power: bool,

    // True once one of hue/saturation was set without its partner;
    // the next partner set commits. Reset whenever a commit is
    // issued.
    pending_commit: bool,

    // True while a notification-driven power change is waiting for
    // the framework's echoed set; that one set completes without
    // device I/O and clears the flag.
    suppress_echo: bool,
}

pub struct Accessory<T: Transport> {
    params: Arc<Params>,
    client: DeviceClient<T>,
    state: Mutex<State>,
}

impl Accessory<HttpTransport> {
    /// Builds an accessory talking real HTTP, using the configured
    /// timeout and credentials.

    pub fn from_params(params: Params) -> Result<Self> {
        let transport = HttpTransport::new(&params)?;

        Accessory::new(params, transport)
    }
}

impl<T: Transport> Accessory<T> {
    pub fn new(params: Params, transport: T) -> Result<Self> {
        params.validate()?;

        let params = Arc::new(params);

        Ok(Accessory {
            client: DeviceClient::new(params.clone(), transport),
            params,
            state: Mutex::new(State::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    // Builds an endpoint URL, logging when the request has to be
    // ignored for lack of configuration.

    fn endpoint(&self, url: Result<String>) -> Result<String> {
        url.map_err(|e| {
            warn!("ignoring request: {}", e);
            e
        })
    }

    /// Reads the device's power state.

    pub async fn power(&self) -> Result<bool> {
        let on = self.client.read_state().await?.power()?;

        info!("power is currently {}", if on { "ON" } else { "OFF" });
        Ok(on)
    }

    /// Sets the device's power state and returns the raw response
    /// body. A set that arrives while the suppress-echo flag is up is
    /// the framework echoing a notification back at us; it completes
    /// without device I/O and lowers the flag.

    pub async fn set_power(&self, on: bool) -> Result<String> {
        let url = self.endpoint(self.params.power_url(on))?;

        {
            let mut state = self.state.lock().await;

            if state.suppress_echo {
                state.suppress_echo = false;
                state.power = on;
                debug!("suppressing echoed power setting");
                return Ok(String::new());
            }
        }

        let body = self.client.write_command(&url).await?;

        self.state.lock().await.power = on;
        info!("power set to {}", if on { "ON" } else { "OFF" });
        Ok(body)
    }

    /// Reads the device brightness, rescaled from the configured
    /// device ceiling to a 0-100 percentage, floored.

    pub async fn brightness(&self) -> Result<u8> {
        let bri = self.client.read_state().await?.brightness()?;
        let max = f64::from(self.params.brightness.max);
        let level = (100.0 / max * f64::from(bri)) as u8;
        let level = level.min(100);

        info!("brightness is currently at {}%", level);
        Ok(level)
    }

    /// Stores the brightness and commits. Brightness changes are
    /// never deferred; even a lone brightness set produces exactly
    /// one RGB write.

    pub async fn set_brightness(&self, level: u8) -> Result<()> {
        self.endpoint(self.params.base_url().map(String::from))?;
        debug!("caching brightness {}", level);
        self.state.lock().await.brightness = level.min(100);
        self.commit_rgb().await
    }

    /// Reads the device color and returns the hue channel, caching
    /// it for the next commit.

    pub async fn hue(&self) -> Result<u16> {
        let (r, g, b) = self.client.read_state().await?.rgb()?;
        let (h, _, _) = color::rgb_to_hsl(r, g, b);

        debug!("hue is currently {}", h);
        self.state.lock().await.hue = h;
        Ok(h)
    }

    /// Reads the device color and returns the saturation channel,
    /// caching it for the next commit.

    pub async fn saturation(&self) -> Result<u8> {
        let (r, g, b) = self.client.read_state().await?.rgb()?;
        let (_, s, _) = color::rgb_to_hsl(r, g, b);

        debug!("saturation is currently {}", s);
        self.state.lock().await.saturation = s;
        Ok(s)
    }

    /// Stores the hue. The first of a hue/saturation pair is staged;
    /// the second triggers the commit.

    pub async fn set_hue(&self, level: u16) -> Result<()> {
        self.endpoint(self.params.base_url().map(String::from))?;
        debug!("caching hue {}", level);

        let commit = {
            let mut state = self.state.lock().await;

            state.hue = level.min(360);
            if state.pending_commit {
                true
            } else {
                state.pending_commit = true;
                false
            }
        };

        if commit {
            self.commit_rgb().await
        } else {
            Ok(())
        }
    }

    /// Stores the saturation; staging mirrors `set_hue`.

    pub async fn set_saturation(&self, level: u8) -> Result<()> {
        self.endpoint(self.params.base_url().map(String::from))?;
        debug!("caching saturation {}", level);

        let commit = {
            let mut state = self.state.lock().await;

            state.saturation = level.min(100);
            if state.pending_commit {
                true
            } else {
                state.pending_commit = true;
                false
            }
        };

        if commit {
            self.commit_rgb().await
        } else {
            Ok(())
        }
    }

    /// Blinks the device so the user can locate it: toggle the power,
    /// wait, restore. Errors during the toggle are ignored so the
    /// original state is always restored.

    pub async fn identify(&self) -> Result<()> {
        info!("identify requested");

        let on = self.power().await?;
        let _ = self.set_power(!on).await;

        time::sleep(IDENTIFY_BLINK_DELAY).await;
        self.set_power(on).await.map(|_| ())
    }

    // Raises the suppress-echo flag and applies a device-originated
    // power change. The framework's echoed set is the one that gets
    // suppressed.

    pub(crate) async fn apply_power_notification(&self, on: bool) {
        let mut state = self.state.lock().await;

        state.suppress_echo = true;
        state.power = on;
        info!(
            "device reports power {}",
            if on { "ON" } else { "OFF" }
        );
    }

    // Translates the accumulated hue/saturation/brightness into one
    // RGB command write. The pending flag resets as soon as the flush
    // is issued.

    async fn commit_rgb(&self) -> Result<()> {
        let url = {
            let mut state = self.state.lock().await;

            state.pending_commit = false;

            let (r, g, b) = color::hsv_to_rgb(
                f64::from(state.hue),
                f64::from(state.saturation),
                f64::from(state.brightness),
            );

            debug!(
                "committing H:{} S:{} B:{} as RGB ({}, {}, {})",
                state.hue, state.saturation, state.brightness, r, g, b
            );
            self.params.color_url(r, g, b)?
        };

        self.client.write_command(&url).await?;
        Ok(())
    }
}
