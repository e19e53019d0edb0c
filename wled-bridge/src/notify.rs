//! The notification bridge.
//!
//! Devices change state outside our write path (the physical button,
//! another app) and a push channel reports those changes as events
//! naming a characteristic and a value. Applying the event updates
//! the exposed characteristic, which makes the hosting framework echo
//! a set right back through the normal caller path; the suppress-echo
//! flag turns that one echo into a no-op so a notify/set/notify loop
//! can't start.

use crate::accessory::Accessory;
use serde::Deserialize;
use tracing::warn;
use wled_api::{transport::Transport, Error, Result};

/// An out-of-band state change event. Currently only the `"On"`
/// characteristic is understood.

#[derive(Debug, Deserialize)]
pub struct Notification {
    pub characteristic: String,
    pub value: serde_json::Value,
}

/// Applies a push notification to the accessory. Unknown
/// characteristics are logged and ignored; they are not an error.

pub async fn handle_notification<T: Transport>(
    accessory: &Accessory<T>,
    event: Notification,
) -> Result<()> {
    match event.characteristic.as_str() {
        "On" => {
            let on = event.value.as_bool().ok_or_else(|| {
                Error::ParseError(format!(
                    "notification value {} is not a boolean",
                    event.value
                ))
            })?;

            accessory.apply_power_notification(on).await;
            Ok(())
        }

        other => {
            warn!(
                "ignoring notification for unknown characteristic: {}",
                other
            );
            Ok(())
        }
    }
}
