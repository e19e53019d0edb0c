//! Configuration for one bridged WLED device.
//!
//! The original adapter accepted a loosely-shaped config object and
//! deferred every check to first use. Here the shape is an explicit
//! record with documented defaults, convertible from a `toml` table
//! the way a host's driver section would provide it. The one check
//! that stays deferred is the `url` parameter: its absence is legal
//! at construction and disables the device operations, which report
//! `Error::ConfigError` when used.

use serde_derive::Deserialize;
use toml::value::Table;
use wled_api::{transport::HttpMethod, Error, Result};

pub const DEFAULT_NAME: &str = "WLED Light";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_BRIGHTNESS_MAX: u16 = 255;

/// Device-side brightness scaling. WLED reports `bri` on a 0-255
/// scale by default but the ceiling is configurable on some builds.

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Brightness {
    pub max: u16,
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness {
            max: DEFAULT_BRIGHTNESS_MAX,
        }
    }
}

/// The immutable per-instance configuration. Created once, never
/// mutated.

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Display name used by the hosting framework.
    pub name: String,

    /// Method used for command writes. Reads always use GET.
    pub http_method: HttpMethod,

    /// HTTP basic auth credentials. Empty strings disable auth.
    pub username: String,
    pub password: String,

    /// Per-request timeout, in milliseconds.
    pub timeout: u64,

    /// Base URL of the device. Without it, every device operation
    /// fails fast with a config error.
    pub url: Option<String>,

    pub brightness: Brightness,

    /// When set, responses to command writes are cached and replayed
    /// like reads. The original adapter always did this; it is off by
    /// default because a replayed write acknowledgement is stale.
    pub cache_writes: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            name: String::from(DEFAULT_NAME),
            http_method: HttpMethod::default(),
            username: String::new(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT_MS,
            url: None,
            brightness: Brightness::default(),
            cache_writes: false,
        }
    }
}

impl Params {
    /// Checks the parts of the configuration that can be rejected up
    /// front.

    pub fn validate(&self) -> Result<()> {
        if self.brightness.max == 0 {
            return Err(Error::ConfigError(String::from(
                "'brightness.max' must be at least 1",
            )));
        }

        if self.timeout == 0 {
            return Err(Error::ConfigError(String::from(
                "'timeout' must be at least 1 ms",
            )));
        }

        Ok(())
    }

    pub fn base_url(&self) -> Result<&str> {
        self.url.as_deref().ok_or_else(|| {
            Error::ConfigError(String::from(
                "the 'url' parameter is not configured",
            ))
        })
    }

    pub fn state_url(&self) -> Result<String> {
        Ok(format!("{}/json/state", self.base_url()?))
    }

    pub fn power_url(&self, on: bool) -> Result<String> {
        Ok(format!("{}/win&T={}", self.base_url()?, u8::from(on)))
    }

    pub fn color_url(&self, r: u8, g: u8, b: u8) -> Result<String> {
        Ok(format!("{}/win&R={}&G={}&B={}", self.base_url()?, r, g, b))
    }
}

impl TryFrom<Table> for Params {
    type Error = Error;

    fn try_from(t: Table) -> Result<Self> {
        toml::Value::Table(t).try_into().map_err(|e| {
            Error::ConfigError(format!("config parse error: {}", e))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg: Params = toml::from_str("").unwrap();

        assert_eq!(cfg.name, "WLED Light");
        assert_eq!(cfg.http_method, HttpMethod::Get);
        assert_eq!(cfg.username, "");
        assert_eq!(cfg.password, "");
        assert_eq!(cfg.timeout, 10_000);
        assert_eq!(cfg.url, None);
        assert_eq!(cfg.brightness.max, 255);
        assert!(!cfg.cache_writes);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parsing() {
        let cfg: Params = toml::from_str(
            r#"
name = "porch"
http_method = "POST"
username = "admin"
password = "hunter2"
timeout = 2500
url = "http://10.0.0.9"

[brightness]
max = 128
"#,
        )
        .unwrap();

        assert_eq!(cfg.name, "porch");
        assert_eq!(cfg.http_method, HttpMethod::Post);
        assert_eq!(cfg.timeout, 2500);
        assert_eq!(cfg.url.as_deref(), Some("http://10.0.0.9"));
        assert_eq!(cfg.brightness.max, 128);
    }

    #[test]
    fn test_urls() {
        let cfg = Params {
            url: Some(String::from("http://wled.local")),
            ..Params::default()
        };

        assert_eq!(
            cfg.state_url().unwrap(),
            "http://wled.local/json/state"
        );
        assert_eq!(
            cfg.power_url(true).unwrap(),
            "http://wled.local/win&T=1"
        );
        assert_eq!(
            cfg.power_url(false).unwrap(),
            "http://wled.local/win&T=0"
        );
        assert_eq!(
            cfg.color_url(255, 0, 128).unwrap(),
            "http://wled.local/win&R=255&G=0&B=128"
        );
    }

    // A missing URL is not a construction error; it surfaces when an
    // endpoint is requested.

    #[test]
    fn test_missing_url() {
        let cfg = Params::default();

        assert!(cfg.validate().is_ok());
        assert!(matches!(
            cfg.state_url(),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_bad_values() {
        let cfg = Params {
            brightness: Brightness { max: 0 },
            ..Params::default()
        };

        assert!(matches!(cfg.validate(), Err(Error::ConfigError(_))));

        let cfg = Params {
            timeout: 0,
            ..Params::default()
        };

        assert!(matches!(cfg.validate(), Err(Error::ConfigError(_))));
    }
}
