//! Defines fundamental types used throughout the WLED bridge
//! codebase.

use std::fmt;

/// Enumerates all the errors that can be reported by the bridge.
/// Device-facing errors bubble unchanged to the operation's caller;
/// no layer retries on its own. The type is `Clone` because the
/// response cache replays stored outcomes, failures included.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A bad parameter was given in a configuration or a
    /// configuration was missing a required parameter. Never retried;
    /// reported before any I/O is attempted.
    ConfigError(String),

    /// A network-level failure: timeout, connection refused, DNS.
    /// The associated string carries the transport's own message.
    TransportError(String),

    /// The device answered with a non-200 HTTP status. The status
    /// code and response body are preserved verbatim for diagnosis.
    DeviceStatusError { code: u16, body: String },

    /// An expected field was absent from a response body. The
    /// associated string describes what was missing.
    ParseError(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ConfigError(v) => write!(f, "config error: {}", &v),
            Error::TransportError(v) => {
                write!(f, "transport error: {}", &v)
            }
            Error::DeviceStatusError { code, body } => {
                write!(f, "HTTP error {}: {}", code, &body)
            }
            Error::ParseError(v) => write!(f, "parse error: {}", &v),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ConfigError("'url' is not configured".into())
                .to_string(),
            "config error: 'url' is not configured"
        );
        assert_eq!(
            Error::TransportError("connection refused".into()).to_string(),
            "transport error: connection refused"
        );

        // Status errors must keep the code and body verbatim.

        assert_eq!(
            Error::DeviceStatusError {
                code: 500,
                body: "upgrade in progress".into()
            }
            .to_string(),
            "HTTP error 500: upgrade in progress"
        );
        assert_eq!(
            Error::ParseError("'bri' field missing".into()).to_string(),
            "parse error: 'bri' field missing"
        );
    }
}
