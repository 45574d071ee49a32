//! Error types for telemetry operations.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised by telemetry helpers.
#[derive(Debug)]
pub enum TelemetryError {
    /// Installing the tracing subscriber failed.
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        source: tracing_subscriber::util::TryInitError,
    },
    /// Log level directive could not be parsed.
    InvalidLevel {
        /// Directive supplied by the caller.
        level: String,
    },
    /// Log format name was not recognised.
    InvalidFormat {
        /// Format name supplied by the caller.
        format: String,
    },
}

impl Display for TelemetryError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubscriberInstall { .. } => {
                formatter.write_str("failed to install tracing subscriber")
            }
            Self::InvalidLevel { .. } => formatter.write_str("invalid log level directive"),
            Self::InvalidFormat { .. } => formatter.write_str("unknown log format"),
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SubscriberInstall { source } => Some(source),
            Self::InvalidLevel { .. } | Self::InvalidFormat { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tracing_subscriber::util::SubscriberInitExt;

    fn try_init_error()
    -> std::result::Result<tracing_subscriber::util::TryInitError, Box<dyn Error>> {
        match tracing_subscriber::registry().try_init() {
            Ok(()) => match tracing_subscriber::registry().try_init() {
                Ok(()) => Err(io::Error::other("expected init error").into()),
                Err(err) => Ok(err),
            },
            Err(err) => Ok(err),
        }
    }

    #[test]
    fn telemetry_error_display_and_source() -> std::result::Result<(), Box<dyn Error>> {
        let init_error = try_init_error()?;
        let install = TelemetryError::SubscriberInstall { source: init_error };
        assert_eq!(install.to_string(), "failed to install tracing subscriber");
        assert!(install.source().is_some());

        let level = TelemetryError::InvalidLevel {
            level: "loud=".to_string(),
        };
        assert_eq!(level.to_string(), "invalid log level directive");
        assert!(level.source().is_none());

        let format = TelemetryError::InvalidFormat {
            format: "xml".to_string(),
        };
        assert_eq!(format.to_string(), "unknown log format");
        Ok(())
    }
}
