//! Dispatcher configuration.
//!
//! Both switches are fixed when the dispatcher is built. The struct
//! deserializes from any serde format; missing fields take their defaults:
//!
//! ```
//! use linecall::{DispatcherConfig, ErrorStyle};
//!
//! let config: DispatcherConfig = serde_json::from_str(r#"{"error_style": "codes"}"#)?;
//! assert_eq!(config.error_style, ErrorStyle::Codes);
//! assert!(config.help_command);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// How dispatch and registration errors are reported on the output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStyle {
    /// The error's full message, e.g. `Unknown command: foo`.
    #[default]
    Descriptive,
    /// The error's fixed code, e.g. `error.cmd.unknown`.
    Codes,
}

/// Build-time options for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub error_style: ErrorStyle,
    /// Registers a top-level `help` command (alias `?`) that prints usage
    /// for every registered command.
    pub help_command: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            error_style: ErrorStyle::Descriptive,
            help_command: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.error_style, ErrorStyle::Descriptive);
        assert!(config.help_command);
    }

    #[test]
    fn test_partial_json() {
        let config: DispatcherConfig =
            serde_json::from_str(r#"{"help_command": false}"#).unwrap();
        assert_eq!(config.error_style, ErrorStyle::Descriptive);
        assert!(!config.help_command);
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let result: Result<DispatcherConfig, _> =
            serde_json::from_str(r#"{"error_style": "loud"}"#);
        assert!(result.is_err());
    }
}
