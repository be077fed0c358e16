//! Exit codes for the api2postman CLI.
//!
//! This module defines distinct exit codes for different error types,
//! allowing scripts and CI systems to distinguish between different
//! failure modes. Warnings never affect the exit code.

use crate::commands::InputNotFound;
use postman_config::ConfigError;
use postman_graphql::SchemaError;
use postman_raml::RamlError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - collection written, possibly with warnings
    Success = 0,
    /// The conversion itself failed (e.g. a non-numeric RAML response status)
    ConversionError = 1,
    /// Configuration error (invalid or unreadable config file)
    ConfigError = 2,
    /// Input file not found
    InputError = 3,
    /// I/O error (file read/write failure)
    IoError = 4,
    /// Parse error (schema or RAML document could not be parsed at all)
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed command from the outermost error in
    /// its chain that the CLI knows about.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.is::<InputNotFound>() {
                return Self::InputError;
            }
            if cause.is::<ConfigError>() {
                return Self::ConfigError;
            }
            if cause.is::<SchemaError>() {
                return Self::ParseError;
            }
            if let Some(raml) = cause.downcast_ref::<RamlError>() {
                return match raml {
                    RamlError::InvalidDocument(_) | RamlError::NotAMapping => Self::ParseError,
                    RamlError::InvalidStatusCode { .. } | RamlError::Example { .. } => {
                        Self::ConversionError
                    }
                };
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::ConversionError
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ConversionError => write!(f, "conversion error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::InputError => write!(f, "input error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}
