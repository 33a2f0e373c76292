//! Error types for the Envoy monitor.
//!
//! The scrape-and-cache core reports [`EnvoyError`]; fetch failures are kept
//! separate as [`FetchError`] because the page cache absorbs them instead of
//! handing them to accessor callers.

use crate::envoy::Page;
use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Envoy scraping errors
    #[error("Envoy error")]
    Envoy(#[from] EnvoyError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors surfaced by the Envoy accessors.
#[derive(Error, Debug)]
pub enum EnvoyError {
    /// The page was fetched but its contents could not be understood
    #[error("failed to parse {page} page")]
    Parse {
        page: Page,
        #[source]
        source: ParseError,
    },

    /// A raw value did not have the expected format
    #[error("invalid value for '{label}'")]
    Value {
        label: String,
        #[source]
        source: ParseError,
    },

    /// The requested label is not present in the page's table
    #[error("label '{label}' not found on {page} page")]
    KeyNotFound { page: Page, label: String },
}

/// Failure to retrieve a page from the device.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with a non-success status
    #[error("server error (status {status}): {message}")]
    Status { status: u16, message: String },
}

/// HTML and value parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Landmark element used to locate a table is missing
    #[error("table not found: {landmark}")]
    TableNotFound { landmark: String },

    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A table row does not have the expected label/value shape
    #[error("malformed row {index}: expected 2 cells, found {cells}")]
    MalformedRow { index: usize, cells: usize },

    /// Value does not match `<number> <unit>`
    #[error("no quantity found in '{text}'")]
    QuantityNotFound { text: String },

    /// Failed to parse numeric value
    #[error("failed to parse number from '{text}': {message}")]
    NumberParse { text: String, message: String },
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl EnvoyError {
    pub fn parse(page: Page, source: ParseError) -> Self {
        Self::Parse { page, source }
    }

    pub fn value(label: impl Into<String>, source: ParseError) -> Self {
        Self::Value {
            label: label.into(),
            source,
        }
    }

    pub fn key_not_found(page: Page, label: impl Into<String>) -> Self {
        Self::KeyNotFound {
            page,
            label: label.into(),
        }
    }
}

impl FetchError {
    /// Creates a status error from HTTP status and response body.
    pub fn status(status: reqwest::StatusCode, body: String) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: body,
        }
    }
}

impl ParseError {
    /// Creates a table not found error.
    pub fn table_not_found(landmark: impl Into<String>) -> Self {
        Self::TableNotFound {
            landmark: landmark.into(),
        }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }

    pub fn malformed_row(index: usize, cells: usize) -> Self {
        Self::MalformedRow { index, cells }
    }

    pub fn quantity_not_found(text: impl Into<String>) -> Self {
        Self::QuantityNotFound { text: text.into() }
    }

    /// Creates a number parse error.
    pub fn number_parse(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::NumberParse {
            text: text.into(),
            message: err.to_string(),
        }
    }
}
