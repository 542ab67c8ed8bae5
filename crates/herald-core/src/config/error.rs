//! Configuration error types.
//!
//! Every variant carries enough context (entry index, port, field name) to
//! produce a single actionable line for the operator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading and validating the server configuration.
///
/// None of these are retried: each one terminates the start attempt before
/// any process is launched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file {path}: {reason}")]
    ConfigIo { path: PathBuf, reason: String },

    /// The file is not valid JSON.
    #[error("Configuration file is not properly formatted JSON: {0}")]
    Malformed(String),

    /// A field is missing, mistyped or not recognized.
    ///
    /// `index` is `None` for top-level problems.
    #[error("{}", schema_message(.index, .field, .reason))]
    Schema {
        index: Option<usize>,
        field: String,
        reason: String,
    },

    /// Two servers bind the same port.
    #[error(
        "Two servers (at indexes \"{first}\" and \"{second}\") both bind to the same port (\"{port}\"). Each server must bind to a unique port."
    )]
    DuplicatePort {
        first: usize,
        second: usize,
        port: u16,
    },

    /// A server has a type other than `admin` or `client`.
    #[error(
        "A specified server (at index \"{index}\", on port \"{port}\") has an invalid type (\"{value}\"). Valid types are: admin, client."
    )]
    InvalidServerType {
        index: usize,
        port: u16,
        value: String,
    },

    /// A server specifies only one half of the TLS key/certificate pair.
    #[error(
        "A specified server (at index \"{index}\", on port \"{port}\") specifies only one of \"ssl.key\" and \"ssl.cert\". Each server must specify neither (to disable SSL) or both (to enable it)."
    )]
    IncompleteTls { index: usize, port: u16 },

    /// The `servers` list is empty.
    #[error(
        "Configuration file does not specify any servers. You must specify at least one \"admin\" server and at least one \"client\" server."
    )]
    NoServersDefined,

    /// No server has type `client`.
    #[error(
        "Configuration file does not specify any client servers. The service will be unable to transmit notifications. You must specify at least one server with type \"client\"."
    )]
    NoClientServer,

    /// No server has type `admin`.
    #[error(
        "Configuration file does not specify any administrative servers. The service will be unable to receive messages. You must specify at least one server with type \"admin\"."
    )]
    NoAdminServer,
}

impl ConfigError {
    pub(crate) fn schema(
        index: Option<usize>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Schema {
            index,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

fn schema_message(index: &Option<usize>, field: &str, reason: &str) -> String {
    match index {
        Some(index) => format!("Server at index \"{index}\" has an invalid \"{field}\": {reason}"),
        None => format!("Configuration file has improper top-level key \"{field}\": {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_message_names_index_and_field() {
        let err = ConfigError::schema(Some(3), "port", "expected an integer");
        let msg = err.to_string();
        assert!(msg.contains("index \"3\""));
        assert!(msg.contains("\"port\""));
        assert!(msg.contains("expected an integer"));
    }

    #[test]
    fn top_level_schema_message_has_no_index() {
        let err = ConfigError::schema(None, "servers", "missing required key");
        assert!(err.to_string().starts_with("Configuration file has improper top-level key"));
    }

    #[test]
    fn duplicate_port_message_names_both_indexes() {
        let err = ConfigError::DuplicatePort {
            first: 0,
            second: 2,
            port: 22280,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"0\""));
        assert!(msg.contains("\"2\""));
        assert!(msg.contains("22280"));
    }
}
