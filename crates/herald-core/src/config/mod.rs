//! Notification server configuration schema and validation.
//!
//! The configuration document is JSON of the form:
//!
//! ```text
//! { "servers": [ { "type": "admin", "port": 22281, "listen": "127.0.0.1" },
//!                { "type": "client", "port": 22280,
//!                  "ssl.key": "/path/key.pem", "ssl.cert": "/path/cert.pem" } ] }
//! ```
//!
//! Validation runs over a generic [`serde_json::Value`] rather than a derived
//! struct so that failures can name the offending entry index and field.

mod error;
mod resolve;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use error::ConfigError;
pub use resolve::{
    CONFIG_FILE_CANDIDATES, ConfigResolution, ConfigSource, load_config, resolve_config_path,
};

/// Keys permitted at the top level of the document.
const TOP_LEVEL_KEYS: &[&str] = &["servers"];

/// Keys permitted inside a server entry.
const SERVER_KEYS: &[&str] = &["type", "port", "listen", "ssl.key", "ssl.cert"];

/// Role of a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    /// Receives notifications to publish.
    Admin,
    /// Accepts subscriber connections.
    Client,
}

impl ServerType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "client" => Some(Self::Client),
            _ => None,
        }
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Client => f.write_str("client"),
        }
    }
}

/// TLS key and certificate paths. Only constructed when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsPair {
    pub key: String,
    pub cert: String,
}

/// One listener definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    pub server_type: ServerType,
    pub port: u16,
    pub listen: Option<String>,
    pub tls: Option<TlsPair>,
}

/// A validated configuration.
///
/// Guaranteed non-empty, with unique ports and at least one endpoint of each
/// [`ServerType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    endpoints: Vec<ServerEndpoint>,
    source: Option<PathBuf>,
}

impl ServerConfig {
    /// Endpoints in document order.
    pub fn endpoints(&self) -> &[ServerEndpoint] {
        &self.endpoints
    }

    /// Path the configuration was read from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub(crate) fn with_source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }

    /// Endpoints of the given type.
    pub fn endpoints_of(&self, server_type: ServerType) -> impl Iterator<Item = &ServerEndpoint> {
        self.endpoints
            .iter()
            .filter(move |e| e.server_type == server_type)
    }
}

/// Parse and validate raw configuration bytes.
pub fn validate_config(raw: &[u8]) -> Result<ServerConfig, ConfigError> {
    let document: Value =
        serde_json::from_slice(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;

    let servers = top_level_servers(&document)?;

    let mut endpoints = Vec::with_capacity(servers.len());
    let mut port_map: HashMap<u16, usize> = HashMap::new();
    let mut has_admin = false;
    let mut has_client = false;

    for (index, entry) in servers.iter().enumerate() {
        let entry = check_entry_shape(index, entry)?;
        let raw_type = required_string(index, entry, "type")?;
        let port = required_port(index, entry)?;
        let listen = optional_string(index, entry, "listen")?;
        let ssl_key = optional_string(index, entry, "ssl.key")?;
        let ssl_cert = optional_string(index, entry, "ssl.cert")?;

        if let Some(&first) = port_map.get(&port) {
            return Err(ConfigError::DuplicatePort {
                first,
                second: index,
                port,
            });
        }
        port_map.insert(port, index);

        let server_type = ServerType::parse(raw_type).ok_or_else(|| {
            ConfigError::InvalidServerType {
                index,
                port,
                value: raw_type.to_string(),
            }
        })?;
        match server_type {
            ServerType::Admin => has_admin = true,
            ServerType::Client => has_client = true,
        }

        let tls = match (non_empty(ssl_key), non_empty(ssl_cert)) {
            (Some(key), Some(cert)) => Some(TlsPair { key, cert }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls { index, port }),
        };

        endpoints.push(ServerEndpoint {
            server_type,
            port,
            listen,
            tls,
        });
    }

    if endpoints.is_empty() {
        return Err(ConfigError::NoServersDefined);
    }
    if !has_client {
        return Err(ConfigError::NoClientServer);
    }
    if !has_admin {
        return Err(ConfigError::NoAdminServer);
    }

    tracing::debug!(endpoints = endpoints.len(), "Configuration validated");

    Ok(ServerConfig {
        endpoints,
        source: None,
    })
}

fn top_level_servers(document: &Value) -> Result<&Vec<Value>, ConfigError> {
    let Some(map) = document.as_object() else {
        return Err(ConfigError::schema(
            None,
            "servers",
            format!("expected an object at top level, got {}", kind(document)),
        ));
    };

    reject_unknown_keys(None, map, TOP_LEVEL_KEYS)?;

    match map.get("servers") {
        Some(Value::Array(servers)) => Ok(servers),
        Some(other) => Err(ConfigError::schema(
            None,
            "servers",
            format!("expected a list, got {}", kind(other)),
        )),
        None => Err(ConfigError::schema(None, "servers", "missing required key")),
    }
}

fn check_entry_shape(index: usize, entry: &Value) -> Result<&Map<String, Value>, ConfigError> {
    let Some(map) = entry.as_object() else {
        return Err(ConfigError::schema(
            Some(index),
            "server",
            format!("expected an object, got {}", kind(entry)),
        ));
    };
    reject_unknown_keys(Some(index), map, SERVER_KEYS)?;
    Ok(map)
}

fn reject_unknown_keys(
    index: Option<usize>,
    map: &Map<String, Value>,
    allowed: &[&str],
) -> Result<(), ConfigError> {
    // Sorted so the reported key does not depend on map ordering.
    let mut unknown: Vec<&String> = map
        .keys()
        .filter(|k| !allowed.contains(&k.as_str()))
        .collect();
    unknown.sort();
    match unknown.first() {
        Some(key) => Err(ConfigError::schema(
            index,
            key.as_str(),
            format!("unrecognized key; valid keys are: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

fn required_string<'a>(
    index: usize,
    entry: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ConfigError> {
    match entry.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ConfigError::schema(
            Some(index),
            field,
            format!("expected a string, got {}", kind(other)),
        )),
        None => Err(ConfigError::schema(Some(index), field, "missing required key")),
    }
}

fn required_port(index: usize, entry: &Map<String, Value>) -> Result<u16, ConfigError> {
    let value = match entry.get("port") {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
            ConfigError::schema(Some(index), "port", format!("expected an integer, got {n}"))
        })?,
        Some(other) => {
            return Err(ConfigError::schema(
                Some(index),
                "port",
                format!("expected an integer, got {}", kind(other)),
            ));
        }
        None => {
            return Err(ConfigError::schema(
                Some(index),
                "port",
                "missing required key",
            ));
        }
    };

    match u16::try_from(value) {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::schema(
            Some(index),
            "port",
            format!("{value} is out of range (1-65535)"),
        )),
    }
}

fn optional_string(
    index: usize,
    entry: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, ConfigError> {
    match entry.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ConfigError::schema(
            Some(index),
            field,
            format!("expected a string or null, got {}", kind(other)),
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(json: &str) -> Result<ServerConfig, ConfigError> {
        validate_config(json.as_bytes())
    }

    #[test]
    fn minimal_admin_and_client_validates() {
        let config = validate(
            r#"{"servers": [{"type": "admin", "port": 22280}, {"type": "client", "port": 22281}]}"#,
        )
        .expect("valid config");

        assert_eq!(config.endpoints().len(), 2);
        assert_eq!(config.endpoints()[0].server_type, ServerType::Admin);
        assert_eq!(config.endpoints()[0].port, 22280);
        assert_eq!(config.endpoints()[1].server_type, ServerType::Client);
        assert!(config.source().is_none());
    }

    #[test]
    fn optional_fields_are_captured() {
        let config = validate(
            r#"{"servers": [
                {"type": "client", "port": 22280, "listen": "0.0.0.0",
                 "ssl.key": "/etc/ssl/key.pem", "ssl.cert": "/etc/ssl/cert.pem"},
                {"type": "admin", "port": 22281, "listen": "127.0.0.1", "ssl.key": null}
            ]}"#,
        )
        .expect("valid config");

        let client = &config.endpoints()[0];
        assert_eq!(client.listen.as_deref(), Some("0.0.0.0"));
        assert_eq!(
            client.tls,
            Some(TlsPair {
                key: "/etc/ssl/key.pem".to_string(),
                cert: "/etc/ssl/cert.pem".to_string(),
            })
        );
        assert!(config.endpoints()[1].tls.is_none());
        assert_eq!(config.endpoints_of(ServerType::Admin).count(), 1);
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            validate("{\"servers\": ["),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn missing_servers_key_is_schema_error() {
        let err = validate("{}").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema { index: None, ref field, .. } if field == "servers"
        ));
    }

    #[test]
    fn servers_must_be_a_list() {
        let err = validate(r#"{"servers": {"type": "admin"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Schema { index: None, .. }));
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let err = validate(r#"{"servers": [], "logs": []}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema { index: None, ref field, .. } if field == "logs"
        ));
    }

    #[test]
    fn unknown_server_key_names_index() {
        let err = validate(r#"{"servers": [{"type": "admin", "port": 1, "host": "x"}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema { index: Some(0), ref field, .. } if field == "host"
        ));
    }

    #[test]
    fn missing_port_names_index_and_field() {
        let err = validate(
            r#"{"servers": [{"type": "admin", "port": 1}, {"type": "client"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema { index: Some(1), ref field, .. } if field == "port"
        ));
    }

    #[test]
    fn string_port_is_schema_error() {
        let err = validate(r#"{"servers": [{"type": "admin", "port": "22280"}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Schema { index: Some(0), .. }));
    }

    #[test]
    fn fractional_or_out_of_range_port_is_schema_error() {
        for port in ["22280.5", "0", "65536", "-1"] {
            let json = format!(r#"{{"servers": [{{"type": "admin", "port": {port}}}]}}"#);
            let err = validate(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Schema { ref field, .. } if field == "port"),
                "port {port} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn non_string_type_is_schema_error() {
        let err = validate(r#"{"servers": [{"type": 7, "port": 1}]}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema { index: Some(0), ref field, .. } if field == "type"
        ));
    }

    #[test]
    fn non_string_listen_is_schema_error() {
        let err = validate(r#"{"servers": [{"type": "admin", "port": 1, "listen": 5}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema { ref field, .. } if field == "listen"
        ));
    }

    #[test]
    fn duplicate_port_names_both_indexes() {
        let err = validate(
            r#"{"servers": [
                {"type": "admin", "port": 22280},
                {"type": "client", "port": 22281},
                {"type": "client", "port": 22280}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicatePort {
                first: 0,
                second: 2,
                port: 22280
            }
        ));
    }

    #[test]
    fn duplicate_port_is_reported_before_invalid_type() {
        let err = validate(
            r#"{"servers": [{"type": "admin", "port": 1}, {"type": "bogus", "port": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePort { .. }));
    }

    #[test]
    fn invalid_type_names_index_port_and_value() {
        let err = validate(r#"{"servers": [{"type": "relay", "port": 9000}]}"#).unwrap_err();
        match err {
            ConfigError::InvalidServerType { index, port, value } => {
                assert_eq!(index, 0);
                assert_eq!(port, 9000);
                assert_eq!(value, "relay");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn type_is_case_sensitive() {
        let err = validate(r#"{"servers": [{"type": "Admin", "port": 9000}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidServerType { .. }));
    }

    #[test]
    fn key_without_cert_is_incomplete_tls() {
        let err = validate(
            r#"{"servers": [
                {"type": "admin", "port": 22281},
                {"type": "client", "port": 22280, "ssl.key": "/k.pem"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IncompleteTls {
                index: 1,
                port: 22280
            }
        ));
    }

    #[test]
    fn cert_without_key_is_incomplete_tls() {
        let err = validate(
            r#"{"servers": [{"type": "client", "port": 22280, "ssl.cert": "/c.pem", "ssl.key": ""}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteTls { index: 0, .. }));
    }

    #[test]
    fn empty_tls_strings_count_as_absent() {
        let config = validate(
            r#"{"servers": [
                {"type": "admin", "port": 1, "ssl.key": "", "ssl.cert": ""},
                {"type": "client", "port": 2}
            ]}"#,
        )
        .expect("empty strings disable TLS");
        assert!(config.endpoints()[0].tls.is_none());
    }

    #[test]
    fn empty_servers_list_is_no_servers_defined() {
        assert!(matches!(
            validate(r#"{"servers": []}"#),
            Err(ConfigError::NoServersDefined)
        ));
    }

    #[test]
    fn admin_only_is_no_client_server() {
        assert!(matches!(
            validate(r#"{"servers": [{"type": "admin", "port": 1}, {"type": "admin", "port": 2}]}"#),
            Err(ConfigError::NoClientServer)
        ));
    }

    #[test]
    fn client_only_is_no_admin_server() {
        assert!(matches!(
            validate(r#"{"servers": [{"type": "client", "port": 1}]}"#),
            Err(ConfigError::NoAdminServer)
        ));
    }

    #[test]
    fn server_type_display_matches_schema_values() {
        assert_eq!(ServerType::Admin.to_string(), "admin");
        assert_eq!(ServerType::Client.to_string(), "client");
    }
}
