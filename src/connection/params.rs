//! Connection parameter parsing and validation.
//!
//! This module handles parsing connection strings and building connection
//! parameters with validation.

use super::mode::QueryMode;
use crate::error::ConnectionError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Scheme accepted in connection strings.
pub const SCHEME: &str = "openmldb";

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection parameters for reaching one database on an API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// API server address, `host` or `host:port`
    pub host: String,

    /// Database name
    pub database: String,

    /// Execution mode sent with every request
    pub mode: QueryMode,

    /// Upper bound for one request/response cycle
    pub query_timeout: Duration,

    /// Upper bound for establishing the TCP connection
    pub connection_timeout: Duration,

    /// Unrecognized connection string options
    pub attributes: HashMap<String, String>,
}

impl ConnectionParams {
    /// Create a new ConnectionBuilder.
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    /// URL that statements are POSTed to.
    pub fn endpoint(&self) -> String {
        format!(
            "http://{}/dbs/{}",
            self.host,
            urlencoding::encode(&self.database)
        )
    }
}

impl FromStr for ConnectionParams {
    type Err = ConnectionError;

    /// Parse a connection string in the format:
    /// `[openmldb:]//host[:port]/database[?mode=online&timeout=30]`
    ///
    /// # Examples
    ///
    /// ```
    /// # use openmldb_rs::connection::{ConnectionParams, QueryMode};
    /// # use std::str::FromStr;
    /// let params = ConnectionParams::from_str("openmldb://localhost:9527/demo_db")?;
    /// assert_eq!(params.mode, QueryMode::Online);
    ///
    /// let params = ConnectionParams::from_str("openmldb://localhost:9527/demo_db?mode=offsync")?;
    /// assert_eq!(params.mode, QueryMode::OffSync);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = s.trim();

        // Scheme is optional but must be ours when present. Only a `://`
        // ahead of the first '/' or '?' introduces one.
        let scheme_end = url.find(['/', '?']).unwrap_or(url.len());
        let rest = match url[..scheme_end]
            .strip_suffix(':')
            .filter(|_| url[scheme_end..].starts_with("//"))
        {
            Some(scheme) => {
                let rest = &url[scheme_end + 2..];
                if !scheme.is_empty() && !scheme.eq_ignore_ascii_case(SCHEME) {
                    return Err(ConnectionError::UnknownScheme(scheme.to_string()));
                }
                rest
            }
            None => url.strip_prefix("//").ok_or_else(|| {
                ConnectionError::ParseError(format!(
                    "expected '{}://host/database', got '{}'",
                    SCHEME, url
                ))
            })?,
        };

        let (main_part, query_string) = match rest.split_once('?') {
            Some((main, query)) => (main, Some(query)),
            None => (rest, None),
        };
        // Fragments carry nothing for us
        let main_part = main_part.split('#').next().unwrap_or_default();

        let (host, path) = match main_part.split_once('/') {
            Some((host, path)) => (host, path),
            None => (main_part, ""),
        };

        let database = path
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        if database.is_empty() {
            return Err(ConnectionError::MissingDatabase);
        }
        let database = urlencoding::decode(database)
            .map_err(|e| ConnectionError::ParseError(format!("Failed to decode database: {}", e)))?
            .into_owned();

        let params = parse_query_params(query_string)?;

        let builder = ConnectionBuilder::new().host(host).database(&database);
        apply_query_params(builder, params)?.build()
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}?mode={}",
            SCHEME,
            self.host,
            urlencoding::encode(&self.database),
            self.mode
        )
    }
}

/// Builder for constructing ConnectionParams with validation.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    host: Option<String>,
    database: Option<String>,
    mode: Option<QueryMode>,
    query_timeout: Option<Duration>,
    connection_timeout: Option<Duration>,
    attributes: HashMap<String, String>,
}

impl ConnectionBuilder {
    /// Create a new ConnectionBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API server address (`host` or `host:port`).
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    /// Set the query mode.
    pub fn mode(mut self, mode: QueryMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the per-request timeout.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Set the TCP connect timeout.
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    /// Add a custom connection attribute.
    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Build the ConnectionParams with validation.
    pub fn build(self) -> Result<ConnectionParams, ConnectionError> {
        let host = self.host.ok_or_else(|| ConnectionError::InvalidParameter {
            parameter: "host".to_string(),
            message: "Host is required".to_string(),
        })?;

        if host.is_empty() {
            return Err(ConnectionError::InvalidParameter {
                parameter: "host".to_string(),
                message: "Host cannot be empty".to_string(),
            });
        }

        let database = self
            .database
            .filter(|d| !d.is_empty())
            .ok_or(ConnectionError::MissingDatabase)?;

        let query_timeout = self.query_timeout.unwrap_or(DEFAULT_QUERY_TIMEOUT);
        if query_timeout.is_zero() {
            return Err(ConnectionError::InvalidParameter {
                parameter: "query_timeout".to_string(),
                message: "Query timeout must be greater than 0".to_string(),
            });
        }

        let connection_timeout = self
            .connection_timeout
            .unwrap_or(DEFAULT_CONNECTION_TIMEOUT);
        if connection_timeout.is_zero() {
            return Err(ConnectionError::InvalidParameter {
                parameter: "connection_timeout".to_string(),
                message: "Connection timeout must be greater than 0".to_string(),
            });
        }

        Ok(ConnectionParams {
            host,
            database,
            mode: self.mode.unwrap_or_default(),
            query_timeout,
            connection_timeout,
            attributes: self.attributes,
        })
    }
}

/// Parse query parameters from URL query string.
///
/// Pairs keep their order of appearance so that later keys override earlier ones.
fn parse_query_params(query: Option<&str>) -> Result<Vec<(String, String)>, ConnectionError> {
    let mut params = Vec::new();

    if let Some(query) = query {
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

            let key = urlencoding::decode(key)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode key: {}", e)))?
                .into_owned();
            let value = urlencoding::decode(value)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode value: {}", e)))?
                .into_owned();

            params.push((key, value));
        }
    }

    Ok(params)
}

/// Apply query parameters to builder.
fn apply_query_params(
    mut builder: ConnectionBuilder,
    params: Vec<(String, String)>,
) -> Result<ConnectionBuilder, ConnectionError> {
    for (key, value) in params {
        match key.as_str() {
            "mode" => {
                builder = builder.mode(QueryMode::from_str(&value)?);
            }
            "timeout" | "query_timeout" => {
                builder = builder.query_timeout(parse_secs(&key, &value)?);
            }
            "connect_timeout" | "connection_timeout" => {
                builder = builder.connection_timeout(parse_secs(&key, &value)?);
            }
            _ => {
                builder = builder.attribute(&key, &value);
            }
        }
    }

    Ok(builder)
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, value: &str) -> Result<Duration, ConnectionError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConnectionError::InvalidParameter {
            parameter: key.to_string(),
            message: format!("Invalid timeout value: {}", value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_minimal() {
        let params = ConnectionBuilder::new()
            .host("localhost:9527")
            .database("demo")
            .build()
            .unwrap();

        assert_eq!(params.host, "localhost:9527");
        assert_eq!(params.database, "demo");
        assert_eq!(params.mode, QueryMode::Online);
        assert_eq!(params.query_timeout, DEFAULT_QUERY_TIMEOUT);
        assert_eq!(params.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
    }

    #[test]
    fn test_builder_full() {
        let params = ConnectionBuilder::new()
            .host("api.example.com:8080")
            .database("prod")
            .mode(QueryMode::OffAsync)
            .query_timeout(Duration::from_secs(60))
            .connection_timeout(Duration::from_secs(2))
            .attribute("custom", "value")
            .build()
            .unwrap();

        assert_eq!(params.mode, QueryMode::OffAsync);
        assert_eq!(params.query_timeout, Duration::from_secs(60));
        assert_eq!(params.connection_timeout, Duration::from_secs(2));
        assert_eq!(params.attributes.get("custom"), Some(&"value".to_string()));
    }

    #[test]
    fn test_builder_validation_missing_host() {
        let result = ConnectionBuilder::new().database("demo").build();
        assert!(matches!(
            result.unwrap_err(),
            ConnectionError::InvalidParameter { parameter, .. } if parameter == "host"
        ));
    }

    #[test]
    fn test_builder_validation_missing_database() {
        let result = ConnectionBuilder::new().host("localhost").build();
        assert!(matches!(result, Err(ConnectionError::MissingDatabase)));

        let result = ConnectionBuilder::new().host("localhost").database("").build();
        assert!(matches!(result, Err(ConnectionError::MissingDatabase)));
    }

    #[test]
    fn test_builder_validation_zero_timeout() {
        let result = ConnectionBuilder::new()
            .host("localhost")
            .database("demo")
            .query_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_basic() {
        let params = ConnectionParams::from_str("openmldb://localhost:6543/test_db").unwrap();

        assert_eq!(params.host, "localhost:6543");
        assert_eq!(params.database, "test_db");
        assert_eq!(params.mode, QueryMode::Online);
    }

    #[test]
    fn test_parse_without_scheme() {
        let params = ConnectionParams::from_str("//127.0.0.1:9527/db").unwrap();
        assert_eq!(params.host, "127.0.0.1:9527");
        assert_eq!(params.database, "db");
    }

    #[test]
    fn test_parse_scheme_case_insensitive() {
        let params = ConnectionParams::from_str("OpenMLDB://localhost/db").unwrap();
        assert_eq!(params.host, "localhost");
    }

    #[test]
    fn test_parse_first_path_segment() {
        let params = ConnectionParams::from_str("openmldb://localhost/db/extra/parts").unwrap();
        assert_eq!(params.database, "db");
    }

    #[test]
    fn test_parse_modes() {
        for (text, mode) in [
            ("online", QueryMode::Online),
            ("offline", QueryMode::Offline),
            ("offsync", QueryMode::OffSync),
            ("offasync", QueryMode::OffAsync),
        ] {
            let dsn = format!("openmldb://localhost/db?mode={}", text);
            assert_eq!(ConnectionParams::from_str(&dsn).unwrap().mode, mode);
        }
    }

    #[test]
    fn test_parse_invalid_mode() {
        let result = ConnectionParams::from_str("openmldb://localhost/db?mode=request");
        assert!(matches!(result, Err(ConnectionError::InvalidMode(m)) if m == "request"));

        let result = ConnectionParams::from_str("openmldb://localhost/db?mode=ONLINE");
        assert!(matches!(result, Err(ConnectionError::InvalidMode(_))));
    }

    #[test]
    fn test_parse_mode_key_case_sensitive() {
        let params = ConnectionParams::from_str("openmldb://localhost/db?Mode=offsync").unwrap();
        assert_eq!(params.mode, QueryMode::Online);
        assert_eq!(params.attributes.get("Mode"), Some(&"offsync".to_string()));
    }

    #[test]
    fn test_parse_with_timeouts() {
        let params =
            ConnectionParams::from_str("openmldb://localhost/db?timeout=5&connect_timeout=1")
                .unwrap();
        assert_eq!(params.query_timeout, Duration::from_secs(5));
        assert_eq!(params.connection_timeout, Duration::from_secs(1));

        assert!(ConnectionParams::from_str("openmldb://localhost/db?timeout=abc").is_err());
    }

    #[test]
    fn test_parse_later_timeout_key_wins() {
        let params = ConnectionParams::from_str(
            "openmldb://localhost/db?timeout=5&query_timeout=7&connect_timeout=2&connect_timeout=3",
        )
        .unwrap();
        assert_eq!(params.query_timeout, Duration::from_secs(7));
        assert_eq!(params.connection_timeout, Duration::from_secs(3));

        let params =
            ConnectionParams::from_str("openmldb://localhost/db?query_timeout=7&timeout=5").unwrap();
        assert_eq!(params.query_timeout, Duration::from_secs(5));

        let params = ConnectionParams::from_str("openmldb://localhost/db?mode=offline&mode=offsync")
            .unwrap();
        assert_eq!(params.mode, QueryMode::OffSync);
    }

    #[test]
    fn test_parse_scheme_separator_in_query_value() {
        let params = ConnectionParams::from_str("//host:1/db?cb=http://x").unwrap();
        assert_eq!(params.host, "host:1");
        assert_eq!(params.database, "db");
        assert_eq!(params.attributes.get("cb"), Some(&"http://x".to_string()));

        let params = ConnectionParams::from_str("openmldb://host:1/db?cb=http://x").unwrap();
        assert_eq!(params.host, "host:1");
        assert_eq!(params.attributes.get("cb"), Some(&"http://x".to_string()));
    }

    #[test]
    fn test_parse_invalid_scheme() {
        let result = ConnectionParams::from_str("postgres://localhost/db");
        assert!(matches!(result, Err(ConnectionError::UnknownScheme(s)) if s == "postgres"));
    }

    #[test]
    fn test_parse_missing_database() {
        assert!(matches!(
            ConnectionParams::from_str("openmldb://localhost:9527"),
            Err(ConnectionError::MissingDatabase)
        ));
        assert!(matches!(
            ConnectionParams::from_str("openmldb://localhost:9527/"),
            Err(ConnectionError::MissingDatabase)
        ));
        assert!(matches!(
            ConnectionParams::from_str("openmldb://localhost:9527/?mode=online"),
            Err(ConnectionError::MissingDatabase)
        ));
    }

    #[test]
    fn test_parse_not_a_url() {
        assert!(matches!(
            ConnectionParams::from_str("localhost:9527/db"),
            Err(ConnectionError::ParseError(_))
        ));
        assert!(ConnectionParams::from_str("").is_err());
    }

    #[test]
    fn test_parse_empty_host() {
        let result = ConnectionParams::from_str("openmldb:///db");
        assert!(matches!(
            result,
            Err(ConnectionError::InvalidParameter { parameter, .. }) if parameter == "host"
        ));
    }

    #[test]
    fn test_parse_url_encoded_database() {
        let params = ConnectionParams::from_str("openmldb://localhost/my%20db").unwrap();
        assert_eq!(params.database, "my db");
        assert_eq!(params.endpoint(), "http://localhost/dbs/my%20db");
    }

    #[test]
    fn test_endpoint() {
        let params = ConnectionParams::from_str("openmldb://127.0.0.1:9527/demo_db").unwrap();
        assert_eq!(params.endpoint(), "http://127.0.0.1:9527/dbs/demo_db");
    }

    #[test]
    fn test_display_round_trips() {
        let params =
            ConnectionParams::from_str("openmldb://localhost:9527/demo?mode=offline").unwrap();
        let display = params.to_string();
        assert_eq!(display, "openmldb://localhost:9527/demo?mode=offline");
        assert_eq!(ConnectionParams::from_str(&display).unwrap(), params);
    }
}
