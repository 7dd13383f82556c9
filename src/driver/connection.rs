//! Connection implementation.
//!
//! This module provides the `Connection` type, which turns one execute call
//! into one HTTP request/response cycle against the API server.

use crate::codec::{decode_response, encode_request};
use crate::connection::{ConnectionParams, QueryMode};
use crate::error::{ConnectionError, OpenMldbError, QueryError, TransportError};
use crate::query::{QueryResult, Rows};
use crate::transport::{HttpTransport, TransportProtocol};
use crate::types::Value;
use log::debug;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Statement used to check that the server is reachable.
const PING_SQL: &str = "SELECT 1";

/// Connection to one database on an API server.
///
/// A connection is `open` until [`close`](Self::close) is called; after that
/// every operation except `close` fails without touching the network. It is
/// meant for one in-flight operation at a time.
///
/// # Example
///
/// ```no_run
/// use openmldb_rs::driver::Driver;
/// use openmldb_rs::types::Value;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = Driver::new();
/// let mut connection = driver.open("openmldb://127.0.0.1:9527/demo_db")?;
///
/// connection.exec("CREATE TABLE demo(c1 int, c2 string);", &[]).await?;
///
/// if let Some(rows) = connection
///     .query("SELECT c1, c2 FROM demo WHERE c1 = ?;", &[Value::from(1i32)])
///     .await?
/// {
///     for row in rows {
///         println!("{:?}", row);
///     }
/// }
///
/// connection.close()?;
/// # Ok(())
/// # }
/// ```
pub struct Connection {
    /// Connection parameters
    params: ConnectionParams,
    /// Transport layer for communication
    transport: Arc<dyn TransportProtocol>,
    /// Set once by `close`
    closed: bool,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("params", &self.params)
            .field("transport", &"<TransportProtocol>")
            .field("closed", &self.closed)
            .finish()
    }
}

impl Connection {
    /// Create an open connection using the HTTP transport.
    ///
    /// No request is sent; use [`ping`](Self::ping) or a
    /// [`Connector`](super::Connector) to verify reachability.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the HTTP client cannot be built.
    pub fn from_params(params: ConnectionParams) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(params.connection_timeout)?;
        Ok(Self::with_transport(params, Arc::new(transport)))
    }

    /// Create an open connection over a caller-supplied transport.
    pub fn with_transport(params: ConnectionParams, transport: Arc<dyn TransportProtocol>) -> Self {
        Self {
            params,
            transport,
            closed: false,
        }
    }

    /// Get the connection parameters.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// API server address.
    pub fn host(&self) -> &str {
        &self.params.host
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.params.database
    }

    /// Query mode sent with every request.
    pub fn mode(&self) -> QueryMode {
        self.params.mode
    }

    /// Check if the connection has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Check whether the connection can be handed out again by a pool.
    pub fn is_valid(&self) -> bool {
        !self.closed
    }

    /// Prepare the connection for reuse by another caller.
    ///
    /// There is no server-side session state, so this only checks the
    /// connection is still open.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::ConnectionClosed` after `close`.
    pub fn reset_session(&self) -> Result<(), ConnectionError> {
        self.ensure_open()
    }

    /// Execute a statement and return its rows, if any.
    ///
    /// Sends exactly one POST to `http://{host}/dbs/{database}`. The request
    /// is bounded by the connection's query timeout.
    ///
    /// # Errors
    ///
    /// - `ConnectionError::ConnectionClosed` if the connection is closed
    /// - `QueryError::ParameterBindingError` if a parameter cannot be encoded
    /// - `TransportError` on network failure, timeout or a malformed body
    /// - `ConversionError` if result values cannot be decoded
    /// - `QueryError::ServerError` if the server reports a non-zero code
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, OpenMldbError> {
        self.execute_with_cancel(sql, params, &CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), aborting the request when `cancel`
    /// fires.
    ///
    /// An aborted request fails with `TransportError::Cancelled`; the
    /// connection stays open.
    pub async fn execute_with_cancel(
        &self,
        sql: &str,
        params: &[Value],
        cancel: &CancellationToken,
    ) -> Result<QueryResult, OpenMldbError> {
        self.ensure_open()?;

        let body = encode_request(self.params.mode, sql, params)?;
        let url = self.params.endpoint();
        let timeout = self.params.query_timeout;

        debug!(
            "Executing statement: url={} mode={} params={}",
            url,
            self.params.mode,
            params.len()
        );
        let start = Instant::now();

        let response = tokio::select! {
            result = tokio::time::timeout(timeout, self.transport.post(&url, body)) => {
                result.map_err(|_| TransportError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })??
            }
            _ = cancel.cancelled() => return Err(TransportError::Cancelled.into()),
        };

        let decoded = match decode_response(response.body.as_slice()) {
            Ok(decoded) => decoded,
            Err(OpenMldbError::Transport(_)) if !response.is_success() => {
                return Err(TransportError::HttpStatus {
                    status: response.status,
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        let result = QueryResult::from(decoded.into_result()?);

        debug!(
            "Statement finished: rows={} duration_ms={}",
            match &result {
                QueryResult::Rows(rows) => rows.remaining(),
                QueryResult::NoRows => 0,
            },
            start.elapsed().as_millis()
        );

        Ok(result)
    }

    /// Execute a query, returning `None` for statements that produce no rows.
    pub async fn query(&self, sql: &str, params: &[Value]) -> Result<Option<Rows>, OpenMldbError> {
        Ok(self.execute(sql, params).await?.into_rows())
    }

    /// Execute a statement for its effect, discarding any rows.
    pub async fn exec(&self, sql: &str, params: &[Value]) -> Result<(), OpenMldbError> {
        self.execute(sql, params).await.map(|_| ())
    }

    /// Check that the server accepts statements by running a no-op query.
    pub async fn ping(&self) -> Result<(), OpenMldbError> {
        self.exec(PING_SQL, &[]).await
    }

    /// Statement preparation is not supported.
    ///
    /// Pass parameters to [`execute`](Self::execute) or [`query`](Self::query)
    /// instead.
    pub fn prepare(&self, _sql: &str) -> Result<(), QueryError> {
        Err(QueryError::NotImplemented(
            "prepare (use query with parameters instead)".to_string(),
        ))
    }

    /// Transactions are not supported.
    pub fn begin_transaction(&self) -> Result<(), QueryError> {
        Err(QueryError::NotImplemented("begin".to_string()))
    }

    /// Close the connection. Idempotent.
    pub fn close(&mut self) -> Result<(), ConnectionError> {
        self.closed = true;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), ConnectionError> {
        if self.closed {
            Err(ConnectionError::ConnectionClosed)
        } else {
            Ok(())
        }
    }
}
