//! HTTP client for the tracker API.
//!
//! Wraps `reqwest` with the base URL from config and an optional bearer
//! token. Once a token is installed (login or session rehydration) every
//! request carries an `Authorization: Bearer` header until logout.
//!
//! Failures are classified into a tagged taxonomy instead of a flat error
//! string: transport problems are `Network`, 401/403 are `Auth`, other
//! non-2xx responses are `Server` carrying the server's message payload,
//! and unparseable bodies are `Decode`.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tkt_types::{ApiMessage, NewTicket, NewUser, Project, Ticket, TokenResponse, User};

use crate::config::Config;

/// Classified failure from the tracker API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The server rejected the credentials (401/403).
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },
    /// The response body could not be decoded as the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    /// Any other non-2xx response.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// The server's message payload, or the error display otherwise.
    pub fn message(&self) -> String {
        match self {
            ApiError::Auth { message, .. } | ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(msg) | ApiError::Decode(msg) => msg.clone(),
        }
    }

    fn from_transport(err: &reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Client for the tracker's JSON API.
///
/// Cheap to share behind an `Arc`; the bearer token is interior-mutable so
/// login/logout can swap it without exclusive access to the client.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_base_url(&config.base_url, config.request_timeout())
    }

    /// Creates a client against an explicit base URL.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Installs the bearer token attached to all subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = token;
    }

    /// Returns the currently installed bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Issues a GET and decodes the body as arbitrary JSON.
    ///
    /// This is the generic request used by the store; typed wrappers below
    /// are preferred everywhere the shape is known.
    ///
    /// # Errors
    /// Returns an `ApiError` classifying the failure.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.get(path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut req = self.http.get(self.url(path));
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| ApiError::from_transport(&e))?;
        Self::decode(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut req = self.http.post(self.url(path)).json(body);
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| ApiError::from_transport(&e))?;
        Self::decode(resp).await
    }

    /// Decodes a response, classifying non-2xx statuses.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth {
                status: status.as_u16(),
                message: server_message(&bytes, status),
            });
        }

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: server_message(&bytes, status),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ========================================================================
    // Typed endpoints
    // ========================================================================

    /// GET /api/v1/tickets
    pub async fn tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.get("/api/v1/tickets").await
    }

    /// GET /api/v1/tickets?q=...
    pub async fn search_tickets(&self, query: &str) -> Result<Vec<Ticket>, ApiError> {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.get(&format!("/api/v1/tickets?q={encoded}")).await
    }

    /// GET /api/v1/tickets/{key}
    pub async fn ticket(&self, key: &str) -> Result<Ticket, ApiError> {
        self.get(&format!("/api/v1/tickets/{key}")).await
    }

    /// POST /api/v1/tickets
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ApiError> {
        self.post("/api/v1/tickets", ticket).await
    }

    /// GET /api/v1/projects
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/api/v1/projects").await
    }

    /// GET /api/v1/projects/{key}
    pub async fn project(&self, key: &str) -> Result<Project, ApiError> {
        self.get(&format!("/api/v1/projects/{key}")).await
    }

    /// GET /api/v1/users/{username}
    pub async fn user(&self, username: &str) -> Result<User, ApiError> {
        self.get(&format!("/api/v1/users/{username}")).await
    }

    /// POST /api/v1/users/sessions — exchanges credentials for a token.
    pub async fn create_session(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.post("/api/v1/users/sessions", &body).await
    }

    /// POST /api/v1/users — registers a new user, returning its first token.
    pub async fn register(&self, user: &NewUser) -> Result<TokenResponse, ApiError> {
        self.post("/api/v1/users", user).await
    }
}

/// Extracts the server's `{field, message}` payload, falling back to the
/// raw body or the status text.
fn server_message(bytes: &[u8], status: StatusCode) -> String {
    if let Ok(msg) = serde_json::from_slice::<ApiMessage>(bytes) {
        return msg.message;
    }

    let raw = String::from_utf8_lossy(bytes);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(&server.uri(), None).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "key": "TEST-1", "summary": "first" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let value = client.get_json("/api/v1/tickets").await.unwrap();
        assert_eq!(value[0]["key"], "TEST-1");
    }

    #[tokio::test]
    async fn test_bearer_header_attached_after_set_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tickets"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.set_token(Some("token-123".to_string()));
        client.tickets().await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tickets"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Unauthorized" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.tickets().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Auth {
                status: 401,
                message: "Unauthorized".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/MISSING"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "message": "not found" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.project("MISSING").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                message: "not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.tickets().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network() {
        // Nothing listens on this port; wiremock gave us a free one and we
        // shut it down immediately.
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = ApiClient::with_base_url(&uri, Some(Duration::from_secs(2))).unwrap();
        let err = client.tickets().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_create_session_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/users/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "token-123",
                "user": { "username": "foouser", "fullName": "Foo McFooson" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client.create_session("foouser", "hunter2").await.unwrap();
        assert_eq!(resp.token, "token-123");
        assert_eq!(resp.user.full_name, "Foo McFooson");
    }

    #[test]
    fn test_server_message_fallbacks() {
        assert_eq!(
            server_message(br#"{"message":"boom"}"#, StatusCode::INTERNAL_SERVER_ERROR),
            "boom"
        );
        assert_eq!(
            server_message(b"plain text", StatusCode::INTERNAL_SERVER_ERROR),
            "plain text"
        );
        assert_eq!(
            server_message(b"", StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }
}
