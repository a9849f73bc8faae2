//! Transport-agnostic request dispatcher.
//!
//! [`YggdrasilServer`] maps `(method, path, query, body)` onto the engine
//! and turns every outcome into a status code plus an optional JSON body.
//! Any HTTP framework can sit in front of it by converting its own request
//! type into a [`Request`] and writing the [`Response`] back out.

use crate::engine::ProtocolEngine;
use crate::error::YggdrasilError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};
use ygg_protocol::{to_unsigned, ErrorEnvelope, HasJoinedQuery, ProfileQuery, TextureType};

const PROFILE_PREFIX: &str = "/sessionserver/session/minecraft/profile/";
const TEXTURE_PREFIX: &str = "/api/user/profile/";

/// Request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported method: {other}")),
        }
    }
}

/// An incoming request, already split by the transport.
///
/// Query values are expected to be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method.
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    /// Decoded query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Raw body, if any.
    pub body: Option<String>,
}

impl Request {
    /// Creates a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a `POST` request with a body.
    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Creates a `POST` request with a serialized JSON body.
    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> serde_json::Result<Self> {
        Ok(Self::post(path, serde_json::to_string(body)?))
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An outgoing response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP-style status code.
    pub status: u16,
    /// JSON body; absent for 204.
    pub body: Option<Value>,
}

impl Response {
    /// A `204 No Content` response.
    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// A `200 OK` response with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    /// An error response carrying an envelope.
    pub fn error(status: u16, envelope: &ErrorEnvelope) -> Self {
        Self {
            status,
            body: serde_json::to_value(envelope).ok(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        self.body
            .clone()
            .and_then(|body| serde_json::from_value(body).ok())
    }

    /// Decodes the body as an error envelope.
    pub fn envelope(&self) -> Option<ErrorEnvelope> {
        self.json()
    }
}

impl From<YggdrasilError> for Response {
    fn from(err: YggdrasilError) -> Self {
        Self::error(err.status(), &ErrorEnvelope::new(err.kind(), err.message()))
    }
}

type Outcome = Result<Response, Response>;

/// The Yggdrasil API surface.
pub struct YggdrasilServer {
    engine: ProtocolEngine,
}

impl YggdrasilServer {
    /// Wraps an engine.
    pub fn new(engine: ProtocolEngine) -> Self {
        Self { engine }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &ProtocolEngine {
        &self.engine
    }

    /// Handles one request.
    pub fn handle(&self, request: &Request) -> Response {
        debug!(method = ?request.method, path = %request.path, "dispatch");
        match self.route(request) {
            Ok(response) | Err(response) => response,
        }
    }

    fn route(&self, request: &Request) -> Outcome {
        let path = request.path.as_str();
        let method = request.method;

        match path {
            "/" => {
                expect_method(method, Method::Get)?;
                json_ok(&self.engine.metadata())
            }
            "/authserver/authenticate" => {
                expect_method(method, Method::Post)?;
                let response = self.engine.authenticate(parse_body(request)?)?;
                json_ok(&response)
            }
            "/authserver/refresh" => {
                expect_method(method, Method::Post)?;
                let response = self.engine.refresh(parse_body(request)?)?;
                json_ok(&response)
            }
            "/authserver/validate" => {
                expect_method(method, Method::Post)?;
                self.engine.validate(parse_body(request)?)?;
                Ok(Response::no_content())
            }
            "/authserver/invalidate" => {
                expect_method(method, Method::Post)?;
                self.engine.invalidate(parse_body(request)?)?;
                Ok(Response::no_content())
            }
            "/authserver/signout" => {
                expect_method(method, Method::Post)?;
                self.engine.signout(parse_body(request)?)?;
                Ok(Response::no_content())
            }
            "/sessionserver/session/minecraft/join" => {
                expect_method(method, Method::Post)?;
                self.engine.join(parse_body(request)?)?;
                Ok(Response::no_content())
            }
            "/sessionserver/session/minecraft/hasJoined" => {
                expect_method(method, Method::Get)?;
                Ok(self.has_joined(request))
            }
            "/api/profiles/minecraft" => {
                expect_method(method, Method::Post)?;
                let names: Vec<String> = parse_body(request)?;
                json_ok(&self.engine.profiles_by_name(&names)?)
            }
            _ => self.route_prefixed(request),
        }
    }

    fn route_prefixed(&self, request: &Request) -> Outcome {
        let path = request.path.as_str();

        if let Some(uuid) = path.strip_prefix(PROFILE_PREFIX) {
            if uuid.is_empty() || uuid.contains('/') {
                return Err(not_found());
            }
            expect_method(request.method, Method::Get)?;
            let uuid = to_unsigned(uuid).unwrap_or_else(|| uuid.to_string());
            let mut query = ProfileQuery::new(uuid);
            if request.query_param("unsigned") == Some("false") {
                query = query.signed();
            }
            return json_ok(&self.engine.profile_by_uuid(query)?);
        }

        if let Some(rest) = path.strip_prefix(TEXTURE_PREFIX) {
            let Some((uuid, texture_type)) = rest.split_once('/') else {
                return Err(not_found());
            };
            if uuid.is_empty() || texture_type.parse::<TextureType>().is_err() {
                return Err(not_found());
            }
            return match request.method {
                Method::Put | Method::Delete => Err(Response::error(
                    501,
                    &ErrorEnvelope::new("Not Implemented", "Texture uploads are not supported."),
                )),
                _ => Err(method_not_allowed()),
            };
        }

        Err(not_found())
    }

    fn has_joined(&self, request: &Request) -> Response {
        let (Some(username), Some(server_id)) = (
            request.query_param("username"),
            request.query_param("serverId"),
        ) else {
            return Response::no_content();
        };

        let query = HasJoinedQuery {
            username: username.to_string(),
            server_id: server_id.to_string(),
            ip: request.query_param("ip").map(str::to_string),
        };
        match self.engine.has_joined(query) {
            Some(profile) => match serde_json::to_value(&profile) {
                Ok(body) => Response::ok(body),
                Err(e) => {
                    error!(error = %e, "failed to encode hasJoined profile");
                    Response::no_content()
                }
            },
            None => Response::no_content(),
        }
    }
}

fn expect_method(actual: Method, expected: Method) -> Result<(), Response> {
    if actual == expected {
        Ok(())
    } else {
        Err(method_not_allowed())
    }
}

fn parse_body<T: DeserializeOwned>(request: &Request) -> Result<T, Response> {
    let body = request.body.as_deref().unwrap_or_default();
    serde_json::from_str(body).map_err(|e| {
        debug!(path = %request.path, error = %e, "rejected request body");
        Response::error(
            400,
            &ErrorEnvelope::new("IllegalArgumentException", "Invalid request body.")
                .with_cause(e.to_string()),
        )
    })
}

fn json_ok<T: Serialize>(value: &T) -> Outcome {
    serde_json::to_value(value).map(Response::ok).map_err(|e| {
        error!(error = %e, "failed to encode response");
        Response::from(YggdrasilError::internal())
    })
}

fn not_found() -> Response {
    Response::error(404, &ErrorEnvelope::new("Not Found", "The requested resource was not found."))
}

fn method_not_allowed() -> Response {
    Response::error(
        405,
        &ErrorEnvelope::new("Method Not Allowed", "The method is not allowed for this resource."),
    )
}
