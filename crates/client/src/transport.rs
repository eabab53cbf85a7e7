//! Injectable HTTP transport seam.
//!
//! The client never talks to the network directly; it builds an
//! [`HttpRequest`] and hands it to an [`HttpTransport`]. The production
//! implementation wraps `reqwest::blocking`; tests substitute an in-memory
//! fake and script the responses.
//!
//! The transport is deliberately dumb: it reports the status and body of
//! whatever came back and fails only when no response arrived at all.
//! Mapping statuses to errors is the client's job - it needs to treat 404
//! differently per endpoint.

use std::fmt;

use thiserror::Error;

/// User-agent attached to every outbound request.
pub const USER_AGENT: &str = "nacosctl";

/// HTTP methods the v1 dialect uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully resolved outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    /// Extra headers beyond the transport's own defaults.
    pub headers: Vec<(&'static str, String)>,
    /// Form-encoded body (`application/x-www-form-urlencoded`), if any.
    pub form: Option<Vec<(String, String)>>,
}

/// Status and raw body of a response that did arrive.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to complete the request/response cycle: DNS, connect, TLS,
/// timeout, or a broken body read. Distinct from any HTTP status.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// The request/response collaborator the client is built against.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Production transport over `reqwest::blocking`.
///
/// Every call blocks until the response body is fully read; timeouts are
/// whatever reqwest defaults to unless the builder is given one.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> std::result::Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder
            .send()
            .map_err(|err| TransportError(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_the_2xx_range() {
        for status in [200, 201, 204, 299] {
            let response = HttpResponse {
                status,
                body: String::new(),
            };
            assert!(response.is_success(), "{status} should be success");
        }
        for status in [199, 301, 404, 500] {
            let response = HttpResponse {
                status,
                body: String::new(),
            };
            assert!(!response.is_success(), "{status} should not be success");
        }
    }
}
