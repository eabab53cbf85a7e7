//! Routing table for the v1 open-api.
//!
//! The service is inconsistent about where it expects the access token:
//! the config CRUD endpoints read a standard `Authorization: Bearer` header,
//! the console endpoints read a raw `accessToken` header, and the config
//! search endpoint wants the token in the query string as well. That is a
//! property of the remote service, not a choice - it is captured here as a
//! table so no call site grows its own conditionals.

use crate::transport::Method;

/// Where an endpoint expects the access token, when one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    /// Unauthenticated endpoint (login itself).
    None,
    /// `Authorization: Bearer <token>` request header.
    Bearer,
    /// Raw `accessToken` request header, the console convention.
    Header,
    /// `accessToken` header plus an `accessToken` query parameter.
    HeaderAndQuery,
}

/// Static description of one service endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub token: TokenPlacement,
}

pub const LOGIN: Endpoint = Endpoint {
    method: Method::Post,
    path: "/nacos/v1/auth/users/login",
    token: TokenPlacement::None,
};

pub const GET_CONFIG: Endpoint = Endpoint {
    method: Method::Get,
    path: "/nacos/v1/cs/configs",
    token: TokenPlacement::Bearer,
};

pub const PUBLISH_CONFIG: Endpoint = Endpoint {
    method: Method::Post,
    path: "/nacos/v1/cs/configs",
    token: TokenPlacement::Bearer,
};

pub const DELETE_CONFIG: Endpoint = Endpoint {
    method: Method::Delete,
    path: "/nacos/v1/cs/configs",
    token: TokenPlacement::Bearer,
};

pub const LIST_CONFIGS: Endpoint = Endpoint {
    method: Method::Get,
    path: "/nacos/v1/cs/configs",
    token: TokenPlacement::HeaderAndQuery,
};

pub const LIST_NAMESPACES: Endpoint = Endpoint {
    method: Method::Get,
    path: "/nacos/v1/console/namespaces",
    token: TokenPlacement::Header,
};

pub const CREATE_NAMESPACE: Endpoint = Endpoint {
    method: Method::Post,
    path: "/nacos/v1/console/namespaces",
    token: TokenPlacement::Header,
};

pub const DELETE_NAMESPACE: Endpoint = Endpoint {
    method: Method::Delete,
    path: "/nacos/v1/console/namespaces",
    token: TokenPlacement::Header,
};
