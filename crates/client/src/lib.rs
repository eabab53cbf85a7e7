//! Synchronous client for the Nacos v1 open-api.
//!
//! Three layers, leaves first:
//!
//! - [`Session`]: credentials, the bearer token, and its absolute expiry.
//!   Knows whether a (possibly persisted) token is still usable.
//! - [`Client`]: the configuration-exchange protocol - config CRUD and
//!   namespace CRUD, each one blocking request/response cycle, with the
//!   token attached per the [`endpoints`] placement table.
//! - [`transfer`]: the bulk codec - entries to/from `group@dataId` files
//!   with metadata-comment framing, plus best-effort batch loops.
//!
//! The HTTP layer is an injectable collaborator ([`transport::HttpTransport`]);
//! production code uses the blocking reqwest implementation, tests script an
//! in-memory fake. There is no async runtime anywhere: every call completes
//! or fails before the next statement runs.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod session;
pub mod transfer;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use error::{Error, Result};
pub use session::Session;
pub use transfer::{BatchFailure, BatchReport};
pub use transport::{HttpTransport, ReqwestTransport};

pub use nacos_protocol as protocol;
