//! Wire types for the Nacos v1 open-api.
//!
//! This crate contains the serde-serializable types used for communication
//! with a Nacos server over its v1 HTTP dialect. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond (de)serialization and the
//!   [`ConfigType`] inference rule, which is wire-adjacent by contract
//! - **1:1 with the service**: Match the JSON bodies the console and
//!   config endpoints actually produce
//! - **Stable**: Changes only when the server dialect changes
//!
//! The client API is built on top of these types in `nacos-client`.

pub mod response;
pub mod types;

pub use response::*;
pub use types::*;
