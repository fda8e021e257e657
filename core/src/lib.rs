//! Blocking client for the tukui.org addon API.
//!
//! # Overview
//! The API exposes addon metadata for two catalogs, retail and classic,
//! through GET requests on a single endpoint with exactly one query
//! parameter. `Client` owns both catalogs; each `AddonClient` offers the same
//! four lookups (one addon, all addons, main TukUI, main ElvUI).
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`).
//!   Only a `Transport` touches the network; `UreqTransport` is the default
//!   and any pooled client can be plugged in instead.
//! - Every success returns the raw response next to the decoded payload
//!   (`ApiResponse`), and errors raised after a response arrived carry it.
//! - `Addon` fields are all `Option<String>`. The main UI endpoints send
//!   numeric `id`/`downloads`; those are canonicalized to decimal strings
//!   while decoding so callers only ever see one record shape.
//! - The library logs through `tracing` and never installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{decode, AddonClient, ApiResponse, Client, ClientBuilder, Flavor};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use types::Addon;
