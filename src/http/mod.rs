//! HTTP module
//!
//! The client never talks to the network directly. Every round trip goes
//! through a [`Transport`], which makes the network swappable for a scripted
//! fake in tests.
//!
//! # Features
//!
//! - **Transport seam**: `Transport` trait taking a prepared `reqwest::Request`
//! - **Default transport**: `ReqwestTransport`, cancellation-aware
//! - **Request construction**: bearer auth, JSON content type, query params

mod request;
mod transport;

pub use request::build_request;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportConfig};
