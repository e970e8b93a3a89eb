//! Typed client for the remote booking API.

pub mod client;
pub mod endpoints;
pub mod transport;

pub use client::ApiClient;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
