//! Console Client - HTTP client for the delivery console back office
//!
//! Provides typed REST calls for the reference data the order composer
//! needs: subscription credits, price list entries, and product details.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::ApiResponse;
