//! HTTP presentation layer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (router, middleware stack)
//!     → request.rs (request ID, per-endpoint metrics)
//!     → handlers.rs (call into the services held by AppState)
//!     → response.rs (error → status code + JSON body)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdMaker, X_REQUEST_ID};
pub use response::HttpError;
pub use server::{AppState, HttpServer};
