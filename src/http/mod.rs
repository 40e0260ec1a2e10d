//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate x-request-id)
//!     → server.rs dispatch (route table lookup, bind Params)
//!     → handler.rs (BoxHandler reads Params from extensions)
//!     → Send response, or 404 when nothing matched
//! ```

pub mod handler;
pub mod request;
pub mod server;

pub use handler::{handler_fn, params, BoxHandler};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
