//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build route table → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → server stops accepting → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
