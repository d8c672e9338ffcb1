//! Lifecycle management for the demo server.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → latch set → server stops accepting → drain → exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
