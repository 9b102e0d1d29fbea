//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, static path dispatch)
//!     → middleware/logging.rs (client ip, final status)   [/hello only]
//!         → client_ip.rs (X-Real-IP / forwarding chain / peer address)
//!         → response.rs (captured status)
//!     → handlers.rs (healthz, hello)
//!     → Send to client
//! ```

pub mod client_ip;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use client_ip::{resolve_client_ip, ClientIpError};
pub use response::CapturedResponse;
pub use server::{AppState, HttpServer, RunningServer, ServerError};
