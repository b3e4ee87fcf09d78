//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - CLI mode (link and config management without a running server)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
