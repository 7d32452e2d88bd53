//! hxpage HTTP transport
//!
//! Serves a [`NamedRouter`](hxpage_ui::NamedRouter) over HTTP. The transport
//! handles:
//! - Binding and graceful shutdown
//! - Installing the shared `Config` and route registry on every request
//! - Per-request tracing spans
//! - The `/health` endpoint

pub mod server;

pub use server::{PageServer, ServeError, build_app};
