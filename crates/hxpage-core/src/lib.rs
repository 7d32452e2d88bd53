//! hxpage core types
//!
//! Types shared by every layer of a page server: the application
//! configuration, the authenticated-user record that upstream middleware
//! stores on a request, the CSRF token, and the configuration error type.

pub mod config;
pub mod error;
pub mod user;

pub use config::{AppConfig, Config, Environment, HttpConfig};
pub use error::ConfigError;
pub use user::{AuthUser, CsrfToken};
