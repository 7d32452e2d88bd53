//! hxpage UI layer
//!
//! Builds a [`Request`] page context for every HTTP request and renders
//! pages through it. The context reads what upstream middleware left in the
//! request's extensions (authenticated user, CSRF token, config, route
//! registry) together with the HTMX request headers, and picks between a
//! full layout and a bare fragment when rendering.

pub mod render;
pub mod request;
pub mod routes;

pub use render::{Component, Layout, Markup, RenderError, RenderedPage};
pub use request::{Htmx, Metatags, Request};
pub use routes::{NamedRouter, Routes};
