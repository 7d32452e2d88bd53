//! Rendering primitives.
//!
//! A [`Component`] writes an HTML fragment. A [`Layout`] wraps already
//! rendered content in the surrounding document. [`Request::render`]
//! decides which of the two a response gets.
//!
//! [`Request::render`]: crate::Request::render

use std::fmt;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::request::Request;

/// Something that renders to HTML.
///
/// Every `rinja` template is a component.
pub trait Component {
    fn write_html(&self, out: &mut dyn fmt::Write) -> Result<(), RenderError>;
}

impl<T: rinja::Template> Component for T {
    fn write_html(&self, out: &mut dyn fmt::Write) -> Result<(), RenderError> {
        self.render_into(out)?;
        Ok(())
    }
}

/// Wraps page content in the site's full document.
pub trait Layout: Send + Sync {
    fn render_page(
        &self,
        request: &Request,
        content: Markup,
        out: &mut dyn fmt::Write,
    ) -> Result<(), RenderError>;
}

/// Trusted, already rendered HTML. Written out verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Render a component into a markup buffer.
    pub fn render<C: Component + ?Sized>(component: &C) -> Result<Self, RenderError> {
        let mut html = String::new();
        component.write_html(&mut html)?;
        Ok(Self(html))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Component for Markup {
    fn write_html(&self, out: &mut dyn fmt::Write) -> Result<(), RenderError> {
        out.write_str(&self.0)?;
        Ok(())
    }
}

/// The outcome of [`Request::render`](crate::Request::render).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    /// True when only the fragment was rendered for an HTMX swap
    pub partial: bool,
}

impl IntoResponse for RenderedPage {
    fn into_response(self) -> Response {
        let mut response = Html(self.html).into_response();
        // Fragment and full page share a URL; caches must key on the header.
        response
            .headers_mut()
            .insert(header::VARY, HeaderValue::from_static("HX-Request"));
        response
    }
}

/// Rendering failures. Propagated to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] rinja::Error),

    #[error("failed to write rendered output")]
    Write(#[from] fmt::Error),
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        error!("Page render failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
