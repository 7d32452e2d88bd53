//! Page context — per-request state handed to handlers and templates.
//!
//! A [`Request`] is built once per HTTP request from the request head. It
//! copies out what upstream middleware stored in the request's extensions
//! and what the HTMX client sent in its headers:
//!
//! | Source                         | Field                      |
//! |--------------------------------|----------------------------|
//! | `AuthUser` extension           | `auth_user`, `is_auth`, `is_admin` |
//! | `Arc<Config>` extension        | `config`                   |
//! | `CsrfToken` extension          | `csrf`                     |
//! | `Arc<Routes>` extension        | used by [`Request::path`]  |
//! | `HX-*` headers                 | `htmx`                     |
//!
//! Extensions are keyed by type, so a value stored under the wrong type is
//! indistinguishable from a missing one.

use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, Uri};
use hxpage_core::{AuthUser, Config, CsrfToken};
use tracing::{debug, warn};

use crate::render::{Component, Layout, Markup, RenderError, RenderedPage};
use crate::routes::Routes;

pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
pub const HX_BOOSTED: HeaderName = HeaderName::from_static("hx-boosted");
pub const HX_TARGET: HeaderName = HeaderName::from_static("hx-target");
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// HTMX request state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Htmx {
    /// The request was issued by HTMX (`HX-Request: true`)
    pub enabled: bool,
    /// The request came from an `hx-boost`ed link or form
    pub boosted: bool,
    /// `id` of the target element, if any
    pub target: String,
    /// `id` of the triggering element, if any
    pub trigger: String,
}

impl Htmx {
    /// Read the HTMX headers. Unless `HX-Request` is exactly `true`, every
    /// other HTMX header is ignored.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if header_str(headers, &HX_REQUEST) != Some("true") {
            return Self::default();
        }

        Self {
            enabled: true,
            boosted: header_str(headers, &HX_BOOSTED) == Some("true"),
            target: header_str(headers, &HX_TARGET).unwrap_or_default().to_string(),
            trigger: header_str(headers, &HX_TRIGGER).unwrap_or_default().to_string(),
        }
    }

    /// Whether the client wants a fragment instead of a full page.
    pub fn is_partial(&self) -> bool {
        self.enabled && !self.boosted
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Page metadata rendered into the document head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metatags {
    pub description: String,
    pub keywords: Vec<String>,
}

/// Context for the current page request.
#[derive(Debug, Clone)]
pub struct Request {
    pub config: Option<Arc<Config>>,
    pub uri: Uri,
    pub current_path: String,
    pub is_auth: bool,
    pub is_admin: bool,
    pub auth_user: Option<AuthUser>,
    /// Message for the page (e.g. a form result)
    pub msg: String,
    pub title: String,
    pub metatags: Metatags,
    pub csrf: String,
    pub htmx: Htmx,
    routes: Option<Arc<Routes>>,
}

impl Request {
    /// Build the page context from a request head.
    pub fn from_parts(parts: &Parts) -> Self {
        let auth_user = parts.extensions.get::<AuthUser>().cloned();
        let is_auth = auth_user.is_some();
        let is_admin = auth_user.as_ref().is_some_and(|user| user.admin);

        let config = parts.extensions.get::<Arc<Config>>().cloned();
        let csrf = parts
            .extensions
            .get::<CsrfToken>()
            .map(|token| token.0.clone())
            .unwrap_or_default();
        let routes = parts.extensions.get::<Arc<Routes>>().cloned();

        let htmx = Htmx::from_headers(&parts.headers);

        debug!(
            path = parts.uri.path(),
            is_auth,
            htmx = htmx.enabled,
            boosted = htmx.boosted,
            "Page context built"
        );

        Self {
            config,
            uri: parts.uri.clone(),
            current_path: parts.uri.path().to_string(),
            is_auth,
            is_admin,
            auth_user,
            msg: String::new(),
            title: String::new(),
            metatags: Metatags::default(),
            csrf,
            htmx,
            routes,
        }
    }

    /// Path for the named route with `params` substituted into its
    /// placeholders. Unknown names produce an empty string.
    pub fn path(&self, name: &str, params: &[&dyn Display]) -> String {
        match self.routes.as_deref().and_then(|routes| routes.reverse(name, params)) {
            Some(path) => path,
            None => {
                warn!("Cannot reverse unknown route '{name}'");
                String::new()
            }
        }
    }

    /// Whether `path` is the path of the current request. Exact match only.
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }

    /// Application name from the config, or an empty string without one.
    pub fn app_name(&self) -> &str {
        self.config
            .as_deref()
            .map(|config| config.app.name.as_str())
            .unwrap_or_default()
    }

    /// Render `component` as a response body.
    ///
    /// Non-boosted HTMX requests get the bare component. Everything else gets
    /// the component wrapped in `layout`, or the bare component when there is
    /// no layout.
    pub fn render<C>(&self, layout: Option<&dyn Layout>, component: &C) -> Result<RenderedPage, RenderError>
    where
        C: Component + ?Sized,
    {
        let mut html = String::new();

        if self.htmx.is_partial() {
            debug!(
                path = %self.current_path,
                target = %self.htmx.target,
                trigger = %self.htmx.trigger,
                "Rendering partial"
            );
            component.write_html(&mut html)?;
            return Ok(RenderedPage { html, partial: true });
        }

        match layout {
            Some(layout) => {
                let content = Markup::render(component)?;
                layout.render_page(self, content, &mut html)?;
            }
            None => component.write_html(&mut html)?,
        }

        Ok(RenderedPage { html, partial: false })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    pub fn with_metatags(mut self, metatags: Metatags) -> Self {
        self.metatags = metatags;
        self
    }
}

impl<S> FromRequestParts<S> for Request
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
