//! Site pages and layout.

use std::fmt;

use axum::extract::Path;
use axum::routing::get;
use hxpage_ui::{Layout, Markup, Metatags, NamedRouter, RenderError, RenderedPage, Request};
use rinja::Template;

/// All site pages, registered by name.
pub fn site_router() -> NamedRouter {
    NamedRouter::new()
        .route("home", "/", get(home))
        .route("about", "/about", get(about))
        .route("user", "/users/{id}", get(user))
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

struct NavLink {
    href: String,
    label: &'static str,
    active: bool,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ request.title }} | {{ request.app_name() }}</title>
<meta name="description" content="{{ request.metatags.description }}">
<meta name="keywords" content="{{ keywords }}">
<script src="https://unpkg.com/htmx.org@2.0.4"></script>
</head>
<body hx-boost="true">
<nav>{% for link in nav %}<a href="{{ link.href }}"{% if link.active %} class="active"{% endif %}>{{ link.label }}</a>{% endfor %}<span class="user">{{ user_label }}</span></nav>
{% if !request.msg.is_empty() %}<div class="msg">{{ request.msg }}</div>{% endif %}
<main id="main">{{ content|safe }}</main>
<form method="post" action="/logout"><input type="hidden" name="csrf" value="{{ request.csrf }}"></form>
</body>
</html>"#
)]
struct PageTemplate<'a> {
    request: &'a Request,
    content: Markup,
    nav: Vec<NavLink>,
    keywords: String,
    user_label: String,
}

/// The site-wide document around every full page.
pub struct SiteLayout;

impl Layout for SiteLayout {
    fn render_page(
        &self,
        request: &Request,
        content: Markup,
        out: &mut dyn fmt::Write,
    ) -> Result<(), RenderError> {
        let nav = [("home", "Home"), ("about", "About")]
            .into_iter()
            .map(|(name, label)| {
                let href = request.path(name, &[]);
                NavLink {
                    active: request.is_active(&href),
                    href,
                    label,
                }
            })
            .collect();

        let user_label = match &request.auth_user {
            Some(user) if request.is_admin => format!("{} (admin)", user.name),
            Some(user) => user.name.clone(),
            None => "Guest".to_string(),
        };

        let page = PageTemplate {
            request,
            content,
            nav,
            keywords: request.metatags.keywords.join(", "),
            user_label,
        };
        page.render_into(out)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pages
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"<h1>Welcome{% if !name.is_empty() %}, {{ name }}{% endif %}</h1>
<p>Load the <a hx-get="{{ about_href }}" hx-target="#main" hx-push-url="true">about page</a> in place.</p>"##
)]
struct HomePage {
    name: String,
    about_href: String,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<h1>About</h1>
<p>Pages render as full documents, or as fragments when HTMX asks for one.</p>"#
)]
struct AboutPage;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<h1>User {{ id }}</h1>
<p><a href="{{ home_href }}">Back home</a></p>"#
)]
struct UserPage {
    id: u64,
    home_href: String,
}

async fn home(req: Request) -> Result<RenderedPage, RenderError> {
    let req = req.with_title("Home").with_metatags(Metatags {
        description: "Home page".into(),
        keywords: vec!["home".into(), "htmx".into()],
    });
    let page = HomePage {
        name: req.auth_user.as_ref().map(|u| u.name.clone()).unwrap_or_default(),
        about_href: req.path("about", &[]),
    };
    req.render(Some(&SiteLayout), &page)
}

async fn about(req: Request) -> Result<RenderedPage, RenderError> {
    let req = req.with_title("About");
    req.render(Some(&SiteLayout), &AboutPage)
}

async fn user(req: Request, Path(id): Path<u64>) -> Result<RenderedPage, RenderError> {
    let req = req.with_title(format!("User {id}"));
    let page = UserPage {
        id,
        home_href: req.path("home", &[]),
    };
    req.render(Some(&SiteLayout), &page)
}
