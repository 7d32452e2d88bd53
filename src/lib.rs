//! hxpage — a server-rendered site with HTMX-aware page rendering.
//!
//! The binary serves the pages in [`pages`] through
//! [`hxpage_transport::PageServer`].

pub mod dev;
pub mod pages;
