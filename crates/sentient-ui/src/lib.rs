//! Sentient UI crate - the embedded browser dashboard.
//!
//! The presentation layer is a single self-contained HTML file served from
//! the `/ui` endpoint. All state lives server-side; the page is a thin view
//! over the REST API.

pub mod dashboard;

pub use dashboard::DASHBOARD_HTML;
