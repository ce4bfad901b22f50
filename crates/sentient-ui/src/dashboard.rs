//! Dashboard HTML generation and embedding.
//!
//! The Sentient dashboard is a single self-contained HTML file with all CSS
//! and JavaScript inlined: the review input form, the analysis views
//! (executive summary, action areas, sentiment trend, word cloud), and the
//! floating chat widget.
//!
//! The HTML is embedded at compile time via `include_str!` so the binary has
//! no external file dependencies at runtime.

/// The complete self-contained dashboard HTML.
///
/// Zero external dependencies: no CDN links, no npm packages, no build step.
/// The page talks to the same-origin REST API (`/analyze`, `/analysis`,
/// `/chat/send`, `/chat/messages`, `/sample`).
///
/// # Usage
///
/// Serve this HTML from the `/ui` HTTP endpoint:
///
/// ```rust,ignore
/// use sentient_ui::dashboard::DASHBOARD_HTML;
///
/// async fn ui_handler() -> axum::response::Html<&'static str> {
///     axum::response::Html(DASHBOARD_HTML)
/// }
/// ```
pub const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_html_is_not_empty() {
        assert!(!DASHBOARD_HTML.is_empty());
    }

    #[test]
    fn dashboard_html_is_valid_html() {
        assert!(DASHBOARD_HTML.starts_with("<!DOCTYPE html>"));
        assert!(DASHBOARD_HTML.contains("<html"));
        assert!(DASHBOARD_HTML.contains("</html>"));
    }

    #[test]
    fn dashboard_html_contains_all_views() {
        assert!(DASHBOARD_HTML.contains("id=\"input-text\""));
        assert!(DASHBOARD_HTML.contains("id=\"analyze-btn\""));
        assert!(DASHBOARD_HTML.contains("id=\"summary-card\""));
        assert!(DASHBOARD_HTML.contains("id=\"trend-chart\""));
        assert!(DASHBOARD_HTML.contains("id=\"word-cloud\""));
        assert!(DASHBOARD_HTML.contains("id=\"chat-widget\""));
    }

    #[test]
    fn dashboard_html_has_no_external_resources() {
        assert!(!DASHBOARD_HTML.contains("https://cdn."));
        assert!(!DASHBOARD_HTML.contains("<link rel=\"stylesheet\" href=\"http"));
        assert!(!DASHBOARD_HTML.contains("<script src="));
    }

    #[test]
    fn dashboard_html_targets_local_api() {
        assert!(DASHBOARD_HTML.contains("/analyze"));
        assert!(DASHBOARD_HTML.contains("/chat/send"));
        assert!(DASHBOARD_HTML.contains("/sample"));
    }
}
