//! Prompt construction for the analysis request.
//!
//! The raw review text is embedded into a fixed instruction preamble after
//! being truncated to a bounded prefix. Truncation respects char boundaries
//! and is logged; the boundary is not word- or sentence-aligned.

use tracing::warn;

/// Bundled sample reviews for quick testing of the dashboard.
pub const SAMPLE_REVIEWS: &str = r#"Oct 1: "The new update is fantastic! The UI is much cleaner."
Oct 2: "I'm having trouble logging in since the patch. Support is unresponsive."
Oct 3: "Love the speed improvements, but the dark mode contrast is off."
Oct 4: "Terrible experience. The app crashes every time I open the settings."
Oct 5: "Great customer service! Jane helped me resolve my billing issue immediately."
Oct 6: "The product is good, but the shipping was delayed by a week."
Oct 7: "Absolutely love it. Best investment for my workflow this year."
Oct 8: "Why did you remove the export feature? This is a dealbreaker."
Oct 9: "Smooth experience overall, but I wish there were more tutorials."
Oct 10: "Can't recommend enough. The team really listens to feedback.""#;

const INSTRUCTION: &str = "Analyze the following customer reviews. \
You need to identify the sentiment trend over the text (assuming chronological order if not specified), \
extract the most frequent praise and complaint keywords for a word cloud, \
and write a professional executive summary.";

/// Build the full analysis prompt, bounding the review text to
/// `max_input_chars` characters.
pub fn build_prompt(reviews: &str, max_input_chars: usize) -> String {
    let bounded = truncate_chars(reviews, max_input_chars);
    if bounded.len() < reviews.len() {
        warn!(
            original_chars = reviews.chars().count(),
            kept_chars = max_input_chars,
            "Review input truncated to respect provider limits"
        );
    }
    format!("{INSTRUCTION}\n\nReviews:\n{bounded}")
}

/// Take a prefix of at most `max_chars` characters, never splitting a char.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_reviews_fixture_shape() {
        let lines: Vec<&str> = SAMPLE_REVIEWS.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Oct 1:"));
        assert!(lines[9].starts_with("Oct 10:"));
    }

    #[test]
    fn test_build_prompt_embeds_reviews() {
        let prompt = build_prompt("Great product!", 50_000);
        assert!(prompt.starts_with("Analyze the following customer reviews."));
        assert!(prompt.contains("Reviews:\nGreat product!"));
    }

    #[test]
    fn test_build_prompt_truncates_long_input() {
        let long = "x".repeat(200);
        let prompt = build_prompt(&long, 100);
        assert!(prompt.ends_with(&"x".repeat(100)));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("hello", 100), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_chars_exact_boundary() {
        assert_eq!(truncate_chars("hello", 4), "hell");
        assert_eq!(truncate_chars("hello", 0), "");
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        // Each char is multi-byte; a byte-indexed slice would panic.
        let text = "héllo wörld émoji 🎉🎉🎉";
        let kept = truncate_chars(text, 7);
        assert_eq!(kept.chars().count(), 7);
        assert_eq!(kept, "héllo w");

        let kept = truncate_chars("🎉🎉🎉", 2);
        assert_eq!(kept, "🎉🎉");
    }
}
