//! Markup removal for free-text plugin metadata.
//!
//! Plugin headers are attacker-influenceable (any installed plugin can put
//! arbitrary markup in its author or description), so every text field is
//! stripped before it leaves the service.

use std::sync::LazyLock;

use regex::Regex;

/// Text sanitizer port.
pub trait Sanitizer: Send + Sync {
    fn strip_markup(&self, input: &str) -> String;
}

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script>|<style[^>]*?>.*?</style>")
        .expect("static regex")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|$)").expect("static regex"));

// A tag opens with `<` followed by a non-space; an unterminated tag runs to
// the end of the input.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^\s][^>]*(?:>|$)").expect("static regex"));

/// Removes script/style blocks with their content, comments and all tags,
/// then trims surrounding whitespace. A bare `<` followed by whitespace is
/// kept as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagStripper;

impl Sanitizer for TagStripper {
    fn strip_markup(&self, input: &str) -> String {
        if !input.contains('<') {
            return trim(input).to_string();
        }

        let without_blocks = SCRIPT_OR_STYLE.replace_all(input, "");
        let without_comments = COMMENT.replace_all(&without_blocks, "");
        let without_tags = TAG.replace_all(&without_comments, "");
        trim(&without_tags).to_string()
    }
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}
