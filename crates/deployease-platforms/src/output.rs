//! Scraping vendor CLI output

use std::sync::OnceLock;

use deployease_core::ExecOutput;
use regex::Regex;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)https?://[^\s)]+").expect("valid URL pattern"))
}

/// First `http(s)://` URL in `text`, if any
pub fn extract_url(text: &str) -> Option<String> {
    url_pattern().find(text).map(|m| m.as_str().to_string())
}

/// First URL printed by a command, stdout before stderr
pub fn deployed_url(output: &ExecOutput) -> Option<String> {
    extract_url(&output.combined())
}
