//! Plugin file header parsing.
//!
//! A plugin declares its metadata in a comment block near the top of its
//! main file:
//!
//! ```text
//! /*
//!  * Plugin Name: Hello Dolly
//!  * Version: 1.6
//!  */
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;

use plugboard_catalog::RawPluginRecord;
use plugboard_catalog::raw::fields;
use regex::Regex;

/// Only this much of a file is inspected for headers.
pub const MAX_HEADER_BYTES: u64 = 8 * 1024;

/// Record key → header label as written in plugin files.
const PLUGIN_HEADERS: [(&str, &str); 9] = [
    (fields::NAME, "Plugin Name"),
    (fields::PLUGIN_URI, "Plugin URI"),
    (fields::VERSION, "Version"),
    (fields::DESCRIPTION, "Description"),
    (fields::AUTHOR, "Author"),
    (fields::AUTHOR_URI, "Author URI"),
    (fields::TEXT_DOMAIN, "Text Domain"),
    (fields::DOMAIN_PATH, "Domain Path"),
    (fields::NETWORK, "Network"),
];

/// Pre-network-era spelling of `Network`.
const SITE_WIDE_ONLY: &str = "Site Wide Only";

static HEADER_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PLUGIN_HEADERS
        .iter()
        .map(|(key, label)| (*key, header_regex(label)))
        .collect()
});

static SITE_WIDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| header_regex(SITE_WIDE_ONLY));

static COMMENT_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:\*/|\?>).*").expect("static regex"));

fn header_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?mi)^(?:[ \t]*<\?php)?[ \t/*#@]*{}:(.*)$",
        regex::escape(label)
    ))
    .expect("header labels are literal")
}

fn header_value(pattern: &Regex, source: &str) -> String {
    pattern
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| COMMENT_TAIL.replace(m.as_str(), "").trim().to_string())
        .unwrap_or_default()
}

/// Parse every known header out of `source`. Missing headers are `""`;
/// `Network` becomes a flag.
pub fn parse_plugin_headers(source: &str) -> RawPluginRecord {
    let source = source.replace('\r', "\n");
    let mut record = RawPluginRecord::new();

    for (key, pattern) in HEADER_PATTERNS.iter() {
        let value = header_value(pattern, &source);
        if *key == fields::NETWORK {
            let network = value.eq_ignore_ascii_case("true")
                || header_value(&SITE_WIDE_PATTERN, &source).eq_ignore_ascii_case("true");
            record.insert(*key, network);
        } else {
            record.insert(*key, value);
        }
    }

    record
}

/// Read the header block of the file at `path`.
pub fn read_plugin_file(path: &Path) -> io::Result<RawPluginRecord> {
    let mut head = Vec::new();
    File::open(path)?
        .take(MAX_HEADER_BYTES)
        .read_to_end(&mut head)?;

    Ok(parse_plugin_headers(&String::from_utf8_lossy(&head)))
}
