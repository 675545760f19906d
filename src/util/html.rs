//! HTML escaping for text interpolated into dialog markup.

#[cfg(test)]
#[path = "html_test.rs"]
mod html_test;

/// Escape `& < > " '` so `raw` renders as literal text inside markup.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
