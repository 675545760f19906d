//! Single-step CSS selectors for the in-memory page.
//!
//! The browser evaluates selectors natively; the in-memory tree only needs
//! the forms the widgets actually use: `#id`, `.class`, `[attr]`,
//! `[attr="value"]`, and a bare tag name.

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

/// A parsed simple selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Attr { name: String, value: Option<String> },
    Tag(String),
}

impl Selector {
    /// Parse `raw`, returning `None` for anything outside the supported subset.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(id) = raw.strip_prefix('#') {
            return is_ident(id).then(|| Self::Id(id.to_owned()));
        }
        if let Some(class) = raw.strip_prefix('.') {
            return is_ident(class).then(|| Self::Class(class.to_owned()));
        }
        if let Some(body) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            return parse_attr(body);
        }
        (is_ident(raw) && !raw.starts_with('-')).then(|| Self::Tag(raw.to_ascii_lowercase()))
    }

    /// Match against an element described by its tag and attribute lookup.
    pub fn matches<'a>(&self, tag: &str, attr: impl Fn(&str) -> Option<&'a str>) -> bool {
        match self {
            Self::Id(id) => attr("id") == Some(id.as_str()),
            Self::Class(class) => attr("class").is_some_and(|list| list.split_whitespace().any(|c| c == class)),
            Self::Attr { name, value: None } => attr(name).is_some(),
            Self::Attr { name, value: Some(value) } => attr(name) == Some(value.as_str()),
            Self::Tag(expected) => tag.eq_ignore_ascii_case(expected),
        }
    }
}

fn parse_attr(body: &str) -> Option<Selector> {
    let Some((name, value)) = body.split_once('=') else {
        let name = body.trim();
        return is_ident(name).then(|| Selector::Attr { name: name.to_owned(), value: None });
    };
    let name = name.trim();
    if !is_ident(name) {
        return None;
    }
    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Some(Selector::Attr { name: name.to_owned(), value: Some(unquoted.to_owned()) })
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
