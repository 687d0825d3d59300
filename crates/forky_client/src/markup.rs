//! Minimal lookup of elements by `id` in server-rendered markup.
//!
//! Only what the page flows need: the opening tag's attributes and the text up
//! to the matching close tag. Not a general HTML parser.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::render::unescape_html;

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .unwrap()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// An element found in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    pub tag: String,
    attributes: HashMap<String, String>,
    text: String,
}

impl MarkupElement {
    /// Attribute value with entities decoded.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Text content with inner tags stripped, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// First element whose `id` attribute equals `id`.
pub fn element_by_id(markup: &str, id: &str) -> Option<MarkupElement> {
    let id = regex::escape(id);
    find_element(markup, &format!(r#"\sid\s*=\s*(?:"{id}"|'{id}')"#))
}

/// First element whose `class` list contains `class`.
pub fn element_by_class(markup: &str, class: &str) -> Option<MarkupElement> {
    let class = regex::escape(class);
    find_element(
        markup,
        &format!(r#"\sclass\s*=\s*(?:"(?:[^"]*\s)?{class}(?:\s[^"]*)?"|'(?:[^']*\s)?{class}(?:\s[^']*)?')"#),
    )
}

/// First element carrying the attribute `name`, with or without a value
/// (e.g. `data-summary`).
pub fn element_with_attribute(markup: &str, name: &str) -> Option<MarkupElement> {
    let name = regex::escape(name);
    find_element(
        markup,
        &format!(r#"\s{name}(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?"#),
    )
}

fn find_element(markup: &str, attribute: &str) -> Option<MarkupElement> {
    let pattern =
        format!(r"(?is)<([a-z][a-z0-9-]*)((?:\s[^>]*?)?{attribute}(?:[\s/][^>]*)?)>");
    let open = Regex::new(&pattern).ok()?;
    let caps = open.captures(markup)?;
    let tag = caps.get(1)?.as_str().to_ascii_lowercase();
    let attrs_src = caps.get(2).map_or("", |m| m.as_str());

    let attributes = ATTRIBUTE
        .captures_iter(attrs_src)
        .filter_map(|c| {
            let name = c.get(1)?.as_str().to_ascii_lowercase();
            let value = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?.as_str();
            Some((name, unescape_html(value)))
        })
        .collect();

    let after = &markup[caps.get(0)?.end()..];
    let close = format!("</{tag}");
    let inner = after
        .to_ascii_lowercase()
        .find(&close)
        .map_or("", |end| &after[..end]);
    let text = unescape_html(TAG.replace_all(inner, "").trim());

    Some(MarkupElement {
        tag,
        attributes,
        text,
    })
}

/// Whether any element carries the given data attribute (e.g. `data-results`).
pub fn has_data_attribute(markup: &str, name: &str) -> bool {
    let pattern = format!(r"(?i)<[a-z][^>]*\s{}(?:[\s=>/])", regex::escape(name));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(markup))
}
