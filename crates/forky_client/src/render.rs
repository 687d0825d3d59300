//! Transcript markup.
//!
//! Markdown goes through a [`MarkdownRenderer`]; everything else is escaped so
//! that nothing in the content is interpreted as markup.

use forky_constant::app::{ASSISTANT_NAME, USER_NAME};
use pulldown_cmark::{html, Options, Parser};

use crate::message::{ChatMessage, MessageFormat, Role};

/// Turns markdown source into HTML.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

/// Default renderer backed by `pulldown-cmark` (tables, strikethrough, task lists).
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkRenderer;

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, source: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        let parser = Parser::new_ext(source, options);

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Inverse of [`escape_html`], plus `&#x27;`. Unknown entities are left as-is.
pub fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Body markup for a message, without the surrounding bubble.
pub fn render_body(message: &ChatMessage, renderer: &dyn MarkdownRenderer) -> String {
    match message.format {
        MessageFormat::Markdown => renderer.render(&message.content),
        MessageFormat::Plain => format!(
            r#"<p class="text-sm text-gray-900">{}</p>"#,
            escape_html(&message.content)
        ),
    }
}

/// Full transcript entry: avatar, name, timestamp and body.
pub fn render_message(
    message: &ChatMessage,
    timestamp: &str,
    renderer: &dyn MarkdownRenderer,
) -> String {
    let body = render_body(message, renderer);
    let timestamp = escape_html(timestamp);
    match message.role {
        Role::User => format!(
            r#"<div class="animate-fade-in" data-role="user">
  <div class="flex items-start gap-2.5 flex-row-reverse">
    <div class="avatar avatar-user">U</div>
    <div class="flex flex-col gap-1 w-full max-w-[320px]">
      <div class="flex items-center space-x-2 flex-row-reverse">
        <span class="text-sm font-semibold text-gray-900">{USER_NAME}</span>
        <span class="text-sm text-gray-500">{timestamp}</span>
      </div>
      <div class="bubble bubble-user">{body}</div>
    </div>
  </div>
</div>"#
        ),
        Role::Assistant => format!(
            r#"<div class="animate-fade-in" data-role="assistant">
  <div class="flex items-start gap-2.5">
    <div class="avatar avatar-assistant">AI</div>
    <div class="flex flex-col gap-1 w-full max-w-[80%]">
      <div class="flex items-center space-x-2">
        <span class="text-sm font-semibold text-gray-900">{ASSISTANT_NAME}</span>
        <span class="text-sm text-gray-500">{timestamp}</span>
      </div>
      <div class="bubble bubble-assistant"><div class="prose prose-sm max-w-full overflow-x-auto">{body}</div></div>
    </div>
  </div>
</div>"#
        ),
    }
}

/// Local time label used on new entries (e.g. "3:07:42 PM").
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_special_characters() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#39;c&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn unescape_reverses_escape() {
        let raw = r#"<a href="x">Tom & 'Jerry'</a>"#;
        assert_eq!(unescape_html(&escape_html(raw)), raw);
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
    }

    #[test]
    fn plain_content_is_escaped() {
        let msg = ChatMessage::assistant("<b>hi</b>", MessageFormat::Plain);
        let body = render_body(&msg, &CommonMarkRenderer);
        assert!(body.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(!body.contains("<b>"));
    }

    #[test]
    fn markdown_content_is_rendered() {
        let msg = ChatMessage::assistant("**hi**", MessageFormat::Markdown);
        let body = render_body(&msg, &CommonMarkRenderer);
        assert!(body.contains("<strong>hi</strong>"));
    }

    #[test]
    fn markdown_is_not_applied_to_plain_messages() {
        let msg = ChatMessage::user("**hi**");
        let body = render_body(&msg, &CommonMarkRenderer);
        assert!(body.contains("**hi**"));
        assert!(!body.contains("<strong>"));
    }

    #[test]
    fn layouts_differ_by_role() {
        let user = render_message(&ChatMessage::user("q"), "10:00:00 AM", &CommonMarkRenderer);
        let assistant = render_message(
            &ChatMessage::assistant("a", MessageFormat::Plain),
            "10:00:01 AM",
            &CommonMarkRenderer,
        );
        assert!(user.contains(r#"data-role="user""#));
        assert!(user.contains("You"));
        assert!(user.contains("10:00:00 AM"));
        assert!(assistant.contains(r#"data-role="assistant""#));
        assert!(assistant.contains("Forky"));
        assert!(assistant.contains("prose"));
    }

    #[test]
    fn timestamp_has_meridiem() {
        let ts = timestamp_now();
        assert!(ts.ends_with("AM") || ts.ends_with("PM"), "{ts}");
    }
}
