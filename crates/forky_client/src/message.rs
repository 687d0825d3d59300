//! Chat message model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// How `content` should be turned into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Markdown,
    #[default]
    Plain,
}

impl MessageFormat {
    /// Interpret the backend's optional `format` tag. Anything but "markdown" is plain.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if t.eq_ignore_ascii_case("markdown") => MessageFormat::Markdown,
            _ => MessageFormat::Plain,
        }
    }
}

/// One transcript entry. Immutable once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub format: MessageFormat,
}

impl ChatMessage {
    /// User messages are always plain text.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            format: MessageFormat::Plain,
        }
    }

    pub fn assistant(content: impl Into<String>, format: MessageFormat) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tag_parsing() {
        assert_eq!(MessageFormat::from_tag(Some("markdown")), MessageFormat::Markdown);
        assert_eq!(MessageFormat::from_tag(Some("Markdown")), MessageFormat::Markdown);
        assert_eq!(MessageFormat::from_tag(Some("html")), MessageFormat::Plain);
        assert_eq!(MessageFormat::from_tag(None), MessageFormat::Plain);
    }

    #[test]
    fn user_messages_are_plain() {
        let msg = ChatMessage::user("**not bold**");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.format, MessageFormat::Plain);
    }

    #[test]
    fn serializes_lowercase_tags() {
        let msg = ChatMessage::assistant("hi", MessageFormat::Markdown);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["format"], "markdown");
    }
}
