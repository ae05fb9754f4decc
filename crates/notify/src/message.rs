//! Message types and submission summary formatting.

/// Title used when a summary is built without one.
pub const DEFAULT_TITLE: &str = "Новая заявка";

/// Caption of the link to the written row.
const LINK_CAPTION: &str = "Открыть в таблице";

/// How the chat service should interpret message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Telegram legacy Markdown (`*bold*`, `[text](url)`).
    Markdown,
    /// No formatting.
    Plain,
}

/// A message ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub format: TextFormat,
}

impl Message {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
        }
    }

    #[must_use]
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Markdown,
        }
    }
}

/// The resolved fields of one submission plus a link to where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub title: String,
    /// `(label, value)` pairs in column order.
    pub fields: Vec<(String, String)>,
    pub link: String,
}

impl SubmissionSummary {
    #[must_use]
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            fields: Vec::new(),
            link: link.into(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    /// Bulleted Markdown summary. Fields with empty values are left out.
    #[must_use]
    pub fn to_message(&self) -> Message {
        let mut text = format!("{}\n", bold(&self.title));

        for (label, value) in self.fields.iter().filter(|(_, v)| !v.trim().is_empty()) {
            text.push_str(&format!("\n• {}: {}", bold(label), escape_markdown(value)));
        }

        text.push_str(&format!("\n\n[{LINK_CAPTION}]({})", self.link));
        Message::markdown(text)
    }

    /// Minimal plain-text message carrying only the title and the link.
    #[must_use]
    pub fn fallback(&self) -> Message {
        Message::plain(format!("{}: {}", self.title, self.link))
    }
}

/// Legacy Markdown entity delimiters.
const ENTITY_DELIMITERS: [char; 4] = ['_', '*', '`', '['];

/// `*text*` when possible.
///
/// Legacy Markdown has no escapes inside an entity, so text containing a
/// delimiter is emitted escaped and unbolded instead.
fn bold(text: &str) -> String {
    if text.contains(ENTITY_DELIMITERS) {
        escape_markdown(text)
    } else {
        format!("*{text}*")
    }
}

/// Escape the characters legacy Markdown treats as entity delimiters.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if ENTITY_DELIMITERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_markdown() {
        let summary = SubmissionSummary::new("https://example.com/sheet")
            .with_field("Имя", "Анна")
            .with_field("Телефон", "'+79001234567")
            .with_field("Комментарий", "");

        let message = summary.to_message();
        assert_eq!(message.format, TextFormat::Markdown);
        assert_eq!(
            message.text,
            "*Новая заявка*\n\n• *Имя*: Анна\n• *Телефон*: '+79001234567\n\n\
             [Открыть в таблице](https://example.com/sheet)"
        );
    }

    #[test]
    fn test_summary_escapes_values() {
        let summary = SubmissionSummary::new("https://x").with_field("Имя", "a_b*c");
        let text = summary.to_message().text;
        assert!(text.contains("• *Имя*: a\\_b\\*c"));
    }

    #[test]
    fn test_labels_with_delimiters_are_not_bolded() {
        let summary = SubmissionSummary::new("https://x")
            .with_title("Заявка_1")
            .with_field("e_mail", "a@b.c")
            .with_field("*note*", "ok");
        let text = summary.to_message().text;

        assert!(text.starts_with("Заявка\\_1\n"));
        assert!(text.contains("\n• e\\_mail: a@b.c"));
        assert!(text.contains("\n• \\*note\\*: ok"));
        assert!(!text.contains("*e\\_mail*"));
    }

    #[test]
    fn test_fallback_is_plain_with_link() {
        let summary = SubmissionSummary::new("https://x/y")
            .with_title("Заявка")
            .with_field("a", "b");
        assert_eq!(summary.fallback(), Message::plain("Заявка: https://x/y"));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("plain"), "plain");
        assert_eq!(escape_markdown("[x]"), "\\[x]");
        assert_eq!(escape_markdown("`code`"), "\\`code\\`");
    }
}
