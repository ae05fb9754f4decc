//! Answer field extraction and display formatting.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Display text for a `true` boolean answer.
pub const YES: &str = "Да";
/// Display text for a `false` boolean answer.
pub const NO: &str = "Нет";

/// Prefix that makes the spreadsheet keep user-entered text as text.
const TEXT_MARKER: char = '\'';

static ISO_DATE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$"));

fn is_iso_date(text: &str) -> bool {
    ISO_DATE.as_ref().is_ok_and(|pattern| pattern.is_match(text))
}

/// Kind of answer, as tagged by the form or inferred from the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// Selected options of a single/multiple choice question.
    Choices,
    /// Uploaded files.
    Files,
    Boolean,
    Date,
    Phone,
    Text,
}

impl AnswerKind {
    /// Map a form's type tag to a kind. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "choices" | "choice" | "enum" | "select" | "multiselect" => Some(Self::Choices),
            "files" | "file" => Some(Self::Files),
            "boolean" | "bool" | "checkbox" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "phone" => Some(Self::Phone),
            "string" | "text" | "integer" | "number" | "email" => Some(Self::Text),
            _ => None,
        }
    }

    /// Guess the kind from the JSON shape of an untagged value.
    #[must_use]
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Boolean,
            Value::String(s) if is_iso_date(s) => Self::Date,
            Value::Array(items) if items.iter().any(|i| i.get("name").is_some()) => Self::Files,
            Value::Array(items) if !items.is_empty() => Self::Choices,
            _ => Self::Text,
        }
    }
}

/// One answer: a raw value and an optional kind tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub kind: Option<AnswerKind>,
    pub value: Value,
}

impl Answer {
    /// Unwrap an answer wrapper `{"value": .., "type": ..}`.
    ///
    /// Anything that is not such a wrapper is taken as the value itself.
    #[must_use]
    pub fn from_json(raw: Value) -> Self {
        match raw {
            Value::Object(mut wrapper) if wrapper.contains_key("value") => {
                let kind = wrapper
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(AnswerKind::from_tag);
                Self {
                    kind,
                    value: wrapper.remove("value").unwrap_or(Value::Null),
                }
            }
            value => Self { kind: None, value },
        }
    }

    #[must_use]
    pub fn kind(&self) -> AnswerKind {
        self.kind.unwrap_or_else(|| AnswerKind::infer(&self.value))
    }
}

/// A flattened `(header, display value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub header: String,
    pub value: String,
}

/// Flatten an `answer.data` object into display fields.
#[must_use]
pub fn extract_fields(data: &Map<String, Value>) -> Vec<Field> {
    data.iter()
        .map(|(header, raw)| Field {
            header: header.clone(),
            value: format_answer(header, &Answer::from_json(raw.clone())),
        })
        .collect()
}

/// Render one answer as the text written to the sheet.
#[must_use]
pub fn format_answer(header: &str, answer: &Answer) -> String {
    let kind = answer.kind();

    match kind {
        AnswerKind::Choices => {
            if let Some(labels) = item_labels(&answer.value, &["text", "label", "value"]) {
                return labels.join("\n");
            }
        }
        AnswerKind::Files => {
            if let Some(names) = item_labels(&answer.value, &["name", "filename", "path"]) {
                return names.join("\n");
            }
        }
        AnswerKind::Boolean => return yes_no(truthy(&answer.value)).to_string(),
        AnswerKind::Date => {
            if let Some(date) = answer.value.as_str().and_then(reformat_date) {
                return date;
            }
        }
        AnswerKind::Phone | AnswerKind::Text => {}
    }

    let raw = raw_text(&answer.value);
    if kind == AnswerKind::Phone || is_phone_like(header, &raw) {
        normalize_phone(&raw)
    } else {
        raw
    }
}

#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "да" | "on"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
        Value::Null => false,
    }
}

/// `yyyy-mm-dd` → `dd.mm.yyyy`; anything else is `None`.
#[must_use]
pub fn reformat_date(text: &str) -> Option<String> {
    let captures = ISO_DATE.as_ref().ok()?.captures(text.trim())?;
    Some(format!("{}.{}.{}", &captures[3], &captures[2], &captures[1]))
}

/// Header mentions a phone, or the value looks like an international number.
#[must_use]
pub fn is_phone_like(header: &str, value: &str) -> bool {
    header.to_lowercase().contains("phone") || value.trim_start().starts_with('+')
}

/// Strip spaces and hyphens and mark the number as text.
#[must_use]
pub fn normalize_phone(value: &str) -> String {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if digits.is_empty() || digits.starts_with(TEXT_MARKER) {
        digits
    } else {
        format!("{TEXT_MARKER}{digits}")
    }
}

/// Labels of an array of options/files: strings as-is, objects by the first known key.
fn item_labels(value: &Value, keys: &[&str]) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::Object(fields) => keys
                    .iter()
                    .find_map(|key| fields.get(*key))
                    .map_or_else(|| item.to_string(), raw_text),
                other => raw_text(other),
            })
            .collect(),
    )
}

/// Plain text of a value without kind-specific formatting.
#[must_use]
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(raw_text).collect::<Vec<_>>().join("\n"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn format(header: &str, raw: Value) -> String {
        format_answer(header, &Answer::from_json(raw))
    }

    #[test]
    fn test_boolean_is_localized() {
        assert_eq!(format("agree", json!({"value": true})), "Да");
        assert_eq!(format("agree", json!({"value": false})), "Нет");
        assert_eq!(format("agree", json!({"value": "true", "type": "boolean"})), "Да");
        assert_eq!(format("agree", json!({"value": null, "type": "boolean"})), "Нет");
    }

    #[test]
    fn test_boolean_never_raw() {
        for value in [json!(true), json!(false), json!("no"), json!(1), json!([])] {
            let text = format("x", json!({"value": value, "type": "boolean"}));
            assert!(text == YES || text == NO, "unexpected {text:?}");
        }
    }

    #[test]
    fn test_date_reformatted() {
        assert_eq!(format("date", json!({"value": "2024-03-05"})), "05.03.2024");
        assert_eq!(
            format("date", json!({"value": "1999-12-31", "type": "date"})),
            "31.12.1999"
        );
    }

    #[test]
    fn test_malformed_date_passes_through() {
        assert_eq!(format("date", json!({"value": "5 March", "type": "date"})), "5 March");
        assert_eq!(reformat_date("2024-3-5"), None);
    }

    #[test]
    fn test_choices_joined() {
        let raw = json!({
            "value": [{"key": "a", "text": "Первый"}, {"key": "b", "text": "Второй"}],
            "type": "choices"
        });
        assert_eq!(format("options", raw), "Первый\nВторой");
        assert_eq!(format("options", json!({"value": ["x", "y"]})), "x\ny");
    }

    #[test]
    fn test_files_joined() {
        let raw = json!({
            "value": [
                {"name": "passport.pdf", "size": 1024, "path": "/f/1"},
                {"name": "photo.jpg", "size": 2048, "path": "/f/2"}
            ]
        });
        assert_eq!(format("uploads", raw), "passport.pdf\nphoto.jpg");
    }

    #[test]
    fn test_phone_normalized() {
        assert_eq!(format("contact", json!({"value": "+7 900 123-45-67"})), "'+79001234567");
        assert_eq!(format("Phone number", json!({"value": "8 900 123 45 67"})), "'89001234567");
        assert_eq!(format("x", json!({"value": "0012", "type": "phone"})), "'0012");
    }

    #[test]
    fn test_phone_property() {
        for raw in ["+1 555-0100", "+44 20 7946 0958", "+7-900-000-00-00"] {
            let text = format("anything", json!({"value": raw}));
            assert!(text.starts_with("'+"), "{text}");
            assert!(!text.contains(' ') && !text.contains('-'), "{text}");
        }
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(format("name", json!({"value": "Анна"})), "Анна");
        assert_eq!(format("age", json!({"value": 33})), "33");
        assert_eq!(format("comment", json!({"value": null})), "");
        assert_eq!(format("unwrapped", json!("direct")), "direct");
    }

    #[test]
    fn test_extract_fields() {
        let data = json!({
            "name": {"value": "Анна"},
            "agree": {"value": true}
        });
        let fields = extract_fields(data.as_object().unwrap());
        assert_eq!(
            fields,
            vec![
                Field {
                    header: "agree".to_string(),
                    value: "Да".to_string()
                },
                Field {
                    header: "name".to_string(),
                    value: "Анна".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(AnswerKind::from_tag("Boolean"), Some(AnswerKind::Boolean));
        assert_eq!(AnswerKind::from_tag("files"), Some(AnswerKind::Files));
        assert_eq!(AnswerKind::from_tag("mystery"), None);
        assert_eq!(AnswerKind::infer(&json!("2024-01-01")), AnswerKind::Date);
        assert_eq!(AnswerKind::infer(&json!([])), AnswerKind::Text);
    }
}
