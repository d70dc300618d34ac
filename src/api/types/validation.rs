//! Flattens `validator` errors into one human readable line

use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Render every failed rule as `path: message`, sorted and joined by `; `.
///
/// Nested structs contribute dotted paths and list items an index, e.g.
/// `team.members[1].user_id: value is too short, min=2`.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect(errors, "", &mut lines);
    lines.sort();
    lines.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(failures) => {
                out.extend(failures.iter().map(|e| format!("{}: {}", path, message_for(e))));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "length" | "range" => {
            let min = error.params.get("min");
            let max = error.params.get("max");
            let actual = error.params.get("value").and_then(measure);

            match (min, max, actual) {
                (Some(min), _, Some(actual)) if min.as_u64().is_some_and(|m| actual < m) => {
                    format!("value is too short, min={}", min)
                }
                (_, Some(max), _) => format!("value is too long, max={}", max),
                (Some(min), None, _) => format!("value is too short, min={}", min),
                _ => "invalid value".to_string(),
            }
        }
        "required" => "field is required".to_string(),
        _ => "invalid value".to_string(),
    }
}

fn measure(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => Some(s.chars().count() as u64),
        Value::Array(items) => Some(items.len() as u64),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
