//! Field-level change summaries

use serde_json::Value;

const MAX_TEXT: usize = 40;

/// Describe the top-level fields that differ between two serialized entities
///
/// Returns `None` when nothing changed.
pub fn diff_fields(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes: Vec<String> = old
                .iter()
                .filter_map(|(key, old_val)| match new.get(key) {
                    Some(new_val) if new_val == old_val => None,
                    Some(new_val) => Some(format!("{}: {} -> {}", key, show(old_val), show(new_val))),
                    None => Some(format!("{}: {} -> (removed)", key, show(old_val))),
                })
                .collect();
            changes.extend(
                new.iter()
                    .filter(|(key, _)| !old.contains_key(*key))
                    .map(|(key, val)| format!("{}: (added) -> {}", key, show(val))),
            );
            changes
        }
        _ if before != after => vec![format!("{} -> {}", show(before), show(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn show(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_TEXT => {
            let head: String = s.chars().take(MAX_TEXT - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
