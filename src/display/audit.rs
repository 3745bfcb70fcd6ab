//! Audit history formatting

use crate::audit::AuditEntry;

/// One summary line per entry, oldest first
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.".to_string();
    }

    entries
        .iter()
        .map(|e| format!("{}\n", e.summary_line()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use serde_json::json;

    #[test]
    fn test_format_entries() {
        let entries = vec![
            AuditEntry::create(EntityType::Category, "cat-17", Some("Pets".into()), &json!({})),
            AuditEntry::delete(EntityType::Category, "cat-17", Some("Pets".into()), &json!({})),
        ];
        let text = format_audit_entries(&entries);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().contains("DELETE"));
        assert_eq!(format_audit_entries(&[]), "No audit entries.");
    }
}
