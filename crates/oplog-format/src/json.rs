use crate::pipeline::LineTransform;
use crate::record::PayloadFields;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Trailing UTC-offset suffix on the envelope timestamp. The nested payload
// timestamps are already normalized, so the suffix is redundant noise for
// downstream consumers.
static OFFSET_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]\d{2}:\d{2}$").unwrap());

/// One jsonl envelope as the backend emits it.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    line: String,
}

#[derive(Debug, Serialize)]
struct Reshaped {
    timestamp: String,
    accelerator: String,
    origin: String,
    user: String,
    facility: String,
    severity: String,
    text: String,
}

/// Reshapes jsonl backend output: re-parses the nested `line` field as JSON
/// and projects the structured record fields, combined with the outer
/// timestamp minus its offset suffix.
///
/// Empty lines are skipped. An envelope that fails to parse passes through
/// unchanged; a nested line that fails to parse lands verbatim in `text`.
#[derive(Debug, Default)]
pub struct JsonReshaper;

impl LineTransform for JsonReshaper {
    fn push(&mut self, line: &str, out: &mut Vec<String>) {
        if line.trim().is_empty() {
            return;
        }
        let Ok(envelope) = serde_json::from_str::<Envelope>(line) else {
            out.push(line.to_string());
            return;
        };
        let fields: PayloadFields =
            serde_json::from_str(&envelope.line).unwrap_or_else(|_| PayloadFields {
                text: envelope.line.clone(),
                ..PayloadFields::default()
            });
        let reshaped = Reshaped {
            timestamp: OFFSET_SUFFIX.replace(&envelope.timestamp, "").into_owned(),
            accelerator: fields.accelerator,
            origin: fields.origin,
            user: fields.user,
            facility: fields.facility,
            severity: fields.severity,
            text: fields.text,
        };
        if let Ok(rendered) = serde_json::to_string(&reshaped) {
            out.push(rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reshape(line: &str) -> Vec<String> {
        let mut reshaper = JsonReshaper;
        let mut out = Vec::new();
        reshaper.push(line, &mut out);
        out
    }

    #[test]
    fn projects_nested_fields_and_strips_the_offset_suffix() {
        let envelope = r#"{"timestamp":"2026-08-29T10:00:00.5-07:00","line":"{\"accelerator\":\"LCLS\",\"origin\":\"MCC\",\"user\":\"jdoe\",\"facility\":\"CRYO\",\"severity\":\"INFO\",\"text\":\"pump ok\"}"}"#;
        let out = reshape(envelope);
        assert_eq!(out.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
        assert_eq!(value["timestamp"], "2026-08-29T10:00:00.5");
        assert_eq!(value["accelerator"], "LCLS");
        assert_eq!(value["severity"], "INFO");
        assert_eq!(value["text"], "pump ok");
    }

    #[test]
    fn empty_lines_are_skipped() {
        assert!(reshape("").is_empty());
        assert!(reshape("   ").is_empty());
    }

    #[test]
    fn unparseable_envelope_passes_through_unchanged() {
        let out = reshape("not json");
        assert_eq!(out, vec!["not json"]);
    }

    #[test]
    fn unparseable_nested_line_lands_in_text() {
        let envelope = r#"{"timestamp":"2026-08-29T10:00:00Z","line":"plain message"}"#;
        let out = reshape(envelope);
        let value: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
        assert_eq!(value["text"], "plain message");
        assert_eq!(value["facility"], "");
    }
}
