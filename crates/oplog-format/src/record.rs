use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

// A default-format backend line looks like
//   2026-08-29T10:00:00Z {job="accelerator"} {"accelerator": "LCLS", ...}
// When no labels survive the query the marker degrades to a bare {}.
static JOB_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\{[^{}]*job=[^{}]*\}\s?(.*)$").unwrap());

static EMPTY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\{\}\s?(.*)$").unwrap());

/// Split a raw line into (timestamp, structured payload text).
///
/// Everything before and including the job-label marker is the timestamp
/// side; the remainder, minus control characters, is the payload. Lines
/// matching neither the job-label nor the empty-label marker yield the whole
/// line as timestamp and an empty payload. Never fails.
pub fn extract_payload(line: &str) -> (String, String) {
    let caps = JOB_LABEL
        .captures(line)
        .or_else(|| EMPTY_LABEL.captures(line));
    match caps {
        Some(caps) => (caps[1].to_string(), strip_control(&caps[2])),
        None => (strip_control(line), String::new()),
    }
}

fn strip_control(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Structured fields of the JSON payload. Every field defaults to empty so a
/// partial payload still parses.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct PayloadFields {
    #[serde(default)]
    pub accelerator: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub facility: String,
    #[serde(default)]
    pub proc: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
}

/// Ephemeral structured view of one raw line. Reconstructed per line, never
/// persisted. A payload that fails to parse degrades to empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: String,
    pub accelerator: String,
    pub origin: String,
    pub facility: String,
    pub proc: String,
    pub severity: String,
    pub user: String,
    pub text: String,
}

impl LogRecord {
    pub fn parse(line: &str) -> LogRecord {
        let (timestamp, payload) = extract_payload(line);
        let fields: PayloadFields = serde_json::from_str(&payload).unwrap_or_default();
        LogRecord {
            timestamp,
            accelerator: fields.accelerator,
            origin: fields.origin,
            facility: fields.facility,
            proc: fields.proc,
            severity: fields.severity,
            user: fields.user,
            text: fields.text,
        }
    }
}
