use crate::pipeline::LineTransform;

// Record-boundary marker: every real record payload carries the accelerator
// field key, compactor summaries and blank lines do not. In label-format
// lines the key appears bare; in a jsonl envelope the nested line is an
// escaped JSON string, so the key arrives as \"accelerator\".
const BOUNDARY_MARKER: &str = "\"accelerator\"";
const ESCAPED_BOUNDARY_MARKER: &str = "\\\"accelerator\\\"";

/// Passes every line through while counting record boundaries; if the final
/// count reaches the configured limit, the query has likely been truncated
/// and a warning is appended after the stream ends.
///
/// The backend returns newest-first when limited, so after the display
/// reversal the shown entries are the chronologically final ones.
#[derive(Debug)]
pub struct LimitWarningInjector {
    limit: usize,
    seen: usize,
}

impl LimitWarningInjector {
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }
}

impl LineTransform for LimitWarningInjector {
    fn push(&mut self, line: &str, out: &mut Vec<String>) {
        if line.contains(BOUNDARY_MARKER) || line.contains(ESCAPED_BOUNDARY_MARKER) {
            self.seen += 1;
        }
        out.push(line.to_string());
    }

    fn finish(&mut self, out: &mut Vec<String>) {
        if self.limit > 0 && self.seen >= self.limit {
            out.push(String::new());
            out.push(format!(
                "Warning: result limit of {} reached; showing the chronologically final {} entries. Raise --limit to see more.",
                self.limit, self.limit
            ));
        }
    }
}
