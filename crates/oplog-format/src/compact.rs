use crate::pipeline::LineTransform;
use crate::record::LogRecord;

/// Collapses runs of consecutive records with the same (text, origin,
/// facility) triple into one annotated block: blank line, the last raw line
/// of the run, `"<count> Like:"`, blank line. A run of one flushes as the
/// single raw line. End-of-stream flushes with the same shape as mid-stream.
#[derive(Debug, Default)]
pub struct DuplicateCompactor {
    pending: Option<Run>,
}

#[derive(Debug)]
struct Run {
    line: String,
    key: (String, String, String),
    count: usize,
}

impl DuplicateCompactor {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(run: Run, out: &mut Vec<String>) {
        if run.count > 1 {
            out.push(String::new());
            out.push(run.line);
            out.push(format!("{} Like:", run.count));
            out.push(String::new());
        } else {
            out.push(run.line);
        }
    }
}

impl LineTransform for DuplicateCompactor {
    fn push(&mut self, line: &str, out: &mut Vec<String>) {
        let record = LogRecord::parse(line);
        // Degraded lines all parse to empty fields; key them on the raw line
        // so unrelated noise never joins one run.
        let text = if record.text.is_empty() && record.origin.is_empty() && record.facility.is_empty()
        {
            line.to_string()
        } else {
            record.text
        };
        let key = (text, record.origin, record.facility);

        let repeats = self.pending.as_ref().is_some_and(|run| run.key == key);
        if repeats {
            if let Some(run) = self.pending.as_mut() {
                run.count += 1;
                run.line = line.to_string();
            }
        } else {
            if let Some(run) = self.pending.take() {
                Self::flush(run, out);
            }
            self.pending = Some(Run {
                line: line.to_string(),
                key,
                count: 1,
            });
        }
    }

    fn finish(&mut self, out: &mut Vec<String>) {
        if let Some(run) = self.pending.take() {
            Self::flush(run, out);
        }
    }
}
