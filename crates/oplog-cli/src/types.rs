use clap::ValueEnum;
use std::fmt;

/// Backend output encodings, forwarded to the backend's `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Label-prefixed text lines, one per record
    #[default]
    Default,
    /// Bare log lines with no timestamp or label prefix
    Raw,
    /// One JSON envelope per line with `line` and `timestamp` fields
    Jsonl,
}

impl OutputMode {
    pub fn as_backend_value(&self) -> &'static str {
        match self {
            OutputMode::Default => "default",
            OutputMode::Raw => "raw",
            OutputMode::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_backend_value())
    }
}
