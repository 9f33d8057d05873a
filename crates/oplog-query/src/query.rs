use crate::filter::FilterSet;
use std::fmt;

/// Job label carrying production log streams
pub const PROD_JOB: &str = "accelerator";

/// Job label carrying development log streams
pub const DEV_JOB: &str = "accelerator-dev";

/// Accelerator value that selects the development job
pub const DEV_ACCELERATOR: &str = "DEV";

// Default suppression patterns. Change-log entries look like
// "MAGS:BDES changed from ...", watcher noise carries a fixed marker and
// put-log entries carry a "new=<token> old=" pair.
const CHANGELOG_PATTERN: &str = r"[A-Z]{2,4}:\S+ changed from";
const WATCHER_MARKER: &str = "F2:WATCHER";
const PUTLOG_PATTERN: &str = r"new=\S+ old=";

/// One filter condition within the composed query string.
///
/// The payload is held unescaped; escaping for the LogQL string literal
/// happens at render time so it can be checked structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Line contains the exact text (`|=`)
    Contains(String),
    /// Line does not contain the exact text (`!=`)
    NotContains(String),
    /// Line matches the regex (`|~`)
    Matches(String),
    /// Line does not match the regex (`!~`)
    NotMatches(String),
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Contains(text) => write!(f, "|= \"{}\"", escape(text)),
            Clause::NotContains(text) => write!(f, "!= \"{}\"", escape(text)),
            Clause::Matches(re) => write!(f, "|~ \"{}\"", escape(re)),
            Clause::NotMatches(re) => write!(f, "!~ \"{}\"", escape(re)),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The immutable result of composing the query, built exactly once per
/// invocation after all input is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    selector: String,
    clauses: Vec<Clause>,
}

impl QuerySpec {
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Render the full backend query string. Clause order is part of the
    /// external interface; operators copy/paste the emitted query.
    pub fn to_query(&self) -> String {
        let mut query = self.selector.clone();
        for clause in &self.clauses {
            query.push(' ');
            query.push_str(&clause.to_string());
        }
        query
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

/// Composes the backend query from accumulated filters and flags.
///
/// Clause order: job selector, field clauses in accumulation order, regex
/// include, regex exclude, then the default suppressions (change-log,
/// watcher, put-log) unless individually opted in. All clauses are logically
/// AND-ed; the order is an interface contract, not a correctness one.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    filters: FilterSet,
    include: Option<String>,
    exclude: Option<String>,
    show_changelog: bool,
    show_watcher: bool,
    show_putlog: bool,
}

impl QueryBuilder {
    pub fn new(filters: FilterSet) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Regex the line must match.
    pub fn include(mut self, re: Option<String>) -> Self {
        self.include = re;
        self
    }

    /// Regex the line must not match.
    pub fn exclude(mut self, re: Option<String>) -> Self {
        self.exclude = re;
        self
    }

    /// Keep change-log entries instead of suppressing them.
    pub fn show_changelog(mut self, show: bool) -> Self {
        self.show_changelog = show;
        self
    }

    /// Keep watcher entries instead of suppressing them.
    pub fn show_watcher(mut self, show: bool) -> Self {
        self.show_watcher = show;
        self
    }

    /// Keep put-log entries instead of suppressing them.
    pub fn show_putlog(mut self, show: bool) -> Self {
        self.show_putlog = show;
        self
    }

    pub fn build(self) -> QuerySpec {
        let selector = job_selector(self.filters.accelerators());

        let mut clauses = Vec::new();
        for (field, values) in self.filters.fields() {
            clauses.push(field_clause(field, values));
        }
        if let Some(re) = self.include {
            clauses.push(Clause::Matches(re));
        }
        if let Some(re) = self.exclude {
            clauses.push(Clause::NotMatches(re));
        }
        if !self.show_changelog {
            clauses.push(Clause::NotMatches(CHANGELOG_PATTERN.to_string()));
        }
        if !self.show_watcher {
            clauses.push(Clause::NotContains(WATCHER_MARKER.to_string()));
        }
        if !self.show_putlog {
            clauses.push(Clause::NotMatches(PUTLOG_PATTERN.to_string()));
        }

        QuerySpec { selector, clauses }
    }
}

/// Pick the job-label selector from the requested accelerators: none means
/// production only, exactly `DEV` means the dev job only, `DEV` plus others
/// means both via alternation.
fn job_selector(accelerators: &[String]) -> String {
    if accelerators.is_empty() {
        format!("{{job=\"{}\"}}", PROD_JOB)
    } else if accelerators.iter().all(|a| a == DEV_ACCELERATOR) {
        format!("{{job=\"{}\"}}", DEV_JOB)
    } else if accelerators.iter().any(|a| a == DEV_ACCELERATOR) {
        format!("{{job=~\"{}|{}\"}}", PROD_JOB, DEV_JOB)
    } else {
        format!("{{job=\"{}\"}}", PROD_JOB)
    }
}

/// Single value → exact-match clause; multiple values → alternation over the
/// `"field": "(v1|v2)"`-shaped payload text (the payload is structured but
/// searched as text).
fn field_clause(field: &str, values: &[String]) -> Clause {
    if values.len() == 1 {
        Clause::Contains(format!("\"{}\": \"{}\"", field, values[0]))
    } else {
        Clause::Matches(format!("\"{}\": \"({})\"", field, values.join("|")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_backslashes_before_quotes() {
        assert_eq!(escape(r#"a\"b"#), r#"a\\\"b"#);
    }

    #[test]
    fn field_clause_single_value_is_exact() {
        let clause = field_clause("facility", &["CRYO".to_string()]);
        assert_eq!(clause.to_string(), r#"|= "\"facility\": \"CRYO\"""#);
    }

    #[test]
    fn field_clause_multiple_values_is_alternation() {
        let clause = field_clause("facility", &["CRYO".to_string(), "rf".to_string()]);
        assert_eq!(clause.to_string(), r#"|~ "\"facility\": \"(CRYO|rf)\"""#);
    }
}
