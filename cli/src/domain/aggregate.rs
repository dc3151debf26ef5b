//! Result aggregation: per-host results in, deterministic rows and a
//! unanimity verdict out.
//!
//! `ResultAggregator` collects results while hosts finish, in any order.
//! `finalize` consumes it, so nothing can be recorded afterwards.

/// Error payload carried by a host result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultError {
    pub name: String,
    pub message: String,
}

impl ResultError {
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Output of one host for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    pub host_name: String,
    pub stdout: String,
    pub error: Option<ResultError>,
}

impl HostResult {
    #[must_use]
    pub fn ok(host_name: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            stdout: stdout.into(),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(host_name: impl Into<String>, error: ResultError) -> Self {
        Self {
            host_name: host_name.into(),
            stdout: String::new(),
            error: Some(error),
        }
    }

    /// Text compared and displayed for this result: trimmed stdout, the
    /// error line appended when present, carriage returns removed.
    #[must_use]
    pub fn result_text(&self) -> String {
        let mut text = self.stdout.trim().to_string();
        if let Some(error) = &self.error {
            text.push('\n');
            text.push_str(&error.name);
            text.push_str(": ");
            text.push_str(&error.message);
        }
        text.retain(|c| c != '\r');
        text
    }
}

/// One presentable row: a host label (possibly several joined hosts) and
/// the shared result text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
    pub label: String,
    pub result_text: String,
}

/// Host delimiter for single-line renderers.
pub const INLINE_DELIMITER: &str = ", ";
/// Host delimiter for table renderers.
pub const TABLE_DELIMITER: &str = "\n";

/// How to shape the finalized rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Group hosts with identical result text into one row.
    pub coalesce: bool,
    /// Print nothing and succeed when unanimous; fail when not. Implies
    /// `coalesce`.
    pub unanimous: bool,
    /// Joins host names in a coalesced label.
    pub delimiter: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            coalesce: false,
            unanimous: false,
            delimiter: INLINE_DELIMITER.to_string(),
        }
    }
}

/// Outcome of a run as seen by the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Normal completion, or unanimous in unanimous mode.
    Success,
    /// Unanimous mode was requested and the hosts disagreed.
    NotUnanimous,
}

impl Verdict {
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NotUnanimous => 1,
        }
    }
}

/// Finalized aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub rows: Vec<AggregatedRow>,
    pub unanimous: bool,
    pub verdict: Verdict,
    /// `false` on the unanimous-silent path: the renderer must not run.
    pub render: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    text: String,
}

/// Collects host results and finalizes them into rows.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    entries: Vec<Entry>,
}

impl ResultAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &HostResult) {
        self.entries.push(Entry {
            name: result.host_name.clone(),
            text: result.result_text(),
        });
    }

    #[must_use]
    pub fn finalize(mut self, options: &AggregateOptions) -> Aggregation {
        // Stable: equal names keep insertion order.
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));

        let unanimous = match self.entries.split_first() {
            None => true,
            Some((first, rest)) => rest.iter().all(|e| e.text == first.text),
        };

        if options.unanimous && unanimous {
            return Aggregation {
                rows: Vec::new(),
                unanimous,
                verdict: Verdict::Success,
                render: false,
            };
        }

        let rows = if options.coalesce || options.unanimous {
            coalesce(&self.entries, &options.delimiter)
        } else {
            self.entries
                .into_iter()
                .map(|e| AggregatedRow {
                    label: e.name,
                    result_text: e.text,
                })
                .collect()
        };

        let verdict = if options.unanimous {
            Verdict::NotUnanimous
        } else {
            Verdict::Success
        };

        Aggregation {
            rows,
            unanimous,
            verdict,
            render: true,
        }
    }
}

/// Group sorted entries by identical text. Groups appear in the order of
/// their first member; members keep ascending order.
fn coalesce(entries: &[Entry], delimiter: &str) -> Vec<AggregatedRow> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(text, _)| *text == entry.text) {
            Some((_, members)) => members.push(entry.name.as_str()),
            None => groups.push((entry.text.as_str(), vec![entry.name.as_str()])),
        }
    }
    groups
        .into_iter()
        .map(|(text, members)| AggregatedRow {
            label: members.join(delimiter).trim().to_string(),
            result_text: text.to_string(),
        })
        .collect()
}
