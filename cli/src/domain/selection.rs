//! Host selection: resolve `-h`/`-g`/`--tags` criteria against the registry.
//!
//! Selection is advisory. Tokens that match nothing contribute nothing and
//! never error; a plainly named host that is not registered is passed
//! through so the dispatcher can report it as a result row.

use std::collections::HashSet;

use regex::Regex;

use crate::domain::host::HostRegistry;

/// A user-supplied selection request. All criteria are unioned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSelection {
    /// Host names or name globs (`*`, `?`).
    pub names: Vec<String>,
    /// Host types.
    pub groups: Vec<String>,
    /// Tags, matched with any-overlap semantics.
    pub tags: Vec<String>,
}

impl HostSelection {
    /// Build a selection from raw CLI values, splitting comma-joined values
    /// and dropping empty tokens.
    #[must_use]
    pub fn from_raw(names: &[String], groups: &[String], tags: &[String]) -> Self {
        Self {
            names: split_tokens(names),
            groups: split_tokens(groups),
            tags: split_tokens(tags),
        }
    }
}

/// Split repeatable, comma-joined values into trimmed, non-empty tokens.
#[must_use]
pub fn split_tokens(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `true` if the token contains a glob wildcard.
#[must_use]
pub fn is_glob(token: &str) -> bool {
    token.contains(['*', '?'])
}

/// Compile a name glob into an anchored regex. `*` matches any run of
/// characters, `?` exactly one; everything else is literal.
#[must_use]
pub fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');
    Regex::new(&source).ok()
}

/// Resolve a selection into an ordered, deduplicated list of host names.
///
/// Order: explicit names and glob matches, then group matches, then tag
/// matches; first occurrence wins. With no criteria at all, every
/// registered host is selected.
#[must_use]
pub fn resolve(selection: &HostSelection, registry: &HostRegistry) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();

    for token in &selection.names {
        if is_glob(token) {
            let Some(re) = glob_to_regex(token) else {
                continue;
            };
            selected.extend(registry.names().filter(|n| re.is_match(n)).map(str::to_string));
        } else {
            selected.push(token.clone());
        }
    }

    for group in &selection.groups {
        selected.extend(
            registry
                .iter()
                .filter(|h| &h.host_type == group)
                .map(|h| h.name.clone()),
        );
    }

    if !selection.tags.is_empty() {
        selected.extend(
            registry
                .iter()
                .filter(|h| h.has_any_tag(&selection.tags))
                .map(|h| h.name.clone()),
        );
    }

    if selected.is_empty() {
        selected = registry.names().map(str::to_string).collect();
    }

    dedupe(selected)
}

fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names.into_iter().filter(|n| seen.insert(n.clone())).collect()
}
