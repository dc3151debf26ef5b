//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! domain is pure, application depends only on domain, infra never reaches
//! into presentation.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Lines of `content` outside any `#[cfg(...test...)]` item, with their
/// 1-based line numbers. Comment lines are dropped too.
fn production_lines(content: &str) -> Vec<(usize, &str)> {
    let mut kept = Vec::new();
    // Brace depth at which the current test item opened.
    let mut skip_from: Option<i32> = None;
    let mut depth = 0i32;
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if skip_from.is_none() && trimmed.starts_with("#[cfg(") && trimmed.contains("test") {
            skip_from = Some(depth);
        }
        let in_test = skip_from.is_some();
        depth += i32::try_from(line.matches('{').count()).unwrap_or(0);
        depth -= i32::try_from(line.matches('}').count()).unwrap_or(0);
        if let Some(start) = skip_from {
            let closed = depth <= start && line.contains('}');
            let declared = depth == start && trimmed.ends_with(';');
            if closed || declared {
                skip_from = None;
            }
        }
        if !in_test && !trimmed.starts_with("//") {
            kept.push((i + 1, line));
        }
    }
    kept
}

fn src_dir(layer: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer)
}

fn relative(file: &Path) -> String {
    file.strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(file)
        .display()
        .to_string()
}

/// Report every non-comment line in `layer` containing one of `forbidden`.
fn forbidden_lines(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(&src_dir(layer)) {
        let rel = relative(&file);
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            for pattern in forbidden {
                if line.contains(pattern) {
                    violations.push(format!("{rel}:{}: `{pattern}`: {line}", i + 1));
                }
            }
        }
    }
    violations
}

/// `crate::app` imports. A bare `crate::app` would also match `crate::application`.
const APP_CONTEXT: [&str; 2] = ["crate::app::", "crate::app;"];

#[test]
fn domain_is_pure() {
    let violations = forbidden_lines(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::process",
            "std::net",
            "async fn",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay free of I/O and outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_depends_only_on_domain() {
    let violations = forbidden_lines(
        "application",
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            APP_CONTEXT[0],
            APP_CONTEXT[1],
            "crate::cli",
        ],
    );
    assert!(
        violations.is_empty(),
        "application/ must not import outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn app_pattern_does_not_flag_application_imports() {
    let line = "use crate::application::ports::ConfigStore;";
    assert!(!APP_CONTEXT
        .iter()
        .any(|p| line.contains(p)));
    assert!("use crate::app::AppContext;".contains("crate::app::"));
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = forbidden_lines("infra", &["crate::commands", "crate::output"]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let mut violations: Vec<String> = Vec::new();
    for file in collect_rs_files(&src_dir("infra")) {
        let rel = relative(&file);
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        for (n, line) in production_lines(&content) {
            if line.contains("println!") || line.contains("eprintln!") {
                violations.push(format!("{rel}:{n}: {line}"));
            }
        }
    }
    assert!(
        violations.is_empty(),
        "infra/ reports through tracing, not print macros:\n{}",
        violations.join("\n")
    );
}

#[test]
fn production_lines_skip_test_modules() {
    let src = "fn a() {\n    println!(\"x\");\n}\n\n#[cfg(all(test, unix))]\nmod tests {\n    fn b() {\n        println!(\"y\");\n    }\n}\nfn c() {}\n";
    let lines: Vec<usize> = production_lines(src).into_iter().map(|(n, _)| n).collect();
    assert_eq!(lines, [1, 2, 3, 4, 11]);
}

#[test]
fn production_lines_resume_after_test_module_declaration() {
    let src = "#[cfg(test)]\nmod tests;\n\nfn a() {}\n";
    let lines: Vec<usize> = production_lines(src).into_iter().map(|(n, _)| n).collect();
    assert_eq!(lines, [3, 4]);
}

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src")) {
        let rel = relative(&file).replace('\\', "/");
        if rel.contains("/infra/") || rel.ends_with("app.rs") {
            continue;
        }
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if line.contains("TokioCommandRunner::new") {
                violations.push(format!("{rel}:{}: {line}", i + 1));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "TokioCommandRunner is only constructed in infra/ and AppContext:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_take_ports_not_concrete_types() {
    let concrete = ["JsonConfigStore", "ProcessEngineRunner", "TokioCommandRunner"];
    let mut violations = Vec::new();
    for file in collect_rs_files(&src_dir("application").join("services")) {
        let rel = relative(&file);
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if !line.contains("fn ") {
                continue;
            }
            for ty in &concrete {
                if line.contains(ty) {
                    violations.push(format!("{rel}:{}: concrete `{ty}`: {line}", i + 1));
                }
            }
        }
    }
    assert!(
        violations.is_empty(),
        "services must use trait bounds:\n{}",
        violations.join("\n")
    );
}
