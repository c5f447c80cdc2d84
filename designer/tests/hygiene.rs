//! Hygiene: scans the designer's production sources for patterns the crate
//! does not allow. Each pattern has a budget. Budgets only ever go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`; `*_test.rs` files are skipped.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Assert that `pattern` appears on at most `budget` lines across the crate.
fn enforce(pattern: &str, budget: usize, why: &str) {
    let hits: Vec<(String, usize)> = source_files()
        .into_iter()
        .filter_map(|f| {
            let n = f.content.lines().filter(|l| l.contains(pattern)).count();
            (n > 0).then_some((f.path, n))
        })
        .collect();
    let count: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits.iter().map(|(p, n)| format!("  {p}: {n}")).collect::<Vec<_>>().join("\n");
    assert!(count <= budget, "`{pattern}` budget exceeded ({why}): found {count}, max {budget}.\n{listing}");
}

#[test]
fn sources_found() {
    assert!(source_files().iter().any(|f| f.path.ends_with("lib.rs")), "run from the designer crate root");
}

// Panics.

#[test]
fn unwrap_budget() {
    enforce(".unwrap()", 0, "panics on the host's main loop");
}

#[test]
fn expect_budget() {
    enforce(".expect(", 0, "panics on the host's main loop");
}

#[test]
fn panic_budget() {
    enforce("panic!(", 0, "panics on the host's main loop");
}

#[test]
fn unreachable_budget() {
    enforce("unreachable!(", 0, "panics on the host's main loop");
}

#[test]
fn todo_budget() {
    enforce("todo!(", 0, "unfinished code");
}

#[test]
fn unimplemented_budget() {
    enforce("unimplemented!(", 0, "unfinished code");
}

// Silent loss.

#[test]
fn silent_discard_budget() {
    enforce("let _ =", 0, "discards a result unread");
}

#[test]
fn dot_ok_budget() {
    enforce(".ok()", 0, "discards an error unread");
}

// Structure.

#[test]
fn allow_dead_code_budget() {
    enforce("#[allow(dead_code)]", 0, "delete it instead");
}

#[test]
fn print_budget() {
    enforce("println!(", 0, "log through tracing");
    enforce("eprintln!(", 0, "log through tracing");
}
