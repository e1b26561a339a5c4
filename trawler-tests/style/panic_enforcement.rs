//! Panic Enforcement
//!
//! Production code propagates errors instead of panicking on them. Flags
//! `.unwrap()` and `.expect(` outside of `#[cfg(test)]` modules in the
//! library and CLI sources.

use std::fs;
use std::path::{Path, PathBuf};

/// Source roots whose production code is checked
const CHECKED_ROOTS: &[&str] = &["../trawler-core/src", "../trawler-cli/src"];

/// A panicking call found in production code
#[derive(Debug)]
struct PanicViolation {
    file_path: String,
    line_number: usize,
    context: String,
}

/// Checker for panicking calls in production code
struct PanicChecker {
    violations: Vec<PanicViolation>,
    files_checked: usize,
}

impl PanicChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
            files_checked: 0,
        }
    }

    fn find_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::find_rust_files(&path, files)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        Ok(())
    }

    /// Checks the lines of one file up to its test module.
    fn check_source(&mut self, file_path: &str, content: &str) {
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }

            if trimmed.contains(".unwrap()") || trimmed.contains(".expect(") {
                self.violations.push(PanicViolation {
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    context: trimmed.to_string(),
                });
            }
        }
        self.files_checked += 1;
    }

    fn check_workspace(&mut self) -> std::io::Result<()> {
        let mut files = Vec::new();
        for root in CHECKED_ROOTS {
            Self::find_rust_files(Path::new(root), &mut files)?;
        }

        for file in files {
            let content = fs::read_to_string(&file)?;
            self.check_source(&file.to_string_lossy(), &content);
        }
        Ok(())
    }

    fn report_violations(&self) -> bool {
        if self.violations.is_empty() {
            println!(
                "Panic enforcement: {} files checked, no violations found",
                self.files_checked
            );
            return true;
        }

        println!("Panicking calls found in production code:");
        for violation in &self.violations {
            println!("{}:{}", violation.file_path, violation.line_number);
            println!("  {}", violation.context);
        }
        println!("Propagate the error with `?` or handle the missing value explicitly.");

        false
    }
}

#[test]
fn test_detects_unwrap_before_test_module_only() {
    let mut checker = PanicChecker::new();
    let source = r#"
fn parse(input: &str) -> u32 {
    // input.parse().unwrap() would panic
    input.parse().unwrap()
}

fn read() -> String {
    std::fs::read_to_string("x").expect("readable")
}

#[cfg(test)]
mod tests {
    fn helper() {
        Some(1).unwrap();
    }
}
"#;

    checker.check_source("sample.rs", source);

    let lines: Vec<_> = checker.violations.iter().map(|v| v.line_number).collect();
    assert_eq!(lines, vec![4, 8]);
}

#[test]
fn test_fallback_combinators_are_allowed() {
    let mut checker = PanicChecker::new();
    checker.check_source(
        "sample.rs",
        "fn f(x: Option<u32>) -> u32 { x.unwrap_or(0) + x.unwrap_or_default() }",
    );
    assert!(checker.violations.is_empty());
}

#[test]
fn panic_enforcement() {
    let mut checker = PanicChecker::new();
    checker
        .check_workspace()
        .expect("Failed to check workspace");

    assert!(
        checker.report_violations(),
        "Panicking calls found in production code - see output above"
    );
}
