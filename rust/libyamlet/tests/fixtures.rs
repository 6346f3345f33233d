//! Test harness for document fixtures.
//!
//! Reads every .yaml file from test/valid/ and verifies it parses and
//! survives a serialize/reparse round trip. Reads every .yaml file from
//! test/invalid/ and verifies it fails with the exact message in the
//! matching .error file.

use std::fs;
use std::path::{Path, PathBuf};

use libyamlet::{parse, serialize, SerializeConfig};

/// Root fixture directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("test")
}

/// All files with the given extension in a subdirectory of test/.
fn files_in_subdir(subdir: &str, ext: &str) -> Vec<PathBuf> {
    let dir = test_root().join(subdir);
    let mut files: Vec<PathBuf> = Vec::new();
    if let Ok(entries) = fs::read_dir(&dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == ext).unwrap_or(false) {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// The expected error message for an invalid fixture.
fn read_expected_error(yaml_path: &Path) -> Option<String> {
    fs::read_to_string(yaml_path.with_extension("error")).ok()
}

/// Run one valid fixture: parse, serialize, reparse, compare trees.
fn run_valid_test(path: &Path) -> Result<(), String> {
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", name, e))?;

    let tree = parse(&content).map_err(|e| format!("{}: Unexpected parse error: {}", name, e))?;

    let config = SerializeConfig::default();
    let text =
        serialize(&tree, &config).map_err(|e| format!("{}: Serialize error: {}", name, e))?;

    let reparsed =
        parse(&text).map_err(|e| format!("{}: Round-trip parse error: {}\n{}", name, e, text))?;

    if reparsed != tree {
        return Err(format!(
            "{}: Round-trip mismatch\n    first:  {:?}\n    second: {:?}",
            name, tree, reparsed
        ));
    }

    println!("  {} => round-trip OK", name);
    Ok(())
}

/// Run one invalid fixture: parse must fail with the expected message.
fn run_invalid_test(path: &Path) -> Result<(), String> {
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", name, e))?;

    match parse(&content) {
        Ok(tree) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            name, tree
        )),
        Err(e) => {
            let actual = e.to_string();
            match read_expected_error(path) {
                Some(expected) => {
                    let expected = expected.trim();
                    if actual == expected {
                        println!("  {} => error (as expected)", name);
                        Ok(())
                    } else {
                        Err(format!(
                            "{}: Error mismatch\n    expected: {}\n    actual:   {}",
                            name, expected, actual
                        ))
                    }
                }
                None => Err(format!("{}: Missing .error file (got: {})", name, actual)),
            }
        }
    }
}

#[test]
fn test_all_valid_fixtures() {
    let files = files_in_subdir("valid", "yaml");
    assert!(!files.is_empty(), "No valid fixtures found!");

    println!("\nRunning {} valid fixtures:", files.len());

    let mut errors: Vec<String> = Vec::new();
    for file in &files {
        if let Err(e) = run_valid_test(file) {
            errors.push(e);
        }
    }

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }
    assert!(errors.is_empty(), "{} valid fixtures failed", errors.len());
}

#[test]
fn test_all_invalid_fixtures() {
    let files = files_in_subdir("invalid", "yaml");
    assert!(!files.is_empty(), "No invalid fixtures found!");

    println!("\nRunning {} invalid fixtures:", files.len());

    let mut errors: Vec<String> = Vec::new();
    for file in &files {
        if let Err(e) = run_invalid_test(file) {
            errors.push(e);
        }
    }

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }
    assert!(
        errors.is_empty(),
        "{} invalid fixtures failed",
        errors.len()
    );
}
