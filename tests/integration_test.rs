//! Integration tests for tstidy
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use tstidy::process::rewrite_text;
use tstidy::{find_directive, parse_directive, Config, PassKind};

fn rewrite(input: &str) -> String {
    rewrite_text(input, &Config::default()).unwrap().text
}

/// End-to-end test: a small file exercising several passes at once
#[test]
fn test_end_to_end_mixed_file() {
    let input = "\
var total = 0
for (const n of [1, 2, 3]) total += n
console.log(total)
";
    let result = rewrite(input);

    // var becomes let (reassigned), loop body gets braces, statements get semicolons
    assert!(result.contains("let total = 0;"), "got: {result}");
    assert!(result.contains("{total += n;}"), "got: {result}");
    assert!(result.contains("console.log(total);"), "got: {result}");
}

/// End-to-end test: never-reassigned var becomes const
#[test]
fn test_end_to_end_var_to_const() {
    let input = "var greeting = 'hello';\nconsole.log(greeting);\n";
    let result = rewrite(input);
    assert!(
        result.contains("const greeting = 'hello';"),
        "got: {result}"
    );
}

/// End-to-end test: enum members get explicit values
#[test]
fn test_end_to_end_enum_initializers() {
    let input = "enum Color { Red, Green, Blue }\n";
    let result = rewrite(input);
    assert!(result.contains("Red = 0"), "got: {result}");
    assert!(result.contains("Green = 1"), "got: {result}");
    assert!(result.contains("Blue = 2"), "got: {result}");
}

/// End-to-end test: enum numbering continues from an explicit value
#[test]
fn test_end_to_end_enum_continues_from_explicit() {
    let input = "enum Level { Low = 10, Mid, High }\n";
    let result = rewrite(input);
    assert!(result.contains("Mid = 11"), "got: {result}");
    assert!(result.contains("High = 12"), "got: {result}");
}

/// End-to-end test: duplicate imports are merged and unused ones removed
#[test]
fn test_end_to_end_import_cleanup() {
    let input = "\
import {a} from 'mod';
import {b} from 'mod';
import {unused} from 'other';
a(); b();
";
    let result = rewrite(input);
    assert!(
        result.contains("import {a, b} from 'mod';"),
        "got: {result}"
    );
    assert!(!result.contains("other"), "got: {result}");
}

/// End-to-end test: class members get access modifiers, constructors get
/// trailing parameter commas when parameters carry modifiers
#[test]
fn test_end_to_end_class_rewrites() {
    let input = "\
class Point {
  constructor(private x: number, private y: number) {}
  length() { return 0; }
}
";
    let result = rewrite(input);
    assert!(result.contains("private y: number,"), "got: {result}");
    assert!(result.contains("private length()"), "got: {result}");
    assert!(!result.contains("private constructor"), "got: {result}");
}

/// End-to-end test: multi-declarator statements are split
#[test]
fn test_end_to_end_split_declarations() {
    let input = "let a = 1, b = 2;\na = 3;\nuse(a, b);\n";
    let result = rewrite(input);
    assert!(result.contains("let a = 1;"), "got: {result}");
    assert!(result.contains("let b = 2;"), "got: {result}");
}

/// Rewriting converges: once the output stabilizes it stays stable
#[test]
fn test_end_to_end_converges() {
    let input = "\
var total = 0, count = 0
for (const n of [1, 2]) total += n
if (total) count++
console.log(total, count)
";
    let first = rewrite(input);
    let second = rewrite(&first);
    let third = rewrite(&second);
    assert_eq!(second, third);
}

/// Already-tidy input passes through byte for byte
#[test]
fn test_end_to_end_clean_input_unchanged() {
    let input = "\
const x = 1;
let y = x;
if (y > 0) {
  y -= 1;
}
console.log(y);
";
    let outcome = rewrite_text(input, &Config::default()).unwrap();
    assert!(!outcome.changed);
    assert_eq!(outcome.text, input);
}

/// Per-pass statistics are reported per invocation
#[test]
fn test_end_to_end_outcome_stats() {
    let outcome = rewrite_text("var x = 1\nuse(x);", &Config::default()).unwrap();
    assert!(outcome.changed);
    assert!(outcome.proposed() >= 2);
    assert_eq!(outcome.mutability.vars_to_const, 1);
}

/// Disabling a pass through config suppresses only that pass
#[test]
fn test_config_disables_single_pass() {
    let mut config = Config::default();
    config.set_enabled(PassKind::NarrowMutability, false);

    let outcome = rewrite_text("var x = 1\nuse(x);", &config).unwrap();
    // Semicolon still inserted, keyword untouched
    assert!(outcome.text.contains("var x = 1;"), "got: {}", outcome.text);
}

/// Test tstidy directive parsing
#[test]
fn test_directive_parsing() {
    // Test basic pass toggle
    let overrides = parse_directive("// tstidy: --no-enforce-braces").unwrap();
    assert_eq!(overrides.passes, vec![(PassKind::EnforceBraces, false)]);

    // Test multiple options
    let overrides =
        parse_directive("// tstidy: --no-insert-semicolons --no-narrow-mutability").unwrap();
    assert_eq!(overrides.passes.len(), 2);

    // Test case-insensitive matching of the marker
    let overrides = parse_directive("// TSTIDY: off").unwrap();
    assert!(overrides.off);
}

/// Directive found anywhere in the file applies to the whole file
#[test]
fn test_directive_applies_to_file() {
    let input = "// tstidy: off\nvar x = 1\nuse(x)\n";

    let mut config = Config::default();
    if let Some(overrides) = find_directive(input) {
        overrides.apply(&mut config);
    }

    let outcome = rewrite_text(input, &config).unwrap();
    assert!(!outcome.changed);
    assert_eq!(outcome.text, input);
}

/// A directive can disable one pass while the rest still run
#[test]
fn test_directive_partial_disable() {
    let input = "// tstidy: --no-narrow-mutability\nvar x = 1\nuse(x)\n";

    let mut config = Config::default();
    if let Some(overrides) = find_directive(input) {
        overrides.apply(&mut config);
    }

    let outcome = rewrite_text(input, &config).unwrap();
    assert!(outcome.text.contains("var x = 1;"), "got: {}", outcome.text);
}

/// The marker comment protects an import from removal
#[test]
fn test_keep_marker_protects_import() {
    let input = "import {DontRemoveThisImport} from 'side-effects';\n";
    let result = rewrite(input);
    assert!(result.contains("side-effects"), "got: {result}");
}

/// A gap comment marks an enum member as deliberately uninitialized
#[test]
fn test_enum_uninitialized_marker() {
    let input = "enum E {\n  A,\n  // UNINITIALIZED\n  B,\n}\n";
    let result = rewrite(input);
    assert!(result.contains("A = 0"), "got: {result}");
    assert!(!result.contains("B = 1"), "got: {result}");
}

/// Config loaded from TOML disables the named passes
#[test]
fn test_config_from_toml() {
    let dir = std::env::temp_dir().join("tstidy-integration-config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tstidy.toml");
    std::fs::write(&path, "insert_semicolons = false\nenforce_braces = false\n").unwrap();

    let config = Config::from_toml_file(&path).unwrap();
    assert!(!config.insert_semicolons);
    assert!(!config.enforce_braces);
    assert!(config.narrow_mutability);

    std::fs::remove_file(&path).unwrap();
}

/// Malformed input still round-trips without panicking
#[test]
fn test_end_to_end_tolerates_parse_errors() {
    let input = "function broken( {\n";
    let outcome = rewrite_text(input, &Config::default()).unwrap();
    // Whatever the tree looks like, the rewrite must stay in bounds
    assert!(!outcome.text.is_empty());
}

/// Empty input is a no-op
#[test]
fn test_end_to_end_empty_input() {
    let outcome = rewrite_text("", &Config::default()).unwrap();
    assert!(!outcome.changed);
    assert_eq!(outcome.text, "");
}
