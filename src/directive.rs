//! Inline directive parsing for `// tstidy:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `// tstidy: --no-insert-semicolons --no-narrow-mutability`
//! or `// tstidy: off` to disable every pass for the file.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::passes::PassKind;

/// Pattern to match tstidy directives
static TSTIDY_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*//\s*tstidy:\s*(.*?)\s*$").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone)]
pub struct DirectiveOverrides {
    /// Disable every pass for this file
    pub off: bool,
    /// Per-pass toggles, in the order written
    pub passes: Vec<(PassKind, bool)>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.off && self.passes.is_empty()
    }

    /// Apply the overrides on top of a config
    pub fn apply(&self, config: &mut Config) {
        if self.off {
            for pass in PassKind::ALL {
                config.set_enabled(pass, false);
            }
        }
        for &(pass, enabled) in &self.passes {
            config.set_enabled(pass, enabled);
        }
    }
}

/// Check if a line contains a tstidy directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    TSTIDY_DIRECTIVE_RE.is_match(line)
}

/// Parse a tstidy directive line and return option overrides
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a directive with options
/// * `None` if the line is not a directive or sets nothing
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = TSTIDY_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();

    parse_directive_args(args_str)
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();

    for token in args_str.split_whitespace() {
        if token.eq_ignore_ascii_case("off") {
            overrides.off = true;
        } else if let Some(name) = token.strip_prefix("--no-") {
            if let Some(pass) = PassKind::from_name(name) {
                overrides.passes.push((pass, false));
            }
            // Unknown pass name, skip
        } else if let Some(name) = token.strip_prefix("--") {
            if let Some(pass) = PassKind::from_name(name) {
                overrides.passes.push((pass, true));
            }
        }
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan a unit's text for tstidy directives and return the first found
///
/// Only the first directive is used (subsequent ones are ignored).
#[must_use]
pub fn find_directive(text: &str) -> Option<DirectiveOverrides> {
    text.lines().find_map(parse_directive)
}
