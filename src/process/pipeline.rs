//! The pass pipeline: run every enabled pass over one parsed unit, merge
//! the proposed edits, and apply them to the original text.

use crate::config::Config;
use crate::passes::{self, mutability::MutabilityStats, PassKind};
use crate::rewrite::{self, Replacement};
use crate::tree::{parse, SyntaxTree};
use crate::Result;

/// How many edits one pass proposed for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub pass: PassKind,
    pub proposed: usize,
}

/// Result of rewriting one source unit.
///
/// All counters are per invocation; nothing is accumulated globally, so
/// units can be processed in parallel without coordination.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The rewritten text (equal to the input when nothing applied).
    pub text: String,
    pub changed: bool,
    /// One entry per enabled pass, in pipeline order.
    pub pass_stats: Vec<PassStats>,
    /// Detail counters from the mutability pass.
    pub mutability: MutabilityStats,
}

impl RewriteOutcome {
    /// Total number of proposed edits across all passes, before merging.
    #[must_use]
    pub fn proposed(&self) -> usize {
        self.pass_stats.iter().map(|s| s.proposed).sum()
    }
}

/// Parse and rewrite one source unit.
pub fn rewrite_text(text: &str, config: &Config) -> Result<RewriteOutcome> {
    let tree = parse(text)?;
    Ok(rewrite_unit(&tree, text, config))
}

/// Rewrite an already-parsed unit.
#[must_use]
pub fn rewrite_unit(tree: &SyntaxTree, text: &str, config: &Config) -> RewriteOutcome {
    let mut proposals: Vec<Replacement> = Vec::new();
    let mut pass_stats = Vec::new();
    let mut mutability = MutabilityStats::default();

    for pass in PassKind::ALL {
        if !config.is_enabled(pass) {
            continue;
        }
        let replacements = match pass {
            PassKind::CombineImports => passes::imports::combine(tree, text),
            PassKind::RemoveUnusedImports => passes::imports::remove_unused(tree, text),
            PassKind::InitializeEnums => passes::enums::run(tree, text),
            PassKind::EnforceBraces => passes::braces::run(tree, text),
            PassKind::InsertSemicolons => passes::semicolons::run(tree, text),
            PassKind::InsertTrailingCommas => passes::trailing_commas::run(tree, text),
            PassKind::NormalizeVarDeclarations => passes::var_decl::run(tree, text),
            PassKind::AddAccessModifiers => passes::access_modifiers::run(tree, text),
            PassKind::NarrowMutability => {
                let (replacements, stats) = passes::mutability::run(tree, text);
                mutability = stats;
                replacements
            }
        };
        pass_stats.push(PassStats {
            pass,
            proposed: replacements.len(),
        });
        proposals.extend(replacements);
    }

    let merged = rewrite::merge(proposals);
    let new_text = rewrite::apply(text, merged);
    let changed = new_text != text;
    RewriteOutcome {
        text: new_text,
        changed,
        pass_stats,
        mutability,
    }
}
