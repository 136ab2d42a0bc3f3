//! The rewrite passes.
//!
//! Each pass is a pure function of the parsed tree and the original text,
//! proposing [`crate::rewrite::Replacement`]s against original-text offsets.
//! Passes never see each other's output; the pipeline merges and applies
//! everything in one step.

use std::fmt;

pub mod access_modifiers;
pub mod braces;
pub mod enums;
pub mod imports;
pub mod mutability;
pub mod semicolons;
pub mod trailing_commas;
pub mod var_decl;

/// Identity of a pass, used for configuration toggles and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    CombineImports,
    RemoveUnusedImports,
    InitializeEnums,
    EnforceBraces,
    InsertSemicolons,
    InsertTrailingCommas,
    NormalizeVarDeclarations,
    AddAccessModifiers,
    NarrowMutability,
}

impl PassKind {
    /// Every pass, in pipeline order.
    pub const ALL: [PassKind; 9] = [
        PassKind::CombineImports,
        PassKind::RemoveUnusedImports,
        PassKind::InitializeEnums,
        PassKind::EnforceBraces,
        PassKind::InsertSemicolons,
        PassKind::InsertTrailingCommas,
        PassKind::NormalizeVarDeclarations,
        PassKind::AddAccessModifiers,
        PassKind::NarrowMutability,
    ];

    /// Look up a pass by its kebab-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<PassKind> {
        PassKind::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Stable kebab-case name used in configuration and CLI flags.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PassKind::CombineImports => "combine-imports",
            PassKind::RemoveUnusedImports => "remove-unused-imports",
            PassKind::InitializeEnums => "initialize-enums",
            PassKind::EnforceBraces => "enforce-braces",
            PassKind::InsertSemicolons => "insert-semicolons",
            PassKind::InsertTrailingCommas => "insert-trailing-commas",
            PassKind::NormalizeVarDeclarations => "normalize-var-declarations",
            PassKind::AddAccessModifiers => "add-access-modifiers",
            PassKind::NarrowMutability => "narrow-mutability",
        }
    }

    /// The CLI flag that disables this pass.
    #[must_use]
    pub fn no_flag(self) -> &'static str {
        match self {
            PassKind::CombineImports => "no-combine-imports",
            PassKind::RemoveUnusedImports => "no-remove-unused-imports",
            PassKind::InitializeEnums => "no-initialize-enums",
            PassKind::EnforceBraces => "no-enforce-braces",
            PassKind::InsertSemicolons => "no-insert-semicolons",
            PassKind::InsertTrailingCommas => "no-insert-trailing-commas",
            PassKind::NormalizeVarDeclarations => "no-normalize-var-declarations",
            PassKind::AddAccessModifiers => "no-add-access-modifiers",
            PassKind::NarrowMutability => "no-narrow-mutability",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_names_are_unique() {
        for (i, a) in PassKind::ALL.iter().enumerate() {
            for b in &PassKind::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(PassKind::NarrowMutability.to_string(), "narrow-mutability");
    }

    #[test]
    fn test_no_flag_matches_name() {
        for pass in PassKind::ALL {
            assert_eq!(pass.no_flag(), format!("no-{}", pass.name()));
        }
    }
}
