//! Configuration management for tstidy.
//!
//! This module provides the [`Config`] struct which controls which rewrite
//! passes run. Configuration can be loaded from:
//! - TOML files (`tstidy.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`// tstidy: --no-insert-semicolons`)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being rewritten up to the filesystem root, plus the user's home
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::passes::PassKind;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["tstidy.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

fn default_true() -> bool {
    true
}

/// Main configuration struct for tstidy
///
/// One boolean per pass; everything is on by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Merge duplicate named imports from the same module (default: true)
    #[serde(default = "default_true")]
    pub combine_imports: bool,

    /// Remove imports nothing references (default: true)
    #[serde(default = "default_true")]
    pub remove_unused_imports: bool,

    /// Write out implicit numeric enum member values (default: true)
    #[serde(default = "default_true")]
    pub initialize_enums: bool,

    /// Wrap single-statement `if`/`else`/loop bodies in braces (default: true)
    #[serde(default = "default_true")]
    pub enforce_braces: bool,

    /// Insert missing statement semicolons (default: true)
    #[serde(default = "default_true")]
    pub insert_semicolons: bool,

    /// Insert trailing commas in qualifying constructor parameter lists (default: true)
    #[serde(default = "default_true")]
    pub insert_trailing_commas: bool,

    /// Split multi-declarator statements into one declaration each (default: true)
    #[serde(default = "default_true")]
    pub normalize_var_declarations: bool,

    /// Add `private` to unannotated class members (default: true)
    #[serde(default = "default_true")]
    pub add_access_modifiers: bool,

    /// Narrow `var` to `let`/`const` and `let` to `const` (default: true)
    #[serde(default = "default_true")]
    pub narrow_mutability: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub combine_imports: Option<bool>,
    pub remove_unused_imports: Option<bool>,
    pub initialize_enums: Option<bool>,
    pub enforce_braces: Option<bool>,
    pub insert_semicolons: Option<bool>,
    pub insert_trailing_commas: Option<bool>,
    pub normalize_var_declarations: Option<bool>,
    pub add_access_modifiers: Option<bool>,
    pub narrow_mutability: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            combine_imports: true,
            remove_unused_imports: true,
            initialize_enums: true,
            enforce_braces: true,
            insert_semicolons: true,
            insert_trailing_commas: true,
            normalize_var_declarations: true,
            add_access_modifiers: true,
            narrow_mutability: true,
        }
    }
}

impl Config {
    /// Whether a pass is enabled.
    #[must_use]
    pub fn is_enabled(&self, pass: PassKind) -> bool {
        match pass {
            PassKind::CombineImports => self.combine_imports,
            PassKind::RemoveUnusedImports => self.remove_unused_imports,
            PassKind::InitializeEnums => self.initialize_enums,
            PassKind::EnforceBraces => self.enforce_braces,
            PassKind::InsertSemicolons => self.insert_semicolons,
            PassKind::InsertTrailingCommas => self.insert_trailing_commas,
            PassKind::NormalizeVarDeclarations => self.normalize_var_declarations,
            PassKind::AddAccessModifiers => self.add_access_modifiers,
            PassKind::NarrowMutability => self.narrow_mutability,
        }
    }

    pub fn set_enabled(&mut self, pass: PassKind, enabled: bool) {
        match pass {
            PassKind::CombineImports => self.combine_imports = enabled,
            PassKind::RemoveUnusedImports => self.remove_unused_imports = enabled,
            PassKind::InitializeEnums => self.initialize_enums = enabled,
            PassKind::EnforceBraces => self.enforce_braces = enabled,
            PassKind::InsertSemicolons => self.insert_semicolons = enabled,
            PassKind::InsertTrailingCommas => self.insert_trailing_commas = enabled,
            PassKind::NormalizeVarDeclarations => self.normalize_var_declarations = enabled,
            PassKind::AddAccessModifiers => self.add_access_modifiers = enabled,
            PassKind::NarrowMutability => self.narrow_mutability = enabled,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.combine_imports {
            self.combine_imports = v;
        }
        if let Some(v) = partial.remove_unused_imports {
            self.remove_unused_imports = v;
        }
        if let Some(v) = partial.initialize_enums {
            self.initialize_enums = v;
        }
        if let Some(v) = partial.enforce_braces {
            self.enforce_braces = v;
        }
        if let Some(v) = partial.insert_semicolons {
            self.insert_semicolons = v;
        }
        if let Some(v) = partial.insert_trailing_commas {
            self.insert_trailing_commas = v;
        }
        if let Some(v) = partial.normalize_var_declarations {
            self.normalize_var_declarations = v;
        }
        if let Some(v) = partial.add_access_modifiers {
            self.add_access_modifiers = v;
        }
        if let Some(v) = partial.narrow_mutability {
            self.narrow_mutability = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_everything() {
        let config = Config::default();
        for pass in PassKind::ALL {
            assert!(config.is_enabled(pass), "{pass} should default to on");
        }
    }

    #[test]
    fn test_set_enabled_round_trips() {
        let mut config = Config::default();
        for pass in PassKind::ALL {
            config.set_enabled(pass, false);
            assert!(!config.is_enabled(pass));
            config.set_enabled(pass, true);
            assert!(config.is_enabled(pass));
        }
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();

        // Only disable two passes, leave others as None
        let partial = PartialConfig {
            insert_semicolons: Some(false),
            narrow_mutability: Some(false),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert!(!base.insert_semicolons);
        assert!(!base.narrow_mutability);
        // Other fields should remain at defaults
        assert!(base.enforce_braces);
        assert!(base.combine_imports);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config::default();
        base.enforce_braces = false; // Set a non-default value

        // Partial config that only sets insert_semicolons
        let partial = PartialConfig {
            insert_semicolons: Some(false),
            ..Default::default()
        };

        base.apply_partial(&partial);
        // enforce_braces should be preserved (not reset to default)
        assert!(!base.enforce_braces);
        assert!(!base.insert_semicolons);
    }

    #[test]
    fn test_parse_partial_toml() {
        let partial: PartialConfig =
            toml::from_str("add_access_modifiers = false\ninitialize_enums = true\n").unwrap();
        assert_eq!(partial.add_access_modifiers, Some(false));
        assert_eq!(partial.initialize_enums, Some(true));
        assert_eq!(partial.enforce_braces, None);
    }

    #[test]
    fn test_discover_config_files_nonexistent_path() {
        // Discovery from a path that doesn't exist should not panic
        let path = PathBuf::from("/nonexistent/path/file.ts");
        let _files = Config::discover_config_files(&path);
    }

    #[test]
    fn test_from_discovered_files_returns_default_when_empty() {
        // When no config files exist, should return default config
        let path = PathBuf::from("/nonexistent/unique/path/file.ts");
        let config = Config::from_discovered_files(&path);
        assert!(config.insert_semicolons);
        assert!(config.narrow_mutability);
    }
}
