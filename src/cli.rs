//! Command-line interface for tstidy.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::passes::PassKind;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to rewrite
    pub inputs: Vec<PathBuf>,

    /// Passes disabled via --no-<pass>
    pub disabled_passes: Vec<PassKind>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Report files that would change without modifying them
    pub check: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom source file extensions (in addition to defaults)
    pub extensions: Vec<String>,

    /// Exclude files with more than this many lines
    pub exclude_max_lines: Option<usize>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    let mut cmd = Command::new("tstidy")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Fred Jones")
        .about("Style normalizer for TypeScript and JavaScript sources")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to rewrite")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        );

    // One --no-<pass> flag per pass, e.g. --no-insert-semicolons
    for pass in PassKind::ALL {
        let flag: &'static str = pass.no_flag();
        cmd = cmd.arg(
            Arg::new(flag)
                .long(flag)
                .help(format!("Disable the {pass} pass"))
                .action(ArgAction::SetTrue),
        );
    }

    cmd.arg(
        Arg::new("stdout")
            .short('s')
            .long("stdout")
            .help("Output to stdout instead of modifying files in-place")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("check")
            .long("check")
            .help("List files that would change and exit nonzero if any would")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Path to configuration file (overrides auto-discovery)")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf)),
    )
    .arg(
        Arg::new("recursive")
            .short('r')
            .long("recursive")
            .help("Recursively rewrite directories")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
            .value_name("PATTERN")
            .action(ArgAction::Append),
    )
    .arg(
        Arg::new("ext")
            .short('x')
            .long("ext")
            .help("Additional source file extension (can be repeated, e.g., -x vue)")
            .value_name("EXT")
            .action(ArgAction::Append),
    )
    .arg(
        Arg::new("exclude-max-lines")
            .short('m')
            .long("exclude-max-lines")
            .help("Exclude files with more than this many lines")
            .value_name("NUM")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        Arg::new("debug")
            .short('D')
            .long("debug")
            .help("Enable debug output (shows config, per-pass edit counts)")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("silent")
            .short('S')
            .long("silent")
            .help("Silent mode (no output, for editor integration)")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jobs")
            .short('j')
            .long("jobs")
            .help("Number of parallel jobs (0=auto, 1=sequential)")
            .value_name("NUM")
            .value_parser(clap::value_parser!(usize)),
    )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let disabled_passes = PassKind::ALL
        .into_iter()
        .filter(|pass| matches.get_flag(pass.no_flag()))
        .collect();

    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        disabled_passes,
        stdout: matches.get_flag("stdout"),
        check: matches.get_flag("check"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("ext")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        exclude_max_lines: matches.get_one::<usize>("exclude-max-lines").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        // Just verify it builds without panic
        assert_eq!(cmd.get_name(), "tstidy");
    }

    #[test]
    fn test_cli_defaults() {
        let cmd = build_cli();
        let matches = cmd.try_get_matches_from(vec!["tstidy"]).unwrap();

        assert!(matches.get_many::<PathBuf>("inputs").is_none());
        assert!(!matches.get_flag("stdout"));
        assert!(!matches.get_flag("check"));
    }

    #[test]
    fn test_no_pass_flag() {
        let args = parse_args_from(vec!["tstidy", "--no-insert-semicolons", "file.ts"]);
        assert_eq!(args.disabled_passes, vec![PassKind::InsertSemicolons]);
    }

    #[test]
    fn test_multiple_no_pass_flags() {
        let args = parse_args_from(vec![
            "tstidy",
            "--no-enforce-braces",
            "--no-narrow-mutability",
            "file.ts",
        ]);
        assert_eq!(
            args.disabled_passes,
            vec![PassKind::EnforceBraces, PassKind::NarrowMutability]
        );
    }

    #[test]
    fn test_no_pass_flags_empty_by_default() {
        let args = parse_args_from(vec!["tstidy", "file.ts"]);
        assert!(args.disabled_passes.is_empty());
    }

    #[test]
    fn test_check_flag() {
        let args = parse_args_from(vec!["tstidy", "--check", "file.ts"]);
        assert!(args.check);
    }

    #[test]
    fn test_exclude_single() {
        let args = parse_args_from(vec!["tstidy", "-r", "-e", "*.d.ts", "src/"]);
        assert_eq!(args.exclude, vec!["*.d.ts"]);
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "tstidy",
            "-r",
            "-e",
            "node_modules",
            "--exclude",
            "dist*",
            "-e",
            "*.spec.ts",
            "src/",
        ]);
        assert_eq!(args.exclude, vec!["node_modules", "dist*", "*.spec.ts"]);
    }

    #[test]
    fn test_exclude_empty() {
        let args = parse_args_from(vec!["tstidy", "file.ts"]);
        assert!(args.exclude.is_empty());
    }

    #[test]
    fn test_ext_single() {
        let args = parse_args_from(vec!["tstidy", "-r", "-x", "vue", "src/"]);
        assert_eq!(args.extensions, vec!["vue"]);
    }

    #[test]
    fn test_ext_multiple() {
        let args = parse_args_from(vec![
            "tstidy", "-r", "-x", "vue", "--ext", "svelte", "src/",
        ]);
        assert_eq!(args.extensions, vec!["vue", "svelte"]);
    }

    #[test]
    fn test_exclude_max_lines() {
        let args = parse_args_from(vec!["tstidy", "--exclude-max-lines", "1000", "file.ts"]);
        assert_eq!(args.exclude_max_lines, Some(1000));
    }

    #[test]
    fn test_exclude_max_lines_short_flag() {
        let args = parse_args_from(vec!["tstidy", "-m", "500", "file.ts"]);
        assert_eq!(args.exclude_max_lines, Some(500));
    }

    #[test]
    fn test_debug_flag() {
        let args = parse_args_from(vec!["tstidy", "-D", "file.ts"]);
        assert!(args.debug);
    }

    #[test]
    fn test_jobs() {
        let args = parse_args_from(vec!["tstidy", "-j", "4", "file.ts"]);
        assert_eq!(args.jobs, Some(4));
    }
}
