//! tstidy - Style normalizer for TypeScript and JavaScript sources

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use rayon::prelude::*;
use tstidy::process::rewrite_text;
use tstidy::{find_directive, parse_args, CliArgs, Config, PassKind, Result};
use walkdir::WalkDir;

/// Source file extensions to process
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    if use_stdin {
        // Process stdin - use current directory for config discovery
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // Build base configuration for parallel processing
    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No source files found to rewrite.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Process files
    let use_sequential = args.stdout || args.jobs == Some(1);
    let changed = if use_sequential {
        // Sequential processing for stdout or --jobs 1
        process_files_sequential(&files, base_config.as_ref(), &args)
    } else {
        // Parallel processing for in-place rewrites
        process_files_parallel(&files, base_config.as_ref(), &args)
    };

    // --check reports "would change" via the exit code
    if args.check && changed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        // No path provided, use current directory for discovery
        if args.debug {
            let cwd = std::env::current_dir().unwrap_or_default();
            let discovered = Config::discover_config_files(&cwd);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered in current directory");
            } else {
                eprintln!("[DEBUG] Discovered config files:");
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // CLI --no-<pass> flags override everything from files
    for &pass in &args.disabled_passes {
        config.set_enabled(pass, false);
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    for pass in PassKind::ALL {
        eprintln!("[DEBUG]   {pass}: {}", config.is_enabled(pass));
    }
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    // Get custom source extensions
    let custom_extensions = &args.extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_source_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_source_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Count the number of lines in a string
fn count_lines(contents: &str) -> usize {
    // Count newlines; add 1 if file doesn't end with newline and has content
    let newlines = contents.bytes().filter(|&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a TypeScript/JavaScript extension
/// Checks against both default extensions and any custom extensions provided
fn is_source_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if SOURCE_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files sequentially (for stdout output)
///
/// Returns the number of files that changed (or would change under --check).
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) -> usize {
    let mut changed = 0;
    for path in files {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(true) => changed += 1,
            Ok(false) => {}
            Err(e) => eprintln!("Error rewriting {}: {}", path.display(), e),
        }
    }
    changed
}

/// Process files in parallel using Rayon
///
/// Returns the number of files that changed (or would change under --check).
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) -> usize {
    let changed_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(true) => {
                changed_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(false) => {}
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error rewriting {}: {}", path.display(), e);
            }
        }
    });

    let changed = changed_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Rewrote {changed} of {} files.", files.len());
        } else {
            eprintln!("Rewrote {changed} of {} files, {errors} errors.", files.len());
        }
    }

    changed
}

/// Build the per-file config: clone the base, apply in-file directives,
/// and disable the TypeScript-only passes for declaration files.
fn file_config_for(path: &Path, config: &Config, contents: &str, args: &CliArgs) -> Config {
    let mut file_config = config.clone();

    if let Some(overrides) = find_directive(contents) {
        if args.debug {
            eprintln!("[DEBUG] Found file directive in {}", path.display());
        }
        overrides.apply(&mut file_config);
    }

    // Declaration files carry no runtime code to rewrite
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".d.ts") || n.ends_with(".d.mts") || n.ends_with(".d.cts"))
    {
        file_config.set_enabled(PassKind::InitializeEnums, false);
        file_config.set_enabled(PassKind::AddAccessModifiers, false);
    }

    file_config
}

/// Process a single file; returns whether it changed (or would change)
fn process_single_file(path: &PathBuf, config: &Config, args: &CliArgs) -> Result<bool> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(false);
    }

    let contents = std::fs::read_to_string(path)?;

    // Check line count limit if specified
    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(false);
        }
    }

    let file_config = file_config_for(path, config, &contents, args);
    let outcome = rewrite_text(&contents, &file_config)?;

    if args.debug {
        for stats in &outcome.pass_stats {
            if stats.proposed > 0 {
                eprintln!(
                    "[DEBUG] {}: {} proposed {} edits",
                    path.display(),
                    stats.pass,
                    stats.proposed
                );
            }
        }
    }

    // Output results
    if args.stdout {
        io::stdout().write_all(outcome.text.as_bytes())?;
    } else if args.check {
        if outcome.changed && !args.silent {
            println!("{}", path.display());
        }
    } else if outcome.changed {
        // Write back to file (in-place), only when something actually changed
        if !args.silent {
            eprintln!("Rewriting: {}", path.display());
        }
        std::fs::write(path, outcome.text.as_bytes())?;
    }

    Ok(outcome.changed)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<ExitCode> {
    // Read all input from stdin
    let mut contents = String::new();
    io::stdin().read_to_string(&mut contents)?;

    // Check size after reading to prevent processing extremely large input
    if contents.len() as u64 > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            contents.len() as u64 / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Make a copy of config that can be overridden by directives
    let mut file_config = config.clone();
    if let Some(overrides) = find_directive(&contents) {
        if args.debug {
            eprintln!("[DEBUG] Found file directive in stdin");
        }
        overrides.apply(&mut file_config);
    }

    let outcome = rewrite_text(&contents, &file_config)?;

    if args.check {
        return Ok(if outcome.changed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    // Always output to stdout when reading from stdin
    io::stdout().write_all(outcome.text.as_bytes())?;

    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    println!(
        "tstidy v{} - TypeScript/JavaScript style normalizer",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Rewrites sources toward a uniform style: missing semicolons and");
    println!("braces, implicit enum values, multi-variable declarations, unused");
    println!("imports, and var/let/const mutability narrowing.");
    println!();
    println!("Usage:");
    println!("  tstidy [OPTIONS] <FILE>...");
    println!("  tstidy [OPTIONS] -r <DIRECTORY>");
    println!("  tstidy [OPTIONS] -              # Read from stdin");
    println!("  cat file.ts | tstidy            # Pipe input");
    println!();
    println!("Examples:");
    println!("  tstidy file.ts                  # Rewrite single file in-place");
    println!("  tstidy *.ts                     # Rewrite multiple files");
    println!("  tstidy -r src/                  # Recursively rewrite directory");
    println!("  tstidy --stdout file.ts         # Output to stdout");
    println!("  tstidy --check -r src/          # Exit 1 if anything would change");
    println!("  tstidy - < file.ts              # Read from stdin, write to stdout");
    println!();
    println!("Options:");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --ext <EXT>                 Additional source extension (repeatable)");
    println!("  -m, --exclude-max-lines <NUM>   Skip files with more than NUM lines");
    println!("  -D, --debug                     Enable debug output");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -s, --stdout                    Output to stdout");
    println!("  --check                         List files that would change; exit 1 if any");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -S, --silent                    Silent mode");
    println!("  -h, --help                      Print help");
    println!();
    println!("Pass toggles (each pass also has a tstidy.toml key of the same name):");
    for pass in PassKind::ALL {
        println!("  --{}", pass.no_flag());
    }
    println!();
    println!("Supported extensions: .ts, .tsx, .js, .jsx, .mjs, .cjs, .mts, .cts");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for tstidy.toml in parent directories");
    println!("  starting from the file being rewritten up to the root directory.");
    println!("  Also checks tstidy.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
    println!();
    println!("In-file directives:");
    println!("  // tstidy: off                       Disable every pass for the file");
    println!("  // tstidy: --no-insert-semicolons    Disable one pass for the file");
}
