//! tstidy - Style normalizer for TypeScript and JavaScript sources
//!
//! Parses each source file once, runs a set of independent rewrite passes
//! over the tree, and applies every proposed edit in a single pass over
//! the original text.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod passes;
pub mod process;
pub mod rewrite;
pub mod tree;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use error::Result;
pub use passes::PassKind;
pub use process::{rewrite_text, RewriteOutcome};
