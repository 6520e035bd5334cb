//! Core grammar for the Tyche console.
//!
//! This crate defines the declarative command registry and the
//! tokenizer/matcher that resolves free-text console input against it:
//!
//! - [`CommandSpec`] — one top-level command (description, global options,
//!   subcommands, positional placeholders).
//! - [`SubcommandSpec`] / [`OptionSpec`] — the scoped grammar pieces.
//! - [`CommandRegistry`] — insertion-ordered, name-indexed command set.
//! - [`match_line`] — one raw line + registry → [`ParsedCli`] or no match.
//! - [`Value`] — coerced option values; permissive by design (NaN and
//!   missing-value sentinels instead of parse errors).
//!
//! Validation ([`validate_registry`], [`validate_command`]) catches
//! structural errors such as duplicate commands, duplicate options or
//! aliases within a scope, and empty names.
//!
//! The matcher performs no I/O and writes no diagnostics; unknown commands
//! are `None` and stray tokens are collected on the parse result for the
//! caller to report.
//!
//! # Example
//!
//! ```
//! use tyche_console_core::*;
//!
//! let registry: CommandRegistry = [CommandSpec::new("spotify", "Control Spotify playback")
//!     .with_subcommand(
//!         SubcommandSpec::new("vol")
//!             .with_option(OptionSpec::with_value("value", ValueHint::Number).with_alias("v")),
//!     )]
//! .into_iter()
//! .collect();
//!
//! assert!(validate_registry(&registry).is_empty());
//!
//! let parsed = match_line("spotify vol --value 50", &registry).unwrap();
//! assert_eq!(parsed.command, "spotify");
//! assert_eq!(parsed.subcommand.as_deref(), Some("vol"));
//! assert_eq!(parsed.subcommand_option("value").unwrap().as_number(), 50.0);
//! ```

mod matcher;
mod types;
mod validate;
mod value;

pub use matcher::{MAN_COMMAND, ParsedCli, match_line};
pub use types::{CommandRegistry, CommandSpec, OptionSpec, SubcommandSpec, ValueHint};
pub use validate::{RegistryError, validate_command, validate_registry};
pub use value::Value;
