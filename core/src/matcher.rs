//! Tokenizer/matcher: resolves one raw input line against the registry.
//!
//! The matcher is pure: it never writes diagnostics anywhere. Tokens that
//! match nothing are collected into [`ParsedCli::unrecognized`] so the caller
//! can surface them, and an unknown command is simply `None` — distinct from
//! a successfully parsed command with no options.

use std::collections::HashMap;

use tracing::debug;

use crate::{CommandRegistry, OptionSpec, Value};

/// The `man` command always captures its trailing tokens as positional
/// arguments, whether or not the registry declares any.
pub const MAN_COMMAND: &str = "man";

/// Structured result of matching one input line against the registry.
///
/// Transient: constructed fresh per invocation, consumed by the dispatcher,
/// then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCli {
    /// The matched command name.
    pub command: String,
    /// Values of matched global options, keyed by long name.
    pub global_options: HashMap<String, Value>,
    /// The claimed subcommand, if any.
    pub subcommand: Option<String>,
    /// Values of matched subcommand options; present iff a subcommand was
    /// claimed.
    pub subcommand_options: Option<HashMap<String, Value>>,
    /// Raw positional arguments captured after the scan.
    pub positional_args: Vec<String>,
    /// Tokens that matched neither an option nor a subcommand. The line is
    /// still accepted; the caller decides how to report these.
    pub unrecognized: Vec<String>,
}

impl ParsedCli {
    /// Value of a global option by long name.
    pub fn global_option(&self, name: &str) -> Option<&Value> {
        self.global_options.get(name)
    }

    /// Value of a subcommand option by long name.
    pub fn subcommand_option(&self, name: &str) -> Option<&Value> {
        self.subcommand_options.as_ref()?.get(name)
    }
}

/// Matches a raw input line against the registry.
///
/// Returns `None` when the line is empty or its first token is not a
/// registered command; every other line produces a [`ParsedCli`], however
/// many of its tokens went unrecognized.
///
/// Scan rules, applied to each token left to right:
///
/// 1. A token matching a global option wins first, before or after the
///    subcommand. Options that require a value consume the next token too,
///    even when there is none (the value is then [`Value::Missing`]).
/// 2. Otherwise, if no subcommand is claimed yet and the token names one, it
///    is claimed. A claimed subcommand never re-matches.
/// 3. Otherwise, with a subcommand claimed, the token is tried against that
///    subcommand's options.
/// 4. Anything else is recorded as unrecognized and skipped.
///
/// After the scan, commands without a claimed subcommand capture positional
/// arguments from the raw token list: `man` takes everything, other commands
/// take up to their declared placeholder count.
///
/// # Examples
///
/// ```
/// use tyche_console_core::{match_line, CommandSpec, OptionSpec, SubcommandSpec, ValueHint};
///
/// let registry = [CommandSpec::new("calc", "Nutrition calculator")
///     .with_global_option(OptionSpec::flag("verbose"))
///     .with_subcommand(
///         SubcommandSpec::new("carbs")
///             .with_option(OptionSpec::with_value("per-100g", ValueHint::Number)),
///     )]
/// .into_iter()
/// .collect();
///
/// let parsed = match_line("calc --verbose carbs --per-100g 100", &registry).unwrap();
/// assert_eq!(parsed.command, "calc");
/// assert_eq!(parsed.subcommand.as_deref(), Some("carbs"));
/// assert_eq!(parsed.subcommand_option("per-100g").unwrap().as_number(), 100.0);
///
/// assert!(match_line("unknown --verbose", &registry).is_none());
/// ```
pub fn match_line(line: &str, registry: &CommandRegistry) -> Option<ParsedCli> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&name, rest) = tokens.split_first()?;

    let Some(command) = registry.get(name) else {
        debug!(command = name, "input names no registered command");
        return None;
    };

    let mut parsed = ParsedCli {
        command: name.to_string(),
        ..ParsedCli::default()
    };
    let mut claimed = None;

    let mut at = 0;
    while at < rest.len() {
        let token = rest[at];

        if let Some(option) = command.find_global_option(token) {
            at += consume_option(option, rest, at, &mut parsed.global_options);
            continue;
        }

        if claimed.is_none() {
            if let Some(sub) = command.find_subcommand(token) {
                parsed.subcommand = Some(token.to_string());
                parsed.subcommand_options = Some(HashMap::new());
                claimed = Some(sub);
                at += 1;
                continue;
            }
        }

        if let (Some(sub), Some(values)) = (claimed, parsed.subcommand_options.as_mut()) {
            if let Some(option) = sub.find_option(token) {
                at += consume_option(option, rest, at, values);
                continue;
            }
        }

        debug!(token, "unrecognized console token");
        parsed.unrecognized.push(token.to_string());
        at += 1;
    }

    if parsed.subcommand.is_none() {
        if command.cmd == MAN_COMMAND {
            parsed.positional_args = rest.iter().map(|t| t.to_string()).collect();
        } else if !command.positional_args.is_empty() {
            parsed.positional_args = rest
                .iter()
                .take(command.positional_args.len())
                .map(|t| t.to_string())
                .collect();
        }
        // Tokens promoted to positional arguments are arguments, not noise.
        let captured = parsed.positional_args.clone();
        parsed.unrecognized.retain(|t| !captured.contains(t));
    }

    Some(parsed)
}

/// Writes the option's value into `values` and returns how many tokens were
/// consumed: two for value options (even with the value token absent), one
/// for flags.
fn consume_option(
    option: &OptionSpec,
    tokens: &[&str],
    at: usize,
    values: &mut HashMap<String, Value>,
) -> usize {
    if option.requires_value {
        let raw = tokens.get(at + 1).copied();
        values.insert(option.name.clone(), Value::coerce(raw, option.value_hint));
        2
    } else {
        values.insert(option.name.clone(), Value::Bool(true));
        1
    }
}
