//! Registry type definitions for the console command grammar.
//!
//! This module defines the declarative data model the console is driven by:
//! commands, their subcommands, and the options recognized in each scope.
//! The registry is built once at startup and is read-only afterwards; both
//! the matcher and the manual-page generator consult it as the single source
//! of truth. All types serialize with [`serde`] so a registry can be exported
//! for tooling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Expected type of an option value.
///
/// Drives coercion of the raw token following an option that requires a
/// value. See [`Value::coerce`](crate::Value::coerce) for the exact rules.
///
/// # Examples
///
/// ```
/// use tyche_console_core::ValueHint;
///
/// assert_eq!(ValueHint::default(), ValueHint::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueHint {
    /// Keep the raw token unchanged (the default).
    #[default]
    String,
    /// Parse as floating point; unparseable tokens become NaN, not errors.
    Number,
    /// `true` iff the raw token is the literal string `"true"`.
    Boolean,
}

/// Specification of one console option.
///
/// An option is addressed by its long form `--name` or, when an alias is
/// defined, its short form `-alias`. Within one scope (a command's global
/// options, or one subcommand's options) names are unique and aliases are
/// unique; a token matches at most one option.
///
/// Use [`flag`](OptionSpec::flag) for presence-only options and
/// [`with_value`](OptionSpec::with_value) for options that consume the next
/// token, then chain the builder methods.
///
/// # Examples
///
/// ```
/// use tyche_console_core::{OptionSpec, ValueHint};
///
/// let verbose = OptionSpec::flag("verbose")
///     .with_alias("v")
///     .with_description("Print extra detail");
/// assert!(verbose.matches("--verbose"));
/// assert!(verbose.matches("-v"));
/// assert!(!verbose.requires_value);
///
/// let amount = OptionSpec::with_value("amount", ValueHint::Number);
/// assert!(amount.requires_value);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name, matched as `--name`.
    pub name: String,
    /// Optional short alias, matched as `-alias`.
    pub alias: Option<String>,
    /// Whether the option consumes the following token as its value.
    pub requires_value: bool,
    /// Coercion applied to the consumed value token.
    pub value_hint: ValueHint,
    /// Description shown on the manual page.
    pub description: Option<String>,
}

impl OptionSpec {
    /// Creates a presence-only option (no value).
    ///
    /// # Examples
    ///
    /// ```
    /// use tyche_console_core::OptionSpec;
    ///
    /// let opt = OptionSpec::flag("verbose");
    /// assert!(!opt.requires_value);
    /// assert!(opt.matches("--verbose"));
    /// ```
    pub fn flag(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            requires_value: false,
            value_hint: ValueHint::Boolean,
            description: None,
        }
    }

    /// Creates an option that consumes the next token as its value.
    pub fn with_value(name: &str, value_hint: ValueHint) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            requires_value: true,
            value_hint,
            description: None,
        }
    }

    /// Adds a short alias (matched as `-alias`).
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Checks whether a raw token addresses this option.
    ///
    /// Long form requires the `--` prefix and an exact name match; short form
    /// requires a single `-` prefix and an exact alias match.
    ///
    /// # Examples
    ///
    /// ```
    /// use tyche_console_core::{OptionSpec, ValueHint};
    ///
    /// let opt = OptionSpec::with_value("value", ValueHint::Number).with_alias("v");
    /// assert!(opt.matches("--value"));
    /// assert!(opt.matches("-v"));
    /// assert!(!opt.matches("value"));
    /// assert!(!opt.matches("-value"));
    /// ```
    pub fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.name;
        }
        if let Some(short) = token.strip_prefix('-') {
            return self.alias.as_deref() == Some(short);
        }
        false
    }
}

/// Specification of a subcommand scoped to one command.
///
/// # Examples
///
/// ```
/// use tyche_console_core::{OptionSpec, SubcommandSpec, ValueHint};
///
/// let vol = SubcommandSpec::new("vol")
///     .with_description("Set playback volume")
///     .with_option(OptionSpec::with_value("value", ValueHint::Number).with_alias("v"))
///     .requires_option();
///
/// assert_eq!(vol.name, "vol");
/// assert!(vol.find_option("--value").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubcommandSpec {
    /// Subcommand name, unique within the owning command.
    pub name: String,
    /// Description shown on the manual page.
    pub description: Option<String>,
    /// Whether the subcommand is meaningless without at least one option.
    pub requires_option: bool,
    /// Options recognized only while this subcommand is claimed.
    pub options: Vec<OptionSpec>,
    /// Ordered placeholder names for positional arguments.
    pub positional_args: Vec<String>,
}

impl SubcommandSpec {
    /// Creates a new subcommand spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Adds an option to this subcommand's scope.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Appends a positional-argument placeholder.
    pub fn with_positional_arg(mut self, placeholder: &str) -> Self {
        self.positional_args.push(placeholder.to_string());
        self
    }

    /// Marks the subcommand as requiring at least one option.
    pub fn requires_option(mut self) -> Self {
        self.requires_option = true;
        self
    }

    /// Finds an option in this scope by raw token (`--name` or `-alias`).
    pub fn find_option(&self, token: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|opt| opt.matches(token))
    }
}

/// Specification of one top-level console command.
///
/// # Examples
///
/// ```
/// use tyche_console_core::{CommandSpec, OptionSpec, SubcommandSpec, ValueHint};
///
/// let calc = CommandSpec::new("calc", "Nutrition calculator")
///     .with_global_option(OptionSpec::flag("verbose").with_alias("v"))
///     .with_subcommand(
///         SubcommandSpec::new("carbs")
///             .with_option(OptionSpec::with_value("per-100g", ValueHint::Number)),
///     );
///
/// assert!(calc.find_global_option("-v").is_some());
/// assert!(calc.find_subcommand("carbs").is_some());
/// assert!(calc.has_options());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name, globally unique in the registry.
    pub cmd: String,
    /// One-line description shown in the command list.
    pub description: String,
    /// Whether the command takes a bare argument (e.g. `man <command>`).
    pub requires_argument: bool,
    /// Options recognized regardless of subcommand.
    pub global_options: Vec<OptionSpec>,
    /// Subcommands scoped to this command.
    pub subcommands: Vec<SubcommandSpec>,
    /// Ordered placeholder names for command-level positional arguments.
    pub positional_args: Vec<String>,
}

impl CommandSpec {
    /// Creates a new command spec with the given name and description.
    pub fn new(cmd: &str, description: &str) -> Self {
        Self {
            cmd: cmd.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Adds a global option.
    pub fn with_global_option(mut self, option: OptionSpec) -> Self {
        self.global_options.push(option);
        self
    }

    /// Adds a subcommand.
    pub fn with_subcommand(mut self, subcommand: SubcommandSpec) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Appends a positional-argument placeholder.
    pub fn with_positional_arg(mut self, placeholder: &str) -> Self {
        self.positional_args.push(placeholder.to_string());
        self
    }

    /// Marks the command as requiring a bare argument.
    pub fn requires_argument(mut self) -> Self {
        self.requires_argument = true;
        self
    }

    /// Finds a subcommand by exact name.
    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandSpec> {
        self.subcommands.iter().find(|sub| sub.name == name)
    }

    /// Finds a global option by raw token (`--name` or `-alias`).
    pub fn find_global_option(&self, token: &str) -> Option<&OptionSpec> {
        self.global_options.iter().find(|opt| opt.matches(token))
    }

    /// All options of the command in manual-page order: global options first,
    /// then each subcommand's options in declaration order.
    pub fn all_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.global_options
            .iter()
            .chain(self.subcommands.iter().flat_map(|sub| sub.options.iter()))
    }

    /// Whether the command declares any options in any scope.
    pub fn has_options(&self) -> bool {
        !self.global_options.is_empty()
            || self.subcommands.iter().any(|sub| !sub.options.is_empty())
    }
}

/// The command registry: every console command, in declaration order.
///
/// Lookup by name is O(1) through an internal index; iteration preserves
/// insertion order, which is what the `help` listing renders. The registry is
/// populated once at startup and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use tyche_console_core::{CommandRegistry, CommandSpec};
///
/// let registry: CommandRegistry = [
///     CommandSpec::new("help", "List all available commands"),
///     CommandSpec::new("man", "Show the manual page for a command"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(registry.len(), 2);
/// assert!(registry.get("man").is_some());
/// assert_eq!(registry.commands()[0].cmd, "help");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command, indexing it by name.
    ///
    /// Duplicate names are not rejected here (the later entry wins the index
    /// slot); [`validate_registry`](crate::validate_registry) reports them.
    pub fn insert(&mut self, command: CommandSpec) {
        self.index.insert(command.cmd.clone(), self.commands.len());
        self.commands.push(command);
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.index.get(name).map(|&at| &self.commands[at])
    }

    /// Whether a command with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All commands in insertion order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<CommandSpec> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = CommandSpec>>(iter: I) -> Self {
        let mut registry = Self::new();
        for command in iter {
            registry.insert(command);
        }
        registry
    }
}
