//! Registry validation.
//!
//! Validates the structural invariants of a command registry before it goes
//! live: globally unique command names, unique option names and aliases per
//! scope, unique subcommand names, and no empty identifiers.
//!
//! # Examples
//!
//! ```
//! use tyche_console_core::*;
//!
//! let registry: CommandRegistry = [CommandSpec::new("help", "List commands")]
//!     .into_iter()
//!     .collect();
//! assert!(validate_registry(&registry).is_empty());
//!
//! // Duplicate alias within one scope → error
//! let bad: CommandRegistry = [CommandSpec::new("calc", "")
//!     .with_global_option(OptionSpec::flag("verbose").with_alias("v"))
//!     .with_global_option(OptionSpec::flag("version").with_alias("v"))]
//! .into_iter()
//! .collect();
//! assert!(!validate_registry(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandRegistry, CommandSpec, OptionSpec};

/// Registry validation errors.
///
/// Each variant describes one structural problem; the `Display` impl gives a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two registry entries share a command name.
    #[error("duplicate command in registry: {0}")]
    DuplicateCommand(String),
    /// Option name is empty.
    #[error("option name cannot be empty in '{0}'")]
    EmptyOptionName(String),
    /// Two options in one scope share a long name.
    #[error("duplicate option '{option}' in '{scope}'")]
    DuplicateOption { scope: String, option: String },
    /// Two options in one scope share an alias.
    #[error("duplicate alias '{alias}' in '{scope}'")]
    DuplicateAlias { scope: String, alias: String },
    /// Subcommand name is empty.
    #[error("subcommand name cannot be empty in '{0}'")]
    EmptySubcommandName(String),
    /// Two subcommands of one command share a name.
    #[error("duplicate subcommand '{subcommand}' in '{command}'")]
    DuplicateSubcommand { command: String, subcommand: String },
}

/// Validates a full registry.
///
/// Checks global command-name uniqueness, then validates each command.
pub fn validate_registry(registry: &CommandRegistry) -> Vec<RegistryError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for command in registry.commands() {
        if !seen.insert(command.cmd.as_str()) {
            errors.push(RegistryError::DuplicateCommand(command.cmd.clone()));
            return errors;
        }
        errors.extend(validate_command(command));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates one command: name, global option scope, and each subcommand.
pub fn validate_command(command: &CommandSpec) -> Vec<RegistryError> {
    let mut errors = Vec::new();

    if command.cmd.trim().is_empty() {
        errors.push(RegistryError::EmptyCommandName);
        return errors;
    }

    errors.extend(validate_options(&command.global_options, &command.cmd));
    if !errors.is_empty() {
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &command.subcommands {
        let name = sub.name.trim();
        if name.is_empty() {
            errors.push(RegistryError::EmptySubcommandName(command.cmd.clone()));
            return errors;
        }
        if !seen.insert(name) {
            errors.push(RegistryError::DuplicateSubcommand {
                command: command.cmd.clone(),
                subcommand: name.to_string(),
            });
            return errors;
        }

        let scope = format!("{} {}", command.cmd, sub.name);
        errors.extend(validate_options(&sub.options, &scope));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_options(options: &[OptionSpec], scope: &str) -> Vec<RegistryError> {
    let mut errors = Vec::new();
    let mut names: HashSet<&str> = HashSet::new();
    let mut aliases: HashSet<&str> = HashSet::new();

    for option in options {
        if option.name.trim().is_empty() {
            errors.push(RegistryError::EmptyOptionName(scope.to_string()));
            return errors;
        }
        if !names.insert(option.name.as_str()) {
            errors.push(RegistryError::DuplicateOption {
                scope: scope.to_string(),
                option: option.name.clone(),
            });
            return errors;
        }
        if let Some(alias) = &option.alias {
            if !aliases.insert(alias.as_str()) {
                errors.push(RegistryError::DuplicateAlias {
                    scope: scope.to_string(),
                    alias: alias.clone(),
                });
                return errors;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::SubcommandSpec;

    use super::*;

    #[test]
    fn test_validate_registry_rejects_duplicate_commands() {
        let registry: CommandRegistry = [
            CommandSpec::new("help", ""),
            CommandSpec::new("help", ""),
        ]
        .into_iter()
        .collect();

        let errors = validate_registry(&registry);
        assert_eq!(
            errors,
            vec![RegistryError::DuplicateCommand("help".to_string())]
        );
    }

    #[test]
    fn test_validate_command_rejects_duplicate_option_in_scope() {
        let command = CommandSpec::new("calc", "")
            .with_global_option(OptionSpec::flag("verbose"))
            .with_global_option(OptionSpec::flag("verbose"));

        let errors = validate_command(&command);
        assert_eq!(
            errors,
            vec![RegistryError::DuplicateOption {
                scope: "calc".to_string(),
                option: "verbose".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_command_allows_same_alias_in_different_scopes() {
        let command = CommandSpec::new("calc", "")
            .with_global_option(OptionSpec::flag("verbose").with_alias("v"))
            .with_subcommand(
                SubcommandSpec::new("carbs")
                    .with_option(OptionSpec::flag("vegan").with_alias("v")),
            );

        assert!(validate_command(&command).is_empty());
    }

    #[test]
    fn test_validate_command_rejects_duplicate_subcommand() {
        let command = CommandSpec::new("timer", "")
            .with_subcommand(SubcommandSpec::new("list"))
            .with_subcommand(SubcommandSpec::new("list"));

        let errors = validate_command(&command);
        assert_eq!(
            errors,
            vec![RegistryError::DuplicateSubcommand {
                command: "timer".to_string(),
                subcommand: "list".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_command_rejects_empty_names() {
        assert_eq!(
            validate_command(&CommandSpec::new("  ", "")),
            vec![RegistryError::EmptyCommandName]
        );

        let command = CommandSpec::new("calc", "").with_global_option(OptionSpec::flag(""));
        assert_eq!(
            validate_command(&command),
            vec![RegistryError::EmptyOptionName("calc".to_string())]
        );
    }
}
