//! The built-in command registry.
//!
//! One spec per [`CommandKind`], so the registry and the dispatch table can
//! never drift apart. The registry is data only; behavior lives in the
//! dispatcher's handlers.

use tyche_console_core::{CommandRegistry, CommandSpec, OptionSpec, SubcommandSpec, ValueHint};

use crate::dispatch::CommandKind;

// Subcommand and option names shared between the registry and the handlers.
pub(crate) const TYCHE: &str = "tyche";
pub(crate) const VOL: &str = "vol";
pub(crate) const PLAY: &str = "play";
pub(crate) const PAUSE: &str = "pause";
pub(crate) const PREV: &str = "prev";
pub(crate) const NEXT: &str = "next";
pub(crate) const CARBS: &str = "carbs";
pub(crate) const LIST: &str = "list";
pub(crate) const VALUE: &str = "value";
pub(crate) const PER_100G: &str = "per-100g";
pub(crate) const AMOUNT: &str = "amount";

/// Builds the registry for every known command, in help-listing order.
pub fn builtin_registry() -> CommandRegistry {
    CommandKind::ALL.into_iter().map(spec_for).collect()
}

fn spec_for(kind: CommandKind) -> CommandSpec {
    match kind {
        CommandKind::Help => CommandSpec::new(kind.name(), "List all available commands"),
        CommandKind::Connect => CommandSpec::new(kind.name(), "Connect hub data channels")
            .with_subcommand(
                SubcommandSpec::new(TYCHE).with_description("The Tyche live-update channel"),
            ),
        CommandKind::Disconnect => CommandSpec::new(kind.name(), "Disconnect hub data channels")
            .with_subcommand(
                SubcommandSpec::new(TYCHE).with_description("The Tyche live-update channel"),
            ),
        CommandKind::Man => {
            CommandSpec::new(kind.name(), "Show the manual page for a command").requires_argument()
        }
        CommandKind::Spotify => CommandSpec::new(kind.name(), "Control Spotify playback")
            .with_subcommand(
                SubcommandSpec::new(VOL)
                    .with_description("Set playback volume")
                    .with_option(
                        OptionSpec::with_value(VALUE, ValueHint::Number)
                            .with_alias("v")
                            .with_description("Volume level between 0 and 100"),
                    )
                    .requires_option(),
            )
            .with_subcommand(SubcommandSpec::new(PLAY).with_description("Resume playback"))
            .with_subcommand(SubcommandSpec::new(PAUSE).with_description("Pause playback"))
            .with_subcommand(
                SubcommandSpec::new(PREV).with_description("Skip back to the previous track"),
            )
            .with_subcommand(SubcommandSpec::new(NEXT).with_description("Skip to the next track")),
        CommandKind::Calc => CommandSpec::new(kind.name(), "Nutrition calculator")
            .with_global_option(
                OptionSpec::flag("verbose")
                    .with_alias("v")
                    .with_description("Print extra detail"),
            )
            .with_subcommand(
                SubcommandSpec::new(CARBS)
                    .with_description("Carbohydrates for a weighed amount")
                    .with_option(
                        OptionSpec::with_value(PER_100G, ValueHint::Number)
                            .with_alias("p")
                            .with_description("Carbohydrates per 100 g"),
                    )
                    .with_option(
                        OptionSpec::with_value(AMOUNT, ValueHint::Number)
                            .with_alias("a")
                            .with_description("Amount in grams"),
                    )
                    .requires_option(),
            ),
        CommandKind::Timer => CommandSpec::new(kind.name(), "Manage hub timers").with_subcommand(
            SubcommandSpec::new(LIST).with_description("List active timers and remaining time"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use tyche_console_core::validate_registry;

    use super::*;

    #[test]
    fn test_builtin_registry_validates_clean() {
        assert!(validate_registry(&builtin_registry()).is_empty());
    }

    #[test]
    fn test_builtin_registry_covers_every_kind_in_order() {
        let registry = builtin_registry();
        let names: Vec<&str> = registry.commands().iter().map(|c| c.cmd.as_str()).collect();
        let expected: Vec<&str> = CommandKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_spotify_vol_option_scope() {
        let registry = builtin_registry();
        let spotify = registry.get("spotify").unwrap();

        assert!(spotify.find_global_option("--value").is_none());
        let vol = spotify.find_subcommand(VOL).unwrap();
        assert!(vol.find_option("--value").is_some());
        assert!(vol.find_option("-v").is_some());
        assert!(vol.requires_option);
    }
}
