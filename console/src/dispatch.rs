//! Command dispatch.
//!
//! The dispatcher owns the registry, the sink, the history, and the task
//! spawner; handlers are methods selected by an exhaustive match over
//! [`CommandKind`]. The set of kinds and the registry are built from the same
//! closed list, so a registry entry without a handler is unrepresentable —
//! the runtime "is not defined" diagnostic fires only for input that names no
//! registry entry at all.
//!
//! Nothing in here returns an error to the caller: every failure path is a
//! `false`/no-op plus exactly one diagnostic entry in the sink.

use thiserror::Error;
use tracing::{debug, warn};
use tyche_console_core::{CommandRegistry, ParsedCli, Value, match_line, validate_registry};

use crate::builtin::{self, builtin_registry};
use crate::context::HubContext;
use crate::log::{CommandHistory, LogSink, Origin, Severity};
use crate::man::{render_command_list, render_man_page};
use crate::tasks::TaskSpawner;

/// The closed set of console commands.
///
/// Adding a command means adding a variant here; the compiler then demands a
/// registry spec and a handler arm for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Connect,
    Disconnect,
    Man,
    Spotify,
    Calc,
    Timer,
}

impl CommandKind {
    /// Every kind, in the order the `help` listing shows them.
    pub const ALL: [Self; 7] = [
        Self::Help,
        Self::Connect,
        Self::Disconnect,
        Self::Man,
        Self::Spotify,
        Self::Calc,
        Self::Timer,
    ];

    /// The command name as typed on the console.
    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::Man => "man",
            Self::Spotify => "spotify",
            Self::Calc => "calc",
            Self::Timer => "timer",
        }
    }

    /// Resolves a command name from user input.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Non-fatal console diagnostics.
///
/// Every variant surfaces as exactly one sink entry; none of them aborts
/// dispatch or escapes as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// First token of the line names no registered command.
    #[error("Command '{0}' is not defined")]
    CommandNotDefined(String),
    /// The command requires a subcommand but none was supplied.
    #[error("Missing subcommand for '{0}'. See 'man {0}' for usage")]
    MissingSubcommand(&'static str),
    /// A subcommand token was parsed but the handler does not know it.
    #[error("Parameter '{parameter}' is not defined for '{command}'. See 'man {command}' for usage")]
    ParameterNotDefined {
        command: &'static str,
        parameter: String,
    },
    /// A token matched neither an option nor a subcommand; the rest of the
    /// line was still processed.
    #[error("Unrecognized token '{0}'")]
    UnrecognizedToken(String),
    /// `man` was invoked without a command name.
    #[error("Usage: man &lt;command&gt;. Type 'help' for a list of commands.")]
    MissingManualTarget,
    /// `man` was invoked with a name absent from the registry.
    #[error("Unknown command: {0}. Type 'help' for available commands.")]
    UnknownManualTarget(String),
}

impl Diagnostic {
    /// Severity of the sink entry this diagnostic produces.
    pub fn severity(&self) -> Severity {
        match self {
            Self::CommandNotDefined(_)
            | Self::ParameterNotDefined { .. }
            | Self::MissingManualTarget
            | Self::UnknownManualTarget(_) => Severity::Error,
            Self::MissingSubcommand(_) | Self::UnrecognizedToken(_) => Severity::Warning,
        }
    }

    /// Whether the message carries console markup.
    pub fn markup(&self) -> bool {
        matches!(self, Self::MissingManualTarget)
    }
}

/// Routes parsed console lines to their handlers.
pub struct Dispatcher {
    registry: CommandRegistry,
    ctx: HubContext,
    sink: LogSink,
    history: CommandHistory,
    tasks: TaskSpawner,
}

impl Dispatcher {
    /// Builds a dispatcher over the built-in registry.
    pub fn new(ctx: HubContext) -> Self {
        let registry = builtin_registry();
        for err in validate_registry(&registry) {
            // The built-in registry is static data; a finding here is a bug.
            warn!(%err, "command registry invariant violated");
        }
        Self {
            registry,
            ctx,
            sink: LogSink::new(),
            history: CommandHistory::new(),
            tasks: TaskSpawner::new(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The sink handlers write to. Clone it to keep reading after dispatch.
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// The submitted-line history.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Submits one console line: records it in the history (immediate
    /// repeats suppressed), then executes it. Blank lines are skipped.
    pub fn submit(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        self.history.record(line);
        self.execute(line)
    }

    /// Executes one line. Returns `true` iff a handler ran.
    ///
    /// A `false` return is not fatal: the reason is already in the sink.
    pub fn execute(&self, line: &str) -> bool {
        let Some(parsed) = match_line(line, &self.registry) else {
            self.report(Diagnostic::CommandNotDefined(line.trim().to_string()));
            return false;
        };

        for token in &parsed.unrecognized {
            warn!(token = token.as_str(), "unrecognized console token");
            self.report(Diagnostic::UnrecognizedToken(token.clone()));
        }

        match CommandKind::from_name(&parsed.command) {
            Some(kind) => {
                debug!(command = %parsed.command, subcommand = ?parsed.subcommand, "dispatching");
                self.run(kind, &parsed);
                true
            }
            None => {
                self.report(Diagnostic::CommandNotDefined(line.trim().to_string()));
                false
            }
        }
    }

    /// Blocks until all fire-and-forget handler tails have appended their
    /// results. Ordering across tails is still unspecified; only completion
    /// is guaranteed.
    pub fn wait_for_background_tasks(&self) {
        self.tasks.wait_idle();
    }

    fn run(&self, kind: CommandKind, parsed: &ParsedCli) {
        match kind {
            CommandKind::Help => self.help(),
            CommandKind::Connect => self.connect(parsed),
            CommandKind::Disconnect => self.disconnect(parsed),
            CommandKind::Man => self.man(parsed),
            CommandKind::Spotify => self.spotify(parsed),
            CommandKind::Calc => self.calc(parsed),
            CommandKind::Timer => self.timer(parsed),
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        let severity = diagnostic.severity();
        if diagnostic.markup() {
            self.sink
                .print_markup(Origin::Command, severity, diagnostic.to_string());
        } else {
            self.sink
                .print(Origin::Command, severity, diagnostic.to_string());
        }
    }

    fn help(&self) {
        self.sink.print_markup(
            Origin::Command,
            Severity::Command,
            render_command_list(&self.registry),
        );
    }

    fn man(&self, parsed: &ParsedCli) {
        let target = parsed.positional_args.first().map(String::as_str);
        match render_man_page(&self.registry, target) {
            Ok(page) => self
                .sink
                .print_markup(Origin::Command, Severity::Command, page),
            Err(diagnostic) => self.report(diagnostic),
        }
    }

    fn connect(&self, parsed: &ParsedCli) {
        match parsed.subcommand.as_deref() {
            Some(builtin::TYCHE) => self.ctx.channel.connect(),
            Some(other) => self.report(Diagnostic::ParameterNotDefined {
                command: CommandKind::Connect.name(),
                parameter: other.to_string(),
            }),
            None => self.report(Diagnostic::MissingSubcommand(CommandKind::Connect.name())),
        }
    }

    fn disconnect(&self, parsed: &ParsedCli) {
        match parsed.subcommand.as_deref() {
            Some(builtin::TYCHE) => self.ctx.channel.disconnect(),
            Some(other) => self.report(Diagnostic::ParameterNotDefined {
                command: CommandKind::Disconnect.name(),
                parameter: other.to_string(),
            }),
            None => self.report(Diagnostic::MissingSubcommand(
                CommandKind::Disconnect.name(),
            )),
        }
    }

    fn spotify(&self, parsed: &ParsedCli) {
        let Some(subcommand) = parsed.subcommand.as_deref() else {
            return self.report(Diagnostic::MissingSubcommand(CommandKind::Spotify.name()));
        };
        match subcommand {
            builtin::VOL => {
                if let Some(values) = &parsed.subcommand_options {
                    // The value is forwarded as coerced; a missing or
                    // malformed token arrives at the backend as NaN.
                    let value = values.get(builtin::VALUE).map_or(f64::NAN, Value::as_number);
                    self.ctx.media.set_volume(value);
                }
            }
            builtin::PLAY => self.ctx.media.play(),
            builtin::PAUSE => self.ctx.media.pause(),
            builtin::PREV => self.ctx.media.previous(),
            builtin::NEXT => self.ctx.media.next(),
            other => self.report(Diagnostic::ParameterNotDefined {
                command: CommandKind::Spotify.name(),
                parameter: other.to_string(),
            }),
        }
    }

    fn calc(&self, parsed: &ParsedCli) {
        let Some(subcommand) = parsed.subcommand.as_deref() else {
            return self.report(Diagnostic::MissingSubcommand(CommandKind::Calc.name()));
        };
        match subcommand {
            builtin::CARBS => {
                let Some(values) = &parsed.subcommand_options else {
                    return;
                };
                if let (Some(per_100g), Some(amount)) =
                    (values.get(builtin::PER_100G), values.get(builtin::AMOUNT))
                {
                    // NaN from malformed input flows through and prints as
                    // "NaN"; rejecting it here would change the console's
                    // observable contract.
                    let result = per_100g.as_number() / 100.0 * amount.as_number();
                    self.sink
                        .print(Origin::Command, Severity::Command, result.to_string());
                }
            }
            other => self.report(Diagnostic::ParameterNotDefined {
                command: CommandKind::Calc.name(),
                parameter: other.to_string(),
            }),
        }
    }

    fn timer(&self, parsed: &ParsedCli) {
        let Some(subcommand) = parsed.subcommand.as_deref() else {
            return self.report(Diagnostic::MissingSubcommand(CommandKind::Timer.name()));
        };
        match subcommand {
            builtin::LIST => {
                let backend = std::sync::Arc::clone(&self.ctx.timers);
                let sink = self.sink.clone();
                // Fire and forget: dispatch returns immediately, the entry
                // lands whenever the hub answers.
                self.tasks.spawn("timer-list", move || {
                    let mut output = String::new();
                    for timer in backend.list_timers() {
                        output.push_str(&format!("{}: {} s\n", timer.id, timer.remaining_time));
                    }
                    sink.print_markup(Origin::Timer, Severity::Command, output);
                });
            }
            other => self.report(Diagnostic::ParameterNotDefined {
                command: CommandKind::Timer.name(),
                parameter: other.to_string(),
            }),
        }
    }
}
