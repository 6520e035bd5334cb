use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tyche_console::{
    Dispatcher, HubContext, LiveChannel, MediaControl, Severity, TimerBackend, TimerEntry,
    render_man_page, strip_entities,
};

/// Output format for the registry export.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "tyche-console")]
#[command(about = "Interactive console for the Tyche home-automation hub")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one console line and print the resulting log entries.
    Exec(ExecArgs),
    /// Export the command registry.
    Commands(CommandsArgs),
    /// Print the manual page for one command.
    Man(ManArgs),
}

#[derive(Debug, Args)]
struct ExecArgs {
    /// The console line, given as plain tokens (e.g. `exec spotify vol --value 50`).
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    line: Vec<String>,
}

#[derive(Debug, Args)]
struct CommandsArgs {
    /// Output format (default: table).
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ManArgs {
    /// Command name to show the manual page for.
    name: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let dispatcher = build_dispatcher();

    let result = match cli.command {
        None => run_repl(&dispatcher),
        Some(Command::Exec(args)) => run_exec(&dispatcher, args.line),
        Some(Command::Commands(args)) => run_commands(&dispatcher, args.format),
        Some(Command::Man(args)) => run_man(&dispatcher, &args.name),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn build_dispatcher() -> Dispatcher {
    let ctx = HubContext::new(
        Arc::new(OfflineChannel),
        Arc::new(OfflineMedia),
        Arc::new(OfflineTimers),
    );
    Dispatcher::new(ctx)
}

fn run_repl(dispatcher: &Dispatcher) -> Result<(), String> {
    println!("Tyche console. Type 'help' for commands, 'exit' to leave.");
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|err| format!("failed to flush stdout: {err}"))?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| format!("failed to read input: {err}"))?;
        if read == 0 {
            break;
        }

        let line = line.trim();
        if line == "exit" || line == "quit" {
            break;
        }

        dispatcher.submit(line);
        // Asynchronous tails (timer list) are not awaited; their entries
        // print on a later flush, possibly interleaved with newer output.
        flush_sink(dispatcher);
    }

    dispatcher.wait_for_background_tasks();
    flush_sink(dispatcher);
    Ok(())
}

fn run_exec(dispatcher: &Dispatcher, line: Vec<String>) -> Result<(), String> {
    let dispatched = dispatcher.submit(&line.join(" "));
    dispatcher.wait_for_background_tasks();
    flush_sink(dispatcher);

    if dispatched {
        Ok(())
    } else {
        Err("command not defined".to_string())
    }
}

fn run_commands(dispatcher: &Dispatcher, format: CliOutputFormat) -> Result<(), String> {
    let commands = dispatcher.registry().commands();
    match format {
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(commands)
                .map_err(|err| format!("failed to serialize registry: {err}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(commands)
                .map_err(|err| format!("failed to serialize registry: {err}"))?;
            print!("{yaml}");
        }
        CliOutputFormat::Table => {
            for command in commands {
                println!("{:<12} {}", command.cmd, command.description);
            }
        }
    }
    Ok(())
}

fn run_man(dispatcher: &Dispatcher, name: &str) -> Result<(), String> {
    match render_man_page(dispatcher.registry(), Some(name)) {
        Ok(page) => {
            println!("{}", render_terminal(&page));
            Ok(())
        }
        Err(diagnostic) => Err(strip_entities(&diagnostic.to_string())),
    }
}

/// Prints and drops everything currently in the sink.
fn flush_sink(dispatcher: &Dispatcher) {
    for entry in dispatcher.sink().take() {
        let text = if entry.markup {
            render_terminal(&entry.message)
        } else {
            entry.message
        };
        match entry.severity {
            Severity::Warning | Severity::Error => eprintln!("[{}] {text}", entry.severity),
            _ => println!("{text}"),
        }
    }
}

/// Converts console markup to terminal text: entity escapes decoded,
/// `<br />` breaks turned into newlines.
fn render_terminal(markup: &str) -> String {
    strip_entities(markup)
        .replace("<br />", "\n")
        .trim_end()
        .to_string()
}

// The terminal build ships without a hub attached: collaborator calls only
// emit tracing events, and the timer list is always empty.

struct OfflineChannel;

impl LiveChannel for OfflineChannel {
    fn connect(&self) {
        info!("live-update channel connected");
    }

    fn disconnect(&self) {
        info!("live-update channel disconnected");
    }
}

struct OfflineMedia;

impl MediaControl for OfflineMedia {
    fn set_volume(&self, value: f64) {
        info!(value, "playback volume set");
    }

    fn play(&self) {
        info!("playback resumed");
    }

    fn pause(&self) {
        info!("playback paused");
    }

    fn next(&self) {
        info!("skipped to next track");
    }

    fn previous(&self) {
        info!("skipped to previous track");
    }
}

struct OfflineTimers;

impl TimerBackend for OfflineTimers {
    fn list_timers(&self) -> Vec<TimerEntry> {
        Vec::new()
    }
}
