//! Help listing and manual-page rendering.
//!
//! Output is console markup: `<br />` line breaks plus the small fixed set
//! of entity escapes (`&lt;`, `&gt;`, `&nbsp;`) a downstream renderer
//! interprets. Column alignment is therefore computed against the *decoded*
//! width of a string while the padding spaces are appended to the raw,
//! still-escaped text — padding against raw length would misalign every row
//! whose cell contains an escape.

use tyche_console_core::{CommandRegistry, CommandSpec};

use crate::dispatch::Diagnostic;

/// Width of the name column in the command list and option tables.
const NAME_COLUMN_WIDTH: usize = 12;

const LIST_RULE: &str = "──────────────────────────────────";
const MAN_RULE: &str = "──────────────────────────────────────────────────";
const LINE_BREAK: &str = "<br />";

/// Decodes the console's entity escapes into their visible characters.
pub fn strip_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
}

/// Visible width of a possibly-escaped string.
fn visible_len(text: &str) -> usize {
    strip_entities(text).chars().count()
}

/// Pads `text` with trailing spaces until its *visible* width reaches
/// `width`. Text already wider than the column is left untouched.
fn pad_visible(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_len(text));
    format!("{text}{}", " ".repeat(padding))
}

/// Renders the `help` listing: every command in registry order.
pub fn render_command_list(registry: &CommandRegistry) -> String {
    let mut out = String::from("AVAILABLE COMMANDS");
    out.push_str(LINE_BREAK);
    out.push_str(LIST_RULE);
    out.push_str(LINE_BREAK);

    for command in registry.commands() {
        out.push_str(&pad_visible(&command.cmd, NAME_COLUMN_WIDTH));
        out.push_str(" - ");
        out.push_str(&command.description);
        out.push_str(LINE_BREAK);
    }

    out.push_str(LIST_RULE);
    out.push_str(LINE_BREAK);
    out
}

/// Renders the manual page for `target`.
///
/// No target → usage diagnostic, without touching the registry. Unknown
/// target → unknown-command diagnostic. Both come back as values; the
/// caller turns them into sink entries.
pub fn render_man_page(
    registry: &CommandRegistry,
    target: Option<&str>,
) -> Result<String, Diagnostic> {
    let Some(name) = target else {
        return Err(Diagnostic::MissingManualTarget);
    };
    let Some(command) = registry.get(name) else {
        return Err(Diagnostic::UnknownManualTarget(name.to_string()));
    };

    let mut out = format!("TYCHE COMMAND MANUAL - {}{LINE_BREAK}", command.cmd.to_uppercase());
    out.push_str(MAN_RULE);
    out.push_str(LINE_BREAK);
    out.push_str(LINE_BREAK);

    out.push_str("SYNOPSIS");
    out.push_str(LINE_BREAK);
    out.push_str(LINE_BREAK);
    out.push_str(&format!("    {}", command.cmd));
    if command.requires_argument {
        out.push_str(" &lt;argument&gt;");
    } else if command.has_options() {
        out.push_str(" [OPTIONS]");
    }
    out.push_str(LINE_BREAK);
    out.push_str(LINE_BREAK);

    out.push_str("DESCRIPTION");
    out.push_str(LINE_BREAK);
    out.push_str(LINE_BREAK);
    render_description(command, &mut out);

    out.push_str(MAN_RULE);
    out.push_str(LINE_BREAK);
    Ok(out)
}

fn render_description(command: &CommandSpec, out: &mut String) {
    if command.requires_argument {
        out.push_str(&format!(
            "    The '{}' command requires an argument.{LINE_BREAK}{LINE_BREAK}",
            command.cmd
        ));
        return;
    }

    if !command.has_options() {
        out.push_str(&format!(
            "    The '{}' command does not require any options.{LINE_BREAK}{LINE_BREAK}",
            command.cmd
        ));
        return;
    }

    out.push_str(&format!(
        "    The '{}' command supports the following options:{LINE_BREAK}{LINE_BREAK}",
        command.cmd
    ));

    for option in command.all_options() {
        let value_suffix = if option.requires_value { "=&lt;value&gt;" } else { "" };
        let alias = option.alias.as_deref().unwrap_or(&option.name);
        out.push_str("    ");
        out.push_str(&pad_visible(
            &format!("{alias}{value_suffix}"),
            NAME_COLUMN_WIDTH,
        ));
        out.push_str(" - ");
        out.push_str(
            option
                .description
                .as_deref()
                .unwrap_or("No description available"),
        );
        out.push_str(LINE_BREAK);
    }

    out.push_str(LINE_BREAK);
}
