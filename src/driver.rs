//! Line-based terminal front end for the widget.

use crate::actors::WidgetMessage;
use crate::models::WidgetSnapshot;
use colored::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Replace the input value (the whole line, untrimmed)
    Type(String),
    /// Click the n-th candidate, 1-based
    Pick(usize),
    /// Click the remove control of the n-th saved card, 1-based
    Remove(usize),
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> DriverCommand {
    let Some(command) = line.strip_prefix(':') else {
        return DriverCommand::Type(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let index = parts.next().map(|n| n.parse::<usize>());

    match (verb, index) {
        ("pick", Some(Ok(n))) if n > 0 => DriverCommand::Pick(n),
        ("remove", Some(Ok(n))) if n > 0 => DriverCommand::Remove(n),
        ("pick", _) | ("remove", _) => {
            DriverCommand::Invalid(format!("{} expects a position starting at 1", verb))
        }
        ("show", None) => DriverCommand::Show,
        ("help", None) => DriverCommand::Help,
        ("quit", None) | ("q", None) => DriverCommand::Quit,
        _ => DriverCommand::Invalid(format!("unknown command :{}", command)),
    }
}

/// Maps a command onto the click or input event it stands for.
///
/// Positions refer to `view`, the last picture the user saw.
pub fn to_message(
    command: &DriverCommand,
    view: &WidgetSnapshot,
) -> Result<Option<WidgetMessage>, String> {
    match command {
        DriverCommand::Type(value) => Ok(Some(WidgetMessage::Input(value.clone()))),
        DriverCommand::Pick(n) => view
            .candidates
            .get(n.wrapping_sub(1))
            .map(|c| Some(WidgetMessage::CandidateClick(c.node)))
            .ok_or_else(|| format!("no candidate #{}", n)),
        DriverCommand::Remove(n) => view
            .saved
            .get(n.wrapping_sub(1))
            .and_then(|card| card.remove_control)
            .map(|control| Some(WidgetMessage::SavedClick(control)))
            .ok_or_else(|| format!("no saved card #{}", n)),
        DriverCommand::Invalid(reason) => Err(reason.clone()),
        DriverCommand::Show | DriverCommand::Help | DriverCommand::Quit => Ok(None),
    }
}

/// Like [`to_message`] for `:pick` and `:remove`, but refuses when the list the
/// user counted in no longer matches `current`.
pub fn resolve_click(
    command: &DriverCommand,
    shown: &WidgetSnapshot,
    current: &WidgetSnapshot,
) -> Result<WidgetMessage, String> {
    let stale = match command {
        DriverCommand::Pick(_) => shown.candidates != current.candidates,
        DriverCommand::Remove(_) => shown.saved != current.saved,
        other => return Err(format!("{:?} is not a click", other)),
    };
    if stale {
        return Err("view is out of date, showing the current one".to_string());
    }

    to_message(command, shown)?.ok_or_else(|| format!("{:?} is not a click", command))
}

pub fn render_view(view: &WidgetSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "search>".bold().cyan(), view.input));

    if view.candidates.is_empty() {
        out.push_str(&format!("  {}\n", "(no candidates)".dimmed()));
    }
    for (i, candidate) in view.candidates.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", format!("{}.", i + 1).yellow(), candidate.name));
    }

    out.push_str(&format!("{}\n", "saved".bold().green()));
    if view.saved.is_empty() {
        out.push_str(&format!("  {}\n", "(nothing saved)".dimmed()));
    }
    for (i, card) in view.saved.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", format!("{}.", i + 1).yellow(), card.lines.join(" | ")));
    }
    out
}

pub const HELP: &str = "\
Type a query and press Enter to search (an empty line clears it).
  :pick N     save the N-th candidate
  :remove N   remove the N-th saved card
  :show       print the current view
  :quit       exit";
