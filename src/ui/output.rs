//! Status lines printed by the set, undo, icons and config commands

use super::context::UiContext;
use console::style;

/// Outcome shown in front of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

impl Status {
    fn tag(self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Fail => "[FAIL]",
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Ok => style(text).green().to_string(),
            Self::Warn => style(text).yellow().to_string(),
            Self::Fail => style(text).red().to_string(),
        }
    }
}

/// Title above the attribute table
pub fn heading(ctx: &UiContext, title: &str) {
    if ctx.is_styled() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}\n", title);
    }
}

/// Status line, optionally followed by a dimmed detail
pub fn step(ctx: &UiContext, status: Status, message: &str, detail: Option<&str>) {
    if !ctx.is_styled() {
        match detail {
            Some(detail) => println!("  {} {} ({})", status.tag(), message, detail),
            None => println!("  {} {}", status.tag(), message),
        }
        return;
    }

    let line = match detail {
        Some(detail) => format!("{} ({})", message, style(detail).dim()),
        None => message.to_string(),
    };
    let _ = match status {
        Status::Ok => cliclack::log::success(line),
        Status::Warn => cliclack::log::warning(line),
        Status::Fail => cliclack::log::error(line),
    };
}

/// Dimmed note without a status
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.is_styled() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", message);
    }
}

/// Labelled value, colored by status when one is given
pub fn field(ctx: &UiContext, label: &str, value: &str, status: Option<Status>) {
    match (ctx.is_styled(), status) {
        (true, Some(status)) => println!("  {}: {}", style(label).dim(), status.paint(value)),
        (true, None) => println!("  {}: {}", style(label).dim(), value),
        (false, Some(status)) => println!("  {} {}: {}", status.tag(), label, value),
        (false, None) => println!("  {}: {}", label, value),
    }
}
