use std::fmt;

use colored::Colorize;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => text,
        MessageKind::Success => format!("[\u{2713}] {}", text).bright_green().to_string(),
        MessageKind::Warning => format!("[!] {}", text).bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {}", text).bright_red().to_string(),
        MessageKind::Hint => format!("    {}", text).bright_cyan().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Renders a column-aligned table clamped to the terminal width.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (index, cell) in row.iter().take(columns).enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let max_width = terminal_width().saturating_sub(2 * columns);
    let total: usize = widths.iter().sum();
    if total > max_width {
        // Shrink the widest column until the table fits.
        let mut excess = total - max_width;
        while excess > 0 {
            let widest = widths
                .iter()
                .copied()
                .enumerate()
                .max_by_key(|(_, width)| *width)
                .filter(|(_, width)| *width > 8);
            let Some((index, _)) = widest else {
                break;
            };
            widths[index] -= 1;
            excess -= 1;
        }
    }

    print_row(headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(), &widths, true);
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    print_row(separator, &widths, false);
    for row in rows {
        print_row(row.clone(), &widths, false);
    }
}

fn print_row(cells: Vec<String>, widths: &[usize], bold: bool) {
    let mut line = String::new();
    for (index, width) in widths.iter().enumerate() {
        let cell = cells.get(index).map(String::as_str).unwrap_or("");
        let clipped = clip(cell, *width);
        line.push_str(&format!("{:<width$}  ", clipped, width = *width));
    }
    let line = line.trim_end().to_string();
    if bold {
        println!("{}", line.bold());
    } else {
        println!("{}", line);
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('\u{2026}');
    clipped
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(100)
        .max(40)
}
