use std::cmp::min;

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::{Priority, Status, Task};

pub const BG_BASE: Color = Color::Rgb(15, 17, 22);
pub const BG_PANEL: Color = Color::Rgb(23, 26, 33);
pub const BG_ACCENT: Color = Color::Rgb(33, 38, 48);
pub const FG_ACCENT: Color = Color::Rgb(125, 170, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

pub fn status_style(status: Status) -> Style {
    match status {
        Status::Todo => Style::default().fg(Color::Cyan),
        Status::InProgress => Style::default().fg(Color::Yellow),
        Status::Done => Style::default().fg(Color::Green),
    }
}

/// Due column text: local calendar date, with an overdue marker.
pub fn format_due(task: &Task) -> String {
    match task.due_date {
        Some(due) => {
            let local = due.with_timezone(&Local).format("%Y-%m-%d");
            if task.overdue {
                format!("{local} ⚠")
            } else {
                local.to_string()
            }
        }
        None => String::new(),
    }
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn format_task_detail_entries(task: &Task) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    entries.push((String::from("Title"), task.title.clone()));
    entries.push((String::from("Status"), task.status.label().to_string()));
    entries.push((String::from("Priority"), task.priority.label().to_string()));

    if let Some(description) = &task.description {
        if !description.trim().is_empty() {
            entries.push((String::from("Description"), description.clone()));
        }
    }
    if let Some(category) = &task.category {
        if !category.is_empty() {
            entries.push((String::from("Category"), category.clone()));
        }
    }
    let due = format_due(task);
    if !due.is_empty() {
        entries.push((String::from("Due"), due));
    }
    if task.overdue {
        entries.push((String::from("Overdue"), String::from("yes")));
    }
    entries.push((String::from("Created"), format_datetime(&task.created_at)));
    entries.push((String::from("Updated"), format_datetime(&task.updated_at)));

    entries
}

/// Insert a visible cursor at a character column.
pub fn with_cursor(text: &str, col: usize) -> String {
    let byte = text
        .char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let mut out = String::with_capacity(text.len() + 3);
    out.push_str(&text[..byte]);
    out.push('▏');
    out.push_str(&text[byte..]);
    out
}

/// A small textual gauge for the upcoming-progress percentage.
pub fn progress_gauge(percent: u8, width: usize) -> String {
    let clamped = percent.min(100) as usize;
    let filled = (clamped * width + 50) / 100;
    let mut bar = String::with_capacity(width + 6);
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    format!("{bar} {clamped:>3}%")
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift+Tab", "Cycle status tabs (All/To Do/In Progress/Done)"),
        ("v", "Toggle board / calendar view"),
        ("j / k or ↓ / ↑", "Move selection (board)"),
        ("← → ↑ ↓", "Move across days (calendar)"),
        ("[ / ]", "Previous / next month"),
        ("t", "Jump to today"),
        ("Enter", "Task details (board) / day details (calendar)"),
        ("a", "Add a task"),
        ("e", "Edit selected task"),
        ("m", "Advance status (To Do → In Progress → Done)"),
        ("x / Delete", "Delete task (with confirmation)"),
        ("/", "Search titles and descriptions"),
        ("f", "Open filter picker"),
        ("C", "Reset filters and sort"),
        ("r", "Refresh from storage"),
        ("h", "Toggle this help overlay"),
        ("q", "Quit"),
        ("Esc", "Cancel/close overlays"),
    ]
}
