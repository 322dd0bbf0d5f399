use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;

use crate::model::{Priority, Status};

/// Status tab selection: everything, or a single board column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub const ALL_TABS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(Status::Todo),
        StatusFilter::Only(Status::InProgress),
        StatusFilter::Only(Status::Done),
    ];

    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => *wanted == priority,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityFilter::All => "All",
            PriorityFilter::Only(priority) => priority.label(),
        }
    }
}

/// Ordering applied to the filtered sequence.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first by creation time.
    #[default]
    Recent,
    /// Soonest due date first; tasks without one sink to the end.
    Deadline,
    /// High before medium before low.
    Priority,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Recent, SortMode::Deadline, SortMode::Priority];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Deadline => "deadline",
            SortMode::Priority => "priority",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Recent => "Recent",
            SortMode::Deadline => "Deadline",
            SortMode::Priority => "Priority",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recent" | "created" => Ok(SortMode::Recent),
            "deadline" | "due" => Ok(SortMode::Deadline),
            "priority" => Ok(SortMode::Priority),
            other => Err(anyhow!(
                "Unknown sort mode '{}': expected recent|deadline|priority",
                other
            )),
        }
    }
}

impl ValueEnum for SortMode {
    fn value_variants<'a>() -> &'a [Self] {
        &SortMode::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Board,
    Calendar,
}

impl ViewMode {
    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Board => ViewMode::Calendar,
            ViewMode::Calendar => ViewMode::Board,
        }
    }
}

/// The user-selected filter/sort/view controls plus the calendar cursor.
///
/// Plain data: every derived view is a pure function of this struct and the
/// raw task snapshot. Mutation goes through [`crate::board::BoardState`],
/// which re-derives after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub status_filter: StatusFilter,
    pub search_term: String,
    pub priority_filter: PriorityFilter,
    pub show_overdue_only: bool,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub sort_by: SortMode,
    pub view_mode: ViewMode,
    pub calendar_year: i32,
    /// Zero-based month index (0 = January), wrapping at year boundaries.
    pub calendar_month: u32,
}

impl ViewState {
    /// Fresh state with the calendar cursor on the current local month.
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            status_filter: StatusFilter::All,
            search_term: String::new(),
            priority_filter: PriorityFilter::All,
            show_overdue_only: false,
            due_from: None,
            due_to: None,
            sort_by: SortMode::Recent,
            view_mode: ViewMode::Board,
            calendar_year: today.year(),
            calendar_month: today.month0(),
        }
    }

    /// Reset the secondary filters and sort to their defaults. The status tab,
    /// search term and overdue toggle are deliberately left alone.
    pub fn clear_filters(&mut self) {
        self.priority_filter = PriorityFilter::All;
        self.due_from = None;
        self.due_to = None;
        self.sort_by = SortMode::Recent;
    }

    pub fn prev_month(&mut self) {
        if self.calendar_month == 0 {
            self.calendar_month = 11;
            self.calendar_year -= 1;
        } else {
            self.calendar_month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.calendar_month == 11 {
            self.calendar_month = 0;
            self.calendar_year += 1;
        } else {
            self.calendar_month += 1;
        }
    }

    pub fn go_to_today(&mut self) {
        let today = Local::now().date_naive();
        self.calendar_year = today.year();
        self.calendar_month = today.month0();
    }

    /// One-line description of the non-default filters, for the header.
    pub fn filter_summary(&self) -> Option<String> {
        let mut parts = Vec::new();

        let term = self.search_term.trim();
        if !term.is_empty() {
            parts.push(format!("search:\"{term}\""));
        }
        if let PriorityFilter::Only(priority) = self.priority_filter {
            parts.push(format!("priority:{}", priority.as_str()));
        }
        if self.show_overdue_only {
            parts.push(String::from("overdue"));
        }
        match (self.due_from, self.due_to) {
            (Some(from), Some(to)) => parts.push(format!("due:{from}..{to}")),
            (Some(from), None) => parts.push(format!("due:{from}..")),
            (None, Some(to)) => parts.push(format!("due:..{to}")),
            (None, None) => {}
        }
        if self.sort_by != SortMode::Recent {
            parts.push(format!("sort:{}", self.sort_by.as_str()));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn month_navigation_wraps_at_year_boundaries() {
        let mut view = ViewState::new();
        view.calendar_year = 2025;
        view.calendar_month = 0;
        view.prev_month();
        assert_eq!((view.calendar_year, view.calendar_month), (2024, 11));
        view.next_month();
        assert_eq!((view.calendar_year, view.calendar_month), (2025, 0));

        view.calendar_month = 11;
        view.next_month();
        assert_eq!((view.calendar_year, view.calendar_month), (2026, 0));
    }

    #[test]
    fn clear_filters_resets_only_secondary_controls() {
        let mut view = ViewState::new();
        view.status_filter = StatusFilter::Only(Status::Done);
        view.search_term = String::from("report");
        view.priority_filter = PriorityFilter::Only(Priority::High);
        view.show_overdue_only = true;
        view.due_from = NaiveDate::from_ymd_opt(2025, 1, 1);
        view.due_to = NaiveDate::from_ymd_opt(2025, 1, 31);
        view.sort_by = SortMode::Priority;

        view.clear_filters();

        assert_eq!(view.priority_filter, PriorityFilter::All);
        assert_eq!(view.due_from, None);
        assert_eq!(view.due_to, None);
        assert_eq!(view.sort_by, SortMode::Recent);
        // untouched
        assert_eq!(view.status_filter, StatusFilter::Only(Status::Done));
        assert_eq!(view.search_term, "report");
        assert!(view.show_overdue_only);
    }

    #[test]
    fn filter_summary_lists_active_parts() {
        let mut view = ViewState::new();
        assert_eq!(view.filter_summary(), None);

        view.search_term = String::from("milk");
        view.priority_filter = PriorityFilter::Only(Priority::High);
        view.show_overdue_only = true;
        view.sort_by = SortMode::Deadline;

        assert_eq!(
            view.filter_summary().as_deref(),
            Some("search:\"milk\" | priority:high | overdue | sort:deadline")
        );
    }
}
