//! The filter picker overlay: a working copy of the secondary view controls
//! that is committed or discarded as a whole.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::Priority;
use taskdeck_core::{PriorityFilter, SortMode, ViewState};

/// Due-date window presets offered by the picker, resolved to inclusive
/// local-date bounds at apply time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum DueWindow {
    #[default]
    Any,
    Today,
    NextSevenDays,
    ThisMonth,
}

impl DueWindow {
    pub(crate) const ALL: [DueWindow; 4] = [
        DueWindow::Any,
        DueWindow::Today,
        DueWindow::NextSevenDays,
        DueWindow::ThisMonth,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            DueWindow::Any => "Any time",
            DueWindow::Today => "Today",
            DueWindow::NextSevenDays => "Next 7 days",
            DueWindow::ThisMonth => "This month",
        }
    }

    pub(crate) fn resolve(self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            DueWindow::Any => (None, None),
            DueWindow::Today => (Some(today), Some(today)),
            DueWindow::NextSevenDays => (Some(today), Some(today + Duration::days(6))),
            DueWindow::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let last = last_of_month(first);
                (Some(first), Some(last))
            }
        }
    }
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(first)
}

/// The secondary controls the picker edits, as one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FilterSelection {
    pub(crate) priority: PriorityFilter,
    pub(crate) overdue_only: bool,
    pub(crate) window: DueWindow,
    pub(crate) sort: SortMode,
}

impl FilterSelection {
    pub(crate) fn current(view: &ViewState, window: DueWindow) -> Self {
        Self {
            priority: view.priority_filter,
            overdue_only: view.show_overdue_only,
            window,
            sort: view.sort_by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterColumn {
    Priority,
    Overdue,
    DueWindow,
    Sort,
}

impl FilterColumn {
    pub(crate) const ALL: [Self; 4] = [
        FilterColumn::Priority,
        FilterColumn::Overdue,
        FilterColumn::DueWindow,
        FilterColumn::Sort,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            FilterColumn::Priority => 0,
            FilterColumn::Overdue => 1,
            FilterColumn::DueWindow => 2,
            FilterColumn::Sort => 3,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            FilterColumn::Priority => "Priority",
            FilterColumn::Overdue => "Overdue",
            FilterColumn::DueWindow => "Due window",
            FilterColumn::Sort => "Sort",
        }
    }
}

#[derive(Debug)]
pub(crate) struct FilterOverlay {
    pub(crate) working: FilterSelection,
    pub(crate) initial: FilterSelection,
    pub(crate) column: FilterColumn,
    pub(crate) row_positions: [usize; 4],
}

impl FilterOverlay {
    pub(crate) fn new(active: FilterSelection) -> Self {
        Self {
            working: active,
            initial: active,
            column: FilterColumn::Priority,
            row_positions: [0, 0, 0, 0],
        }
    }

    pub(crate) fn next_column(&mut self) {
        let next = (self.column.index() + 1) % FilterColumn::ALL.len();
        self.column = FilterColumn::ALL[next];
    }

    pub(crate) fn prev_column(&mut self) {
        let idx = self.column.index();
        let prev = if idx == 0 {
            FilterColumn::ALL.len() - 1
        } else {
            idx - 1
        };
        self.column = FilterColumn::ALL[prev];
    }

    pub(crate) fn next_row(&mut self) {
        let max = self.current_len().saturating_sub(1);
        let row = &mut self.row_positions[self.column.index()];
        if *row >= max {
            *row = 0;
        } else {
            *row += 1;
        }
    }

    pub(crate) fn prev_row(&mut self) {
        let max = self.current_len().saturating_sub(1);
        let row = &mut self.row_positions[self.column.index()];
        if *row == 0 {
            *row = max;
        } else {
            *row -= 1;
        }
    }

    /// Select the highlighted row's value in the working copy.
    pub(crate) fn toggle_current(&mut self) {
        let row = self.row_positions[self.column.index()];
        match self.column {
            FilterColumn::Priority => {
                self.working.priority = if row == 0 {
                    PriorityFilter::All
                } else {
                    match Priority::ALL.get(row - 1) {
                        Some(priority) => PriorityFilter::Only(*priority),
                        None => PriorityFilter::All,
                    }
                };
            }
            FilterColumn::Overdue => {
                self.working.overdue_only = row == 1;
            }
            FilterColumn::DueWindow => {
                self.working.window = DueWindow::ALL.get(row).copied().unwrap_or_default();
            }
            FilterColumn::Sort => {
                self.working.sort = SortMode::ALL.get(row).copied().unwrap_or_default();
            }
        }
    }

    pub(crate) fn clear_all(&mut self) {
        self.working = FilterSelection::default();
        self.row_positions = [0, 0, 0, 0];
    }

    pub(crate) fn cancel(self) -> FilterSelection {
        self.initial
    }

    pub(crate) fn commit(self) -> FilterSelection {
        self.working
    }

    pub(crate) fn current_len(&self) -> usize {
        match self.column {
            FilterColumn::Priority => 1 + Priority::ALL.len(),
            FilterColumn::Overdue => 2,
            FilterColumn::DueWindow => DueWindow::ALL.len(),
            FilterColumn::Sort => SortMode::ALL.len(),
        }
    }
}
