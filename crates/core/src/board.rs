//! The state holder driving the four derivation stages.
//!
//! `BoardState` owns the raw snapshot and the [`ViewState`] and keeps the
//! derived views current: every setter assigns and immediately rederives,
//! replacing the previous outputs wholesale. Loads carry a sequence number
//! so a slow response that arrives after a newer one is dropped instead of
//! overwriting fresher data.

use chrono::NaiveDate;

use crate::calendar::{self, DayCell};
use crate::model::{Task, TaskStats};
use crate::pipeline;
use crate::summary::{self, Upcoming};
use crate::view::{PriorityFilter, SortMode, StatusFilter, ViewMode, ViewState};

#[derive(Debug, Default)]
pub struct BoardState {
    tasks: Vec<Task>,
    view: ViewState,
    filtered: Vec<Task>,
    calendar_days: Vec<DayCell>,
    upcoming: Upcoming,
    stats: TaskStats,
    issued_seq: u64,
}

impl BoardState {
    pub fn new() -> Self {
        let mut board = Self {
            view: ViewState::new(),
            ..Self::default()
        };
        board.rederive();
        board
    }

    /// The raw snapshot as last applied.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn filtered(&self) -> &[Task] {
        &self.filtered
    }

    pub fn calendar_days(&self) -> &[DayCell] {
        &self.calendar_days
    }

    pub fn upcoming(&self) -> &Upcoming {
        &self.upcoming
    }

    pub fn stats(&self) -> TaskStats {
        self.stats
    }

    /// Issue a sequence number for a load about to start.
    pub fn begin_load(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Apply a completed load. Returns false (and changes nothing) when a
    /// newer load has been issued since `seq` — the stale response loses.
    pub fn apply_load(&mut self, seq: u64, tasks: Vec<Task>) -> bool {
        if seq != self.issued_seq {
            return false;
        }
        self.tasks = tasks;
        self.upcoming = summary::upcoming(&self.tasks);
        self.stats = summary::stats(&self.tasks);
        self.rederive();
        true
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.view.status_filter = filter;
        self.rederive();
    }

    pub fn set_search_term<T: Into<String>>(&mut self, term: T) {
        self.view.search_term = term.into();
        self.rederive();
    }

    pub fn set_priority_filter(&mut self, filter: PriorityFilter) {
        self.view.priority_filter = filter;
        self.rederive();
    }

    pub fn set_show_overdue_only(&mut self, on: bool) {
        self.view.show_overdue_only = on;
        self.rederive();
    }

    pub fn set_due_from(&mut self, from: Option<NaiveDate>) {
        self.view.due_from = from;
        self.rederive();
    }

    pub fn set_due_to(&mut self, to: Option<NaiveDate>) {
        self.view.due_to = to;
        self.rederive();
    }

    pub fn set_sort_by(&mut self, sort: SortMode) {
        self.view.sort_by = sort;
        self.rederive();
    }

    /// Switch between board and calendar. Entering calendar mode always
    /// rebuilds the grid, even when nothing else changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view.view_mode = mode;
        self.rederive();
        if mode == ViewMode::Calendar {
            self.rebuild_grid();
        }
    }

    pub fn clear_filters(&mut self) {
        self.view.clear_filters();
        self.rederive();
    }

    pub fn prev_month(&mut self) {
        self.view.prev_month();
        self.rebuild_grid();
    }

    pub fn next_month(&mut self) {
        self.view.next_month();
        self.rebuild_grid();
    }

    pub fn go_to_today(&mut self) {
        self.view.go_to_today();
        self.rebuild_grid();
    }

    /// Everything due on `date`, drawn from the raw snapshot. The grid shows
    /// the filtered sequence, but the drill-down deliberately bypasses the
    /// filters and lists every task due that day.
    pub fn day_detail(&self, date: NaiveDate) -> Vec<Task> {
        calendar::tasks_due_on(&self.tasks, date)
    }

    fn rederive(&mut self) {
        self.filtered = pipeline::apply(&self.tasks, &self.view);
        if self.view.view_mode == ViewMode::Calendar {
            self.rebuild_grid();
        }
    }

    fn rebuild_grid(&mut self) {
        self.calendar_days = calendar::build(
            self.view.calendar_year,
            self.view.calendar_month,
            &self.filtered,
        );
    }
}
